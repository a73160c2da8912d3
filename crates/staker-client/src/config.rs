//! Network and contract-handle configuration.
//!
//! One fixed network and two fixed contract addresses; the environment can
//! override endpoints and addresses for test deployments, falling back to
//! the mainnet defaults on malformed input.

use std::time::Duration;

use crate::address::Address;

/// Base mainnet.
pub const CHAIN_ID: u64 = 8453;

/// The staking contract.
pub const STAKER_ADDRESS: Address = Address::from_bytes([
    0x62, 0xce, 0xcf, 0xcd, 0xcf, 0x33, 0x27, 0xb8, 0xf3, 0xe7, 0xea, 0xd9, 0x50, 0x3a, 0x02,
    0x10, 0x3e, 0xcb, 0x45, 0x27,
]);

/// The staked ERC-20 token.
pub const TOKEN_ADDRESS: Address = Address::from_bytes([
    0x4e, 0xd4, 0xe8, 0x62, 0x86, 0x0b, 0xed, 0x51, 0xa9, 0x57, 0x0b, 0x96, 0xd8, 0x9a, 0xf5,
    0xe1, 0xb0, 0xef, 0xef, 0xed,
]);

/// Client configuration: chain identity, wallet-bridge endpoint, contract
/// handles, and refresh cadence.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub chain_id: u64,
    /// Wallet-bridge endpoint URL.
    pub bridge_url: String,
    pub staker: Address,
    pub token: Address,
    /// How often the refresh worker re-reads the dashboard snapshot.
    pub poll_interval: Duration,
    /// HTTP request timeout for bridge calls.
    pub http_timeout: Duration,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: CHAIN_ID,
            bridge_url: "http://127.0.0.1:9823".to_string(),
            staker: STAKER_ADDRESS,
            token: TOKEN_ADDRESS,
            poll_interval: Duration::from_secs(15),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl ChainConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("STAKER_BRIDGE_URL") {
            if !url.trim().is_empty() {
                config.bridge_url = url.trim().to_string();
            }
        }
        if let Ok(addr) = std::env::var("STAKER_CONTRACT_ADDRESS") {
            match Address::parse(addr.trim()) {
                Some(parsed) => config.staker = parsed,
                None => tracing::warn!(
                    input = addr,
                    "STAKER_CONTRACT_ADDRESS must be 0x + 40 hex digits, keeping default"
                ),
            }
        }
        if let Ok(addr) = std::env::var("STAKER_TOKEN_ADDRESS") {
            match Address::parse(addr.trim()) {
                Some(parsed) => config.token = parsed,
                None => tracing::warn!(
                    input = addr,
                    "STAKER_TOKEN_ADDRESS must be 0x + 40 hex digits, keeping default"
                ),
            }
        }
        if let Ok(secs) = std::env::var("STAKER_POLL_INTERVAL_SECS") {
            if let Ok(v) = secs.trim().parse::<u64>() {
                config.poll_interval = Duration::from_secs(v);
            }
        }
        if let Ok(secs) = std::env::var("STAKER_HTTP_TIMEOUT_SECS") {
            if let Ok(v) = secs.trim().parse::<u64>() {
                config.http_timeout = Duration::from_secs(v);
            }
        }

        config
    }
}
