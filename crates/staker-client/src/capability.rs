//! Wallet/chain capability: the opaque seam through which all reads and
//! transaction submissions flow.
//!
//! The capability never exposes signing material to this layer. Production
//! traffic goes through a local wallet-bridge HTTP endpoint; tests use a
//! recording mock with programmable responses.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Address;
use crate::config::ChainConfig;
use crate::error::StakerError;

// =============================================================================
// Prepared calls
// =============================================================================

/// An opaque prepared request: target contract, function signature, and
/// JSON-encoded arguments. Built once, then handed to the capability.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PreparedCall {
    pub contract: Address,
    pub function: String,
    pub args: Vec<Value>,
}

impl PreparedCall {
    pub fn new(contract: Address, function: &str, args: Vec<Value>) -> Self {
        Self {
            contract,
            function: function.to_string(),
            args,
        }
    }
}

/// Encode a base-unit amount (or any uint256-wide value) as a hex quantity.
pub fn uint_arg(value: u128) -> Value {
    Value::String(format!("0x{value:x}"))
}

/// Encode an account address argument.
pub fn address_arg(address: Address) -> Value {
    Value::String(address.to_string())
}

/// Encode a small integer argument (plan indices and the like).
pub fn small_arg(value: u8) -> Value {
    Value::from(value)
}

/// Receipt for a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: String,
}

// =============================================================================
// Trait: WalletCapability
// =============================================================================

/// Abstraction over wallet connectivity and signing.
///
/// Submissions are fire-and-forget from this layer's perspective: once a
/// call is handed over there is no cancellation, and timeout policy belongs
/// to the implementation.
pub trait WalletCapability: Send + Sync + 'static {
    /// The connected account, if any. Treated as read-only global context.
    fn active_address(&self) -> Option<Address>;

    /// Execute a read-only contract call and return its decoded JSON value.
    fn read_contract(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<Value, StakerError>> + Send + '_>>;

    /// Sign and submit a state-changing call, resolving with its receipt.
    fn send_transaction(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<TxReceipt, StakerError>> + Send + '_>>;
}

// =============================================================================
// Production: HttpWalletBridge
// =============================================================================

#[derive(Deserialize)]
struct BridgeValueResponse {
    ok: bool,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct BridgeSendResponse {
    ok: bool,
    #[serde(default)]
    tx_hash: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct BridgeAccountResponse {
    #[serde(default)]
    address: Option<Address>,
}

/// Wallet bridge speaking JSON over HTTP to a local signing host.
///
/// The host owns ABI encoding, key custody, and user confirmation prompts;
/// this side only ships prepared calls and interprets the outcome.
pub struct HttpWalletBridge {
    client: reqwest::Client,
    base_url: String,
    account: parking_lot::RwLock<Option<Address>>,
}

impl HttpWalletBridge {
    pub fn new(config: &ChainConfig) -> Result<Self, StakerError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(StakerError::Bridge)?;
        Ok(Self {
            client,
            base_url: config.bridge_url.trim_end_matches('/').to_string(),
            account: parking_lot::RwLock::new(None),
        })
    }

    /// Refresh the connected account from the bridge.
    ///
    /// Returns the current account; `None` means the user has not connected
    /// a wallet, which is a valid state (global stats still render).
    pub async fn connect(&self) -> Result<Option<Address>, StakerError> {
        let response: BridgeAccountResponse = self
            .client
            .get(format!("{}/account", self.base_url))
            .send()
            .await?
            .json()
            .await?;
        *self.account.write() = response.address;
        match response.address {
            Some(address) => tracing::info!(%address, "wallet connected"),
            None => tracing::info!("no wallet connected"),
        }
        Ok(response.address)
    }
}

impl WalletCapability for HttpWalletBridge {
    fn active_address(&self) -> Option<Address> {
        *self.account.read()
    }

    fn read_contract(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<Value, StakerError>> + Send + '_>> {
        Box::pin(async move {
            let response: BridgeValueResponse = self
                .client
                .post(format!("{}/read", self.base_url))
                .json(&call)
                .send()
                .await?
                .json()
                .await?;
            if response.ok {
                Ok(response.value)
            } else {
                Err(StakerError::Decode(
                    response.error.unwrap_or_else(|| "bridge read failed".to_string()),
                ))
            }
        })
    }

    fn send_transaction(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<TxReceipt, StakerError>> + Send + '_>> {
        Box::pin(async move {
            tracing::info!(function = %call.function, contract = %call.contract, "submitting transaction");
            let response: BridgeSendResponse = self
                .client
                .post(format!("{}/send", self.base_url))
                .json(&call)
                .send()
                .await?
                .json()
                .await?;
            match (response.ok, response.tx_hash) {
                (true, Some(tx_hash)) => Ok(TxReceipt { tx_hash }),
                _ => Err(StakerError::Rejected(
                    response
                        .error
                        .unwrap_or_else(|| "transaction rejected".to_string()),
                )),
            }
        })
    }
}

// =============================================================================
// Mock: MockWallet (test / testing feature)
// =============================================================================

/// What a recorded capability call was.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Send,
}

#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub kind: CallKind,
    pub call: PreparedCall,
}

/// Recording wallet with programmable responses and failures.
#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
pub struct MockWallet {
    address: parking_lot::Mutex<Option<Address>>,
    reads: parking_lot::Mutex<std::collections::HashMap<String, Value>>,
    failing_reads: parking_lot::Mutex<std::collections::HashSet<String>>,
    failing_sends: parking_lot::Mutex<std::collections::HashSet<String>>,
    log: parking_lot::Mutex<Vec<CallRecord>>,
    tx_counter: parking_lot::Mutex<u64>,
}

#[cfg(any(test, feature = "testing"))]
impl MockWallet {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: Address) -> Self {
        let wallet = Self::default();
        *wallet.address.lock() = Some(address);
        wallet
    }

    pub fn set_address(&self, address: Option<Address>) {
        *self.address.lock() = address;
    }

    /// Stub the value a read of `function` resolves with.
    pub fn set_read(&self, function: &str, value: Value) {
        self.reads.lock().insert(function.to_string(), value);
    }

    /// Make reads of `function` fail until re-stubbed.
    pub fn fail_read(&self, function: &str) {
        self.reads.lock().remove(function);
        self.failing_reads.lock().insert(function.to_string());
    }

    /// Make submissions of `function` hit the failure callback.
    pub fn fail_send(&self, function: &str) {
        self.failing_sends.lock().insert(function.to_string());
    }

    pub fn call_log(&self) -> Vec<CallRecord> {
        self.log.lock().clone()
    }

    /// Function signatures of submitted transactions, in submission order.
    pub fn sent_functions(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .filter(|r| r.kind == CallKind::Send)
            .map(|r| r.call.function.clone())
            .collect()
    }

    /// The recorded submission of `function`, if any.
    pub fn sent_call(&self, function: &str) -> Option<PreparedCall> {
        self.log
            .lock()
            .iter()
            .find(|r| r.kind == CallKind::Send && r.call.function == function)
            .map(|r| r.call.clone())
    }
}

#[cfg(any(test, feature = "testing"))]
impl WalletCapability for MockWallet {
    fn active_address(&self) -> Option<Address> {
        *self.address.lock()
    }

    fn read_contract(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<Value, StakerError>> + Send + '_>> {
        self.log.lock().push(CallRecord {
            kind: CallKind::Read,
            call: call.clone(),
        });
        let failing = self.failing_reads.lock().contains(&call.function);
        let value = self.reads.lock().get(&call.function).cloned();
        Box::pin(async move {
            if failing {
                return Err(StakerError::Decode(format!(
                    "mock read failure for {}",
                    call.function
                )));
            }
            value.ok_or_else(|| {
                StakerError::Decode(format!("no mock value for {}", call.function))
            })
        })
    }

    fn send_transaction(
        &self,
        call: PreparedCall,
    ) -> Pin<Box<dyn Future<Output = Result<TxReceipt, StakerError>> + Send + '_>> {
        self.log.lock().push(CallRecord {
            kind: CallKind::Send,
            call: call.clone(),
        });
        let failing = self.failing_sends.lock().contains(&call.function);
        let tx_hash = {
            let mut counter = self.tx_counter.lock();
            *counter += 1;
            format!("0x{:064x}", *counter)
        };
        Box::pin(async move {
            if failing {
                return Err(StakerError::Rejected(format!(
                    "mock rejection of {}",
                    call.function
                )));
            }
            Ok(TxReceipt { tx_hash })
        })
    }
}
