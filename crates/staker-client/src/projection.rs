//! Read projection: raw contract values to display-ready state.
//!
//! Reads flow one direction (chain -> projection -> view). Every read is
//! tagged with an explicit [`Readout`] state so independent dashboard
//! sections render, load, and fail independently; a failed read never blocks
//! a sibling. Address-scoped reads substitute the zero address while the
//! wallet is disconnected so global stats still resolve.

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;

use crate::abi;
use crate::address::Address;
use crate::capability::{address_arg, small_arg, uint_arg, PreparedCall, WalletCapability};
use crate::config::ChainConfig;
use crate::error::StakerError;
use crate::types::{Deposit, PlanInfo, ProjectedResult, UserAccountSnapshot, PLAN_COUNT};
use crate::units::{self, TOKEN_DECIMALS};
use crate::util::time_source::{SystemTimeSource, TimeSource};

// =============================================================================
// Readout
// =============================================================================

/// Explicit state tag for a reactive read.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Readout<T> {
    /// Inputs changed since this value was computed.
    Stale,
    /// A fetch is in flight and no value has arrived yet.
    #[default]
    Loading,
    Ready(T),
    /// The fetch failed; the view shows a neutral placeholder.
    Failed,
}

impl<T> Readout<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Readout::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readout::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Readout<U> {
        match self {
            Readout::Ready(value) => Readout::Ready(f(value)),
            Readout::Stale => Readout::Stale,
            Readout::Loading => Readout::Loading,
            Readout::Failed => Readout::Failed,
        }
    }
}

/// Tag a read result, logging the failure it absorbs.
fn readout<T>(read: &'static str, result: Result<T, StakerError>) -> Readout<T> {
    match result {
        Ok(value) => Readout::Ready(value),
        Err(error) => {
            tracing::warn!(read, error = %error, "contract read failed");
            Readout::Failed
        }
    }
}

// =============================================================================
// Dashboard snapshot
// =============================================================================

/// One consistent-enough view of everything the dashboard renders.
///
/// Each slice carries its own state; any interleaving of the underlying
/// concurrent reads is tolerated.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub wallet: Option<Address>,
    /// Total staked, converted for display.
    pub total_staked: Readout<f64>,
    pub total_users: Readout<u64>,
    /// Minimum invest amount in base units.
    pub invest_min: Readout<u128>,
    pub plan: Readout<PlanInfo>,
    pub projected: Readout<ProjectedResult>,
    pub deposits: Readout<Vec<Deposit>>,
    pub account: Readout<UserAccountSnapshot>,
    /// Unix time the snapshot was taken.
    pub taken_at: u64,
}

impl DashboardSnapshot {
    /// All slices still loading; the worker's initial published state.
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn has_failures(&self) -> bool {
        matches!(self.total_staked, Readout::Failed)
            || matches!(self.total_users, Readout::Failed)
            || matches!(self.invest_min, Readout::Failed)
            || matches!(self.plan, Readout::Failed)
            || matches!(self.projected, Readout::Failed)
            || matches!(self.deposits, Readout::Failed)
            || matches!(self.account, Readout::Failed)
    }
}

// =============================================================================
// StakerReader
// =============================================================================

/// Read-side client for the staking contract.
pub struct StakerReader {
    wallet: Arc<dyn WalletCapability>,
    config: ChainConfig,
    time_source: Arc<dyn TimeSource>,
}

impl StakerReader {
    pub fn new(wallet: Arc<dyn WalletCapability>, config: ChainConfig) -> Self {
        Self::with_time_source(wallet, config, Arc::new(SystemTimeSource))
    }

    pub fn with_time_source(
        wallet: Arc<dyn WalletCapability>,
        config: ChainConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            wallet,
            config,
            time_source,
        }
    }

    /// The address user-scoped reads are issued for.
    ///
    /// Disconnected wallets read as the zero address instead of skipping the
    /// call.
    fn user_address(&self) -> Address {
        self.wallet.active_address().unwrap_or(Address::ZERO)
    }

    async fn read_staker(&self, function: &str, args: Vec<Value>) -> Result<Value, StakerError> {
        self.wallet
            .read_contract(PreparedCall::new(self.config.staker, function, args))
            .await
    }

    pub async fn total_staked(&self) -> Result<u128, StakerError> {
        let value = self.read_staker(abi::staker::TOTAL_STAKED, vec![]).await?;
        crate::types::decode_uint(&value)
    }

    pub async fn total_users(&self) -> Result<u64, StakerError> {
        let value = self.read_staker(abi::staker::TOTAL_USERS, vec![]).await?;
        crate::types::decode_uint64(&value)
    }

    pub async fn contract_balance(&self) -> Result<u128, StakerError> {
        let value = self
            .read_staker(abi::staker::CONTRACT_BALANCE, vec![])
            .await?;
        crate::types::decode_uint(&value)
    }

    pub async fn invest_min_amount(&self) -> Result<u128, StakerError> {
        let value = self
            .read_staker(abi::staker::INVEST_MIN_AMOUNT, vec![])
            .await?;
        crate::types::decode_uint(&value)
    }

    pub async fn plan_info(&self, plan: u8) -> Result<PlanInfo, StakerError> {
        let value = self
            .read_staker(abi::staker::GET_PLAN_INFO, vec![small_arg(plan)])
            .await?;
        PlanInfo::from_value(&value)
    }

    /// All plan configurations, fetched concurrently.
    pub async fn all_plans(&self) -> Result<Vec<PlanInfo>, StakerError> {
        try_join_all((0..PLAN_COUNT).map(|plan| self.plan_info(plan))).await
    }

    /// Contract-evaluated projection for a hypothetical deposit.
    pub async fn projected_result(
        &self,
        plan: u8,
        amount: u128,
    ) -> Result<ProjectedResult, StakerError> {
        let value = self
            .read_staker(
                abi::staker::GET_RESULT,
                vec![small_arg(plan), uint_arg(amount)],
            )
            .await?;
        ProjectedResult::from_value(&value)
    }

    pub async fn user_deposits(&self) -> Result<Vec<Deposit>, StakerError> {
        let address = self.user_address();
        let value = self
            .read_staker(abi::staker::GET_USER_DEPOSITS, vec![address_arg(address)])
            .await?;
        Deposit::list_from_value(&value)
    }

    /// Per-user aggregate: three reads joined, recomputed per cycle.
    pub async fn user_account(&self) -> Result<UserAccountSnapshot, StakerError> {
        let address = self.user_address();
        let (available, referral_bonus, deposit_count) = tokio::try_join!(
            async {
                let v = self
                    .read_staker(abi::staker::GET_USER_AVAILABLE, vec![address_arg(address)])
                    .await?;
                crate::types::decode_uint(&v)
            },
            async {
                let v = self
                    .read_staker(
                        abi::staker::GET_USER_REFERRAL_BONUS,
                        vec![address_arg(address)],
                    )
                    .await?;
                crate::types::decode_uint(&v)
            },
            async {
                let v = self
                    .read_staker(
                        abi::staker::GET_USER_AMOUNT_OF_DEPOSITS,
                        vec![address_arg(address)],
                    )
                    .await?;
                crate::types::decode_uint64(&v)
            },
        )?;
        Ok(UserAccountSnapshot {
            available,
            referral_bonus,
            deposit_count,
        })
    }

    /// Take a full dashboard snapshot for (plan, candidate amount input).
    ///
    /// All reads are issued concurrently; completions may interleave in any
    /// order and each slice fails independently.
    pub async fn snapshot(&self, plan: u8, amount_input: &str) -> DashboardSnapshot {
        let amount = units::parse_units(amount_input, TOKEN_DECIMALS);

        let (total_staked, total_users, invest_min, plan_info, projected, deposits, account) = tokio::join!(
            self.total_staked(),
            self.total_users(),
            self.invest_min_amount(),
            self.plan_info(plan),
            self.projected_result(plan, amount),
            self.user_deposits(),
            self.user_account(),
        );

        DashboardSnapshot {
            wallet: self.wallet.active_address(),
            total_staked: readout("totalStaked", total_staked)
                .map(|raw| units::format_units(raw, TOKEN_DECIMALS)),
            total_users: readout("totalUsers", total_users),
            invest_min: readout("investMinAmount", invest_min),
            plan: readout("planInfo", plan_info),
            projected: readout("projectedResult", projected),
            deposits: readout("userDeposits", deposits),
            account: readout("userAccount", account),
            taken_at: self.time_source.now_unix(),
        }
    }
}
