//! Transaction composition and submission sequencing.
//!
//! Writes flow one direction (view -> composer -> chain). The composer
//! builds prepared calls and hands them to the wallet capability; it never
//! executes anything itself. The two-phase invest sequence is the one
//! explicit ordering constraint in the system: approval first, investment
//! only after the approval resolves. Submitted transactions cannot be
//! cancelled from this layer.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::abi;
use crate::address::sanitize_referrer;
use crate::capability::{
    address_arg, small_arg, uint_arg, PreparedCall, TxReceipt, WalletCapability,
};
use crate::config::ChainConfig;
use crate::error::StakerError;
use crate::units::{self, TOKEN_DECIMALS};

// =============================================================================
// Single-flight gate
// =============================================================================

/// The write operations the dashboard can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxAction {
    Invest,
    Withdraw,
    SnoozeAll,
    SnoozeAt,
}

impl fmt::Display for TxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxAction::Invest => "invest",
            TxAction::Withdraw => "withdraw",
            TxAction::SnoozeAll => "snooze-all",
            TxAction::SnoozeAt => "snooze-at",
        };
        f.write_str(name)
    }
}

/// Per-action single-flight: while a submission is outstanding, re-entering
/// the same action is rejected. Distinct actions stay independent.
struct ActionGate {
    in_flight: Mutex<HashSet<TxAction>>,
}

impl ActionGate {
    fn new() -> Self {
        Self {
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn try_begin(&self, action: TxAction) -> Result<ActionGuard<'_>, StakerError> {
        if !self.in_flight.lock().insert(action) {
            return Err(StakerError::Busy { action });
        }
        Ok(ActionGuard { gate: self, action })
    }
}

/// Releases the action slot on drop, success or failure alike.
struct ActionGuard<'a> {
    gate: &'a ActionGate,
    action: TxAction,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.gate.in_flight.lock().remove(&self.action);
    }
}

// =============================================================================
// Composer
// =============================================================================

/// Outcome of a completed two-phase invest sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestReceipt {
    pub approval: String,
    pub investment: String,
}

/// Write-side client for the staking contract.
pub struct TxComposer {
    wallet: Arc<dyn WalletCapability>,
    config: ChainConfig,
    gate: ActionGate,
}

impl TxComposer {
    pub fn new(wallet: Arc<dyn WalletCapability>, config: ChainConfig) -> Self {
        Self {
            wallet,
            config,
            gate: ActionGate::new(),
        }
    }

    fn connected(&self) -> Result<crate::address::Address, StakerError> {
        self.wallet.active_address().ok_or(StakerError::NotConnected)
    }

    /// Two-phase invest: approve the staker to move `amount` tokens, then
    /// invest.
    ///
    /// The investment call is issued only after the approval resolves
    /// successfully; approval failure short-circuits. Approval success
    /// followed by investment failure is an allowed terminal state, reported
    /// as [`StakerError::InvestFailedAfterApproval`] with no rollback.
    pub async fn invest(
        &self,
        plan: u8,
        amount_input: &str,
        referrer_input: &str,
    ) -> Result<InvestReceipt, StakerError> {
        let investor = self.connected()?;
        let amount = units::parse_units(amount_input, TOKEN_DECIMALS);
        if amount == 0 {
            return Err(StakerError::ZeroAmount);
        }
        let _guard = self.gate.try_begin(TxAction::Invest)?;

        let referrer = sanitize_referrer(referrer_input);
        tracing::info!(%investor, plan, amount, %referrer, "starting invest sequence");

        let approve = PreparedCall::new(
            self.config.token,
            abi::token::APPROVE,
            vec![address_arg(self.config.staker), uint_arg(amount)],
        );
        let approval = self.wallet.send_transaction(approve).await?;
        tracing::info!(tx = %approval.tx_hash, "approval confirmed");

        let invest = PreparedCall::new(
            self.config.staker,
            abi::staker::INVEST,
            vec![address_arg(referrer), small_arg(plan), uint_arg(amount)],
        );
        match self.wallet.send_transaction(invest).await {
            Ok(investment) => {
                tracing::info!(tx = %investment.tx_hash, "investment confirmed");
                Ok(InvestReceipt {
                    approval: approval.tx_hash,
                    investment: investment.tx_hash,
                })
            }
            Err(error) => {
                tracing::warn!(
                    approval = %approval.tx_hash,
                    error = %error,
                    "investment failed after approval"
                );
                Err(StakerError::InvestFailedAfterApproval {
                    approval: approval.tx_hash,
                    reason: error.to_string(),
                })
            }
        }
    }

    /// Withdraw matured funds; payout and tax are decided contract-side.
    pub async fn withdraw(&self) -> Result<TxReceipt, StakerError> {
        self.connected()?;
        let _guard = self.gate.try_begin(TxAction::Withdraw)?;
        let call = PreparedCall::new(self.config.staker, abi::staker::WITHDRAW, vec![]);
        self.wallet.send_transaction(call).await
    }

    /// Extend every open deposit's lock by `days_input` days (malformed
    /// input coerces to 1).
    pub async fn snooze_all(&self, days_input: &str) -> Result<TxReceipt, StakerError> {
        self.connected()?;
        let days = units::parse_days(days_input);
        let _guard = self.gate.try_begin(TxAction::SnoozeAll)?;
        let call = PreparedCall::new(
            self.config.staker,
            abi::staker::SNOOZE_ALL,
            vec![uint_arg(u128::from(days))],
        );
        self.wallet.send_transaction(call).await
    }

    /// Extend one deposit's lock (malformed index coerces to 0).
    pub async fn snooze_at(
        &self,
        index_input: &str,
        days_input: &str,
    ) -> Result<TxReceipt, StakerError> {
        self.connected()?;
        let index = units::parse_index(index_input);
        let days = units::parse_days(days_input);
        let _guard = self.gate.try_begin(TxAction::SnoozeAt)?;
        let call = PreparedCall::new(
            self.config.staker,
            abi::staker::SNOOZE_AT,
            vec![uint_arg(u128::from(index)), uint_arg(u128::from(days))],
        );
        self.wallet.send_transaction(call).await
    }
}
