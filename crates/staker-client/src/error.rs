//! Error taxonomy for the client layer.
//!
//! Every failure here degrades to a visible but non-blocking state: reads
//! surface placeholders, writes re-enable their action and report through the
//! returned error. There is no fatal class at this layer.

use crate::composer::TxAction;

/// Errors from chain reads and transaction submission.
#[derive(Debug, thiserror::Error)]
pub enum StakerError {
    /// The wallet bridge could not be reached or timed out.
    #[error("bridge request failed: {0}")]
    Bridge(#[from] reqwest::Error),

    /// A contract value came back in a shape we could not decode.
    #[error("failed to decode contract value: {0}")]
    Decode(String),

    /// A write was attempted without a connected wallet.
    #[error("wallet not connected")]
    NotConnected,

    /// The parsed deposit amount was zero; the invest action is disabled.
    #[error("amount must parse to a positive base-unit integer")]
    ZeroAmount,

    /// The same action already has a submission outstanding.
    #[error("{action} already in flight")]
    Busy { action: TxAction },

    /// The wallet or the chain rejected a submitted transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The approval resolved but the follow-up investment call failed.
    ///
    /// Recognized terminal state of the two-phase invest sequence; no retry
    /// or rollback is performed.
    #[error("investment failed after approval {approval}: {reason}")]
    InvestFailedAfterApproval { approval: String, reason: String },
}
