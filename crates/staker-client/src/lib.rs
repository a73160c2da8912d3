//! Client core for a time-locked token staking dashboard.
//!
//! All staking business logic lives in the external staking contract; this
//! crate reads contract state and submits transactions through an opaque
//! wallet capability. It owns:
//!
//! - read projection from on-chain base units to display values
//!   ([`projection`], [`units`]),
//! - transaction composition with strict approve-then-invest sequencing and
//!   per-action single-flight ([`composer`]),
//! - countdown and maturity derivation for deposits ([`countdown`]),
//! - projected-profit smoothing across refetch gaps ([`smoothing`]),
//! - the background refresh loop ([`worker`]) and the presentational render
//!   model ([`view`]),
//! - the persisted theme preference ([`theme`]).
//!
//! Reads flow chain -> projection -> view; writes flow view -> composer ->
//! chain. The wallet capability ([`capability::WalletCapability`]) is the
//! only seam to the outside world.

pub mod abi;
pub mod address;
pub mod capability;
pub mod composer;
pub mod config;
pub mod countdown;
pub mod error;
pub mod projection;
pub mod smoothing;
pub mod theme;
pub mod types;
pub mod units;
pub mod util;
pub mod view;
pub mod worker;

pub use address::{sanitize_referrer, Address};
pub use capability::{HttpWalletBridge, PreparedCall, TxReceipt, WalletCapability};
pub use composer::{InvestReceipt, TxAction, TxComposer};
pub use config::ChainConfig;
pub use countdown::DepositPhase;
pub use error::StakerError;
pub use projection::{DashboardSnapshot, Readout, StakerReader};
pub use smoothing::ProfitDisplay;
pub use theme::{Theme, ThemeStore};
pub use types::{Deposit, PlanInfo, ProjectedResult, UserAccountSnapshot};
pub use view::{render, DashboardView};
pub use worker::{DashboardInputs, RefreshWorker};
