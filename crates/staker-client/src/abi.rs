//! Function signatures of the two fixed contract surfaces.
//!
//! Signatures are handed to the wallet capability verbatim; the signing host
//! owns selector hashing and argument encoding.

/// Staking contract surface.
pub mod staker {
    pub const TOTAL_STAKED: &str = "totalStaked()";
    pub const TOTAL_USERS: &str = "totalUsers()";
    pub const CONTRACT_BALANCE: &str = "getContractBalance()";
    pub const INVEST_MIN_AMOUNT: &str = "INVEST_MIN_AMOUNT()";
    pub const GET_PLAN_INFO: &str = "getPlanInfo(uint8)";
    pub const GET_RESULT: &str = "getResult(uint8,uint256)";
    pub const GET_USER_DEPOSITS: &str = "getUserDeposits(address)";
    pub const GET_USER_AVAILABLE: &str = "getUserAvailable(address)";
    pub const GET_USER_REFERRAL_BONUS: &str = "getUserReferralBonus(address)";
    pub const GET_USER_AMOUNT_OF_DEPOSITS: &str = "getUserAmountOfDeposits(address)";
    pub const INVEST: &str = "invest(address,uint8,uint256)";
    pub const WITHDRAW: &str = "withdraw()";
    pub const SNOOZE_ALL: &str = "snoozeAll(uint256)";
    pub const SNOOZE_AT: &str = "snoozeAt(uint256,uint256)";
}

/// Token contract surface.
pub mod token {
    pub const APPROVE: &str = "approve(address,uint256)";
}
