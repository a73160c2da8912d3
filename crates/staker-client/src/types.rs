//! On-chain value snapshots and their decoding.
//!
//! All entities here are read-only snapshots owned by the chain; the client
//! never mutates them, it only requests the chain to mutate itself. Values
//! arrive from the wallet bridge as JSON: integers either as plain numbers
//! or as 0x-prefixed hex quantity strings (the bridge's wire form for values
//! wider than 53 bits).

use serde_json::Value;

use crate::error::StakerError;

/// Number of plan configurations offered by the staking contract.
pub const PLAN_COUNT: u8 = 3;

/// The featured plan rendered on the dashboard card.
pub const GROWTH_PLAN: u8 = 1;

/// Immutable (lock duration, daily rate) configuration per plan index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanInfo {
    pub lock_days: u64,
    /// Daily rate in per-mille; daily percent = per-mille / 10.
    pub daily_rate_per_mille: u64,
}

impl PlanInfo {
    pub fn daily_percent(&self) -> f64 {
        self.daily_rate_per_mille as f64 / 10.0
    }

    /// Decode the `(lockDays, dailyRatePerMille)` tuple.
    pub fn from_value(value: &Value) -> Result<PlanInfo, StakerError> {
        Ok(PlanInfo {
            lock_days: decode_uint64(tuple_field(value, 0, "time")?)?,
            daily_rate_per_mille: decode_uint64(tuple_field(value, 1, "percent")?)?,
        })
    }
}

/// Contract-evaluated projection for a hypothetical deposit.
///
/// Transient: recomputed on every amount change, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedResult {
    pub final_amount: u128,
    pub profit: u128,
    pub finish: u64,
    pub tax: u128,
}

impl ProjectedResult {
    pub fn from_value(value: &Value) -> Result<ProjectedResult, StakerError> {
        Ok(ProjectedResult {
            final_amount: decode_uint(tuple_field(value, 0, "finalAmount")?)?,
            profit: decode_uint(tuple_field(value, 1, "profit")?)?,
            finish: decode_uint64(tuple_field(value, 2, "finish")?)?,
            tax: decode_uint(tuple_field(value, 3, "tax")?)?,
        })
    }
}

/// One time-locked deposit held by a user.
///
/// Users hold an ordered collection of these (chain storage order). Created
/// by invest, `finish` extended in place by snooze, removed by withdraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    pub plan: u8,
    pub percent: u64,
    pub amount: u128,
    pub profit: u128,
    pub start: u64,
    pub finish: u64,
    pub tax: u128,
}

impl Deposit {
    pub fn from_value(value: &Value) -> Result<Deposit, StakerError> {
        Ok(Deposit {
            plan: u8::try_from(decode_uint64(tuple_field(value, 0, "plan")?)?)
                .map_err(|_| StakerError::Decode("plan index out of range".into()))?,
            percent: decode_uint64(tuple_field(value, 1, "percent")?)?,
            amount: decode_uint(tuple_field(value, 2, "amount")?)?,
            profit: decode_uint(tuple_field(value, 3, "profit")?)?,
            start: decode_uint64(tuple_field(value, 4, "start")?)?,
            finish: decode_uint64(tuple_field(value, 5, "finish")?)?,
            tax: decode_uint(tuple_field(value, 6, "tax")?)?,
        })
    }

    /// Decode the full deposit sequence returned by `getUserDeposits`.
    pub fn list_from_value(value: &Value) -> Result<Vec<Deposit>, StakerError> {
        let entries = value
            .as_array()
            .ok_or_else(|| StakerError::Decode("deposit list is not an array".into()))?;
        entries.iter().map(Deposit::from_value).collect()
    }
}

/// Derived per-user aggregate, recomputed on each read cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserAccountSnapshot {
    pub available: u128,
    pub referral_bonus: u128,
    pub deposit_count: u64,
}

/// Decode an unsigned integer from the bridge's JSON forms: a plain number,
/// a decimal string, or a 0x-prefixed hex quantity string.
pub fn decode_uint(value: &Value) -> Result<u128, StakerError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| StakerError::Decode(format!("not an unsigned integer: {n}"))),
        Value::String(s) => {
            let t = s.trim();
            if let Some(hex_digits) = t.strip_prefix("0x") {
                u128::from_str_radix(hex_digits, 16)
                    .map_err(|e| StakerError::Decode(format!("bad hex quantity {t}: {e}")))
            } else {
                t.parse::<u128>()
                    .map_err(|e| StakerError::Decode(format!("bad decimal quantity {t}: {e}")))
            }
        }
        other => Err(StakerError::Decode(format!(
            "expected integer, got {other}"
        ))),
    }
}

/// As [`decode_uint`], narrowed to u64 (timestamps, counters, day counts).
pub fn decode_uint64(value: &Value) -> Result<u64, StakerError> {
    let wide = decode_uint(value)?;
    u64::try_from(wide).map_err(|_| StakerError::Decode(format!("value too wide for u64: {wide}")))
}

/// Pick a field from a contract tuple, which the bridge may deliver either
/// positionally (JSON array) or by name (JSON object).
fn tuple_field<'a>(value: &'a Value, index: usize, name: &str) -> Result<&'a Value, StakerError> {
    match value {
        Value::Array(items) => items.get(index).ok_or_else(|| {
            StakerError::Decode(format!("tuple missing field {index} ({name})"))
        }),
        Value::Object(map) => map
            .get(name)
            .ok_or_else(|| StakerError::Decode(format!("tuple missing field {name}"))),
        other => Err(StakerError::Decode(format!(
            "expected tuple, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_uint_forms() {
        assert_eq!(decode_uint(&json!(42)).unwrap(), 42);
        assert_eq!(decode_uint(&json!("42")).unwrap(), 42);
        assert_eq!(decode_uint(&json!("0x2a")).unwrap(), 42);
        // Full 18-decimal amounts exceed u64 and arrive as hex strings
        assert_eq!(
            decode_uint(&json!("0xde0b6b3a7640000")).unwrap(),
            1_000_000_000_000_000_000
        );
        assert!(decode_uint(&json!(-1)).is_err());
        assert!(decode_uint(&json!(1.5)).is_err());
        assert!(decode_uint(&json!("0xzz")).is_err());
        assert!(decode_uint(&json!(null)).is_err());
        assert!(decode_uint(&json!([1])).is_err());
    }

    #[test]
    fn test_decode_uint64_rejects_wide_values() {
        assert!(decode_uint64(&json!("0xffffffffffffffffff")).is_err());
        assert_eq!(decode_uint64(&json!("0xff")).unwrap(), 255);
    }

    #[test]
    fn test_plan_info_from_tuple() {
        let plan = PlanInfo::from_value(&json!([14, 15])).unwrap();
        assert_eq!(plan.lock_days, 14);
        assert_eq!(plan.daily_rate_per_mille, 15);
        assert!((plan.daily_percent() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_projected_result_from_tuple() {
        let r = ProjectedResult::from_value(&json!(["0xde0b6b3a7640000", "0x2a", 1_700_000_000u64, 0]))
            .unwrap();
        assert_eq!(r.final_amount, 1_000_000_000_000_000_000);
        assert_eq!(r.profit, 42);
        assert_eq!(r.finish, 1_700_000_000);
        assert_eq!(r.tax, 0);
    }

    #[test]
    fn test_deposit_from_array_and_object() {
        let from_array =
            Deposit::from_value(&json!([1, 15, "0x64", "0x0a", 100, 200, 0])).unwrap();
        let from_object = Deposit::from_value(&json!({
            "plan": 1,
            "percent": 15,
            "amount": "0x64",
            "profit": "0x0a",
            "start": 100,
            "finish": 200,
            "tax": 0,
        }))
        .unwrap();
        assert_eq!(from_array, from_object);
        assert_eq!(from_array.amount, 100);
        assert_eq!(from_array.profit, 10);
    }

    #[test]
    fn test_deposit_list_preserves_order() {
        let list = Deposit::list_from_value(&json!([
            [0, 10, 1, 0, 1, 10, 0],
            [1, 15, 2, 0, 2, 20, 0],
            [2, 20, 3, 0, 3, 30, 0],
        ]))
        .unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].plan, 0);
        assert_eq!(list[2].finish, 30);
    }

    #[test]
    fn test_deposit_list_rejects_non_array() {
        assert!(Deposit::list_from_value(&json!({"deposits": []})).is_err());
        assert!(Deposit::list_from_value(&json!("nope")).is_err());
    }

    #[test]
    fn test_malformed_tuple_fails_soft() {
        // Too-short tuple is an error, not a panic
        assert!(PlanInfo::from_value(&json!([14])).is_err());
        assert!(Deposit::from_value(&json!([1, 2, 3])).is_err());
    }
}
