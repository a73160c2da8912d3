//! Countdown and maturity derivation for time-locked deposits.
//!
//! Pure functions of (finish timestamp, current time). A deposit moves
//! `Locked -> Maturable` monotonically, driven only by wall-clock time; the
//! display is recomputed on each render pass rather than ticking on its own.

const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Placeholder shown while a deposit's finish timestamp is unknown.
pub const NO_COUNTDOWN: &str = "--:--";

/// Lifecycle phase of a deposit as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositPhase {
    /// Finish is in the future; the card shows a countdown.
    Locked,
    /// Finish has passed; withdraw is enabled.
    Maturable,
}

pub fn remaining_seconds(finish: u64, now: u64) -> u64 {
    finish.saturating_sub(now)
}

pub fn is_mature(finish: u64, now: u64) -> bool {
    finish <= now
}

pub fn classify(finish: u64, now: u64) -> DepositPhase {
    if is_mature(finish, now) {
        DepositPhase::Maturable
    } else {
        DepositPhase::Locked
    }
}

/// Render remaining time as zero-padded `HH:MM`.
pub fn format_time_left(finish: Option<u64>, now: u64) -> String {
    let Some(finish) = finish else {
        return NO_COUNTDOWN.to_string();
    };
    let seconds = remaining_seconds(finish, now);
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{hours:02}:{minutes:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn test_one_hour_one_minute() {
        assert_eq!(format_time_left(Some(NOW + 3_661), NOW), "01:01");
    }

    #[test]
    fn test_zero_padding_and_rounding_down() {
        assert_eq!(format_time_left(Some(NOW + 59), NOW), "00:00");
        assert_eq!(format_time_left(Some(NOW + 60), NOW), "00:01");
        assert_eq!(format_time_left(Some(NOW + 9 * 3_600 + 5 * 60), NOW), "09:05");
        // long locks roll past two digit hours without wrapping
        assert_eq!(format_time_left(Some(NOW + 100 * 3_600), NOW), "100:00");
    }

    #[test]
    fn test_past_finish_clamps_to_zero() {
        assert_eq!(format_time_left(Some(NOW - 500), NOW), "00:00");
        assert_eq!(remaining_seconds(NOW - 500, NOW), 0);
    }

    #[test]
    fn test_missing_finish_placeholder() {
        assert_eq!(format_time_left(None, NOW), "--:--");
    }

    #[test]
    fn test_maturity_boundary() {
        assert_eq!(classify(NOW + 1, NOW), DepositPhase::Locked);
        assert_eq!(classify(NOW, NOW), DepositPhase::Maturable);
        assert_eq!(classify(NOW - 1, NOW), DepositPhase::Maturable);
        assert!(is_mature(NOW, NOW));
        assert!(!is_mature(NOW + 1, NOW));
    }

    #[test]
    fn test_phase_is_monotonic_in_time() {
        let finish = NOW + 120;
        let mut saw_maturable = false;
        for now in (NOW..NOW + 300).step_by(30) {
            match classify(finish, now) {
                DepositPhase::Maturable => saw_maturable = true,
                DepositPhase::Locked => {
                    assert!(!saw_maturable, "deposit must not leave Maturable");
                }
            }
        }
        assert!(saw_maturable);
    }
}
