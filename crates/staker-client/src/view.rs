//! Presentational render model for the dashboard.
//!
//! Pure functions from a snapshot to display strings; no I/O, recomputed on
//! every render pass. Sections render independently: a slice that has not
//! resolved shows a neutral placeholder without blocking its siblings.

use crate::countdown::{self, DepositPhase};
use crate::projection::{DashboardSnapshot, Readout};
use crate::smoothing::ProfitDisplay;
use crate::units::{self, TOKEN_DECIMALS};

/// Display ticker of the staked token.
pub const TOKEN_SYMBOL: &str = "$DEGEN";

/// Neutral placeholder for a value that has not resolved.
pub const PLACEHOLDER: &str = "-";

pub const EMPTY_DEPOSITS_NOTE: &str = "No active deposits yet.";

/// Deposit cards shown on the dashboard.
pub const VISIBLE_DEPOSIT_CARDS: usize = 3;

/// Top stats row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSection {
    pub total_staked: String,
    pub investors: String,
}

/// The featured plan card with the live profit projection.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanCard {
    pub title: &'static str,
    /// E.g. `1.5% daily • 14 days`, or placeholders while loading.
    pub rate_line: String,
    /// Smoothed projection, two fractional digits.
    pub expected_profit: String,
    pub token_symbol: &'static str,
    /// Whether the invest action may be submitted right now.
    pub invest_enabled: bool,
    /// Whether the projection reflects a live candidate amount.
    pub projection_active: bool,
}

/// One time-locked deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositCard {
    pub profit_label: String,
    /// Zero-padded `HH:MM` until maturity.
    pub time_left: String,
    pub phase: DepositPhase,
    pub withdraw_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub stats: StatsSection,
    pub plan: PlanCard,
    pub deposit_cards: Vec<DepositCard>,
    pub empty_deposits_note: Option<&'static str>,
}

/// Render the dashboard from the latest snapshot.
///
/// `now` drives countdown and maturity only; `amount_input` is the candidate
/// deposit the user has typed.
pub fn render(
    snapshot: &DashboardSnapshot,
    profit: &ProfitDisplay,
    amount_input: &str,
    now: u64,
) -> DashboardView {
    let stats = StatsSection {
        total_staked: match snapshot.total_staked.ready() {
            Some(value) => units::format_max_frac(*value, 3),
            None => PLACEHOLDER.to_string(),
        },
        investors: match snapshot.total_users.ready() {
            Some(count) => count.to_string(),
            None => PLACEHOLDER.to_string(),
        },
    };

    let rate_line = match snapshot.plan.ready() {
        Some(plan) => format!(
            "{}% daily • {} days",
            units::format_max_frac(plan.daily_percent(), 1),
            plan.lock_days
        ),
        None => format!("{PLACEHOLDER}% daily • {PLACEHOLDER} days"),
    };

    // An unavailable projection never overwrites the last good value.
    let projected_profit = snapshot
        .projected
        .ready()
        .map(|r| units::format_units(r.profit, TOKEN_DECIMALS));
    let displayed_profit = profit.observe(projected_profit);

    let candidate_amount = units::parse_units(amount_input, TOKEN_DECIMALS);
    let plan = PlanCard {
        title: "Growth Plan",
        rate_line,
        expected_profit: format!("{displayed_profit:.2}"),
        token_symbol: TOKEN_SYMBOL,
        invest_enabled: snapshot.wallet.is_some() && candidate_amount > 0,
        projection_active: candidate_amount > 0,
    };

    let deposit_cards = match &snapshot.deposits {
        Readout::Ready(deposits) => deposits
            .iter()
            .take(VISIBLE_DEPOSIT_CARDS)
            .map(|deposit| {
                let phase = countdown::classify(deposit.finish, now);
                DepositCard {
                    profit_label: format!(
                        "{} {TOKEN_SYMBOL}",
                        units::format_max_frac(
                            units::format_units(deposit.profit, TOKEN_DECIMALS),
                            3
                        )
                    ),
                    time_left: countdown::format_time_left(Some(deposit.finish), now),
                    phase,
                    withdraw_enabled: phase == DepositPhase::Maturable,
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    let empty_deposits_note = match &snapshot.deposits {
        Readout::Ready(deposits) if deposits.is_empty() => Some(EMPTY_DEPOSITS_NOTE),
        _ => None,
    };

    DashboardView {
        stats,
        plan,
        deposit_cards,
        empty_deposits_note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Deposit, PlanInfo, ProjectedResult};

    const WEI: u128 = 1_000_000_000_000_000_000;
    const NOW: u64 = 1_700_000_000;

    fn ready_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            wallet: Some(crate::address::Address::ZERO),
            total_staked: Readout::Ready(1234.5678),
            total_users: Readout::Ready(321),
            invest_min: Readout::Ready(WEI),
            plan: Readout::Ready(PlanInfo {
                lock_days: 14,
                daily_rate_per_mille: 15,
            }),
            projected: Readout::Ready(ProjectedResult {
                final_amount: 121 * WEI / 100,
                profit: 21 * WEI / 100,
                finish: NOW + 14 * 86_400,
                tax: 0,
            }),
            deposits: Readout::Ready(vec![]),
            account: Readout::Ready(Default::default()),
            taken_at: NOW,
        }
    }

    fn deposit(finish: u64, profit: u128) -> Deposit {
        Deposit {
            plan: 1,
            percent: 15,
            amount: 100 * WEI,
            profit,
            start: NOW - 86_400,
            finish,
            tax: 0,
        }
    }

    #[test]
    fn test_render_ready_sections() {
        let view = render(&ready_snapshot(), &ProfitDisplay::new(), "100", NOW);
        assert_eq!(view.stats.total_staked, "1234.568");
        assert_eq!(view.stats.investors, "321");
        assert_eq!(view.plan.rate_line, "1.5% daily • 14 days");
        assert_eq!(view.plan.expected_profit, "0.21");
        assert!(view.plan.invest_enabled);
        assert!(view.plan.projection_active);
        assert_eq!(view.empty_deposits_note, Some(EMPTY_DEPOSITS_NOTE));
    }

    #[test]
    fn test_render_loading_shows_placeholders() {
        let snapshot = DashboardSnapshot::loading();
        let view = render(&snapshot, &ProfitDisplay::new(), "", NOW);
        assert_eq!(view.stats.total_staked, PLACEHOLDER);
        assert_eq!(view.stats.investors, PLACEHOLDER);
        assert_eq!(view.plan.rate_line, "-% daily • - days");
        assert_eq!(view.plan.expected_profit, "0.00");
        assert!(!view.plan.invest_enabled);
        assert!(view.deposit_cards.is_empty());
        // loading is not the same as known-empty
        assert_eq!(view.empty_deposits_note, None);
    }

    #[test]
    fn test_invest_disabled_without_wallet_or_amount() {
        let mut snapshot = ready_snapshot();
        let view = render(&snapshot, &ProfitDisplay::new(), "", NOW);
        assert!(!view.plan.invest_enabled, "empty amount parses to zero");

        let view = render(&snapshot, &ProfitDisplay::new(), "abc", NOW);
        assert!(!view.plan.invest_enabled, "malformed amount parses to zero");

        snapshot.wallet = None;
        let view = render(&snapshot, &ProfitDisplay::new(), "100", NOW);
        assert!(!view.plan.invest_enabled, "disconnected wallet");
    }

    #[test]
    fn test_profit_retained_across_unavailable_cycle() {
        let profit = ProfitDisplay::new();
        let mut snapshot = ready_snapshot();

        let view = render(&snapshot, &profit, "100", NOW);
        assert_eq!(view.plan.expected_profit, "0.21");

        // mid-refetch the projection slice drops out; display holds
        snapshot.projected = Readout::Loading;
        let view = render(&snapshot, &profit, "100", NOW);
        assert_eq!(view.plan.expected_profit, "0.21");

        // the next valid value takes over immediately
        snapshot.projected = Readout::Ready(ProjectedResult {
            final_amount: 2 * WEI,
            profit: WEI / 2,
            finish: NOW + 86_400,
            tax: 0,
        });
        let view = render(&snapshot, &profit, "100", NOW);
        assert_eq!(view.plan.expected_profit, "0.50");
    }

    #[test]
    fn test_deposit_cards_top_three_with_phases() {
        let mut snapshot = ready_snapshot();
        snapshot.deposits = Readout::Ready(vec![
            deposit(NOW + 3_661, 5 * WEI),
            deposit(NOW - 10, 2 * WEI),
            deposit(NOW + 60, WEI / 4),
            deposit(NOW + 999_999, WEI),
        ]);

        let view = render(&snapshot, &ProfitDisplay::new(), "", NOW);
        assert_eq!(view.deposit_cards.len(), VISIBLE_DEPOSIT_CARDS);
        assert_eq!(view.empty_deposits_note, None);

        let locked = &view.deposit_cards[0];
        assert_eq!(locked.time_left, "01:01");
        assert_eq!(locked.phase, DepositPhase::Locked);
        assert!(!locked.withdraw_enabled);
        assert_eq!(locked.profit_label, "5 $DEGEN");

        let mature = &view.deposit_cards[1];
        assert_eq!(mature.time_left, "00:00");
        assert_eq!(mature.phase, DepositPhase::Maturable);
        assert!(mature.withdraw_enabled);
    }
}
