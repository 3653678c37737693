//! Percentages and rates derived from money amounts
//!
//! Every function degrades to 0 when its denominator is zero or negative.
//! Results above 100 are returned as-is so callers can detect overage.

use serde::Serialize;

use crate::models::{Frequency, Money};

/// `part / whole * 100`, or 0 when `whole` is not positive
pub fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.cents() as f64 * 100.0 / whole.cents() as f64
    } else {
        0.0
    }
}

/// Share of income kept after expenses, as a percentage
///
/// Zero income yields 0 regardless of expenses. Overspending yields a
/// negative rate.
pub fn savings_rate(income: Money, expenses: Money) -> f64 {
    percentage(income - expenses, income)
}

/// Absolute and relative change of an investment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainLoss {
    pub absolute: Money,
    pub percent: f64,
}

impl GainLoss {
    pub fn is_gain(&self) -> bool {
        self.absolute.is_positive()
    }

    pub fn is_loss(&self) -> bool {
        self.absolute.is_negative()
    }
}

/// Gain or loss of `current_value` over `initial_value`
pub fn gain_loss(current_value: Money, initial_value: Money) -> GainLoss {
    let absolute = current_value - initial_value;
    GainLoss {
        absolute,
        percent: percentage(absolute, initial_value),
    }
}

/// Spent as a percentage of budget, uncapped
pub fn budget_utilization(spent: Money, budgeted: Money) -> f64 {
    percentage(spent, budgeted)
}

/// Saved as a percentage of target, uncapped
pub fn goal_progress(saved: Money, target: Money) -> f64 {
    percentage(saved, target)
}

/// Amount normalized to a per-month figure
///
/// Daily amounts are multiplied by 365/12 and weekly by 52/12; yearly
/// amounts are divided by 12. Rounded to the nearest cent.
pub fn monthly_equivalent(amount: Money, frequency: Frequency) -> Money {
    amount.scale(frequency.per_month())
}

/// Float comparison for percentage results in tests
#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    #[test]
    fn test_percentage() {
        assert_close(percentage(units(300), units(500)), 60.0);
        assert_eq!(percentage(units(300), Money::zero()), 0.0);
        assert_eq!(percentage(Money::zero(), Money::zero()), 0.0);
        assert_eq!(percentage(units(5), units(-10)), 0.0);
    }

    #[test]
    fn test_savings_rate() {
        assert_close(savings_rate(units(1000), Money::zero()), 100.0);
        assert_eq!(savings_rate(Money::zero(), units(500)), 0.0);
        assert_close(savings_rate(units(1000), units(250)), 75.0);
        assert_close(savings_rate(units(1000), units(1500)), -50.0);
    }

    #[test]
    fn test_gain_loss() {
        let gain = gain_loss(units(1200), units(1000));
        assert_eq!(gain.absolute, units(200));
        assert_close(gain.percent, 20.0);
        assert!(gain.is_gain());

        let loss = gain_loss(units(750), units(1000));
        assert_eq!(loss.absolute, units(-250));
        assert_close(loss.percent, -25.0);
        assert!(loss.is_loss());
    }

    #[test]
    fn test_gain_loss_zero_cost_basis() {
        let gl = gain_loss(units(50), Money::zero());
        assert_eq!(gl.absolute, units(50));
        assert_eq!(gl.percent, 0.0);
    }

    #[test]
    fn test_budget_utilization_is_uncapped() {
        assert_close(budget_utilization(units(150), units(100)), 150.0);
        assert_eq!(budget_utilization(units(50), Money::zero()), 0.0);
    }

    #[test]
    fn test_goal_progress() {
        assert_close(goal_progress(units(250), units(1000)), 25.0);
        assert_close(goal_progress(units(1100), units(1000)), 110.0);
        assert_close(goal_progress(units(1), units(3)), 100.0 / 3.0);
        assert_eq!(goal_progress(units(10), Money::zero()), 0.0);
    }

    #[test]
    fn test_monthly_equivalent() {
        assert_eq!(monthly_equivalent(units(100), Frequency::Weekly).cents(), 43333);
        assert_eq!(monthly_equivalent(units(10), Frequency::Daily).cents(), 30417);
        assert_eq!(monthly_equivalent(units(1200), Frequency::Yearly), units(100));
        assert_eq!(monthly_equivalent(units(55), Frequency::Monthly), units(55));
    }
}
