//! Portfolio aggregate statistics over the persisted history.

use serde::{Deserialize, Serialize};

/// Aggregate counts plus the rounded approval percentage.
///
/// Decision labels outside the three canonical buckets (including absent
/// decisions) count toward `total_applications` only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStats {
    pub total_applications: u64,
    pub approved_count: u64,
    pub review_count: u64,
    pub rejected_count: u64,
    pub approval_rate: f64,
}

impl LoanStats {
    pub fn compute(total: u64, approved: u64, review: u64, rejected: u64) -> Self {
        Self {
            total_applications: total,
            approved_count: approved,
            review_count: review,
            rejected_count: rejected,
            approval_rate: approval_rate(approved, total),
        }
    }
}

/// Approval percentage: `approved * 100 / total` rounded half-up to two
/// decimal places, or 0 for an empty portfolio. Integer arithmetic keeps
/// the midpoint behavior exact; half-even rounding is not equivalent and
/// must not be substituted.
pub fn approval_rate(approved: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let scaled = approved as u128 * 10_000;
    let total = total as u128;
    let quotient = scaled / total;
    let remainder = scaled % total;
    let hundredths = if remainder * 2 >= total {
        quotient + 1
    } else {
        quotient
    };

    hundredths as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_portfolio_has_zero_rate() {
        assert_eq!(approval_rate(0, 0), 0.0);
    }

    #[test]
    fn exact_percentage_is_unchanged() {
        assert_eq!(approval_rate(6, 10), 60.0);
        assert_eq!(approval_rate(1, 4), 25.0);
    }

    #[test]
    fn one_third_rounds_down_to_33_33() {
        assert_eq!(approval_rate(1, 3), 33.33);
    }

    #[test]
    fn two_thirds_rounds_up_to_66_67() {
        assert_eq!(approval_rate(2, 3), 66.67);
    }

    #[test]
    fn midpoint_rounds_half_up_not_half_even() {
        // 5/4000 = 0.125%, an exact hundredths midpoint: half-up gives
        // 0.13 where half-even would give 0.12.
        assert_eq!(approval_rate(5, 4000), 0.13);
        // 15/4000 = 0.375%: half-up gives 0.38, half-even would too, but
        // the even-side midpoint below pins the strategy again.
        assert_eq!(approval_rate(15, 4000), 0.38);
        // 25/10000 = 0.25%, exact, no rounding involved.
        assert_eq!(approval_rate(25, 10000), 0.25);
    }

    #[test]
    fn compute_assembles_all_buckets() {
        let stats = LoanStats::compute(10, 6, 2, 2);
        assert_eq!(stats.total_applications, 10);
        assert_eq!(stats.approved_count, 6);
        assert_eq!(stats.review_count, 2);
        assert_eq!(stats.rejected_count, 2);
        assert_eq!(stats.approval_rate, 60.0);
    }
}
