//! Derived financial figures
//!
//! Pure functions over a member or family snapshot. Nothing here talks to the
//! server and nothing here recomputes the server's family totals.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ExpenseCategory, Family, Member, Money};

/// Share of salary set aside as the spending guideline (50%)
pub fn budget_share() -> Decimal {
    Decimal::new(5, 1)
}

/// Share of salary the member should keep (20%)
pub fn savings_share() -> Decimal {
    Decimal::new(2, 1)
}

/// Savings verdict for a member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsStatus {
    /// The member has no salary concept
    NotApplicable,
    /// Balance meets the 20% target; amount and percentage of salary
    OnTarget { amount: Money, percent: Decimal },
    /// Balance is short of the target. Partial progress is deliberately not
    /// quantified.
    BelowTarget,
}

impl SavingsStatus {
    pub fn is_on_target(&self) -> bool {
        matches!(self, Self::OnTarget { .. })
    }

    /// Short label for tables and status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable => "N/A",
            Self::OnTarget { .. } => "On target",
            Self::BelowTarget => "Below target",
        }
    }

    /// Human-readable description, with a number only when on target
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            Self::NotApplicable => "N/A".to_string(),
            Self::OnTarget { amount, percent } => format!(
                "{} ({:.1}%)",
                amount.format_with_symbol(symbol),
                percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            ),
            Self::BelowTarget => "Below 20% savings target".to_string(),
        }
    }
}

/// `salary - total_spent` for earning members; `None` means "no balance
/// concept", which is not the same as a zero balance.
pub fn balance(member: &Member) -> Option<Money> {
    if !member.is_earning {
        return None;
    }
    Some(member.salary - member.total_spent)
}

/// Half of the salary, whatever the member actually spent
pub fn budget_allocation(member: &Member) -> Money {
    if member.salary.is_zero() {
        return Money::zero();
    }
    member.salary.scale(budget_share())
}

/// 20% of the salary for earning members
pub fn savings_target(member: &Member) -> Option<Money> {
    if !member.is_earning {
        return None;
    }
    Some(member.salary.scale(savings_share()))
}

/// Pass/fail verdict against the 20% savings target
pub fn savings_status(member: &Member) -> SavingsStatus {
    let (Some(balance), Some(target)) = (balance(member), savings_target(member)) else {
        return SavingsStatus::NotApplicable;
    };

    if !member.salary.is_positive() || balance < target {
        return SavingsStatus::BelowTarget;
    }

    match balance.percent_of(member.salary) {
        Some(percent) => SavingsStatus::OnTarget {
            amount: balance,
            percent,
        },
        None => SavingsStatus::BelowTarget,
    }
}

/// Everything the member card shows, computed in one go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberMetrics {
    pub balance: Option<Money>,
    pub budget_allocation: Money,
    pub savings_target: Option<Money>,
    pub savings: SavingsStatus,
    pub expense_count: usize,
}

impl MemberMetrics {
    pub fn for_member(member: &Member) -> Self {
        Self {
            balance: balance(member),
            budget_allocation: budget_allocation(member),
            savings_target: savings_target(member),
            savings: savings_status(member),
            expense_count: member.expense_count(),
        }
    }
}

/// Spend per category for one member, in category order, skipping empty ones
pub fn expense_breakdown(member: &Member) -> Vec<(ExpenseCategory, Money)> {
    ExpenseCategory::ALL
        .iter()
        .filter_map(|category| {
            let total: Money = member
                .expenses
                .iter()
                .filter(|e| e.category == *category)
                .map(|e| e.amount)
                .sum();
            (!total.is_zero()).then_some((*category, total))
        })
        .collect()
}

/// Dashboard header figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOverview {
    pub member_count: usize,
    pub earning_count: usize,
    /// Server-computed, passed through untouched
    pub total_income: Money,
    /// Server-computed, passed through untouched
    pub total_expenses: Money,
    /// `total_income - total_expenses`
    pub net: Money,
}

impl FamilyOverview {
    pub fn from_family(family: &Family) -> Self {
        Self {
            member_count: family.members.len(),
            earning_count: family.members.iter().filter(|m| m.is_earning).count(),
            total_income: family.total_income,
            total_expenses: family.total_expenses,
            net: family.total_income - family.total_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemberId;
    use rust_decimal_macros::dec;

    fn member(is_earning: bool, salary: Money, total_spent: Money) -> Member {
        Member {
            id: MemberId::from("m"),
            name: "Test".into(),
            is_earning,
            salary,
            total_spent,
            expenses: Vec::new(),
        }
    }

    #[test]
    fn test_non_earning_has_no_balance_or_savings() {
        let m = member(false, Money::zero(), Money::from_major(300));
        assert_eq!(balance(&m), None);
        assert_eq!(savings_status(&m), SavingsStatus::NotApplicable);
        assert_eq!(savings_target(&m), None);
    }

    #[test]
    fn test_on_target_scenario() {
        let m = member(true, Money::from_major(50000), Money::from_major(12000));
        assert_eq!(balance(&m), Some(Money::from_major(38000)));
        assert_eq!(savings_target(&m), Some(Money::from_major(10000)));
        assert_eq!(budget_allocation(&m), Money::from_major(25000));

        let status = savings_status(&m);
        assert_eq!(
            status,
            SavingsStatus::OnTarget {
                amount: Money::from_major(38000),
                percent: dec!(76),
            }
        );
        assert_eq!(status.describe("₹"), "₹38000.00 (76.0%)");
    }

    #[test]
    fn test_below_target_scenario() {
        let m = member(true, Money::from_major(1000), Money::from_major(950));
        assert_eq!(balance(&m), Some(Money::from_major(50)));
        assert_eq!(savings_target(&m), Some(Money::from_major(200)));

        let status = savings_status(&m);
        assert_eq!(status, SavingsStatus::BelowTarget);
        assert_eq!(status.describe("₹"), "Below 20% savings target");
    }

    #[test]
    fn test_savings_percent_is_rounded() {
        let status = SavingsStatus::OnTarget {
            amount: Money::new(dec!(38030)),
            percent: dec!(76.06),
        };
        assert_eq!(status.describe("₹"), "₹38030.00 (76.1%)");

        let m = member(true, Money::from_major(3), Money::from_major(1));
        assert_eq!(savings_status(&m).describe("₹"), "₹2.00 (66.7%)");
    }

    #[test]
    fn test_exactly_on_target_counts() {
        let m = member(true, Money::from_major(1000), Money::from_major(800));
        assert!(savings_status(&m).is_on_target());
    }

    #[test]
    fn test_zero_salary_earning_member() {
        let m = member(true, Money::zero(), Money::zero());
        assert_eq!(budget_allocation(&m), Money::zero());
        assert_eq!(savings_status(&m), SavingsStatus::BelowTarget);
        assert_eq!(balance(&m), Some(Money::zero()));
    }

    #[test]
    fn test_overspent_member_is_below_target() {
        let m = member(true, Money::from_major(1000), Money::from_major(1500));
        assert_eq!(balance(&m), Some(Money::from_major(-500)));
        assert_eq!(savings_status(&m), SavingsStatus::BelowTarget);
    }

    #[test]
    fn test_balance_is_exact_after_repeated_recompute() {
        let m = member(true, Money::new(dec!(1000.10)), Money::new(dec!(0.30)));
        let first = balance(&m).unwrap();
        for _ in 0..1000 {
            assert_eq!(balance(&m).unwrap(), first);
        }
        assert_eq!(first, Money::new(dec!(999.80)));
    }

    #[test]
    fn test_budget_allocation_fractional() {
        let m = member(true, Money::new(dec!(1234.57)), Money::zero());
        assert_eq!(budget_allocation(&m), Money::new(dec!(617.285)));
    }

    #[test]
    fn test_breakdown_and_overview() {
        let family = crate::api::mock::sample_family();
        let meena = &family.members[1];

        let breakdown = expense_breakdown(meena);
        assert_eq!(
            breakdown,
            vec![
                (ExpenseCategory::Food, Money::from_major(450)),
                (ExpenseCategory::Transportation, Money::from_major(500)),
            ]
        );

        let overview = FamilyOverview::from_family(&family);
        assert_eq!(overview.member_count, 2);
        assert_eq!(overview.earning_count, 1);
        assert_eq!(overview.total_income, family.total_income);
        assert_eq!(overview.net, Money::from_major(50000 - 12950));
    }
}
