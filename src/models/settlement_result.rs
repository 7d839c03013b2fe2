//! Settlement result models for the Settlement Engine.
//!
//! This module contains the [`SettlementResult`] type and its associated structures
//! that capture all outputs from a full-and-final calculation: the ordered
//! breakdown lines, the totals, and the audit trace.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a breakdown line is paid to or recovered from the employee.
///
/// # Example
///
/// ```
/// use settlement_engine::models::LineCategory;
///
/// let category = LineCategory::Earning;
/// assert_eq!(format!("{:?}", category), "Earning");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCategory {
    /// Paid to the employee.
    Earning,
    /// Recovered from the employee.
    Deduction,
}

/// A single line of the settlement breakdown.
///
/// The amount is never negative; its sign is implied by the category.
///
/// # Example
///
/// ```
/// use settlement_engine::models::{LineCategory, SettlementBreakdownLine};
/// use rust_decimal::Decimal;
///
/// let line = SettlementBreakdownLine {
///     category: LineCategory::Earning,
///     component: "basic_salary".to_string(),
///     name: "Basic Salary".to_string(),
///     description: "20 days at 1666.67/day".to_string(),
///     amount: Decimal::new(33333, 0),
/// };
/// assert!(line.is_earning());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementBreakdownLine {
    /// Earning or deduction.
    pub category: LineCategory,
    /// Stable identifier of the component (e.g. "basic_salary").
    pub component: String,
    /// Display name of the component (e.g. "Basic Salary").
    pub name: String,
    /// Human-readable explanation of how the amount was reached.
    pub description: String,
    /// The rounded amount in whole currency units.
    pub amount: Decimal,
}

impl SettlementBreakdownLine {
    /// Returns true for earning lines.
    pub fn is_earning(&self) -> bool {
        self.category == LineCategory::Earning
    }

    /// Returns true for deduction lines.
    pub fn is_deduction(&self) -> bool {
        self.category == LineCategory::Deduction
    }
}

/// Aggregated totals for a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTotals {
    /// Sum of all earning lines.
    pub total_earnings: Decimal,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// Earnings minus deductions. Negative when the employee owes the company.
    pub net_payable: Decimal,
}

impl SettlementTotals {
    /// Sums the given lines by category.
    ///
    /// ```
    /// use settlement_engine::models::SettlementTotals;
    /// use rust_decimal::Decimal;
    ///
    /// let totals = SettlementTotals::from_lines(&[]);
    /// assert_eq!(totals.net_payable, Decimal::ZERO);
    /// ```
    pub fn from_lines(lines: &[SettlementBreakdownLine]) -> Self {
        let total_earnings: Decimal = lines
            .iter()
            .filter(|line| line.is_earning())
            .map(|line| line.amount)
            .sum();
        let total_deductions: Decimal = lines
            .iter()
            .filter(|line| line.is_deduction())
            .map(|line| line.amount)
            .sum();

        Self {
            total_earnings,
            total_deductions,
            net_payable: total_earnings - total_deductions,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a settlement.
///
/// # Example
///
/// ```
/// use settlement_engine::models::AuditTrace;
///
/// let trace = AuditTrace { steps: vec![] };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The complete result of a full-and-final calculation.
///
/// Computed once per employee and separation and never mutated afterwards.
/// It holds no timestamps or random identifiers, so identical inputs always
/// produce an identical result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    /// The ID of the employee the settlement is for.
    pub employee_id: String,
    /// The date the settlement was computed as of.
    pub as_of: NaiveDate,
    /// Breakdown lines in computation order.
    pub lines: Vec<SettlementBreakdownLine>,
    /// Aggregated totals.
    pub totals: SettlementTotals,
    /// Audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl SettlementResult {
    /// Finds the line for a component, if present.
    pub fn line(&self, component: &str) -> Option<&SettlementBreakdownLine> {
        self.lines.iter().find(|line| line.component == component)
    }

    /// Iterates over the earning lines in computation order.
    pub fn earnings(&self) -> impl Iterator<Item = &SettlementBreakdownLine> {
        self.lines.iter().filter(|line| line.is_earning())
    }

    /// Iterates over the deduction lines in computation order.
    pub fn deductions(&self) -> impl Iterator<Item = &SettlementBreakdownLine> {
        self.lines.iter().filter(|line| line.is_deduction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// Helper function to create Decimal values from strings
    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_line(
        category: LineCategory,
        component: &str,
        amount: &str,
    ) -> SettlementBreakdownLine {
        SettlementBreakdownLine {
            category,
            component: component.to_string(),
            name: component.to_string(),
            description: String::new(),
            amount: dec(amount),
        }
    }

    fn create_result(lines: Vec<SettlementBreakdownLine>) -> SettlementResult {
        let totals = SettlementTotals::from_lines(&lines);
        SettlementResult {
            employee_id: "EMP-001".to_string(),
            as_of: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            lines,
            totals,
            audit_trace: AuditTrace::default(),
        }
    }

    #[test]
    fn test_totals_sum_by_category() {
        let lines = vec![
            create_line(LineCategory::Earning, "basic_salary", "33333"),
            create_line(LineCategory::Earning, "leave_encashment", "20000"),
            create_line(LineCategory::Deduction, "loan_recovery", "20000"),
            create_line(LineCategory::Deduction, "tds", "5333"),
        ];

        let totals = SettlementTotals::from_lines(&lines);
        assert_eq!(totals.total_earnings, dec("53333"));
        assert_eq!(totals.total_deductions, dec("25333"));
        assert_eq!(totals.net_payable, dec("28000"));
    }

    #[test]
    fn test_net_payable_may_be_negative() {
        let lines = vec![
            create_line(LineCategory::Earning, "basic_salary", "1000"),
            create_line(LineCategory::Deduction, "loan_recovery", "50000"),
        ];

        let totals = SettlementTotals::from_lines(&lines);
        assert_eq!(totals.net_payable, dec("-49000"));
    }

    #[test]
    fn test_line_lookup_and_category_iterators() {
        let result = create_result(vec![
            create_line(LineCategory::Earning, "basic_salary", "100"),
            create_line(LineCategory::Deduction, "tds", "10"),
            create_line(LineCategory::Earning, "bonus", "5"),
        ]);

        assert_eq!(result.line("tds").unwrap().amount, dec("10"));
        assert!(result.line("gratuity").is_none());

        let earnings: Vec<&str> = result.earnings().map(|l| l.component.as_str()).collect();
        assert_eq!(earnings, vec!["basic_salary", "bonus"]);
        assert_eq!(result.deductions().count(), 1);
    }

    #[test]
    fn test_line_category_serialization() {
        assert_eq!(
            serde_json::to_string(&LineCategory::Earning).unwrap(),
            "\"earning\""
        );
        let category: LineCategory = serde_json::from_str("\"deduction\"").unwrap();
        assert_eq!(category, LineCategory::Deduction);
    }

    #[test]
    fn test_breakdown_line_serialization() {
        let line = create_line(LineCategory::Earning, "gratuity", "173077");
        let json = serde_json::to_string(&line).unwrap();

        assert!(json.contains("\"category\":\"earning\""));
        assert!(json.contains("\"component\":\"gratuity\""));
        assert!(json.contains("\"amount\":\"173077\""));
    }

    #[test]
    fn test_settlement_result_deserialization() {
        let json = r#"{
            "employee_id": "EMP-001",
            "as_of": "2025-03-31",
            "lines": [
                {
                    "category": "earning",
                    "component": "basic_salary",
                    "name": "Basic Salary",
                    "description": "31 days",
                    "amount": "50000"
                }
            ],
            "totals": {
                "total_earnings": "50000",
                "total_deductions": "0",
                "net_payable": "50000"
            },
            "audit_trace": { "steps": [] }
        }"#;

        let result: SettlementResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.employee_id, "EMP-001");
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.totals.net_payable, dec("50000"));
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "daily_rate".to_string(),
            rule_name: "Daily Rate".to_string(),
            input: serde_json::json!({"basic_salary": "50000"}),
            output: serde_json::json!({"daily_rate": "1666.67"}),
            reasoning: "50000 / 30".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"daily_rate\""));
    }
}
