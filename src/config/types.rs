//! Configuration types for settlement calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type defaults to
//! the standard policy shipped in `config/standard`.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Gratuity eligibility and formula parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GratuityPolicy {
    /// Minimum completed years of service before gratuity is payable.
    pub min_years: u32,
    /// Days of salary paid per completed year of service.
    pub days_per_service_year: Decimal,
    /// Working days per month used as the gratuity divisor.
    pub divisor: Decimal,
}

impl Default for GratuityPolicy {
    fn default() -> Self {
        Self {
            min_years: 5,
            days_per_service_year: Decimal::new(15, 0),
            divisor: Decimal::new(26, 0),
        }
    }
}

/// Rates and day-count conventions for the settlement formulas.
///
/// The 30-day month and 365-day year are fixed conventions, not calendar
/// arithmetic, and reproduce historical settlement figures exactly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettlementPolicy {
    /// Divisor turning the monthly salary into a daily rate.
    pub days_per_month: u32,
    /// Days counted as one year of service.
    pub days_per_year: u32,
    /// Gratuity parameters.
    pub gratuity: GratuityPolicy,
    /// Statutory bonus as a fraction of basic salary.
    pub bonus_rate: Decimal,
    /// Flat tax withheld at source on the settlement earnings.
    pub tds_rate: Decimal,
}

impl Default for SettlementPolicy {
    fn default() -> Self {
        Self {
            days_per_month: 30,
            days_per_year: 365,
            gratuity: GratuityPolicy::default(),
            bonus_rate: Decimal::new(833, 4),
            tds_rate: Decimal::new(10, 2),
        }
    }
}

/// Notice-period rules keyed on the employee's designation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticePolicy {
    /// Notice days for designations matching no keyword.
    pub standard_days: u32,
    /// Notice days for designations matching any keyword.
    pub extended_days: u32,
    /// Case-insensitive substrings that select the extended notice period.
    pub extended_keywords: Vec<String>,
}

impl Default for NoticePolicy {
    fn default() -> Self {
        Self {
            standard_days: 30,
            extended_days: 60,
            extended_keywords: vec!["senior".to_string(), "manager".to_string()],
        }
    }
}

/// The departments every separation must be cleared by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClearanceConfig {
    /// Department names, in checklist order.
    pub departments: Vec<String>,
}

impl Default for ClearanceConfig {
    fn default() -> Self {
        Self {
            departments: ["Reporting Manager", "IT", "Finance", "Admin", "HR"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// The complete configuration loaded from a policy directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementConfig {
    settlement: SettlementPolicy,
    notice: NoticePolicy,
    clearance: ClearanceConfig,
}

impl SettlementConfig {
    /// Creates a new SettlementConfig from its component parts.
    pub fn new(
        settlement: SettlementPolicy,
        notice: NoticePolicy,
        clearance: ClearanceConfig,
    ) -> Self {
        Self {
            settlement,
            notice,
            clearance,
        }
    }

    /// Returns the settlement formula policy.
    pub fn settlement(&self) -> &SettlementPolicy {
        &self.settlement
    }

    /// Returns the notice-period policy.
    pub fn notice(&self) -> &NoticePolicy {
        &self.notice
    }

    /// Returns the clearance checklist configuration.
    pub fn clearance(&self) -> &ClearanceConfig {
        &self.clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_settlement_policy_constants() {
        let policy = SettlementPolicy::default();
        assert_eq!(policy.days_per_month, 30);
        assert_eq!(policy.days_per_year, 365);
        assert_eq!(policy.gratuity.min_years, 5);
        assert_eq!(policy.gratuity.days_per_service_year, dec("15"));
        assert_eq!(policy.gratuity.divisor, dec("26"));
        assert_eq!(policy.bonus_rate, dec("0.0833"));
        assert_eq!(policy.tds_rate, dec("0.10"));
    }

    #[test]
    fn test_deserialize_settlement_policy() {
        let yaml = r#"
days_per_month: 30
days_per_year: 365
gratuity:
  min_years: 5
  days_per_service_year: "15"
  divisor: "26"
bonus_rate: "0.0833"
tds_rate: "0.10"
"#;
        let policy: SettlementPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy, SettlementPolicy::default());
    }

    #[test]
    fn test_default_notice_policy() {
        let policy = NoticePolicy::default();
        assert_eq!(policy.standard_days, 30);
        assert_eq!(policy.extended_days, 60);
        assert_eq!(policy.extended_keywords, vec!["senior", "manager"]);
    }

    #[test]
    fn test_default_clearance_departments() {
        let config = ClearanceConfig::default();
        assert_eq!(config.departments.len(), 5);
        assert_eq!(config.departments[1], "IT");
    }
}
