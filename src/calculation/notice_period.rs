//! Required notice period by designation.
//!
//! Designations containing one of the configured keywords (by default
//! "senior" or "manager", case-insensitively) carry the extended notice
//! period; everything else, including an empty designation, the standard one.

use crate::config::NoticePolicy;

/// Required notice days for a designation under the standard policy.
///
/// # Examples
///
/// ```
/// use settlement_engine::calculation::required_notice_days;
///
/// assert_eq!(required_notice_days("Senior Engineer"), 60);
/// assert_eq!(required_notice_days("Plant MANAGER"), 60);
/// assert_eq!(required_notice_days("Machine Operator"), 30);
/// assert_eq!(required_notice_days(""), 30);
/// ```
pub fn required_notice_days(designation: &str) -> u32 {
    required_notice_days_with_policy(designation, &NoticePolicy::default())
}

/// Required notice days for a designation under the given policy.
pub fn required_notice_days_with_policy(designation: &str, policy: &NoticePolicy) -> u32 {
    let designation = designation.to_lowercase();
    let extended = policy
        .extended_keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| designation.contains(&keyword.to_lowercase()));

    if extended {
        policy.extended_days
    } else {
        policy.standard_days
    }
}
