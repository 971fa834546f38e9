use serde::{Deserialize, Serialize};

/// Soft limit for the professional summary.
pub const SUMMARY_LIMIT: usize = 500;
/// Soft limit for each experience description.
pub const DESCRIPTION_LIMIT: usize = 1000;

/// Advisory character count for a long-text field. Never truncates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthCheck {
    pub count: usize,
    pub limit: usize,
    pub exceeded: bool,
}

impl LengthCheck {
    /// "{count}/{limit} characters", as shown under the field.
    pub fn counter_text(&self) -> String {
        format!("{}/{} characters", self.count, self.limit)
    }
}

/// Counts characters, not bytes, so multi-byte input is not penalised.
pub fn check_length(text: &str, limit: usize) -> LengthCheck {
    let count = text.chars().count();
    LengthCheck {
        count,
        limit,
        exceeded: count > limit,
    }
}
