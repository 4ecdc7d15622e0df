use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Area an intervention targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum InterventionCategory {
    Attendance,
    Performance,
    Engagement,
    AssignmentCompletion,
    GeneralSupport,
}

/// Intervention urgency tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank (lower is more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

/// One actionable recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterventionItem {
    /// Target area
    pub category: InterventionCategory,

    /// Urgency tier
    pub priority: Priority,

    /// Action text for educators
    pub action: String,

    /// Suggested timeframe
    pub timeframe: String,
}

impl InterventionItem {
    pub fn new(
        category: InterventionCategory,
        priority: Priority,
        action: impl Into<String>,
        timeframe: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            action: action.into(),
            timeframe: timeframe.into(),
        }
    }
}
