use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Raw behavioral metrics for a single student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentProfile {
    /// Opaque student identifier
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    /// Display name
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Attendance percentage [0, 100]
    pub attendance: f64,

    /// Average score percentage [0, 100]
    pub average_score: f64,

    /// Assignments submitted so far
    pub assignments_submitted: u32,

    /// Total assignments issued (must be > 0)
    #[validate(range(min = 1))]
    pub total_assignments: u32,

    /// Engagement percentage [0, 100]
    pub engagement_score: f64,

    /// Most recent letter grade, if known
    #[serde(default)]
    pub prior_grade: Option<PriorGrade>,
}

impl StudentProfile {
    /// Create a new profile from raw metrics
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        attendance: f64,
        average_score: f64,
        assignments_submitted: u32,
        total_assignments: u32,
        engagement_score: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attendance,
            average_score,
            assignments_submitted,
            total_assignments,
            engagement_score,
            prior_grade: None,
        }
    }

    pub fn with_prior_grade(mut self, grade: PriorGrade) -> Self {
        self.prior_grade = Some(grade);
        self
    }
}

/// Categorical prior-grade signal
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, EnumString, Display,
)]
pub enum PriorGrade {
    A,
    B,
    C,
    D,
    F,
}

impl PriorGrade {
    /// Numeric encoding (A highest)
    pub fn numeric(&self) -> u8 {
        match self {
            PriorGrade::A => 4,
            PriorGrade::B => 3,
            PriorGrade::C => 2,
            PriorGrade::D => 1,
            PriorGrade::F => 0,
        }
    }
}
