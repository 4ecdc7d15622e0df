use crate::models::{
    FactorKind, InterventionCategory, InterventionItem, Priority, RiskBand, RiskVerdict,
    StudentProfile,
};

/// Maps a verdict's risk factors and the raw profile onto a prioritized,
/// categorized list of interventions. The mapping is a fixed table, not
/// learned.
pub struct InterventionRuleEngine;

impl InterventionRuleEngine {
    /// Produce the ordered intervention list for a verdict.
    ///
    /// High-priority items come first, then Medium, then Low; within a tier
    /// the verdict's factor order is preserved. Medium and High verdicts
    /// always yield at least one item; Safe yields a single Low-priority
    /// preventive item.
    pub fn recommend(verdict: &RiskVerdict, profile: &StudentProfile) -> Vec<InterventionItem> {
        if verdict.band == RiskBand::Safe {
            return vec![InterventionItem::new(
                InterventionCategory::GeneralSupport,
                Priority::Low,
                "Continue monitoring and provide encouragement to maintain current trajectory",
                "Ongoing",
            )];
        }

        // Without any high-severity factor the profile only shows mild,
        // diffuse slippage; a general check-in replaces targeted actions.
        if !verdict.factors.iter().any(|f| f.is_high_severity()) {
            return vec![InterventionItem::new(
                InterventionCategory::GeneralSupport,
                Priority::Low,
                "Schedule a general support check-in to review recent progress",
                "Within 2 weeks",
            )];
        }

        let mut items = Vec::new();

        for factor in &verdict.factors {
            match factor.kind {
                FactorKind::Attendance => {
                    items.push(InterventionItem::new(
                        InterventionCategory::Attendance,
                        Priority::High,
                        "Schedule a meeting with the student to discuss attendance barriers",
                        "Within 1 week",
                    ));
                    let days = guardian_contact_days(profile.attendance);
                    items.push(InterventionItem::new(
                        InterventionCategory::Attendance,
                        Priority::High,
                        "Contact parents/guardians about attendance concerns",
                        format!("Within {} day{}", days, if days == 1 { "" } else { "s" }),
                    ));
                }
                FactorKind::Performance => {
                    items.push(InterventionItem::new(
                        InterventionCategory::Performance,
                        Priority::High,
                        "Enroll in intensive tutoring program (3x per week)",
                        "Start immediately",
                    ));
                    items.push(InterventionItem::new(
                        InterventionCategory::Performance,
                        Priority::High,
                        "Provide personalized study plan with weekly check-ins",
                        "Ongoing for 6 weeks",
                    ));
                }
                FactorKind::Engagement => {
                    items.push(InterventionItem::new(
                        InterventionCategory::Engagement,
                        Priority::Medium,
                        "One-on-one counseling to identify motivation barriers",
                        "Within 1 week",
                    ));
                }
                FactorKind::Completion => {
                    items.push(InterventionItem::new(
                        InterventionCategory::AssignmentCompletion,
                        Priority::Medium,
                        "Create assignment tracking system with deadline reminders",
                        "Start immediately",
                    ));
                }
            }
        }

        if verdict.band == RiskBand::High {
            items.push(InterventionItem::new(
                InterventionCategory::GeneralSupport,
                Priority::High,
                "Assign dedicated academic advisor for weekly monitoring",
                "Immediate and ongoing",
            ));
        }

        // Stable sort keeps factor order within each priority tier.
        items.sort_by_key(|item| item.priority.rank());
        items
    }
}

/// Guardian-contact window in days. Lower attendance shortens the window,
/// never below one day; attendance in the mid-40s reproduces the customary
/// three-day contact window.
fn guardian_contact_days(attendance: f64) -> u32 {
    ((attendance.clamp(0.0, 100.0) / 15.0).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RiskFactor, VerdictSource};

    fn profile(attendance: f64, score: f64, submitted: u32, engagement: f64) -> StudentProfile {
        StudentProfile::new("S-1", "Test", attendance, score, submitted, 10, engagement)
    }

    fn verdict(band: RiskBand, score: u8, factors: Vec<RiskFactor>) -> RiskVerdict {
        RiskVerdict::new(
            "S-1",
            band,
            score,
            score as f64 / 10.0,
            VerdictSource::RuleOnly,
            None,
            factors,
        )
    }

    #[test]
    fn test_high_risk_gets_attendance_and_tutoring_items() {
        let v = verdict(
            RiskBand::High,
            9,
            vec![
                RiskFactor::new(FactorKind::Attendance, 3, 45.0),
                RiskFactor::new(FactorKind::Performance, 3, 42.0),
                RiskFactor::new(FactorKind::Engagement, 2, 35.0),
            ],
        );
        let items = InterventionRuleEngine::recommend(&v, &profile(45.0, 42.0, 5, 35.0));

        assert!(items
            .iter()
            .any(|i| i.category == InterventionCategory::Attendance
                && i.priority == Priority::High
                && i.action.contains("meeting")));
        assert!(items
            .iter()
            .any(|i| i.category == InterventionCategory::Performance
                && i.priority == Priority::High
                && i.action.contains("tutoring")));
        assert!(items
            .iter()
            .any(|i| i.category == InterventionCategory::GeneralSupport
                && i.priority == Priority::High));
    }

    #[test]
    fn test_items_sorted_by_priority_tier() {
        let v = verdict(
            RiskBand::High,
            9,
            vec![
                RiskFactor::new(FactorKind::Engagement, 2, 35.0),
                RiskFactor::new(FactorKind::Attendance, 3, 45.0),
            ],
        );
        let items = InterventionRuleEngine::recommend(&v, &profile(45.0, 42.0, 5, 35.0));

        let ranks: Vec<u8> = items.iter().map(|i| i.priority.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        // Engagement came first in the factor list but sits in the Medium tier
        assert_eq!(items.last().unwrap().category, InterventionCategory::Engagement);
    }

    #[test]
    fn test_within_tier_factor_order_preserved() {
        let v = verdict(
            RiskBand::High,
            7,
            vec![
                RiskFactor::new(FactorKind::Engagement, 2, 35.0),
                RiskFactor::new(FactorKind::Completion, 2, 40.0),
                RiskFactor::new(FactorKind::Attendance, 3, 45.0),
            ],
        );
        let items = InterventionRuleEngine::recommend(&v, &profile(45.0, 80.0, 4, 35.0));

        let medium: Vec<InterventionCategory> = items
            .iter()
            .filter(|i| i.priority == Priority::Medium)
            .map(|i| i.category)
            .collect();
        assert_eq!(
            medium,
            vec![
                InterventionCategory::Engagement,
                InterventionCategory::AssignmentCompletion
            ]
        );
    }

    #[test]
    fn test_medium_band_yields_at_least_one_item() {
        let v = verdict(
            RiskBand::Medium,
            3,
            vec![RiskFactor::new(FactorKind::Performance, 3, 48.0)],
        );
        let items = InterventionRuleEngine::recommend(&v, &profile(80.0, 48.0, 8, 60.0));
        assert!(!items.is_empty());
    }

    #[test]
    fn test_no_high_severity_factor_gives_general_support_only() {
        let v = verdict(
            RiskBand::Medium,
            3,
            vec![
                RiskFactor::new(FactorKind::Attendance, 1, 70.0),
                RiskFactor::new(FactorKind::Performance, 1, 65.0),
                RiskFactor::new(FactorKind::Engagement, 1, 50.0),
            ],
        );
        let items = InterventionRuleEngine::recommend(&v, &profile(70.0, 65.0, 8, 50.0));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, InterventionCategory::GeneralSupport);
        assert_eq!(items[0].priority, Priority::Low);
    }

    #[test]
    fn test_safe_band_yields_only_low_preventive_items() {
        let v = verdict(RiskBand::Safe, 0, Vec::new());
        let items = InterventionRuleEngine::recommend(&v, &profile(95.0, 90.0, 10, 85.0));

        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|i| i.priority == Priority::Low));
    }

    #[test]
    fn test_guardian_contact_window_shrinks_with_attendance() {
        assert_eq!(guardian_contact_days(74.0), 4);
        assert_eq!(guardian_contact_days(45.0), 3);
        assert_eq!(guardian_contact_days(20.0), 1);
        assert_eq!(guardian_contact_days(0.0), 1);

        let mut previous = guardian_contact_days(100.0);
        for attendance in (0..=100).rev() {
            let days = guardian_contact_days(attendance as f64);
            assert!(days <= previous);
            assert!(days >= 1);
            previous = days;
        }
    }
}
