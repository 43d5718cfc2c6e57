use crate::models::{CompatibilityLabel, CompatibilityReport, Profile, ScoringBaseline};
use crate::core::tags::{coverage, overlap};

/// Static illustrative strengths shown on every report
pub const DEFAULT_STRENGTHS: [&str; 4] = [
    "Both prefer clean living spaces",
    "Similar study/work schedules",
    "Compatible dietary preferences",
    "Similar age group",
];

/// Static illustrative challenges shown on every report
pub const DEFAULT_CHALLENGES: [&str; 2] = [
    "Different preferred move-in dates",
    "Slightly different budget ranges",
];

/// Score how compatible `viewer` is with `candidate` using the default baseline
pub fn score(viewer: Option<&Profile>, candidate: &Profile) -> CompatibilityReport {
    calculate_compatibility(viewer, candidate, &ScoringBaseline::default())
}

/// Calculate a compatibility report (0-100) for a candidate
///
/// Scoring formula:
/// overall = round((habits + budget + location + lifestyle) / 4)
///
/// Every sub-score is always present; missing data falls back to the
/// baseline so the mean is never taken over a partial set.
pub fn calculate_compatibility(
    viewer: Option<&Profile>,
    candidate: &Profile,
    baseline: &ScoringBaseline,
) -> CompatibilityReport {
    let habits = habit_score(viewer, candidate, baseline);
    let budget = budget_score(viewer, candidate, baseline);
    let location = location_score(viewer, candidate, baseline);
    let lifestyle = lifestyle_score(viewer, candidate, baseline);

    let overall = overall_score([habits, budget, location, lifestyle]);
    let label = CompatibilityLabel::from_score(overall);

    let common_habits = viewer
        .map(|v| overlap(&v.habits, &candidate.habits))
        .unwrap_or_default();

    CompatibilityReport {
        overall,
        habits,
        budget,
        location,
        lifestyle,
        common_habits,
        label,
        color: label.color().to_string(),
        strengths: static_strengths(),
        challenges: static_challenges(),
    }
}

/// Rounded arithmetic mean of the four sub-scores
#[inline]
pub fn overall_score(sub_scores: [u8; 4]) -> u8 {
    let sum: u32 = sub_scores.iter().map(|s| u32::from((*s).min(100))).sum();
    ((sum + 2) / 4) as u8
}

/// Habit overlap between viewer and candidate
#[inline]
pub fn habit_score(viewer: Option<&Profile>, candidate: &Profile, baseline: &ScoringBaseline) -> u8 {
    match viewer {
        Some(viewer) => coverage(&viewer.habits, &candidate.habits),
        None => baseline.neutral_habits.min(100),
    }
}

/// Budget fit. Placeholder until a pricing model exists.
#[inline]
pub fn budget_score(_viewer: Option<&Profile>, _candidate: &Profile, baseline: &ScoringBaseline) -> u8 {
    baseline.budget.min(100)
}

/// Location fit. Placeholder until a geo model exists.
#[inline]
pub fn location_score(_viewer: Option<&Profile>, _candidate: &Profile, baseline: &ScoringBaseline) -> u8 {
    baseline.location.min(100)
}

/// Lifestyle fit. Placeholder.
#[inline]
pub fn lifestyle_score(_viewer: Option<&Profile>, _candidate: &Profile, baseline: &ScoringBaseline) -> u8 {
    baseline.lifestyle.min(100)
}

fn static_strengths() -> Vec<String> {
    DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect()
}

fn static_challenges() -> Vec<String> {
    DEFAULT_CHALLENGES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfileKind;

    fn create_test_profile(id: &str, habits: &[&str]) -> Profile {
        let mut profile = Profile::new(
            ProfileKind::Flatmate,
            format!("User {}", id),
            format!("{}@example.com", id),
            "Okhla, New Delhi",
        );
        profile.id = id.to_string();
        profile.age = Some(24);
        profile.habits = habits.iter().map(|h| h.to_string()).collect();
        profile.compatibility = Some(80);
        profile
    }

    #[test]
    fn test_score_with_viewer() {
        let viewer = create_test_profile("viewer", &["Clean", "Early Riser"]);
        let candidate = create_test_profile("candidate", &["Clean"]);

        let report = score(Some(&viewer), &candidate);

        assert_eq!(report.habits, 50);
        // (50 + 85 + 75 + 90) / 4 = 75
        assert_eq!(report.overall, 75);
        assert_eq!(report.label, CompatibilityLabel::Good);
        assert_eq!(report.color, "yellow");
        assert_eq!(report.common_habits, vec!["Clean"]);
    }

    #[test]
    fn test_candidate_without_habits() {
        let viewer = create_test_profile("viewer", &["Clean", "Social"]);
        let candidate = create_test_profile("candidate", &[]);

        let report = score(Some(&viewer), &candidate);

        assert_eq!(report.habits, 0);
        // (0 + 85 + 75 + 90) / 4 = 62.5 -> 63
        assert_eq!(report.overall, 63);
        assert!(report.common_habits.is_empty());
    }

    #[test]
    fn test_anonymous_viewer_uses_neutral_habits() {
        let candidate = create_test_profile("candidate", &["Clean"]);

        let report = score(None, &candidate);

        assert_eq!(report.habits, 50);
        assert!(report.common_habits.is_empty());
        assert_eq!(report.overall, 75);
    }

    #[test]
    fn test_baseline_compatibility_is_not_used() {
        let viewer = create_test_profile("viewer", &["Clean"]);
        let mut low = create_test_profile("a", &["Clean"]);
        let mut high = create_test_profile("b", &["Clean"]);
        low.compatibility = Some(65);
        high.compatibility = Some(95);

        assert_eq!(score(Some(&viewer), &low), score(Some(&viewer), &high));
    }

    #[test]
    fn test_overall_is_mean_of_sub_scores() {
        let baseline = ScoringBaseline {
            neutral_habits: 0,
            budget: 100,
            location: 0,
            lifestyle: 0,
        };
        let candidate = create_test_profile("candidate", &[]);

        let report = calculate_compatibility(None, &candidate, &baseline);

        assert_eq!(report.overall, 25);
        assert_eq!(report.label, CompatibilityLabel::Fair);
        assert_eq!(report.color, "red");
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(CompatibilityLabel::from_score(100), CompatibilityLabel::Excellent);
        assert_eq!(CompatibilityLabel::from_score(80), CompatibilityLabel::Excellent);
        assert_eq!(CompatibilityLabel::from_score(79), CompatibilityLabel::Good);
        assert_eq!(CompatibilityLabel::from_score(60), CompatibilityLabel::Good);
        assert_eq!(CompatibilityLabel::from_score(59), CompatibilityLabel::Fair);
        assert_eq!(CompatibilityLabel::from_score(0), CompatibilityLabel::Fair);
    }

    #[test]
    fn test_overall_rounding() {
        assert_eq!(overall_score([100, 100, 100, 100]), 100);
        assert_eq!(overall_score([0, 0, 0, 1]), 0);
        assert_eq!(overall_score([0, 0, 1, 1]), 1);
        assert_eq!(overall_score([0, 0, 0, 0]), 0);
    }

    #[test]
    fn test_static_lists_present() {
        let report = score(None, &create_test_profile("candidate", &[]));
        assert_eq!(report.strengths.len(), DEFAULT_STRENGTHS.len());
        assert_eq!(report.challenges.len(), DEFAULT_CHALLENGES.len());
    }
}
