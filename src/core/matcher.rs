use crate::models::{CompatibilityReport, FilterSpec, Profile, ScoredProfile, ScoringBaseline};
use crate::core::{filters::matches_filter, scoring::calculate_compatibility};

/// Result of a browse pass
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredProfile>,
    pub total_candidates: usize,
}

/// Browse orchestrator: filters a profile snapshot and scores what is left
///
/// # Pipeline Stages
/// 1. Filter predicate (purpose, classification, ranges, tags, search)
/// 2. Pairwise compatibility against the viewer
/// 3. Truncation to the requested limit
///
/// Results keep the snapshot's iteration order. No ranking is applied.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    baseline: ScoringBaseline,
}

impl Matcher {
    pub fn new(baseline: ScoringBaseline) -> Self {
        Self { baseline }
    }

    pub fn baseline(&self) -> &ScoringBaseline {
        &self.baseline
    }

    /// Filter `candidates` with `spec` and attach each survivor's score
    ///
    /// # Arguments
    /// * `viewer` - The browsing profile, or `None` for anonymous browsing
    /// * `candidates` - Snapshot of the profile collection
    /// * `spec` - The user's filter selection
    /// * `limit` - Maximum number of results to return
    pub fn browse(
        &self,
        viewer: Option<&Profile>,
        candidates: Vec<Profile>,
        spec: &FilterSpec,
        limit: usize,
    ) -> MatchResult {
        let total_candidates = candidates.len();

        let matches: Vec<ScoredProfile> = candidates
            .into_iter()
            .filter(|profile| matches_filter(profile, spec))
            .take(limit)
            .map(|profile| {
                let compatibility = self.compatibility(viewer, &profile);
                ScoredProfile {
                    profile: profile.visible_to(viewer),
                    compatibility,
                }
            })
            .collect();

        MatchResult {
            matches,
            total_candidates,
        }
    }

    /// Pairwise score between `viewer` and `candidate`
    pub fn compatibility(&self, viewer: Option<&Profile>, candidate: &Profile) -> CompatibilityReport {
        calculate_compatibility(viewer, candidate, &self.baseline)
    }
}
