use crate::models::{FilterSpec, Profile};
use crate::core::{
    budget::{parse_budget, ranges_overlap},
    tags::is_superset,
};

/// Keep the profiles that satisfy every constraint in `spec`
///
/// Each profile is judged on its own and the input order is preserved.
pub fn filter(profiles: Vec<Profile>, spec: &FilterSpec) -> Vec<Profile> {
    profiles
        .into_iter()
        .filter(|profile| matches_filter(profile, spec))
        .collect()
}

/// Check whether a single profile belongs in the result set
///
/// All constraints are conjunctive. A constraint set to its sentinel never
/// excludes anything, and missing or malformed profile data never excludes a
/// profile on that criterion.
#[inline]
pub fn matches_filter(profile: &Profile, spec: &FilterSpec) -> bool {
    matches_classification(profile, spec)
        && matches_age(profile, spec)
        && matches_budget(profile, spec)
        && matches_tags(profile, spec)
        && matches_search(profile, &spec.search_query)
}

/// Purpose, user type, gender and room type
#[inline]
pub fn matches_classification(profile: &Profile, spec: &FilterSpec) -> bool {
    spec.purpose.requires(&profile.kind)
        && spec.user_type.admits(profile.user_type.as_ref())
        && spec.gender.admits(profile.gender.as_ref())
        && spec.room_type.admits(profile.room_type.as_ref())
}

#[inline]
pub fn matches_age(profile: &Profile, spec: &FilterSpec) -> bool {
    match (profile.age, &spec.age_range) {
        (Some(age), Some(range)) => range.contains(u64::from(age)),
        _ => true,
    }
}

/// Exclude only when the budget parses and does not overlap the filter range
#[inline]
pub fn matches_budget(profile: &Profile, spec: &FilterSpec) -> bool {
    let Some(filter_range) = &spec.budget_range else {
        return true;
    };

    match profile.budget.as_deref().and_then(parse_budget) {
        Some(profile_range) => ranges_overlap(filter_range, &profile_range),
        None => true,
    }
}

/// Selected tags and amenities must all be present on the profile
#[inline]
pub fn matches_tags(profile: &Profile, spec: &FilterSpec) -> bool {
    is_superset(&spec.selected_tags, &profile.tags)
        && is_superset(&spec.selected_amenities, &profile.amenities)
}

/// Case-insensitive substring search over name, location, college and description
pub fn matches_search(profile: &Profile, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [
        Some(profile.name.as_str()),
        Some(profile.location.as_str()),
        profile.college.as_deref(),
        profile.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Constraint, Gender, ProfileKind, UserType, ValueRange};

    fn create_test_profile(kind: ProfileKind) -> Profile {
        let mut profile = Profile::new(kind, "Aarav Sharma", "aarav@example.com", "Koramangala, Bangalore");
        profile.id = "test_user".to_string();
        profile.age = Some(24);
        profile.gender = Some(Gender::Male);
        profile.user_type = Some(UserType::Professional);
        profile.budget = Some("₹15,000 - ₹20,000".to_string());
        profile.room_type = Some("Private Room".to_string());
        profile.tags = vec!["Clean".to_string(), "Quiet".to_string()];
        profile.amenities = vec!["WiFi".to_string(), "AC".to_string()];
        profile.college = Some("Christ University".to_string());
        profile.description = Some("Software engineer who enjoys cooking".to_string());
        profile
    }

    #[test]
    fn test_default_spec_admits_everything() {
        let spec = FilterSpec::default();
        assert!(matches_filter(&create_test_profile(ProfileKind::Flatmate), &spec));
        assert!(matches_filter(&create_test_profile(ProfileKind::Flat), &spec));

        let bare = Profile::new(ProfileKind::Flat, "Listing", "l@example.com", "Pune");
        assert!(matches_filter(&bare, &spec));
    }

    #[test]
    fn test_purpose() {
        let spec = FilterSpec {
            purpose: Constraint::Exactly(ProfileKind::Flat),
            ..Default::default()
        };
        assert!(!matches_filter(&create_test_profile(ProfileKind::Flatmate), &spec));
        assert!(matches_filter(&create_test_profile(ProfileKind::Flat), &spec));
    }

    #[test]
    fn test_optional_attributes_pass_when_missing() {
        let spec = FilterSpec {
            user_type: Constraint::Exactly(UserType::Student),
            gender: Constraint::Exactly(Gender::Female),
            room_type: Constraint::Exactly("Shared Room".to_string()),
            ..Default::default()
        };

        let mut profile = create_test_profile(ProfileKind::Flatmate);
        assert!(!matches_filter(&profile, &spec));

        profile.user_type = None;
        profile.gender = None;
        profile.room_type = None;
        assert!(matches_filter(&profile, &spec));
    }

    #[test]
    fn test_age_range() {
        let mut spec = FilterSpec {
            age_range: Some(ValueRange::new(18, 22)),
            ..Default::default()
        };
        let mut profile = create_test_profile(ProfileKind::Flatmate);
        assert!(!matches_filter(&profile, &spec));

        spec.age_range = Some(ValueRange::new(24, 30));
        assert!(matches_filter(&profile, &spec));

        profile.age = None;
        spec.age_range = Some(ValueRange::new(50, 60));
        assert!(matches_filter(&profile, &spec));
    }

    #[test]
    fn test_budget_range() {
        let profile = create_test_profile(ProfileKind::Flatmate);
        let mut spec = FilterSpec {
            budget_range: Some(ValueRange::new(0, 14999)),
            ..Default::default()
        };
        assert!(!matches_filter(&profile, &spec));

        spec.budget_range = Some(ValueRange::new(0, 15000));
        assert!(matches_filter(&profile, &spec));

        spec.budget_range = Some(ValueRange::new(20000, 90000));
        assert!(matches_filter(&profile, &spec));

        spec.budget_range = Some(ValueRange::new(20001, 90000));
        assert!(!matches_filter(&profile, &spec));
    }

    #[test]
    fn test_unparseable_budget_is_not_excluded() {
        let mut profile = create_test_profile(ProfileKind::Flat);
        profile.budget = Some("ask owner".to_string());
        let spec = FilterSpec {
            budget_range: Some(ValueRange::new(0, 1)),
            ..Default::default()
        };
        assert!(matches_filter(&profile, &spec));

        profile.budget = None;
        assert!(matches_filter(&profile, &spec));
    }

    #[test]
    fn test_tags_and_amenities() {
        let profile = create_test_profile(ProfileKind::Flatmate);
        let mut spec = FilterSpec {
            selected_tags: vec!["Clean".to_string()],
            selected_amenities: vec!["WiFi".to_string(), "AC".to_string()],
            ..Default::default()
        };
        assert!(matches_filter(&profile, &spec));

        spec.selected_tags.push("Pet Friendly".to_string());
        assert!(!matches_filter(&profile, &spec));

        spec.selected_tags.clear();
        spec.selected_amenities.push("Gym".to_string());
        assert!(!matches_filter(&profile, &spec));
    }

    #[test]
    fn test_search_fields() {
        let profile = create_test_profile(ProfileKind::Flatmate);

        assert!(matches_search(&profile, "aarav"));
        assert!(matches_search(&profile, "BANGALORE"));
        assert!(matches_search(&profile, "christ"));
        assert!(matches_search(&profile, "cooking"));
        assert!(matches_search(&profile, ""));
        assert!(!matches_search(&profile, "mumbai"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let mut first = create_test_profile(ProfileKind::Flatmate);
        first.id = "1".to_string();
        let mut second = create_test_profile(ProfileKind::Flat);
        second.id = "2".to_string();
        let mut third = create_test_profile(ProfileKind::Flatmate);
        third.id = "3".to_string();

        let spec = FilterSpec {
            purpose: Constraint::Exactly(ProfileKind::Flatmate),
            ..Default::default()
        };
        let ids: Vec<String> = filter(vec![first, second, third], &spec)
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(ids, vec!["1", "3"]);
    }
}
