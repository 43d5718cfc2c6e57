use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Whether a profile is a person looking for housing or a flat listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Flatmate,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Professional,
    Owner,
    Broker,
}

impl UserType {
    /// Only people looking for housing carry an intent
    pub fn is_seeker(&self) -> bool {
        matches!(self, UserType::Student | UserType::Professional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    LookingForFlat,
    LookingForFlatmate,
    HaveFlatNeedFlatmate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    Any,
}

/// Verification flags shown as badges on a profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verifications {
    #[serde(default)]
    pub phone: bool,
    #[serde(default)]
    pub email: bool,
    #[serde(default)]
    pub college: bool,
    #[serde(default)]
    pub identity: bool,
}

/// Contact details of whoever posted a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedBy {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Marketplace profile: either a seeker or a flat listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_classification", skip_on_field_errors = false))]
pub struct Profile {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[validate(email)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ProfileKind,
    #[serde(rename = "userType", default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub intent: Option<Intent>,

    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(max = 120))]
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[validate(length(min = 1))]
    pub location: String,

    #[serde(default)]
    pub budget: Option<String>,
    #[serde(rename = "roomType", default)]
    pub room_type: Option<String>,
    #[serde(rename = "moveInDate", default)]
    pub move_in_date: Option<String>,
    #[serde(rename = "stayDuration", default)]
    pub stay_duration: Option<String>,

    #[serde(default)]
    pub habits: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,

    // Student / professional details
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(rename = "jobTitle", default)]
    pub job_title: Option<String>,
    #[serde(rename = "workLocation", default)]
    pub work_location: Option<String>,

    // Owner / broker / listing details
    #[serde(rename = "propertyTypes", default)]
    pub property_types: Vec<String>,
    #[serde(rename = "listingLocations", default)]
    pub listing_locations: Option<String>,
    #[serde(rename = "businessName", default)]
    pub business_name: Option<String>,
    #[serde(rename = "businessType", default)]
    pub business_type: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(rename = "flatType", default)]
    pub flat_type: Option<String>,
    #[serde(default)]
    pub furnishing: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,

    /// Search-only labels, independent of habits
    #[serde(default)]
    pub tags: Vec<String>,
    /// Baseline seeded when the profile is created. Not the pairwise score.
    #[validate(range(max = 100))]
    #[serde(default)]
    pub compatibility: Option<u8>,

    #[serde(default)]
    pub verifications: Verifications,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "postedBy", default)]
    pub posted_by: Option<PostedBy>,

    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    /// Profile with the required fields set and everything else empty
    pub fn new(
        kind: ProfileKind,
        name: impl Into<String>,
        email: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            email: email.into(),
            kind,
            user_type: None,
            intent: None,
            name: name.into(),
            age: None,
            gender: None,
            location: location.into(),
            budget: None,
            room_type: None,
            move_in_date: None,
            stay_duration: None,
            habits: Vec::new(),
            amenities: Vec::new(),
            restrictions: Vec::new(),
            description: None,
            college: None,
            course: None,
            year: None,
            company: None,
            job_title: None,
            work_location: None,
            property_types: Vec::new(),
            listing_locations: None,
            business_name: None,
            business_type: None,
            experience: None,
            flat_type: None,
            furnishing: None,
            image: None,
            avatar: None,
            tags: Vec::new(),
            compatibility: None,
            verifications: Verifications::default(),
            phone: None,
            posted_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Helper to check whether this profile may see contact details
    pub fn phone_verified(&self) -> bool {
        self.verifications.phone
    }

    /// Copy of this profile as seen by `viewer`
    ///
    /// Phone, email and poster contact are blanked unless the viewer has a
    /// verified phone number or is looking at their own profile.
    pub fn visible_to(&self, viewer: Option<&Profile>) -> Profile {
        let unlocked = viewer
            .map(|v| v.phone_verified() || (!v.id.is_empty() && v.id == self.id))
            .unwrap_or(false);

        let mut view = self.clone();
        if !unlocked {
            view.phone = None;
            view.email = String::new();
            view.posted_by = None;
        }
        view
    }
}

fn validate_classification(profile: &Profile) -> Result<(), ValidationError> {
    if profile.intent.is_none() {
        return Ok(());
    }

    if profile.kind == ProfileKind::Flat {
        return Err(ValidationError::new("flat_listing_with_intent"));
    }

    match profile.user_type {
        Some(user_type) if !user_type.is_seeker() => {
            Err(ValidationError::new("intent_requires_seeker"))
        }
        _ => Ok(()),
    }
}

/// Filter value that is either the "no constraint" sentinel or a concrete value
///
/// Deserializes from `"all"`, `"any"`, an empty string or `null` as
/// [`Constraint::Any`]; anything else must deserialize as `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint<T> {
    Any,
    Exactly(T),
}

impl<T> Default for Constraint<T> {
    fn default() -> Self {
        Constraint::Any
    }
}

impl<T: PartialEq> Constraint<T> {
    /// Profiles missing the attribute always pass
    pub fn admits(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Constraint::Any, _) => true,
            (Constraint::Exactly(_), None) => true,
            (Constraint::Exactly(expected), Some(actual)) => expected == actual,
        }
    }

    /// Like [`admits`](Self::admits) but the attribute is mandatory
    pub fn requires(&self, value: &T) -> bool {
        match self {
            Constraint::Any => true,
            Constraint::Exactly(expected) => expected == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Constraint::Any)
    }
}

#[derive(Deserialize)]
enum Sentinel {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "")]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawConstraint<T> {
    Sentinel(Sentinel),
    Value(T),
    Null(()),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Constraint<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawConstraint::<T>::deserialize(deserializer)? {
            RawConstraint::Sentinel(Sentinel::All | Sentinel::Any | Sentinel::Empty)
            | RawConstraint::Null(()) => Constraint::Any,
            RawConstraint::Value(value) => Constraint::Exactly(value),
        })
    }
}

impl<T: Serialize> Serialize for Constraint<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Constraint::Any => serializer.serialize_str("any"),
            Constraint::Exactly(value) => value.serialize(serializer),
        }
    }
}

/// Inclusive numeric interval, carried on the wire as `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct ValueRange {
    pub min: u64,
    pub max: u64,
}

impl ValueRange {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(u64, u64)> for ValueRange {
    fn from((min, max): (u64, u64)) -> Self {
        Self { min, max }
    }
}

impl From<ValueRange> for (u64, u64) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}

/// User-selected constraints narrowing the visible profile set
///
/// `FilterSpec::default()` is the all-sentinel spec and admits every profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub purpose: Constraint<ProfileKind>,
    #[serde(rename = "userType", default)]
    pub user_type: Constraint<UserType>,
    #[serde(default)]
    pub gender: Constraint<Gender>,
    #[serde(rename = "roomType", default)]
    pub room_type: Constraint<String>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<ValueRange>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<ValueRange>,
    #[serde(rename = "selectedTags", default)]
    pub selected_tags: Vec<String>,
    #[serde(rename = "selectedAmenities", default)]
    pub selected_amenities: Vec<String>,
    #[serde(rename = "searchQuery", default)]
    pub search_query: String,
}

/// Placeholder values used by the compatibility scorer
///
/// Budget, location and lifestyle have no real pricing or geo model behind
/// them yet; each is a standalone value so it can be swapped independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringBaseline {
    /// Habit score used when there is no viewer to compare against
    pub neutral_habits: u8,
    pub budget: u8,
    pub location: u8,
    pub lifestyle: u8,
}

impl Default for ScoringBaseline {
    fn default() -> Self {
        Self {
            neutral_habits: 50,
            budget: 85,
            location: 75,
            lifestyle: 90,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityLabel {
    Excellent,
    Good,
    Fair,
}

impl CompatibilityLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => CompatibilityLabel::Excellent,
            60..=79 => CompatibilityLabel::Good,
            _ => CompatibilityLabel::Fair,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            CompatibilityLabel::Excellent => "green",
            CompatibilityLabel::Good => "yellow",
            CompatibilityLabel::Fair => "red",
        }
    }
}

/// Pairwise compatibility between a viewer and a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub overall: u8,
    pub habits: u8,
    pub budget: u8,
    pub location: u8,
    pub lifestyle: u8,
    #[serde(rename = "commonHabits")]
    pub common_habits: Vec<String>,
    pub label: CompatibilityLabel,
    pub color: String,
    /// Static illustrative text, not derived from either profile
    pub strengths: Vec<String>,
    /// Static illustrative text, not derived from either profile
    pub challenges: Vec<String>,
}

/// A filtered profile together with its score against the viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProfile {
    pub profile: Profile,
    pub compatibility: CompatibilityReport,
}
