use crate::models::{Gender, PostFlatRequest, PostedBy, Profile, ProfileKind, Verifications};
use std::ops::RangeInclusive;

/// How a profile entered the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileOrigin {
    Signup,
    PostedFlat,
}

impl ProfileOrigin {
    /// Range the creation-time baseline is drawn from
    pub fn baseline_range(&self) -> RangeInclusive<u8> {
        match self {
            ProfileOrigin::Signup => 65..=95,
            ProfileOrigin::PostedFlat => 75..=95,
        }
    }
}

/// Draw a random baseline compatibility for a new profile
///
/// This number is stored on the profile and is never mixed with the
/// pairwise score.
pub fn seed_baseline(origin: ProfileOrigin) -> u8 {
    fastrand::u8(origin.baseline_range())
}

/// Normalise a signup payload before it is stored
///
/// Repository-owned fields are cleared, verification starts from scratch and
/// the baseline is seeded when the client did not send one. Owners and
/// brokers sign up as listings whatever `type` the client sent.
pub fn prepare_signup(mut profile: Profile) -> Profile {
    if profile.user_type.is_some_and(|user_type| !user_type.is_seeker()) {
        profile.kind = ProfileKind::Flat;
    }
    profile.id = String::new();
    profile.created_at = None;
    profile.updated_at = None;
    profile.verifications = Verifications::default();
    if profile.compatibility.is_none() {
        profile.compatibility = Some(seed_baseline(ProfileOrigin::Signup));
    }
    profile
}

/// Build the placeholder listing profile minted when someone posts a flat
///
/// The listing gets its own unique email so it never collides with the
/// poster's account. The poster's contact details are kept in `postedBy`,
/// which is gated the same way as a profile's own phone number.
pub fn build_flat_listing(poster: &Profile, request: PostFlatRequest) -> Profile {
    let listing_email = format!("flat-{}@listings.flatmate.local", uuid::Uuid::new_v4().simple());

    let mut listing = Profile::new(ProfileKind::Flat, request.title, listing_email, request.location);
    listing.user_type = Some(request.poster_type);
    listing.description = request.description;
    listing.budget = Some(format!("₹{}", request.rent));
    listing.amenities = request.amenities;
    listing.image = request.images.into_iter().next();
    listing.gender = request.gender_preference.or(Some(Gender::Any));
    listing.move_in_date = request.availability;
    listing.tags = [request.flat_type.clone(), request.furnishing.clone()]
        .into_iter()
        .flatten()
        .filter(|tag| !tag.is_empty())
        .collect();
    listing.flat_type = request.flat_type;
    listing.furnishing = request.furnishing;
    listing.compatibility = Some(seed_baseline(ProfileOrigin::PostedFlat));
    listing.posted_by = Some(PostedBy {
        name: Some(poster.name.clone()),
        email: Some(poster.email.clone()),
        phone: poster.phone.clone(),
    });
    listing
}
