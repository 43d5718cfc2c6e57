//! Flatmate Match - compatibility and filtering engine for a flat-sharing marketplace
//!
//! This library provides the browse pipeline used by the flatmate service:
//! a conjunctive filter over a profile snapshot followed by a pairwise
//! compatibility score against the viewing profile.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, filter, parse_budget, score};
pub use models::{Profile, FilterSpec, CompatibilityReport, ScoredProfile, ScoringBaseline, BrowseRequest, BrowseResponse};
