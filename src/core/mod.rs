// Core algorithm exports
pub mod budget;
pub mod filters;
pub mod matcher;
pub mod scoring;
pub mod tags;

pub use budget::{parse_budget, ranges_overlap};
pub use filters::{filter, matches_filter};
pub use matcher::{Matcher, MatchResult};
pub use scoring::{score, calculate_compatibility};
pub use tags::{overlap, coverage, is_superset};
