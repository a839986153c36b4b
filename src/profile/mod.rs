// Profile vectorization — turns declared profile lists into weighted term maps.

pub mod vector;

pub use vector::{normalize_term, ExperienceLevel, UserProfileVector};
