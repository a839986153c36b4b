// Peerlink: profile-overlap recommendations for a student mentorship platform.
//
// This is the library root. The recommendation engine (profile + matching)
// is pure; db, pipeline and web wrap it with storage and HTTP.

pub mod config;
pub mod db;
pub mod matching;
pub mod output;
pub mod pipeline;
pub mod profile;

#[cfg(feature = "web")]
pub mod web;
