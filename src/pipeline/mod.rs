// Pipelines that connect storage to the matching engine.

pub mod import;
pub mod recommend;
