//! Shared test helpers.

pub mod project_helpers;
pub mod stylesheet_fixtures;
