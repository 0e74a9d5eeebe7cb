//! End-to-end compilation tests.
//!
//! - Scenarios of nested composition, mixins and variables
//! - Exports and their correspondence with the output
//! - Output is plain CSS

pub mod tests_exports;
pub mod tests_output;
pub mod tests_scenarios;
