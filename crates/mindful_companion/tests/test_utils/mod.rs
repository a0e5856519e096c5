//! Test utilities for companion tests.

pub mod mock_companion;

#[allow(unused_imports)]
pub use mock_companion::MockCompanionDriver;
