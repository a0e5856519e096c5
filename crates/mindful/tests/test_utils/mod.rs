//! Test utilities for facade tests.

pub mod mock_provider;

#[allow(unused_imports)]
pub use mock_provider::MockProvider;
