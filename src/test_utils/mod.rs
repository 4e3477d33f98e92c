//! Test utilities and mock implementations.
//!
//! This module provides a mock implementation of the database trait and
//! in-memory settings fixtures for use in unit tests.

pub mod mocks;

pub use mocks::{MockDatabase, sample_settings, settings_with};
