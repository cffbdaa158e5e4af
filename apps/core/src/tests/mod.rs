//! Test Module
//!
//! Integration test suite for the analysis core.
//!
//! ## Test Categories
//! - `gateway_tests`: parameter negotiation against a simulated completion service
//! - `analyzer_tests`: orchestration, normalization, and end-to-end fallback

pub mod analyzer_tests;
