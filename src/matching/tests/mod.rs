//! Tests for file matching

mod matcher_tests;
