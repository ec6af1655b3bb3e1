//! Tests for metadata parsing

mod parser_tests;
