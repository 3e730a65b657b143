//! Unit tests for the dataset parsers.
//!
//! These tests feed small excerpts shaped like the real dataset files through
//! each parser, including the malformed lines the parsers must tolerate.

mod parts_tests;
