//! Unit and fake-backed tests for the intake stage.

mod parser_tests;
