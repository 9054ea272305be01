//! Unit and fake-backed tests for the report stage.

mod fs_tests;
