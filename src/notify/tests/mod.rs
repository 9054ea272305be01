//! Unit and fake-backed tests for the notify stage.

mod fs_audit_tests;
