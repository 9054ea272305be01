//! Unit, fake-backed, and real-process tests for the execution stage.

mod invocation_tests;
mod orchestrator_tests;
#[cfg(unix)]
mod runner_tests;
