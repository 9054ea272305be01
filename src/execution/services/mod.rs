//! Service layer for bounded tool execution.

mod orchestrator;

pub use orchestrator::{
    DEFAULT_TOOL_TIMEOUT, OrchestratorError, OrchestratorResult, OrchestratorService, ToolSettings,
};
