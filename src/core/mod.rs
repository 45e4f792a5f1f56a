//! Workflow orchestration.

pub mod output;
pub mod processor;
pub mod vault;

pub use output::OutputLocation;
pub use processor::{Outcome, Processor, ProcessorSettings, WorkflowError};
