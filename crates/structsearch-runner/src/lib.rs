//! Command plan assembly and pipeline script dispatch.
//!
//! The launcher accumulates every value the downstream pipeline needs into
//! a [`CommandPlan`], materializes one of the two known script payloads
//! into the workspace, and hands control to it permanently.

pub mod dispatch;
pub mod plan;
pub mod script;

pub use dispatch::dispatch;
pub use plan::{Binding, CommandPlan};
pub use script::ScriptPayload;
