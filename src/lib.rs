//! structsearch - launcher for the multi-stage structural-sequence search
//! pipeline.
//!
//! Given two structure databases, an output target and a workspace root,
//! the launcher derives a content-addressed workspace, selects an
//! alignment algorithm variant, computes the parameter subset every
//! pipeline stage receives, and hands the resulting command plan to the
//! pipeline script. For iterative profile search it additionally schedules
//! a cascade of per-iteration parameter snapshots.
//!
//! The heavy lifting (prefiltering, alignment, profile construction) lives
//! in the pipeline stages the script invokes; this crate only decides what
//! they run with.
//!
//! # Crate layout
//!
//! - `structsearch-params` - parameter model, stage subsets, algorithm
//!   selection
//! - `structsearch-workspace` - content-addressed workspace resolution
//! - `structsearch-runner` - command plan and script dispatch
//! - `structsearch-utils` - error taxonomy, exit codes, logging,
//!   filesystem helpers
//!
//! The [`workflow`] module ties them together; [`cli`] is the binary's
//! argument surface.

pub mod cli;
pub mod iteration;
pub mod workflow;

pub use iteration::{plan_iterations, IterationSnapshot};
pub use workflow::{assemble, Assembly, SearchInputs};

pub use structsearch_params::{
    with_alphabet_suffix, AlignmentKind, Param, SearchParams, Stage, StageOverlay,
    STRUCTURAL_ALPHABET_SUFFIX,
};
pub use structsearch_runner::{Binding, CommandPlan, ScriptPayload};
pub use structsearch_utils::{
    ConfigError, DispatchError, ExitCode, StructsearchError, WorkspaceError,
};
