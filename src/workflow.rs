//! Assembly of the command plan and dispatch of the search pipeline.
//!
//! The order of operations is load-bearing: the workspace resolves first
//! (every later binding depends on its path), the baseline plan follows,
//! and the iteration cascade extends it only when iterative search is
//! requested. The dispatcher runs exactly once, at the end, and does not
//! return control on success.

use std::convert::Infallible;

use camino::Utf8PathBuf;
use tracing::info;

use structsearch_params::{with_alphabet_suffix, AlignmentKind, SearchParams, Stage, StageOverlay};
use structsearch_runner::{dispatch, CommandPlan, ScriptPayload};
use structsearch_utils::{ConfigError, StructsearchError};

use crate::iteration;

/// Fixed role identifiers of the positional databases; part of the
/// canonical hash encoding.
const DATABASE_ROLES: [&str; 4] = ["queryDB", "targetDB", "resultDB", "tmpDir"];

/// Composition-bias-correction scale in effect while deriving a
/// prefilter-stage parameter string.
pub(crate) const PREFILTER_BIAS_SCALE: f64 = 0.15;

/// Scale in effect while deriving an alignment-stage parameter string.
pub(crate) const ALIGNMENT_BIAS_SCALE: f64 = 0.5;

/// The positional inputs of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInputs {
    pub query: String,
    pub target: String,
    pub results: String,
    pub workspace_root: Utf8PathBuf,
    /// Forwarded verbatim to the pipeline script: the query database plus
    /// any pass-through arguments preceding it.
    pub script_args: Vec<String>,
}

impl SearchInputs {
    /// Split the positional argument list, consumed back-to-front:
    /// workspace root, results path, target database, query database.
    pub fn split(mut positionals: Vec<String>) -> Result<Self, ConfigError> {
        let got = positionals.len();
        let not_enough = ConfigError::NotEnoughPositionals { expected: 4, got };
        let (Some(root), Some(results), Some(target)) =
            (positionals.pop(), positionals.pop(), positionals.pop())
        else {
            return Err(not_enough);
        };
        // The query stays in the list: it is forwarded to the script
        // together with any pass-through arguments preceding it.
        let Some(query) = positionals.last().cloned() else {
            return Err(not_enough);
        };
        Ok(Self {
            query,
            target,
            results,
            workspace_root: Utf8PathBuf::from(root),
            script_args: positionals,
        })
    }
}

/// Everything needed to launch the pipeline, short of dispatching it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub workspace: Utf8PathBuf,
    pub plan: CommandPlan,
    pub payload: ScriptPayload,
    pub script_args: Vec<String>,
}

/// Build the command plan for one invocation.
///
/// Validates the configuration eagerly (a bad alignment type must fail
/// before any workspace is created), resolves the workspace, then
/// accumulates the baseline bindings and, for iterative runs, the
/// iteration cascade.
pub fn assemble(
    params: &SearchParams,
    positionals: Vec<String>,
) -> Result<Assembly, StructsearchError> {
    let kind = AlignmentKind::from_code(params.alignment_type.value())?;
    let iterations = params.num_iterations.value();
    if iterations < 1 {
        return Err(ConfigError::InvalidIterationCount(iterations).into());
    }

    // The hash covers all positionals, the workspace root included.
    let material = params.canonical_hash_material(&DATABASE_ROLES, &positionals);
    let inputs = SearchInputs::split(positionals)?;

    let workspace = structsearch_workspace::resolve(
        &inputs.workspace_root,
        params.reuse_latest.value(),
        &material,
    )?;

    let mut plan = CommandPlan::new();
    plan.bind("TMP_PATH", workspace.as_str());
    plan.bind("RESULTS", inputs.results.as_str());

    // The prefilter always runs over the structural-alphabet databases.
    plan.bind("TARGET_PREFILTER", with_alphabet_suffix(&inputs.target));
    plan.bind("QUERY_PREFILTER", with_alphabet_suffix(&inputs.query));
    plan.bind_opt("INDEXEXT", prebuilt_index_ext(&inputs.target));

    let prefilter = params.with(&StageOverlay {
        comp_bias_correction_scale: Some(PREFILTER_BIAS_SCALE),
        ..StageOverlay::default()
    });
    plan.bind("PREFILTER_PAR", Stage::Prefilter.parameter_string(&prefilter));

    plan.bind("ALIGNMENT_ALGO", kind.algorithm());
    let (query_aln, target_aln) = if kind.uses_suffixed_inputs() {
        (
            with_alphabet_suffix(&inputs.query),
            with_alphabet_suffix(&inputs.target),
        )
    } else {
        (inputs.query.clone(), inputs.target.clone())
    };
    plan.bind("QUERY_ALIGNMENT", query_aln);
    plan.bind("TARGET_ALIGNMENT", target_aln);

    let align = params.with(&StageOverlay {
        comp_bias_correction_scale: Some(ALIGNMENT_BIAS_SCALE),
        ..StageOverlay::default()
    });
    plan.bind(
        "ALIGNMENT_PAR",
        kind.alignment_stage().parameter_string(&align),
    );

    plan.bind_opt(
        "REMOVE_TMP",
        params.remove_tmp_files.value().then(|| "TRUE".to_string()),
    );
    plan.bind("RUNNER", params.runner.get().clone());
    plan.bind("VERBOSITY", Stage::Verbosity.parameter_string(params));

    let payload = if iterations > 1 {
        iteration::extend_plan(&mut plan, params, kind, iterations);
        ScriptPayload::IterativeSearch
    } else {
        ScriptPayload::Search
    };

    Ok(Assembly {
        workspace,
        plan,
        payload,
        script_args: inputs.script_args,
    })
}

/// Assemble the plan and hand the workflow to the pipeline script.
///
/// On success the script replaces this process, so the `Ok` value is
/// uninhabited; a caller observing control coming back treats that as an
/// internal invariant violation.
pub fn run(
    params: &SearchParams,
    positionals: Vec<String>,
) -> Result<Infallible, StructsearchError> {
    let assembly = assemble(params, positionals)?;
    info!(
        workspace = %assembly.workspace,
        payload = assembly.payload.name(),
        "dispatching search pipeline"
    );
    let script = assembly.payload.materialize(&assembly.workspace)?;
    Ok(dispatch(&script, &assembly.plan, &assembly.script_args)?)
}

/// Extension flag for a prebuilt prefilter index on the target database.
fn prebuilt_index_ext(target: &str) -> Option<String> {
    let idx = format!("{target}.idx");
    std::path::Path::new(&idx)
        .is_file()
        .then(|| ".idx".to_string())
}
