//! Iteration cascade scheduling for profile-based search.
//!
//! Iterative search alternates sequence-profile and structural-alphabet
//! refinement. Thresholds and scoring matrices differ per phase, and the
//! derivation order matters: later snapshots build on the overrides of the
//! structural-profile chain, never the other way around.

use structsearch_params::{AlignmentKind, SearchParams, Stage, StageOverlay};
use structsearch_runner::CommandPlan;

use crate::workflow::{ALIGNMENT_BIAS_SCALE, PREFILTER_BIAS_SCALE};

/// Pseudo-count admixture for the structural-alphabet profile.
const SS_PROFILE_PCA: f64 = 1.4;
const SS_PROFILE_PCB: f64 = 1.5;

/// Scoring matrix for sequence-profile construction.
const SEQUENCE_MATRIX: &str = "blosum62.out";

/// Scoring matrix for structural-alphabet profile construction.
const ALPHABET_MATRIX: &str = "3di.out";

/// Threshold applied to profile construction when the user never set one.
const RELAXED_PROFILE_EVAL: f64 = 0.1;

/// One iteration's derived parameter strings.
///
/// Derived from the base parameters at the moment of snapshotting; later
/// derivations cannot retroactively change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationSnapshot {
    pub index: u32,
    pub prefilter: String,
    pub alignment: String,
}

/// Derive the per-iteration snapshots.
///
/// Iterations `0..N-2` run with the evaluation threshold relaxed to
/// `min(search, profile)` so more candidates survive into profile
/// construction; the final iteration restores the user-intended
/// strictness. Every iteration enables backtrace computation, and the
/// composition-bias scale is swapped between the prefilter and alignment
/// derivations of the same iteration.
#[must_use]
pub fn plan_iterations(
    base: &SearchParams,
    kind: AlignmentKind,
    iterations: u32,
) -> Vec<IterationSnapshot> {
    let original_eval = base.eval_threshold.value();
    let relaxed_eval = original_eval.min(base.eval_profile.value());

    (0..iterations)
        .map(|index| {
            let eval = if index == iterations - 1 {
                original_eval
            } else {
                relaxed_eval
            };
            let prefilter = base.with(&StageOverlay {
                eval_threshold: Some(eval),
                add_backtrace: Some(true),
                comp_bias_correction_scale: Some(PREFILTER_BIAS_SCALE),
                ..StageOverlay::default()
            });
            let alignment = base.with(&StageOverlay {
                eval_threshold: Some(eval),
                add_backtrace: Some(true),
                comp_bias_correction_scale: Some(ALIGNMENT_BIAS_SCALE),
                ..StageOverlay::default()
            });
            IterationSnapshot {
                index,
                prefilter: Stage::Prefilter.parameter_string(&prefilter),
                alignment: kind.alignment_stage().parameter_string(&alignment),
            }
        })
        .collect()
}

/// Extend the base plan with the iteration cascade and the
/// profile-construction bindings.
pub fn extend_plan(
    plan: &mut CommandPlan,
    base: &SearchParams,
    kind: AlignmentKind,
    iterations: u32,
) {
    for snapshot in plan_iterations(base, kind, iterations) {
        plan.bind(
            format!("PREFILTER_PAR_{}", snapshot.index),
            snapshot.prefilter,
        );
        plan.bind(
            format!("ALIGNMENT_PAR_{}", snapshot.index),
            snapshot.alignment,
        );
    }
    plan.bind("NUM_IT", iterations.to_string());

    // Sequence profile from the default sequence matrix.
    let profile = base.with(&StageOverlay {
        scoring_matrix: Some(SEQUENCE_MATRIX.to_string()),
        ..StageOverlay::default()
    });
    plan.bind(
        "PROFILE_PAR",
        Stage::Result2Profile.parameter_string(&profile),
    );

    // Structural-alphabet profile: stronger pseudo-counts, alphabet
    // matrices, profile masking and bias correction off. Without an
    // explicit profile threshold, both thresholds relax to the fixed
    // default for this derivation chain only.
    let mut ss_overlay = StageOverlay {
        pca: Some(SS_PROFILE_PCA),
        pcb: Some(SS_PROFILE_PCB),
        scoring_matrix: Some(ALPHABET_MATRIX.to_string()),
        seed_scoring_matrix: Some(ALPHABET_MATRIX.to_string()),
        mask_profile: Some(0),
        comp_bias_correction: Some(0),
        ..StageOverlay::default()
    };
    if !base.eval_profile.was_set() {
        ss_overlay.eval_profile = Some(RELAXED_PROFILE_EVAL);
        ss_overlay.eval_threshold = Some(RELAXED_PROFILE_EVAL);
    }
    let ss_profile = base.with(&ss_overlay);
    plan.bind(
        "PROFILE_SS_PAR",
        Stage::Result2Profile.parameter_string(&ss_profile),
    );

    // The subtraction and verbosity strings read the structural-profile
    // snapshot: its threshold overrides carry through.
    plan.bind(
        "SUBSTRACT_PAR",
        Stage::SubtractDbs.parameter_string(&ss_profile),
    );
    plan.bind(
        "VERBOSITY_PAR",
        Stage::Verbosity.parameter_string(&ss_profile),
    );
}
