//! Stage-specific parameter overrides.

use crate::set::SearchParams;

/// A small overlay of stage-specific overrides.
///
/// Deriving a stage's parameter string never mutates the shared base:
/// the planner builds an overlay, [`SearchParams::with`] returns a
/// snapshot, and the snapshot is serialized. Overlay application does not
/// touch the explicitly-set flags; those record user intent, not
/// scheduling.
#[derive(Debug, Clone, Default)]
pub struct StageOverlay {
    pub eval_threshold: Option<f64>,
    pub eval_profile: Option<f64>,
    pub comp_bias_correction: Option<u32>,
    pub comp_bias_correction_scale: Option<f64>,
    pub add_backtrace: Option<bool>,
    pub pca: Option<f64>,
    pub pcb: Option<f64>,
    pub mask_profile: Option<u32>,
    pub scoring_matrix: Option<String>,
    pub seed_scoring_matrix: Option<String>,
}

impl SearchParams {
    /// Snapshot of the base with `overlay` applied.
    #[must_use]
    pub fn with(&self, overlay: &StageOverlay) -> SearchParams {
        let mut p = self.clone();
        if let Some(v) = overlay.eval_threshold {
            p.eval_threshold.apply(v);
        }
        if let Some(v) = overlay.eval_profile {
            p.eval_profile.apply(v);
        }
        if let Some(v) = overlay.comp_bias_correction {
            p.comp_bias_correction.apply(v);
        }
        if let Some(v) = overlay.comp_bias_correction_scale {
            p.comp_bias_correction_scale.apply(v);
        }
        if let Some(v) = overlay.add_backtrace {
            p.add_backtrace.apply(v);
        }
        if let Some(v) = overlay.pca {
            p.pca.apply(v);
        }
        if let Some(v) = overlay.pcb {
            p.pcb.apply(v);
        }
        if let Some(v) = overlay.mask_profile {
            p.mask_profile.apply(v);
        }
        if let Some(v) = &overlay.scoring_matrix {
            p.scoring_matrix.apply(v.clone());
        }
        if let Some(v) = &overlay.seed_scoring_matrix {
            p.seed_scoring_matrix.apply(v.clone());
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overlay_is_identity() {
        let base = SearchParams::with_search_defaults();
        assert_eq!(base.with(&StageOverlay::default()), base);
    }

    #[test]
    fn overlay_does_not_mark_parameters_set() {
        let base = SearchParams::with_search_defaults();
        let snap = base.with(&StageOverlay {
            eval_threshold: Some(0.1),
            add_backtrace: Some(true),
            ..StageOverlay::default()
        });
        assert_eq!(snap.eval_threshold.value(), 0.1);
        assert!(snap.add_backtrace.value());
        assert!(!snap.eval_threshold.was_set());
        assert!(!snap.add_backtrace.was_set());
    }

    #[test]
    fn overlay_preserves_existing_set_flags() {
        let mut base = SearchParams::with_search_defaults();
        base.eval_threshold.set(0.01);

        let snap = base.with(&StageOverlay {
            eval_threshold: Some(0.1),
            ..StageOverlay::default()
        });
        assert_eq!(snap.eval_threshold.value(), 0.1);
        assert!(snap.eval_threshold.was_set());
    }

    #[test]
    fn snapshots_are_independent_of_later_overlays() {
        let base = SearchParams::with_search_defaults();
        let first = base.with(&StageOverlay {
            comp_bias_correction_scale: Some(0.15),
            ..StageOverlay::default()
        });
        let _second = base.with(&StageOverlay {
            comp_bias_correction_scale: Some(0.5),
            ..StageOverlay::default()
        });
        assert_eq!(first.comp_bias_correction_scale.value(), 0.15);
    }

    #[test]
    fn string_overrides_replace_matrices() {
        let base = SearchParams::with_search_defaults();
        let snap = base.with(&StageOverlay {
            scoring_matrix: Some("blosum62.out".to_string()),
            ..StageOverlay::default()
        });
        assert_eq!(snap.scoring_matrix.get(), "blosum62.out");
        assert_eq!(snap.seed_scoring_matrix.get(), "3di.out");
    }
}
