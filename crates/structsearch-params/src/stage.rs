//! Per-stage parameter subsets and their serialized form.

use crate::set::{bool_str, SearchParams};

/// One phase of the pipeline with its own parameter subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// K-mer prefilter over the structural-alphabet databases.
    Prefilter,
    /// Structural-alphabet substitution alignment.
    Align,
    /// Structural superposition alignment.
    TmAlign,
    /// Combined structure-and-sequence alignment.
    StructureAlign,
    /// Profile construction from alignment results.
    Result2Profile,
    /// Removal of already-reported results between iterations.
    SubtractDbs,
    /// Verbosity-only subset for helper invocations.
    Verbosity,
}

impl Stage {
    /// Serialize the stage's parameter subset as a `--flag value` string.
    ///
    /// The flag order within a stage is fixed; downstream scripts splice
    /// the string verbatim into the stage invocation.
    #[must_use]
    pub fn parameter_string(self, p: &SearchParams) -> String {
        let pairs: Vec<(&str, String)> = match self {
            Stage::Prefilter => vec![
                ("-k", p.kmer_size.value().to_string()),
                ("--mask", p.mask_residues.value().to_string()),
                ("--mask-prob", p.mask_prob.value().to_string()),
                ("-s", p.sensitivity.value().to_string()),
                ("--max-seqs", p.max_res_list_len.value().to_string()),
                ("--comp-bias-corr", p.comp_bias_correction.value().to_string()),
                (
                    "--comp-bias-corr-scale",
                    p.comp_bias_correction_scale.value().to_string(),
                ),
                ("-e", p.eval_threshold.value().to_string()),
                ("--threads", p.threads.value().to_string()),
                ("-v", p.verbosity.value().to_string()),
            ],
            Stage::Align | Stage::StructureAlign => vec![
                ("-e", p.eval_threshold.value().to_string()),
                ("--gap-open", p.gap_open.value().to_string()),
                ("--gap-extend", p.gap_extend.value().to_string()),
                ("--alignment-mode", p.alignment_mode.value().to_string()),
                ("-a", bool_str(p.add_backtrace.value()).to_string()),
                ("--comp-bias-corr", p.comp_bias_correction.value().to_string()),
                (
                    "--comp-bias-corr-scale",
                    p.comp_bias_correction_scale.value().to_string(),
                ),
                ("--max-seqs", p.max_res_list_len.value().to_string()),
                ("--threads", p.threads.value().to_string()),
                ("-v", p.verbosity.value().to_string()),
            ],
            Stage::TmAlign => vec![
                ("-e", p.eval_threshold.value().to_string()),
                ("-a", bool_str(p.add_backtrace.value()).to_string()),
                ("--max-seqs", p.max_res_list_len.value().to_string()),
                ("--threads", p.threads.value().to_string()),
                ("-v", p.verbosity.value().to_string()),
            ],
            Stage::Result2Profile => vec![
                ("-e", p.eval_threshold.value().to_string()),
                ("--e-profile", p.eval_profile.value().to_string()),
                ("--pca", p.pca.value().to_string()),
                ("--pcb", p.pcb.value().to_string()),
                ("--mask-profile", p.mask_profile.value().to_string()),
                ("--comp-bias-corr", p.comp_bias_correction.value().to_string()),
                ("--sub-mat", p.scoring_matrix.get().clone()),
                ("--seed-sub-mat", p.seed_scoring_matrix.get().clone()),
                ("--threads", p.threads.value().to_string()),
                ("-v", p.verbosity.value().to_string()),
            ],
            Stage::SubtractDbs => vec![
                ("-e", p.eval_threshold.value().to_string()),
                ("--threads", p.threads.value().to_string()),
                ("-v", p.verbosity.value().to_string()),
            ],
            Stage::Verbosity => vec![("-v", p.verbosity.value().to_string())],
        };

        let mut out = String::new();
        for (flag, value) in pairs {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(flag);
            out.push(' ');
            out.push_str(&value);
        }
        out
    }
}
