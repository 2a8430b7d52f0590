//! The full parameter set consumed by the search workflow.

use crate::param::Param;

/// Immutable base configuration for one launcher invocation.
///
/// Constructed once from defaults plus CLI overrides, then only read.
/// Stage-specific values are derived with [`SearchParams::with`] and a
/// [`StageOverlay`](crate::StageOverlay), never by mutating the base.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    // Prefilter
    pub kmer_size: Param<u32>,
    pub mask_residues: Param<u32>,
    pub mask_prob: Param<f64>,
    pub sensitivity: Param<f64>,
    pub max_res_list_len: Param<u32>,
    pub comp_bias_correction: Param<u32>,
    pub comp_bias_correction_scale: Param<f64>,

    // Alignment
    pub gap_open: Param<u32>,
    pub gap_extend: Param<u32>,
    pub alignment_mode: Param<u32>,
    pub alignment_type: Param<i32>,
    pub add_backtrace: Param<bool>,
    pub eval_threshold: Param<f64>,

    // Iterative profile search
    pub num_iterations: Param<u32>,
    pub eval_profile: Param<f64>,
    pub pca: Param<f64>,
    pub pcb: Param<f64>,
    pub mask_profile: Param<u32>,
    pub scoring_matrix: Param<String>,
    pub seed_scoring_matrix: Param<String>,

    // Workflow
    pub remove_tmp_files: Param<bool>,
    pub reuse_latest: Param<bool>,
    pub runner: Param<String>,
    pub threads: Param<u32>,
    pub verbosity: Param<u32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            kmer_size: Param::new(13),
            mask_residues: Param::new(1),
            mask_prob: Param::new(0.9),
            sensitivity: Param::new(5.7),
            max_res_list_len: Param::new(300),
            comp_bias_correction: Param::new(1),
            comp_bias_correction_scale: Param::new(1.0),

            gap_open: Param::new(11),
            gap_extend: Param::new(1),
            alignment_mode: Param::new(2),
            alignment_type: Param::new(2),
            add_backtrace: Param::new(false),
            eval_threshold: Param::new(0.001),

            num_iterations: Param::new(1),
            eval_profile: Param::new(0.1),
            pca: Param::new(1.1),
            pcb: Param::new(4.1),
            mask_profile: Param::new(1),
            scoring_matrix: Param::new("3di.out".to_string()),
            seed_scoring_matrix: Param::new("3di.out".to_string()),

            remove_tmp_files: Param::new(false),
            reuse_latest: Param::new(false),
            runner: Param::new(String::new()),
            threads: Param::new(1),
            verbosity: Param::new(3),
        }
    }
}

impl SearchParams {
    /// Base defaults with the search-workflow overrides applied.
    ///
    /// The overrides are installed as plain values, then
    /// [`mark_pass_along`](Self::mark_pass_along) flags them after CLI
    /// parsing so child stages treat them as deliberate.
    #[must_use]
    pub fn with_search_defaults() -> Self {
        let mut p = Self::default();
        p.kmer_size.apply(0);
        p.mask_residues.apply(0);
        p.mask_prob.apply(0.99995);
        p.sensitivity.apply(9.5);
        p.max_res_list_len.apply(1000);
        p.gap_open.apply(10);
        p.gap_extend.apply(1);
        p.alignment_mode.apply(3);
        p.remove_tmp_files.apply(true);
        p
    }

    /// Mark the workflow defaults as deliberately set.
    pub fn mark_pass_along(&mut self) {
        self.kmer_size.mark_set();
        self.mask_residues.mark_set();
        self.mask_prob.mark_set();
        self.comp_bias_correction.mark_set();
        self.sensitivity.mark_set();
        self.max_res_list_len.mark_set();
        self.gap_open.mark_set();
        self.gap_extend.mark_set();
        self.alignment_mode.mark_set();
        self.remove_tmp_files.mark_set();
    }

    /// Every parameter in fixed registry order as `(name, value, was_set)`.
    ///
    /// This order is the canonical one: the workspace hash and any other
    /// full-set serialization must iterate parameters through it.
    #[must_use]
    pub fn registry(&self) -> Vec<(&'static str, String, bool)> {
        fn num<T: std::fmt::Display>(p: &Param<T>) -> String {
            format!("{}", p.get())
        }

        vec![
            ("kmer-size", num(&self.kmer_size), self.kmer_size.was_set()),
            (
                "mask",
                num(&self.mask_residues),
                self.mask_residues.was_set(),
            ),
            ("mask-prob", num(&self.mask_prob), self.mask_prob.was_set()),
            (
                "sensitivity",
                num(&self.sensitivity),
                self.sensitivity.was_set(),
            ),
            (
                "max-seqs",
                num(&self.max_res_list_len),
                self.max_res_list_len.was_set(),
            ),
            (
                "comp-bias-corr",
                num(&self.comp_bias_correction),
                self.comp_bias_correction.was_set(),
            ),
            (
                "comp-bias-corr-scale",
                num(&self.comp_bias_correction_scale),
                self.comp_bias_correction_scale.was_set(),
            ),
            ("gap-open", num(&self.gap_open), self.gap_open.was_set()),
            (
                "gap-extend",
                num(&self.gap_extend),
                self.gap_extend.was_set(),
            ),
            (
                "alignment-mode",
                num(&self.alignment_mode),
                self.alignment_mode.was_set(),
            ),
            (
                "alignment-type",
                num(&self.alignment_type),
                self.alignment_type.was_set(),
            ),
            (
                "add-backtrace",
                bool_str(self.add_backtrace.value()).to_string(),
                self.add_backtrace.was_set(),
            ),
            (
                "e",
                num(&self.eval_threshold),
                self.eval_threshold.was_set(),
            ),
            (
                "num-iterations",
                num(&self.num_iterations),
                self.num_iterations.was_set(),
            ),
            (
                "e-profile",
                num(&self.eval_profile),
                self.eval_profile.was_set(),
            ),
            ("pca", num(&self.pca), self.pca.was_set()),
            ("pcb", num(&self.pcb), self.pcb.was_set()),
            (
                "mask-profile",
                num(&self.mask_profile),
                self.mask_profile.was_set(),
            ),
            (
                "sub-mat",
                self.scoring_matrix.get().clone(),
                self.scoring_matrix.was_set(),
            ),
            (
                "seed-sub-mat",
                self.seed_scoring_matrix.get().clone(),
                self.seed_scoring_matrix.was_set(),
            ),
            (
                "remove-tmp-files",
                bool_str(self.remove_tmp_files.value()).to_string(),
                self.remove_tmp_files.was_set(),
            ),
            (
                "reuse-latest",
                bool_str(self.reuse_latest.value()).to_string(),
                self.reuse_latest.was_set(),
            ),
            (
                "mpi-runner",
                self.runner.get().clone(),
                self.runner.was_set(),
            ),
            ("threads", num(&self.threads), self.threads.was_set()),
            ("v", num(&self.verbosity), self.verbosity.was_set()),
        ]
    }

    /// Canonical byte encoding of one invocation, the workspace cache key.
    ///
    /// Encoding, fixed and order-sensitive: each database identifier
    /// followed by `\n`, each positional path followed by `\n`, then every
    /// parameter in registry order as `name=value\n` with a trailing `*`
    /// before the newline when the parameter was explicitly set. Two
    /// invocations hash identically exactly when all three groups match.
    #[must_use]
    pub fn canonical_hash_material(&self, databases: &[&str], paths: &[String]) -> Vec<u8> {
        let mut material = Vec::new();
        for db in databases {
            material.extend_from_slice(db.as_bytes());
            material.push(b'\n');
        }
        for path in paths {
            material.extend_from_slice(path.as_bytes());
            material.push(b'\n');
        }
        for (name, value, was_set) in self.registry() {
            material.extend_from_slice(name.as_bytes());
            material.push(b'=');
            material.extend_from_slice(value.as_bytes());
            if was_set {
                material.push(b'*');
            }
            material.push(b'\n');
        }
        material
    }
}

pub(crate) fn bool_str(v: bool) -> &'static str {
    if v {
        "1"
    } else {
        "0"
    }
}
