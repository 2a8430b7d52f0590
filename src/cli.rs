//! Command-line interface for the structsearch launcher.

use clap::Parser;

use structsearch_params::SearchParams;
use structsearch_utils::logging::init_tracing;
use structsearch_utils::{ExitCode, StructsearchError};

use crate::workflow;

/// structsearch - launcher for the structural-sequence search pipeline
#[derive(Parser, Debug)]
#[command(name = "structsearch")]
#[command(about = "Configure and launch the multi-stage structural-sequence search pipeline")]
#[command(long_about = r#"
structsearch configures and launches the multi-stage
structural-sequence search pipeline: it derives a content-addressed
workspace from its inputs, assembles the command plan for every
downstream pipeline stage, and hands the plan to the pipeline script.
On success the script replaces this process.

EXAMPLES:
  # Single-pass search with structural superposition scoring
  structsearch queryDB targetDB resultDB tmp/ --alignment-type 1

  # Three-iteration profile search, relaxed early thresholds
  structsearch queryDB targetDB resultDB tmp/ --num-iterations 3

  # Re-enter the most recently created workspace
  structsearch queryDB targetDB resultDB tmp/ --reuse-latest

  # Inspect the plan without dispatching
  structsearch queryDB targetDB resultDB tmp/ --dry-run

POSITIONAL ARGUMENTS:
  Consumed back-to-front: workspace root, results path, target database,
  query database. Anything before those is passed through to the pipeline
  script verbatim.
"#)]
#[command(version)]
pub struct Cli {
    /// <queryDB> <targetDB> <resultDB> <tmpDir>, preceded by optional
    /// pass-through arguments for the pipeline script
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Sensitivity of the prefilter (1.0 fastest, 9.5 most sensitive)
    #[arg(short = 's', long)]
    pub sensitivity: Option<f64>,

    /// K-mer size (0 = choose automatically)
    #[arg(short = 'k', long)]
    pub kmer_size: Option<u32>,

    /// Mask low-complexity residues in the prefilter (0/1)
    #[arg(long)]
    pub mask: Option<u32>,

    /// Probability cutoff for residue masking
    #[arg(long)]
    pub mask_prob: Option<f64>,

    /// Maximum results per query passed between stages
    #[arg(long)]
    pub max_seqs: Option<u32>,

    /// Composition bias correction (0/1)
    #[arg(long)]
    pub comp_bias_corr: Option<u32>,

    /// Composition bias correction scale
    #[arg(long)]
    pub comp_bias_corr_scale: Option<f64>,

    /// Gap open cost
    #[arg(long)]
    pub gap_open: Option<u32>,

    /// Gap extension cost
    #[arg(long)]
    pub gap_extend: Option<u32>,

    /// Alignment scoring mode (0-4)
    #[arg(long)]
    pub alignment_mode: Option<u32>,

    /// Alignment algorithm: 0 structure substitution, 1 structural
    /// superposition, 2 combined structure-sequence
    #[arg(long)]
    pub alignment_type: Option<i32>,

    /// Compute the alignment backtrace
    #[arg(short = 'a', long)]
    pub add_backtrace: bool,

    /// Evaluation threshold for reported matches
    #[arg(short = 'e', long = "eval")]
    pub eval_threshold: Option<f64>,

    /// Number of iterative profile search passes
    #[arg(long)]
    pub num_iterations: Option<u32>,

    /// Evaluation threshold for profile admission
    #[arg(long = "e-profile")]
    pub eval_profile: Option<f64>,

    /// Pseudo count admixture strength
    #[arg(long)]
    pub pca: Option<f64>,

    /// Pseudo count neutral background strength
    #[arg(long)]
    pub pcb: Option<f64>,

    /// Mask profile columns (0/1)
    #[arg(long)]
    pub mask_profile: Option<u32>,

    /// Substitution matrix file
    #[arg(long)]
    pub sub_mat: Option<String>,

    /// Substitution matrix file for k-mer seeding
    #[arg(long)]
    pub seed_sub_mat: Option<String>,

    /// Delete temporary files once the pipeline finishes
    #[arg(long)]
    pub remove_tmp_files: Option<bool>,

    /// Reuse the most recently created workspace under the root
    #[arg(long)]
    pub reuse_latest: bool,

    /// Runner prefix for stage invocations (e.g. an MPI launcher)
    #[arg(long)]
    pub mpi_runner: Option<String>,

    /// Worker threads per stage
    #[arg(long)]
    pub threads: Option<u32>,

    /// Verbosity (0 quiet .. 3 debug)
    #[arg(short = 'v', long)]
    pub verbosity: Option<u32>,

    /// Print the assembled plan as JSON instead of dispatching
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Build the immutable parameter base: workflow defaults, then CLI
    /// overrides (marked as deliberate), then the pass-along marking.
    #[must_use]
    pub fn to_params(&self) -> SearchParams {
        let mut p = SearchParams::with_search_defaults();

        if let Some(v) = self.sensitivity {
            p.sensitivity.set(v);
        }
        if let Some(v) = self.kmer_size {
            p.kmer_size.set(v);
        }
        if let Some(v) = self.mask {
            p.mask_residues.set(v);
        }
        if let Some(v) = self.mask_prob {
            p.mask_prob.set(v);
        }
        if let Some(v) = self.max_seqs {
            p.max_res_list_len.set(v);
        }
        if let Some(v) = self.comp_bias_corr {
            p.comp_bias_correction.set(v);
        }
        if let Some(v) = self.comp_bias_corr_scale {
            p.comp_bias_correction_scale.set(v);
        }
        if let Some(v) = self.gap_open {
            p.gap_open.set(v);
        }
        if let Some(v) = self.gap_extend {
            p.gap_extend.set(v);
        }
        if let Some(v) = self.alignment_mode {
            p.alignment_mode.set(v);
        }
        if let Some(v) = self.alignment_type {
            p.alignment_type.set(v);
        }
        if self.add_backtrace {
            p.add_backtrace.set(true);
        }
        if let Some(v) = self.eval_threshold {
            p.eval_threshold.set(v);
        }
        if let Some(v) = self.num_iterations {
            p.num_iterations.set(v);
        }
        if let Some(v) = self.eval_profile {
            p.eval_profile.set(v);
        }
        if let Some(v) = self.pca {
            p.pca.set(v);
        }
        if let Some(v) = self.pcb {
            p.pcb.set(v);
        }
        if let Some(v) = self.mask_profile {
            p.mask_profile.set(v);
        }
        if let Some(v) = &self.sub_mat {
            p.scoring_matrix.set(v.clone());
        }
        if let Some(v) = &self.seed_sub_mat {
            p.seed_scoring_matrix.set(v.clone());
        }
        if let Some(v) = self.remove_tmp_files {
            p.remove_tmp_files.set(v);
        }
        if self.reuse_latest {
            p.reuse_latest.set(true);
        }
        if let Some(v) = &self.mpi_runner {
            p.runner.set(v.clone());
        }
        if let Some(v) = self.threads {
            p.threads.set(v);
        }
        if let Some(v) = self.verbosity {
            p.verbosity.set(v);
        }

        p.mark_pass_along();
        p
    }
}

/// CLI entry point. Returns the exit code to use on failure; on a
/// successful dispatch this never returns at all.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    let params = cli.to_params();
    init_tracing(params.verbosity.value());

    if cli.dry_run {
        let assembly = workflow::assemble(&params, cli.files.clone()).map_err(report)?;
        let rendered = serde_json::json!({
            "workspace": assembly.workspace.as_str(),
            "payload": assembly.payload.name(),
            "script_args": assembly.script_args,
            "plan": assembly.plan,
        });
        let text = serde_json::to_string_pretty(&rendered).map_err(|e| {
            tracing::error!("failed to render plan: {e}");
            ExitCode::INTERNAL
        })?;
        println!("{text}");
        return Ok(());
    }

    match workflow::run(&params, cli.files.clone()) {
        Ok(never) => match never {},
        Err(e) => Err(report(e)),
    }
}

fn report(e: StructsearchError) -> ExitCode {
    tracing::error!("{e}");
    e.to_exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("structsearch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_overrides_mark_parameters_set() {
        let cli = parse(&["q", "t", "r", "tmp", "-e", "0.01", "--num-iterations", "3"]);
        let params = cli.to_params();
        assert_eq!(params.eval_threshold.value(), 0.01);
        assert!(params.eval_threshold.was_set());
        assert_eq!(params.num_iterations.value(), 3);
        // Untouched non-pass-along parameters stay unmarked.
        assert!(!params.eval_profile.was_set());
    }

    #[test]
    fn workflow_defaults_apply_without_flags() {
        let cli = parse(&["q", "t", "r", "tmp"]);
        let params = cli.to_params();
        assert_eq!(params.sensitivity.value(), 9.5);
        assert_eq!(params.max_res_list_len.value(), 1000);
        assert!(params.remove_tmp_files.value());
        // Pass-along marking makes the defaults deliberate.
        assert!(params.sensitivity.was_set());
    }

    #[test]
    fn positionals_are_collected_in_order() {
        let cli = parse(&["extra", "q", "t", "r", "tmp", "--dry-run"]);
        assert_eq!(cli.files, ["extra", "q", "t", "r", "tmp"]);
        assert!(cli.dry_run);
    }
}
