//! Property-based tests for the workspace identity.
//!
//! The identity is the cache key for workspace reuse: it must be
//! deterministic for equal inputs and sensitive to every parameter.
//!
//! Case counts follow proptest's `PROPTEST_CASES` environment variable.

use proptest::prelude::*;

use structsearch::SearchParams;
use structsearch_workspace::identity_from_material;

const DATABASE_ROLES: [&str; 4] = ["queryDB", "targetDB", "resultDB", "tmpDir"];

fn identity(params: &SearchParams, paths: &[String]) -> String {
    identity_from_material(&params.canonical_hash_material(&DATABASE_ROLES, paths))
}

fn base_paths() -> Vec<String> {
    ["queryDB", "targetDB", "resultDB", "tmp"]
        .map(String::from)
        .to_vec()
}

proptest! {
    #[test]
    fn identity_is_deterministic(
        sensitivity in 1.0_f64..9.5,
        eval in 1e-6_f64..10.0,
        iterations in 1_u32..8,
    ) {
        let mut p = SearchParams::with_search_defaults();
        p.sensitivity.set(sensitivity);
        p.eval_threshold.set(eval);
        p.num_iterations.set(iterations);

        prop_assert_eq!(identity(&p, &base_paths()), identity(&p, &base_paths()));
    }

    #[test]
    fn identity_is_sensitive_to_sensitivity(
        a in 1.0_f64..9.5,
        b in 1.0_f64..9.5,
    ) {
        prop_assume!(a != b);
        let mut pa = SearchParams::with_search_defaults();
        pa.sensitivity.set(a);
        let mut pb = SearchParams::with_search_defaults();
        pb.sensitivity.set(b);

        prop_assert_ne!(identity(&pa, &base_paths()), identity(&pb, &base_paths()));
    }

    #[test]
    fn identity_is_sensitive_to_numeric_parameters(
        gap_open in 1_u32..30,
        max_seqs in 10_u32..5000,
    ) {
        let base = SearchParams::with_search_defaults();
        let mut changed = SearchParams::with_search_defaults();
        changed.gap_open.set(gap_open);
        changed.max_res_list_len.set(max_seqs);

        // Even when a drawn value equals the default, set() marks the
        // explicitly-set flag, which the encoding must also reflect.
        prop_assert_ne!(identity(&base, &base_paths()), identity(&changed, &base_paths()));
    }

    #[test]
    fn identity_is_sensitive_to_paths(suffix in "[a-z]{1,12}") {
        let p = SearchParams::with_search_defaults();
        let mut other = base_paths();
        other[0] = format!("queryDB_{suffix}");

        prop_assert_ne!(identity(&p, &base_paths()), identity(&p, &other));
    }
}

#[test]
fn explicit_flag_alone_changes_identity() {
    let base = SearchParams::with_search_defaults();
    let mut marked = SearchParams::with_search_defaults();
    let current = marked.eval_threshold.value();
    marked.eval_threshold.set(current);

    assert_ne!(identity(&base, &base_paths()), identity(&marked, &base_paths()));
}
