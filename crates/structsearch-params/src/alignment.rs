//! Alignment algorithm variants and their per-stage conventions.

use structsearch_utils::ConfigError;

use crate::stage::Stage;

/// Database naming convention for the structural-alphabet rendition of a
/// structure database.
pub const STRUCTURAL_ALPHABET_SUFFIX: &str = "_ss";

/// Append the structural-alphabet suffix to a database path.
#[must_use]
pub fn with_alphabet_suffix(path: &str) -> String {
    format!("{path}{STRUCTURAL_ALPHABET_SUFFIX}")
}

/// The three alignment algorithm variants.
///
/// Selected by the numeric `--alignment-type` parameter; anything outside
/// `0..=2` is rejected before a workspace is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentKind {
    /// Alignment over the structural-alphabet substitution scores.
    StructureSubstitution,
    /// Structural superposition scoring on the raw coordinates.
    StructuralSuperposition,
    /// Combined structure-and-sequence scoring.
    CombinedStructureSequence,
}

impl AlignmentKind {
    /// Parse the numeric CLI code.
    pub fn from_code(code: i32) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Self::StructureSubstitution),
            1 => Ok(Self::StructuralSuperposition),
            2 => Ok(Self::CombinedStructureSequence),
            other => Err(ConfigError::InvalidAlignmentKind(other)),
        }
    }

    /// The algorithm binding handed to the pipeline script.
    #[must_use]
    pub const fn algorithm(self) -> &'static str {
        match self {
            Self::StructureSubstitution => "align",
            Self::StructuralSuperposition => "tmalign",
            Self::CombinedStructureSequence => "structurealign",
        }
    }

    /// The stage whose parameter subset this variant serializes.
    #[must_use]
    pub const fn alignment_stage(self) -> Stage {
        match self {
            Self::StructureSubstitution => Stage::Align,
            Self::StructuralSuperposition => Stage::TmAlign,
            Self::CombinedStructureSequence => Stage::StructureAlign,
        }
    }

    /// Whether the alignment stage reads the suffixed (structural-alphabet)
    /// query/target databases instead of the raw ones.
    #[must_use]
    pub const fn uses_suffixed_inputs(self) -> bool {
        matches!(self, Self::StructureSubstitution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse() {
        assert_eq!(
            AlignmentKind::from_code(0).unwrap(),
            AlignmentKind::StructureSubstitution
        );
        assert_eq!(
            AlignmentKind::from_code(1).unwrap(),
            AlignmentKind::StructuralSuperposition
        );
        assert_eq!(
            AlignmentKind::from_code(2).unwrap(),
            AlignmentKind::CombinedStructureSequence
        );
    }

    #[test]
    fn unknown_code_is_rejected_eagerly() {
        let err = AlignmentKind::from_code(3).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAlignmentKind(3)));
        assert!(AlignmentKind::from_code(-1).is_err());
    }

    #[test]
    fn algorithm_names_match_script_contract() {
        assert_eq!(AlignmentKind::StructureSubstitution.algorithm(), "align");
        assert_eq!(AlignmentKind::StructuralSuperposition.algorithm(), "tmalign");
        assert_eq!(
            AlignmentKind::CombinedStructureSequence.algorithm(),
            "structurealign"
        );
    }

    #[test]
    fn only_substitution_variant_suffixes_inputs() {
        assert!(AlignmentKind::StructureSubstitution.uses_suffixed_inputs());
        assert!(!AlignmentKind::StructuralSuperposition.uses_suffixed_inputs());
        assert!(!AlignmentKind::CombinedStructureSequence.uses_suffixed_inputs());
    }

    #[test]
    fn suffix_helper_appends_marker() {
        assert_eq!(with_alphabet_suffix("targetDB"), "targetDB_ss");
    }
}
