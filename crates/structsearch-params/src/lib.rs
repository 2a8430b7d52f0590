//! Parameter model for the structural-sequence search pipeline.
//!
//! The launcher never mutates a shared parameter structure across stage
//! boundaries. [`SearchParams`] is an immutable base configuration; each
//! pipeline stage derives its serialized parameter string through a pure
//! function of the base plus a [`StageOverlay`] of stage-specific overrides.

pub mod alignment;
pub mod overlay;
pub mod param;
pub mod set;
pub mod stage;

pub use alignment::{with_alphabet_suffix, AlignmentKind, STRUCTURAL_ALPHABET_SUFFIX};
pub use overlay::StageOverlay;
pub use param::Param;
pub use set::SearchParams;
pub use stage::Stage;
