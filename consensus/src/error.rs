//! Fatal run errors.
//!
//! Only two conditions abort a run: an empty panel and an empty concept.
//! Everything else (evaluator failures, timeouts, unscored dimensions)
//! degrades into the verdict instead of propagating.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrucibleError {
    #[error("evaluator panel is empty; at least one evaluator is required")]
    EmptyPanel,

    #[error("concept is empty or whitespace-only")]
    EmptyConcept,
}
