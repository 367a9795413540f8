use thiserror::Error;

use crate::store::StoreError;

/// Error type surfaced by the owning service layer.
///
/// Engine calls themselves never fail: every model-capability error
/// degrades to a documented fallback at its call site. What can fail is
/// the persistence around a turn, or a genuinely unexpected internal
/// condition.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
