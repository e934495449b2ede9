//! Errors surfaced by service operations.

use crate::detector::DetectorError;
use crate::store::StoreError;
use thiserror::Error;

/// Failure of a [`SecurityService`](crate::service::SecurityService)
/// operation.
///
/// The rules themselves never fail; every variant is a collaborator failure
/// passed through unchanged. A failed operation may already have written
/// part of its outcome; nothing is rolled back.
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Detector(#[from] DetectorError),
}
