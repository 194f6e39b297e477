//! Save trigger capability.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;

/// Hands the user a named file containing downloaded bytes.
///
/// The artifact is taken by value and dropped once the save returns.
/// Implementations release any temporary resource they create, whether the
/// save succeeds or not, and must not fail because of what the suggested
/// filename contains.
#[async_trait]
pub trait SaveTrigger: Send + Sync {
    /// Save `artifact` under (a sanitized form of) `filename`.
    ///
    /// Returns where the file ended up.
    async fn save(&self, artifact: Vec<u8>, filename: &str) -> Result<PathBuf>;
}
