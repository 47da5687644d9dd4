//! Media store port
//!
//! Uploads are delegated to an external media service. Failures surface as
//! `DomainError::MediaUnavailable` and are never retried here.

use async_trait::async_trait;

use crate::entities::{MediaAsset, MediaUpload};
use crate::traits::RepoResult;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload a file and return its public URL
    async fn upload(&self, upload: &MediaUpload) -> RepoResult<MediaAsset>;

    /// Delete a previously uploaded asset by URL
    async fn delete(&self, url: &str) -> RepoResult<()>;
}
