//! Media handed to and returned from the external media store

use super::Account;

/// A file to upload
#[derive(Clone, PartialEq, Eq)]
pub struct MediaUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for MediaUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A stored asset, addressed by its public URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub url: String,
}

impl MediaAsset {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Which media column of an account an upload lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSlot {
    Avatar,
    CoverImage,
}

impl MediaSlot {
    /// Human-readable name used in error messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Avatar => "Avatar",
            Self::CoverImage => "Cover image",
        }
    }
}

/// Outcome of pointing a media slot at a new asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedMedia {
    /// The account as stored after the write
    pub account: Account,
    /// URL the slot held before, if any
    pub previous: Option<String>,
}
