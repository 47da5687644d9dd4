//! # vidtube-media
//!
//! [`MediaStore`](vidtube_core::MediaStore) backed by the external media
//! service's HTTP API. Files are sent as multipart uploads; the service
//! answers with the public URL of the stored asset.

mod client;

pub use client::HttpMediaStore;
