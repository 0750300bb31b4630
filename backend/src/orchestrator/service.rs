//! Tagging service abstraction
//!
//! The orchestrator only needs three calls from the remote service. Keeping
//! them behind a trait lets the pipeline run against `ImaggaClient` in
//! production and an in-memory fake in tests.

use crate::error::AnnotateError;
use crate::orchestrator::annotation_types::{ColorEntry, ContentId, Tag};
use crate::orchestrator::progress::ProgressCallback;
use crate::payload::ImagePayload;
use async_trait::async_trait;

/// Remote image-analysis service
#[async_trait]
pub trait TaggingService: Send + Sync {
    /// Upload the payload, reporting progress, and return its content identifier
    async fn upload(
        &self,
        payload: &ImagePayload,
        on_progress: ProgressCallback,
    ) -> Result<ContentId, AnnotateError>;

    /// Tags for the content, or `None` if the service returned no tags list
    async fn fetch_tags(&self, content_id: &ContentId) -> Result<Option<Vec<Tag>>, AnnotateError>;

    /// Dominant colors for the content, or `None` if the service returned no colors list
    async fn fetch_colors(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<Vec<ColorEntry>>, AnnotateError>;
}
