//! Upload-and-annotate pipeline
//!
//! Runs one photo through the service: upload, then tags and colors
//! concurrently. Each leg handles its own failure by logging it and
//! degrading to "absent", so every call yields exactly one
//! `AnnotationResult`.

use crate::config::ServiceConfig;
use crate::error::AnnotateError;
use crate::orchestrator::annotation_types::{AnnotationPhase, AnnotationResult};
use crate::orchestrator::api_client::ImaggaClient;
use crate::orchestrator::progress::ProgressCallback;
use crate::orchestrator::service::TaggingService;
use crate::payload::ImagePayload;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// Orchestrates upload, tag fetch and color fetch for a single photo
pub struct Orchestrator<S: TaggingService> {
    service: S,
}

impl Orchestrator<ImaggaClient> {
    /// Build an orchestrator backed by the Imagga HTTP client
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AnnotateError> {
        Ok(Self::new(ImaggaClient::new(config)?))
    }
}

impl<S: TaggingService> Orchestrator<S> {
    /// Wrap a tagging service
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// The underlying service
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Upload a photo and collect its tags and colors
    ///
    /// Never fails: an upload failure (including a missing content
    /// identifier) yields `(None, None)` without issuing any fetch, and a
    /// failed fetch leaves only its own half absent.
    pub async fn annotate<F>(&self, payload: &ImagePayload, on_progress: F) -> AnnotationResult
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        let annotation_id = Uuid::new_v4();
        let span = info_span!("annotate", annotation_id = %annotation_id);
        self.annotate_inner(payload, Arc::new(on_progress))
            .instrument(span)
            .await
    }

    /// Like `annotate`, for raw bytes that have not been wrapped yet
    ///
    /// An empty payload counts as an encoding failure of the upload leg.
    pub async fn annotate_bytes<F>(&self, bytes: impl Into<Bytes>, on_progress: F) -> AnnotationResult
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        match ImagePayload::from_jpeg_bytes(bytes) {
            Ok(payload) => self.annotate(&payload, on_progress).await,
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Error while preparing upload");
                AnnotationResult::empty()
            }
        }
    }

    async fn annotate_inner(
        &self,
        payload: &ImagePayload,
        on_progress: ProgressCallback,
    ) -> AnnotationResult {
        let mut phase = AnnotationPhase::Idle;

        advance(&mut phase, AnnotationPhase::Uploading);
        info!(payload_len = payload.len(), "Uploading image");

        let content_id = match self.service.upload(payload, on_progress).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Error while uploading file");
                advance(&mut phase, AnnotationPhase::Done);
                return AnnotationResult::empty();
            }
        };

        advance(&mut phase, AnnotationPhase::FetchingAnnotations);
        let (tags, colors) = tokio::join!(
            self.service.fetch_tags(&content_id),
            self.service.fetch_colors(&content_id),
        );

        let tags = tags.unwrap_or_else(|e| {
            error!(content_id = %content_id, error = %e, kind = e.kind(), "Error while fetching tags");
            None
        });
        let colors = colors.unwrap_or_else(|e| {
            error!(content_id = %content_id, error = %e, kind = e.kind(), "Error while fetching colors");
            None
        });

        advance(&mut phase, AnnotationPhase::Done);
        info!(
            content_id = %content_id,
            tag_count = tags.as_ref().map(Vec::len),
            color_count = colors.as_ref().map(Vec::len),
            "Annotation finished"
        );

        AnnotationResult { tags, colors }
    }
}

fn advance(phase: &mut AnnotationPhase, next: AnnotationPhase) {
    debug_assert!(
        phase.can_transition_to(next),
        "invalid phase transition {} -> {}",
        phase,
        next
    );
    debug!(from = %phase, to = %next, "Annotation phase changed");
    *phase = next;
}
