//! Orchestrator module
//!
//! Contains the upload-and-annotate pipeline and the pieces it is built
//! from: the Imagga HTTP client, response types, progress reporting and
//! the service trait that joins them.

pub mod annotation_types;
pub mod api_client;
pub mod constants;
pub mod imagga_types;
pub mod pipeline;
pub mod progress;
pub mod service;

pub use annotation_types::{AnnotationPhase, AnnotationResult, ColorEntry, ContentId, Tag};
pub use api_client::ImaggaClient;
pub use pipeline::Orchestrator;
pub use progress::{no_progress, ProgressCallback, ProgressTracker};
pub use service::TaggingService;
