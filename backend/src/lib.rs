//! Photo Tagger Backend Library
//!
//! Uploads a photo to the Imagga image-analysis service and collects the
//! tags and dominant colors it reports. The terminal front end lives in the
//! root package.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod payload;

pub use config::{CaptureConfig, Config, ServiceConfig};
pub use error::{AnnotateError, ConfigError};
pub use orchestrator::{
    AnnotationPhase, AnnotationResult, ColorEntry, ContentId, ImaggaClient, Orchestrator, Tag,
    TaggingService,
};
pub use payload::ImagePayload;
