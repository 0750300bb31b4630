//! Orchestrator constants
//!
//! Centralized constants used throughout the orchestrator module.

/// Default base URL of the Imagga API
pub const DEFAULT_BASE_URL: &str = "http://api.imagga.com";

/// Content-ingestion endpoint
pub const CONTENT_PATH: &str = "/v1/content";

/// Tagging endpoint
pub const TAGGING_PATH: &str = "/v1/tagging";

/// Colors endpoint
pub const COLORS_PATH: &str = "/v1/colors";

/// Query parameter carrying the content identifier
pub const CONTENT_QUERY_PARAM: &str = "content";

/// Multipart field name for the uploaded image
pub const UPLOAD_FIELD_NAME: &str = "imagefile";

/// Filename reported for the uploaded image
pub const UPLOAD_FILE_NAME: &str = "image.jpg";

/// MIME type of the uploaded image
pub const UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// Size of each chunk streamed to the transport during upload
pub const UPLOAD_CHUNK_SIZE: usize = 16 * 1024;
