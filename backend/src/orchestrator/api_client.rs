//! Imagga API client
//!
//! Direct HTTP client for the three endpoints the pipeline uses:
//! content upload, tagging and colors. Every request carries the static
//! `Authorization` value from `ServiceConfig`.

use crate::config::ServiceConfig;
use crate::error::AnnotateError;
use crate::orchestrator::annotation_types::{ColorEntry, ContentId, Tag};
use crate::orchestrator::constants::{
    COLORS_PATH, CONTENT_PATH, CONTENT_QUERY_PARAM, TAGGING_PATH, UPLOAD_FIELD_NAME,
    UPLOAD_FILE_NAME, UPLOAD_MIME_TYPE,
};
use crate::orchestrator::imagga_types::{ColorsResponse, TaggingResponse, UploadResponse};
use crate::orchestrator::progress::{progress_body, ProgressCallback};
use crate::orchestrator::service::TaggingService;
use crate::payload::ImagePayload;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the Imagga API
#[derive(Clone)]
pub struct ImaggaClient {
    client: reqwest::Client,
    base_url: String,
    authorization: String,
}

impl ImaggaClient {
    /// Build a client with its own connection pool and the configured timeout
    ///
    /// # Errors
    /// * Returns `AnnotateError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ServiceConfig) -> Result<Self, AnnotateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build a client that shares an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: config.authorization.clone(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a JPEG payload and return the content identifier
    ///
    /// Progress is reported as the multipart body is streamed out.
    ///
    /// # Errors
    /// * `Encoding` if the multipart part cannot be built
    /// * `Transport` if the request cannot be sent
    /// * `Service` on a non-success status, an unparseable body, or a
    ///   missing/empty `uploaded[0].id`
    pub async fn upload(
        &self,
        payload: &ImagePayload,
        on_progress: ProgressCallback,
    ) -> Result<ContentId, AnnotateError> {
        let part = Part::stream_with_length(progress_body(payload, on_progress), payload.len() as u64)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME_TYPE)
            .map_err(|e| AnnotateError::Encoding(format!("failed to build multipart body: {}", e)))?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        let url = self.url(CONTENT_PATH);
        tracing::debug!(url = %url, payload_len = payload.len(), "Uploading image");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &self.authorization)
            .multipart(form)
            .send()
            .await?;

        let parsed: UploadResponse = read_json(response, "upload").await?;
        let content_id = parsed.content_id().ok_or_else(|| {
            AnnotateError::Service("upload response has no uploaded[0].id".to_string())
        })?;

        tracing::info!(content_id = %content_id, "Content uploaded");
        Ok(content_id)
    }

    /// Fetch the tags for uploaded content
    ///
    /// Returns `Ok(None)` when the response has no tags array.
    pub async fn fetch_tags(&self, content_id: &ContentId) -> Result<Option<Vec<Tag>>, AnnotateError> {
        let response = self.get(TAGGING_PATH, content_id).await?;
        let parsed: TaggingResponse = read_json(response, "tagging").await?;
        let tags = parsed.tags();

        tracing::debug!(
            content_id = %content_id,
            tag_count = tags.as_ref().map(Vec::len),
            "Fetched tags"
        );
        Ok(tags)
    }

    /// Fetch the dominant colors for uploaded content
    ///
    /// Returns `Ok(None)` when the response has no `image_colors` list.
    pub async fn fetch_colors(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<Vec<ColorEntry>>, AnnotateError> {
        let response = self.get(COLORS_PATH, content_id).await?;
        let parsed: ColorsResponse = read_json(response, "colors").await?;
        let colors = parsed.colors();

        tracing::debug!(
            content_id = %content_id,
            color_count = colors.as_ref().map(Vec::len),
            colors = ?colors,
            "Fetched colors"
        );
        Ok(colors)
    }

    async fn get(&self, path: &str, content_id: &ContentId) -> Result<reqwest::Response, AnnotateError> {
        let url = self.url(path);
        tracing::debug!(url = %url, content_id = %content_id, "Requesting annotations");

        let response = self
            .client
            .get(&url)
            .query(&[(CONTENT_QUERY_PARAM, content_id.as_str())])
            .header(AUTHORIZATION, &self.authorization)
            .send()
            .await?;
        Ok(response)
    }
}

/// Check the status of a response and parse its body as JSON
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<T, AnnotateError> {
    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            endpoint = endpoint,
            status_code = status_code,
            error_body = %error_body,
            "Imagga API returned error status"
        );

        return Err(AnnotateError::Service(format!(
            "{} endpoint returned error status {}: {}",
            endpoint, status_code, error_body
        )));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        AnnotateError::Service(format!(
            "Failed to parse JSON response from {} endpoint: {} - Response body: {}",
            endpoint, e, body
        ))
    })
}

#[async_trait]
impl TaggingService for ImaggaClient {
    async fn upload(
        &self,
        payload: &ImagePayload,
        on_progress: ProgressCallback,
    ) -> Result<ContentId, AnnotateError> {
        ImaggaClient::upload(self, payload, on_progress).await
    }

    async fn fetch_tags(&self, content_id: &ContentId) -> Result<Option<Vec<Tag>>, AnnotateError> {
        ImaggaClient::fetch_tags(self, content_id).await
    }

    async fn fetch_colors(
        &self,
        content_id: &ContentId,
    ) -> Result<Option<Vec<ColorEntry>>, AnnotateError> {
        ImaggaClient::fetch_colors(self, content_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::progress::no_progress;
    use mockito::{Matcher, Server, ServerGuard};
    use serial_test::serial;
    use std::sync::{Arc, Mutex};

    const AUTH: &str = "Basic dGVzdDp0ZXN0";

    fn client_for(server: &ServerGuard) -> ImaggaClient {
        ImaggaClient::new(&ServiceConfig::new(server.url(), AUTH)).unwrap()
    }

    fn content_id(raw: &str) -> ContentId {
        ContentId::new(raw).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/content")
            .match_header("authorization", AUTH)
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data; boundary=".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="imagefile"; filename="image.jpg""#.to_string()),
                Matcher::Regex("(?i)content-type: image/jpeg".to_string()),
                Matcher::Regex("fake-jpeg-bytes".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"success","uploaded":[{"id":"abc123","filename":"image.jpg"}]}"#)
            .create_async()
            .await;

        let payload = ImagePayload::from_jpeg_bytes(&b"fake-jpeg-bytes"[..]).unwrap();
        let result = client_for(&server).upload(&payload, no_progress()).await;

        mock.assert_async().await;
        assert_eq!(result.unwrap().as_str(), "abc123");
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_reports_progress_to_completion() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/content")
            .with_status(200)
            .with_body(r#"{"uploaded":[{"id":"big1"}]}"#)
            .create_async()
            .await;

        // Several chunks worth of data
        let payload = ImagePayload::from_jpeg_bytes(vec![b'x'; 40 * 1024 + 7]).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: ProgressCallback = Arc::new(move |p| sink.lock().unwrap().push(p));

        let result = client_for(&server).upload(&payload, callback).await;

        mock.assert_async().await;
        assert!(result.is_ok());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|p| (0.0..=1.0).contains(p)));
        assert_eq!(*seen.last().unwrap(), 1.0);
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_missing_id_is_service_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/content")
            .with_status(200)
            .with_body(r#"{"status":"success","uploaded":[]}"#)
            .create_async()
            .await;

        let payload = ImagePayload::from_jpeg_bytes(&b"fake-jpeg-bytes"[..]).unwrap();
        let result = client_for(&server).upload(&payload, no_progress()).await;

        mock.assert_async().await;
        let err = result.unwrap_err();
        assert!(matches!(err, AnnotateError::Service(_)));
        assert!(err.to_string().contains("uploaded[0].id"));
    }

    #[tokio::test]
    #[serial]
    async fn test_upload_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/content")
            .with_status(401)
            .with_body(r#"{"status":"error","message":"Unauthorized"}"#)
            .create_async()
            .await;

        let payload = ImagePayload::from_jpeg_bytes(&b"fake-jpeg-bytes"[..]).unwrap();
        let result = client_for(&server).upload(&payload, no_progress()).await;

        mock.assert_async().await;
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("401"), "got: {}", error_msg);
        assert!(error_msg.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_upload_connection_refused_is_transport_error() {
        // Nothing listens on port 1
        let config = ServiceConfig::new("http://127.0.0.1:1", AUTH);
        let client = ImaggaClient::new(&config).unwrap();
        let payload = ImagePayload::from_jpeg_bytes(&b"fake-jpeg-bytes"[..]).unwrap();

        let result = client.upload(&payload, no_progress()).await;
        assert!(matches!(result, Err(AnnotateError::Transport(_))));
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_tags_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/tagging")
            .match_query(Matcher::UrlEncoded("content".into(), "abc123".into()))
            .match_header("authorization", AUTH)
            .with_status(200)
            .with_body(r#"{"results":[{"tags":[{"confidence":61.4,"tag":"dog"},{"confidence":33.0,"tag":"pet"}]}]}"#)
            .create_async()
            .await;

        let tags = client_for(&server).fetch_tags(&content_id("abc123")).await;

        mock.assert_async().await;
        assert_eq!(tags.unwrap(), Some(vec!["dog".to_string(), "pet".to_string()]));
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_tags_without_tags_array() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/tagging")
            .match_query(Matcher::UrlEncoded("content".into(), "abc123".into()))
            .with_status(200)
            .with_body(r#"{"results":[{"image":"abc123"}]}"#)
            .create_async()
            .await;

        let tags = client_for(&server).fetch_tags(&content_id("abc123")).await;

        mock.assert_async().await;
        assert_eq!(tags.unwrap(), None);
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_tags_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/tagging")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let result = client_for(&server).fetch_tags(&content_id("abc123")).await;

        mock.assert_async().await;
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse JSON"));
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_colors_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/colors")
            .match_query(Matcher::UrlEncoded("content".into(), "abc123".into()))
            .match_header("authorization", AUTH)
            .with_status(200)
            .with_body(
                r#"{"results":[{"info":{"image_colors":[{"r":10,"g":20,"b":30,"closest_palette_color":"navy"}]}}]}"#,
            )
            .create_async()
            .await;

        let colors = client_for(&server).fetch_colors(&content_id("abc123")).await;

        mock.assert_async().await;
        assert_eq!(
            colors.unwrap(),
            Some(vec![ColorEntry::new(10, 20, 30, "navy")])
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_fetch_colors_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/colors")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let result = client_for(&server).fetch_colors(&content_id("abc123")).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AnnotateError::Service(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let mut config = ServiceConfig::new("http://localhost:9000", AUTH);
        config.base_url = "http://localhost:9000/".to_string();
        let client = ImaggaClient::with_client(reqwest::Client::new(), &config);
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.url(TAGGING_PATH), "http://localhost:9000/v1/tagging");
    }
}
