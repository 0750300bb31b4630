//! Imagga API response types
//!
//! Structs that mirror the JSON returned by the content, tagging and colors
//! endpoints. Every field is optional on the wire; the accessor methods
//! decide what counts as "absent". Scalar fields inside an entry are read
//! leniently: a null or wrongly typed value becomes `""` or `0` instead of
//! failing the whole response.

use crate::orchestrator::annotation_types::{ColorEntry, ContentId, Tag};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response of `POST /v1/content`
#[derive(Deserialize, Debug, Default)]
pub struct UploadResponse {
    /// Uploaded items, one per multipart file
    #[serde(default)]
    pub uploaded: Option<Vec<UploadedContent>>,
}

/// One uploaded item
#[derive(Deserialize, Debug)]
pub struct UploadedContent {
    /// Identifier to pass as `content=` to the analysis endpoints
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub id: Option<String>,
}

impl UploadResponse {
    /// `uploaded[0].id`, or `None` if missing or empty
    pub fn content_id(&self) -> Option<ContentId> {
        self.uploaded
            .as_ref()?
            .first()?
            .id
            .clone()
            .and_then(ContentId::new)
    }
}

/// Response of `GET /v1/tagging`
#[derive(Deserialize, Debug, Default)]
pub struct TaggingResponse {
    /// One result per requested content item
    #[serde(default)]
    pub results: Option<Vec<TaggingResult>>,
}

/// Tagging result for one content item
#[derive(Deserialize, Debug)]
pub struct TaggingResult {
    /// Tags in service order
    #[serde(default)]
    pub tags: Option<Vec<TagEntry>>,
}

/// A single tag with its confidence
#[derive(Deserialize, Debug)]
pub struct TagEntry {
    /// The tag label
    #[serde(default, deserialize_with = "lenient_string")]
    pub tag: String,
    /// Confidence score (0-100)
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    pub confidence: Option<f64>,
}

impl TaggingResponse {
    /// `results[0].tags[*].tag`, or `None` if the tags array is missing
    pub fn tags(&self) -> Option<Vec<Tag>> {
        let entries = self.results.as_ref()?.first()?.tags.as_ref()?;
        Some(entries.iter().map(|entry| entry.tag.clone()).collect())
    }
}

/// Response of `GET /v1/colors`
#[derive(Deserialize, Debug, Default)]
pub struct ColorsResponse {
    /// One result per requested content item
    #[serde(default)]
    pub results: Option<Vec<ColorsResult>>,
}

/// Color analysis for one content item
#[derive(Deserialize, Debug)]
pub struct ColorsResult {
    /// Color breakdown
    #[serde(default)]
    pub info: Option<ColorInfo>,
}

/// Color breakdown of an image
#[derive(Deserialize, Debug)]
pub struct ColorInfo {
    /// Dominant colors of the whole image
    #[serde(default)]
    pub image_colors: Option<Vec<ImageColor>>,
}

/// A single dominant color as reported by the service
#[derive(Deserialize, Debug)]
pub struct ImageColor {
    /// Red component
    #[serde(default, deserialize_with = "lenient_i32")]
    pub r: i32,
    /// Green component
    #[serde(default, deserialize_with = "lenient_i32")]
    pub g: i32,
    /// Blue component
    #[serde(default, deserialize_with = "lenient_i32")]
    pub b: i32,
    /// Name of the closest palette color
    #[serde(default, deserialize_with = "lenient_string")]
    pub closest_palette_color: String,
}

impl ColorsResponse {
    /// `results[0].info.image_colors[*]`, or `None` if the list is missing
    pub fn colors(&self) -> Option<Vec<ColorEntry>> {
        let info = self.results.as_ref()?.first()?.info.as_ref()?;
        let image_colors = info.image_colors.as_ref()?;
        Some(
            image_colors
                .iter()
                .map(|c| ColorEntry::new(c.r, c.g, c.b, c.closest_palette_color.clone()))
                .collect(),
        )
    }
}

/// Strings pass through, numbers and booleans are rendered, anything else is `""`
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Like `lenient_string`, but null stays `None`
fn lenient_opt_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Integers pass through, floats and numeric strings are truncated, anything else is 0
fn lenient_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .map(|v| v as i32)
            .or_else(|| n.as_f64().map(|v| v as i32))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(|v| v as i32).unwrap_or(0),
        Value::Bool(b) => i32::from(b),
        _ => 0,
    })
}

fn lenient_opt_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
