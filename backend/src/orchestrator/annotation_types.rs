//! Annotation data model
//!
//! Types produced by the pipeline and handed to the results display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single descriptive keyword returned by the tagging service
pub type Tag = String;

/// Opaque identifier issued by the service after an upload
///
/// Used as the correlation key for the tag and color fetches. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Wrap a raw identifier, rejecting the empty string
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// The identifier as sent in the `content` query parameter
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentId {
    type Error = &'static str;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or("content id must not be empty")
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One dominant color of an image and its closest named palette color
///
/// Components are passed through from the service unchanged; the service
/// contract keeps them within 0-255.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Red component
    pub red: i32,
    /// Green component
    pub green: i32,
    /// Blue component
    pub blue: i32,
    /// Name of the closest palette color
    pub color_name: String,
}

impl ColorEntry {
    /// Create a new color entry
    pub fn new(red: i32, green: i32, blue: i32, color_name: impl Into<String>) -> Self {
        Self {
            red,
            green,
            blue,
            color_name: color_name.into(),
        }
    }

    /// RGB components clamped to the displayable range
    pub fn rgb(&self) -> (u8, u8, u8) {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        (clamp(self.red), clamp(self.green), clamp(self.blue))
    }

    /// Hex notation (`#rrggbb`) of the clamped components
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Combined outcome of one photo's analysis
///
/// `None` means the leg failed (or the service omitted the list entirely);
/// `Some(vec![])` means the service returned zero items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationResult {
    /// Tags in service order
    pub tags: Option<Vec<Tag>>,
    /// Dominant colors in service order
    pub colors: Option<Vec<ColorEntry>>,
}

impl AnnotationResult {
    /// Result with both legs absent
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when both legs produced a list
    pub fn is_complete(&self) -> bool {
        self.tags.is_some() && self.colors.is_some()
    }
}

/// Lifecycle of a single `annotate` invocation
///
/// Transitions only move forward: `Idle → Uploading → FetchingAnnotations → Done`,
/// or `Uploading → Done` when the upload fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnnotationPhase {
    /// Nothing has been sent yet
    Idle,
    /// The image is being uploaded
    Uploading,
    /// Tags and colors are being fetched
    FetchingAnnotations,
    /// A result has been produced
    Done,
}

impl AnnotationPhase {
    /// Whether moving from `self` to `next` is allowed
    pub fn can_transition_to(self, next: AnnotationPhase) -> bool {
        use AnnotationPhase::*;
        matches!(
            (self, next),
            (Idle, Uploading)
                | (Uploading, FetchingAnnotations)
                | (Uploading, Done)
                | (FetchingAnnotations, Done)
        )
    }
}

impl fmt::Display for AnnotationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnnotationPhase::Idle => "idle",
            AnnotationPhase::Uploading => "uploading",
            AnnotationPhase::FetchingAnnotations => "fetching_annotations",
            AnnotationPhase::Done => "done",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_id_deserialize_rejects_empty() {
        let id: ContentId = serde_json::from_str(r#""abc123""#).unwrap();
        assert_eq!(id.as_str(), "abc123");
        assert!(serde_json::from_str::<ContentId>(r#""""#).is_err());
    }

    #[test]
    fn test_content_id_rejects_empty() {
        assert!(ContentId::new("").is_none());
        assert_eq!(ContentId::new("abc123").unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_color_entry_hex_clamps() {
        assert_eq!(ColorEntry::new(10, 20, 30, "navy").hex(), "#0a141e");
        assert_eq!(ColorEntry::new(300, -4, 255, "odd").hex(), "#ff00ff");
    }

    #[test]
    fn test_absent_is_not_empty() {
        let absent = AnnotationResult::empty();
        let zero = AnnotationResult {
            tags: Some(vec![]),
            colors: Some(vec![]),
        };
        assert_ne!(absent, zero);
        assert!(!absent.is_complete());
        assert!(zero.is_complete());
    }

    #[test]
    fn test_phase_transitions() {
        use AnnotationPhase::*;
        assert!(Idle.can_transition_to(Uploading));
        assert!(Uploading.can_transition_to(FetchingAnnotations));
        assert!(Uploading.can_transition_to(Done));
        assert!(FetchingAnnotations.can_transition_to(Done));

        assert!(!Done.can_transition_to(Idle));
        assert!(!FetchingAnnotations.can_transition_to(Uploading));
        assert!(!Idle.can_transition_to(Done));
    }
}
