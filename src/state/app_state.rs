// Application state management
// Tracks the capture screen and the results handed to the results display

use photo_tagger_backend::{AnnotationResult, ColorEntry, Tag};
use std::path::{Path, PathBuf};

/// Which screen the front end is showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    /// Waiting for a photo
    Ready,
    /// Upload and analysis in flight
    Uploading {
        /// Uploaded fraction in [0.0, 1.0]
        progress: f32,
    },
    /// Showing tags and colors
    Results,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current screen
    screen: Screen,
    /// Photo being (or last) annotated
    image_path: Option<PathBuf>,
    /// Result of the last annotation
    result: Option<AnnotationResult>,
}

impl AppState {
    /// Create a new state on the ready screen
    pub fn new() -> Self {
        Self {
            screen: Screen::Ready,
            image_path: None,
            result: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Capture is hidden while an upload is in flight
    pub fn can_capture(&self) -> bool {
        !matches!(self.screen, Screen::Uploading { .. })
    }

    /// Start uploading a photo. Returns false if one is already in flight.
    pub fn begin_upload(&mut self, image_path: &Path) -> bool {
        if !self.can_capture() {
            return false;
        }
        self.screen = Screen::Uploading { progress: 0.0 };
        self.image_path = Some(image_path.to_path_buf());
        self.result = None;
        true
    }

    /// Update upload progress; ignored outside the uploading screen
    pub fn set_progress(&mut self, fraction: f32) {
        if let Screen::Uploading { progress } = &mut self.screen {
            let fraction = fraction.clamp(0.0, 1.0);
            if fraction > *progress {
                *progress = fraction;
            }
        }
    }

    /// Store the result and switch to the results screen
    pub fn finish(&mut self, result: AnnotationResult) {
        self.result = Some(result);
        self.screen = Screen::Results;
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image_path.as_deref()
    }

    pub fn result(&self) -> Option<&AnnotationResult> {
        self.result.as_ref()
    }

    /// Tags for the results screen (`None` if unavailable)
    pub fn tags(&self) -> Option<&[Tag]> {
        self.result.as_ref()?.tags.as_deref()
    }

    /// Colors for the results screen (`None` if unavailable)
    pub fn colors(&self) -> Option<&[ColorEntry]> {
        self.result.as_ref()?.colors.as_deref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_lifecycle() {
        let mut state = AppState::new();
        assert!(state.can_capture());

        assert!(state.begin_upload(Path::new("cat.jpg")));
        assert!(!state.can_capture());
        assert!(!state.begin_upload(Path::new("dog.jpg")));
        assert_eq!(state.image_path(), Some(Path::new("cat.jpg")));

        state.set_progress(0.4);
        state.set_progress(0.2);
        assert_eq!(state.screen(), Screen::Uploading { progress: 0.4 });

        state.finish(AnnotationResult {
            tags: Some(vec!["cat".to_string()]),
            colors: None,
        });
        assert_eq!(state.screen(), Screen::Results);
        assert!(state.can_capture());
        assert_eq!(state.tags(), Some(&["cat".to_string()][..]));
        assert_eq!(state.colors(), None);
    }

    #[test]
    fn test_progress_ignored_when_not_uploading() {
        let mut state = AppState::new();
        state.set_progress(0.9);
        assert_eq!(state.screen(), Screen::Ready);
    }

    #[test]
    fn test_new_upload_clears_previous_result() {
        let mut state = AppState::new();
        state.begin_upload(Path::new("a.jpg"));
        state.finish(AnnotationResult::empty());
        assert!(state.result().is_some());

        state.begin_upload(Path::new("b.jpg"));
        assert!(state.result().is_none());
    }
}
