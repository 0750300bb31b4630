//! Upload progress reporting
//!
//! The upload body is streamed to the transport in fixed-size chunks; each
//! chunk the transport pulls advances the reported fraction.

use crate::orchestrator::constants::UPLOAD_CHUNK_SIZE;
use crate::payload::ImagePayload;
use futures_util::stream;
use std::sync::{Arc, Mutex};

/// Callback receiving the uploaded fraction in `[0.0, 1.0]`
pub type ProgressCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// A callback that ignores every report
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Forwards progress to a callback, clamped and never decreasing
#[derive(Clone)]
pub struct ProgressTracker {
    callback: ProgressCallback,
    last: Arc<Mutex<f32>>,
}

impl ProgressTracker {
    /// Wrap a callback
    pub fn new(callback: ProgressCallback) -> Self {
        Self {
            callback,
            last: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Report a fraction; values below the last report are raised to it
    pub fn report(&self, fraction: f32) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let value = {
            let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
            if fraction > *last {
                *last = fraction;
            }
            *last
        };
        (self.callback)(value);
    }

    /// Last value reported
    pub fn last(&self) -> f32 {
        *self.last.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Build a streaming request body that reports progress as it is consumed
///
/// The last chunk always reports exactly 1.0.
pub fn progress_body(payload: &ImagePayload, callback: ProgressCallback) -> reqwest::Body {
    let data = payload.bytes();
    let total = data.len();
    let tracker = ProgressTracker::new(callback);

    let chunks: Vec<bytes::Bytes> = (0..total)
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| data.slice(start..(start + UPLOAD_CHUNK_SIZE).min(total)))
        .collect();

    let mut sent = 0usize;
    let chunks = chunks.into_iter().map(move |chunk| {
        sent += chunk.len();
        let fraction = if sent >= total {
            1.0
        } else {
            sent as f32 / total as f32
        };
        tracker.report(fraction);
        Ok::<_, std::io::Error>(chunk)
    });

    reqwest::Body::wrap_stream(stream::iter(chunks))
}
