// Reusable UI components
// Progress bar, color swatches and tag lists for the terminal

use anstyle::{Color, RgbColor, Style};
use indicatif::{ProgressBar, ProgressStyle};
use photo_tagger_backend::{ColorEntry, Tag};

/// Resolution of the upload progress bar
pub const PROGRESS_STEPS: u64 = 1000;

/// Build the upload progress bar (drawn on stderr)
pub fn upload_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(PROGRESS_STEPS);
    let style = ProgressStyle::with_template("{spinner} Uploading [{bar:40}] {percent:>3}%")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    bar.set_style(style);
    bar
}

/// Map an uploaded fraction onto the progress bar's range
pub fn progress_position(fraction: f32) -> u64 {
    (fraction.clamp(0.0, 1.0) * PROGRESS_STEPS as f32).round() as u64
}

/// Render one color as a swatch followed by its name, hex value and components
///
/// Without `color` the swatch is left out (e.g. when stdout is not a terminal).
pub fn color_swatch(entry: &ColorEntry, color: bool) -> String {
    let details = format!(
        "{} {} ({}, {}, {})",
        entry.color_name,
        entry.hex(),
        entry.red,
        entry.green,
        entry.blue
    );
    if !color {
        return details;
    }

    let (r, g, b) = entry.rgb();
    let style = Style::new().bg_color(Some(Color::Rgb(RgbColor(r, g, b))));
    format!("{}    {} {}", style.render(), style.render_reset(), details)
}

/// Render tags as a comma-separated list
pub fn tag_list(tags: &[Tag]) -> String {
    tags.join(", ")
}
