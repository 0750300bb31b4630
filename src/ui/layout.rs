// Results layout
// Renders the tags/colors screen shown after an annotation finishes

use super::components::{color_swatch, tag_list};
use photo_tagger_backend::AnnotationResult;

const UNAVAILABLE: &str = "unavailable";
const NONE: &str = "none";

/// Render the results screen
///
/// An absent list (failed fetch) reads "unavailable"; an empty one reads "none".
pub fn render_results(result: &AnnotationResult, color: bool) -> String {
    let tags = match result.tags.as_deref() {
        None => vec![UNAVAILABLE.to_string()],
        Some([]) => vec![NONE.to_string()],
        Some(tags) => vec![tag_list(tags)],
    };
    let colors = match result.colors.as_deref() {
        None => vec![UNAVAILABLE.to_string()],
        Some([]) => vec![NONE.to_string()],
        Some(colors) => colors
            .iter()
            .map(|entry| color_swatch(entry, color))
            .collect(),
    };

    format!("{}\n{}", section("Tags", &tags), section("Colors", &colors))
}

// Title line followed by indented body lines
fn section(title: &str, lines: &[String]) -> String {
    let mut out = format!("{}\n", title);
    for line in lines {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}
