// UI module
// Terminal rendering for upload progress and annotation results

pub mod layout;
pub mod components;

pub use layout::render_results;
pub use components::*;
