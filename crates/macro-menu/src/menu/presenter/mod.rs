mod artifact;
mod listing;
pub mod views;

pub use artifact::{render_web_artifact, write_atomically, DEFAULT_ARTIFACT_PATH};
pub use listing::{ProfileListing, DEFAULT_LISTING_LIMIT};
pub use views::{ProfileEntry, WebItem};
