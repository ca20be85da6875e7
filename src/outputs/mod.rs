//! Output generation for a finished search.
//!
//! # Submodules
//!
//! - [`json`]: Writes the validated articles to a timestamped JSON snapshot
//! - [`summary`]: Renders a numbered plain-text listing for the terminal

pub mod json;
pub mod summary;
