//! Downloadable budget report documents.
//!
//! Rendering is pure: a [`ReportRenderer`] takes computed figures plus the
//! generation timestamp and returns a complete HTML document.

pub mod error;
pub mod html;
pub mod types;


pub use error::ReportError;
pub use html::ReportRenderer;
pub use types::{ReportKind, report_filename};
