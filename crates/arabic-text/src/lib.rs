//! Arabic Text - Arabic script text processing
//!
//! This crate provides:
//! - Script-run segmentation (Arabic vs. non-Arabic codepoint runs)
//! - Contextual reshaping to Arabic Presentation Forms-B
//! - Visual reordering for strictly left-to-right drawing primitives
//!
//! # Example
//!
//! ```
//! use arabic_text::reshape_bidirectional;
//!
//! // Text with no Arabic codepoints passes through unchanged.
//! assert_eq!(reshape_bidirectional("Hello"), "Hello");
//! ```
//!
//! All operations are total over any Unicode input: there is no error type
//! in this crate. Classification works one Unicode scalar value at a time;
//! combining-mark sequences split across a run boundary are out of scope.

mod bidi;
mod runs;
mod shaping;

pub use bidi::reshape_bidirectional;
pub use runs::{is_arabic_char, split_runs, ScriptRun};
pub use shaping::reshape_run;
