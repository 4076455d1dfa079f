/// Command-line parsing and command execution
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Time and memory summary of a run
pub mod diagnostics;
/// Error types and path context
pub mod error;
/// Image decoding, JPEG export and folder listing
pub mod image;
/// Terminal progress bars
pub mod progress;
