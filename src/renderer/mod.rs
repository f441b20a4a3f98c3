//! Renderer - Title output.
//!
//! - [`TitleSink`] - The single title target
//! - [`MemoryTitle`] - Shared in-memory title (headless, tests)
//! - [`TerminalTitle`] - Terminal window title via crossterm

mod sink;

pub use sink::{MemoryTitle, TerminalTitle, TitleSink};
