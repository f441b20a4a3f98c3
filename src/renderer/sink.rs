//! Title sinks - Where the resolved title ends up.
//!
//! There is exactly one sink per application. Writes overwrite in place;
//! nothing is diffed.

use std::cell::RefCell;
use std::io::{self, Stdout, Write, stdout};
use std::rc::Rc;

use crossterm::execute;
use crossterm::terminal::SetTitle;

/// The single title target of an application.
pub trait TitleSink {
    /// Current title, if known.
    fn title(&self) -> Option<String>;

    /// Overwrite the title.
    fn set_title(&mut self, title: &str) -> io::Result<()>;
}

// =============================================================================
// In-memory title
// =============================================================================

/// Shared in-memory title for headless apps and tests.
///
/// Clones share the same cell, so a test can keep one handle and give
/// another to the meta manager.
#[derive(Debug, Clone, Default)]
pub struct MemoryTitle {
    current: Rc<RefCell<Option<String>>>,
}

impl MemoryTitle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a title already set.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            current: Rc::new(RefCell::new(Some(title.into()))),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.current.borrow().clone()
    }
}

impl TitleSink for MemoryTitle {
    fn title(&self) -> Option<String> {
        self.get()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        *self.current.borrow_mut() = Some(title.to_string());
        Ok(())
    }
}

// =============================================================================
// Terminal title
// =============================================================================

/// Terminal window title, written with an OSC escape sequence.
///
/// Terminals cannot be asked for their title, so this remembers the last
/// one it wrote.
pub struct TerminalTitle<W: Write> {
    out: W,
    last: Option<String>,
}

impl TerminalTitle<Stdout> {
    pub fn stdout() -> Self {
        Self::new(stdout())
    }
}

impl<W: Write> TerminalTitle<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TitleSink for TerminalTitle<W> {
    fn title(&self) -> Option<String> {
        self.last.clone()
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.out, SetTitle(title))?;
        self.last = Some(title.to_string());
        Ok(())
    }
}
