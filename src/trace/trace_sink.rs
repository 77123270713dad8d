use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// Spaces written per indent level.
const INDENT_WIDTH: usize = 4;

/// The mutable sink state guarded by the logger's lock: an optional open
/// append-mode file plus the current indent level.
///
/// All mutation goes through `&mut self`, so as long as callers hold the
/// logger's mutex, no two writes can interleave partial lines. Invariant: at
/// most one writer is open at a time; `open` while open is a no-op.
#[derive(Debug, Default)]
pub(crate) struct TraceSink {
    writer: Option<File>,
    indent: usize,
}

impl TraceSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Opens `path` in append-create mode, creating parent directories first.
    /// No-op when a writer is already open.
    pub(crate) fn open(&mut self, path: &Path) -> io::Result<()> {
        if self.writer.is_some() {
            return Ok(());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        self.writer = Some(file);
        Ok(())
    }

    /// Flushes and drops the writer. No-op when already closed.
    pub(crate) fn close(&mut self) -> io::Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }

    pub(crate) fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Writes one indented line and flushes it.
    ///
    /// The indent prefix, message, and terminator are assembled into a single
    /// buffer and written with one `write_all` call. Blank messages are not
    /// indented. When no writer is open the line is silently dropped.
    pub(crate) fn write_line(&mut self, message: &str) -> io::Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        let prefix = if message.is_empty() { 0 } else { self.indent };
        let mut line = String::with_capacity(message.len() + prefix * INDENT_WIDTH + 1);
        for _ in 0..prefix {
            line.push_str("    ");
        }
        line.push_str(message);
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrements the indent level, saturating at zero.
    pub(crate) fn unindent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }
}
