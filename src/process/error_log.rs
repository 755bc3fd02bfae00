// src/process/error_log.rs

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// A data row that was dropped because its birthdate did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based source line; the header is line 1.
    pub line: usize,
    pub id: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error processing line #<{}>, for ID #<{}>",
            self.line, self.id
        )
    }
}

/// Destination for rejected rows. The loader reports every row it drops here.
pub trait RowErrorSink {
    fn record(&mut self, err: &RowError) -> io::Result<()>;
}

impl RowErrorSink for Vec<RowError> {
    fn record(&mut self, err: &RowError) -> io::Result<()> {
        self.push(err.clone());
        Ok(())
    }
}

/// Append-only text log, one line per rejected row.
pub struct ErrorLog<W: Write> {
    out: W,
    written: usize,
}

impl ErrorLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write> ErrorLog<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of entries written through this handle.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RowErrorSink for ErrorLog<W> {
    fn record(&mut self, err: &RowError) -> io::Result<()> {
        writeln!(self.out, "{}", err)?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }
}
