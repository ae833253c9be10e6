//! Output sinks
//!
//! An [`OutputSink`] is an append-only byte store that can also overwrite a
//! range it already holds. The overwrite never changes the sink length,
//! which is what lets a session reserve a region up front and patch it once
//! the final values are known.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{SinkError, SinkResult};

/// Append/patch byte store written by an encoding session
pub trait OutputSink {
    /// Append `bytes`, returning the sink length afterwards
    fn append(&mut self, bytes: &[u8]) -> SinkResult<u64>;

    /// Replace `bytes.len()` bytes starting at `offset`
    ///
    /// Fails with [`SinkError::OutOfBounds`] if the range does not lie
    /// entirely within the current contents.
    fn overwrite(&mut self, bytes: &[u8], offset: u64) -> SinkResult<()>;

    /// Number of bytes held
    fn current_length(&self) -> u64;

    /// Position the next append will write to
    fn tell(&self) -> u64 {
        self.current_length()
    }
}

fn check_bounds(bytes: &[u8], offset: u64, length: u64) -> SinkResult<()> {
    let fits = offset
        .checked_add(bytes.len() as u64)
        .map_or(false, |end| end <= length);
    if fits {
        Ok(())
    } else {
        Err(SinkError::OutOfBounds {
            offset,
            len: bytes.len(),
            length,
        })
    }
}

/// In-memory sink backed by a growable byte vector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    data: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, bytes: &[u8]) -> SinkResult<u64> {
        self.data.extend_from_slice(bytes);
        Ok(self.data.len() as u64)
    }

    fn overwrite(&mut self, bytes: &[u8], offset: u64) -> SinkResult<()> {
        check_bounds(bytes, offset, self.current_length())?;
        let start = offset as usize;
        self.data[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn current_length(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Sink writing straight to a file
#[derive(Debug)]
pub struct FileSink {
    file: File,
    length: u64,
}

impl FileSink {
    /// Create (or truncate) the file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> SinkResult<Self> {
        Ok(Self::from_file(File::create(path)?))
    }

    /// Wrap an already opened, empty file
    pub fn from_file(file: File) -> Self {
        Self { file, length: 0 }
    }

    /// Flush and hand back the file
    pub fn into_file(mut self) -> SinkResult<File> {
        self.file.flush()?;
        Ok(self.file)
    }
}

impl OutputSink for FileSink {
    fn append(&mut self, bytes: &[u8]) -> SinkResult<u64> {
        self.file.seek(SeekFrom::Start(self.length))?;
        self.file.write_all(bytes)?;
        self.length += bytes.len() as u64;
        Ok(self.length)
    }

    fn overwrite(&mut self, bytes: &[u8], offset: u64) -> SinkResult<()> {
        check_bounds(bytes, offset, self.length)?;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        Ok(())
    }

    fn current_length(&self) -> u64 {
        self.length
    }
}
