//! Random-access byte sources and the chunked reader handed to probing engines.
//!
//! Engines never see the whole file at once. A [`ByteSource`] answers
//! `(offset, len)` range reads, and [`ChunkedReader`] turns that into a
//! `Read + Seek` stream whose individual reads are capped at a chunk size.

use crate::{Error, Result};
use bytes::Bytes;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Default upper bound for a single range read (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// A file-like object exposing its total length and range reads.
pub trait ByteSource {
    /// Total length of the source in bytes.
    fn size(&self) -> u64;

    /// Read up to `len` bytes starting at `offset`.
    ///
    /// Returns fewer bytes only when the range runs past the end of the
    /// source. Reading exactly at the end yields an empty buffer; reading
    /// beyond it is an error.
    fn read_at(&mut self, offset: u64, len: usize) -> Result<Bytes>;

    /// Filesystem path backing this source, if any.
    fn path(&self) -> Option<&Path> {
        None
    }
}

fn clamp_range(offset: u64, len: usize, size: u64) -> Result<usize> {
    if offset > size {
        return Err(Error::OutOfRange {
            offset,
            len: len as u64,
            size,
        });
    }
    let available = size - offset;
    Ok(len.min(usize::try_from(available).unwrap_or(usize::MAX)))
}

/// A [`ByteSource`] backed by a file on disk.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    file: File,
    size: u64,
}

impl FileSource {
    /// Open a file for range reads.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                Error::file_not_found(path)
            } else {
                Error::Io(e)
            }
        })?;
        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file,
            size,
        })
    }
}

impl ByteSource for FileSource {
    fn size(&self) -> u64 {
        self.size
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Bytes> {
        let len = clamp_range(offset, len, self.size)?;
        if len == 0 {
            return Ok(Bytes::new());
        }

        let mut buf = vec![0u8; len];
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// A [`ByteSource`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
}

impl MemorySource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl ByteSource for MemorySource {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&mut self, offset: u64, len: usize) -> Result<Bytes> {
        let len = clamp_range(offset, len, self.size())?;
        let start = offset as usize;
        Ok(self.data.slice(start..start + len))
    }
}

/// Adapts a [`ByteSource`] into `Read + Seek`, fetching at most
/// `chunk_size` bytes per range read and caching the last chunk.
pub struct ChunkedReader<'a> {
    source: &'a mut dyn ByteSource,
    chunk_size: usize,
    pos: u64,
    chunk: Bytes,
    chunk_start: u64,
}

impl<'a> ChunkedReader<'a> {
    pub fn new(source: &'a mut dyn ByteSource, chunk_size: usize) -> Self {
        Self {
            source,
            chunk_size: chunk_size.max(1),
            pos: 0,
            chunk: Bytes::new(),
            chunk_start: 0,
        }
    }

    /// Total length of the underlying source.
    pub fn size(&self) -> u64 {
        self.source.size()
    }

    fn chunk_contains(&self, pos: u64) -> bool {
        pos >= self.chunk_start && pos < self.chunk_start + self.chunk.len() as u64
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.pos >= self.source.size() {
            return Ok(0);
        }

        if !self.chunk_contains(self.pos) {
            self.chunk = self
                .source
                .read_at(self.pos, self.chunk_size)
                .map_err(io::Error::other)?;
            self.chunk_start = self.pos;
            if self.chunk.is_empty() {
                return Ok(0);
            }
        }

        let offset = (self.pos - self.chunk_start) as usize;
        let available = &self.chunk[offset..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for ChunkedReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::End(delta) => self.source.size().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };

        match target {
            Some(n) => {
                self.pos = n;
                Ok(n)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
