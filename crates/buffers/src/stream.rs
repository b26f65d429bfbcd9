//! The byte stream capability consumed by the codecs.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::BufferError;

/// A readable/writable byte stream with a known length.
///
/// Implementors only provide single-shot `read`/`write`; the provided
/// [`read_exact`](Stream::read_exact) and [`write_all`](Stream::write_all)
/// loop just long enough to satisfy one fixed-size request and treat a
/// zero-length transfer as the end of the stream.
pub trait Stream {
    /// Reads up to `buf.len()` bytes, returning how many were read.
    /// `Ok(0)` means the stream is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BufferError>;

    /// Writes up to `buf.len()` bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, BufferError>;

    /// Total length of the stream in bytes.
    fn length(&mut self) -> Result<u64, BufferError>;

    /// Fills `buf` completely or fails with [`BufferError::EndOfStream`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BufferError> {
        let mut filled = 0;
        while filled < buf.len() {
            let n = self.read(&mut buf[filled..])?;
            if n == 0 {
                return Err(BufferError::EndOfStream {
                    needed: buf.len() as u64,
                    available: filled as u64,
                });
            }
            filled += n;
        }
        Ok(())
    }

    /// Writes all of `buf` or fails with [`BufferError::ShortWrite`].
    fn write_all(&mut self, buf: &[u8]) -> Result<(), BufferError> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..])?;
            if n == 0 {
                return Err(BufferError::ShortWrite {
                    written: written as u64,
                    requested: buf.len() as u64,
                });
            }
            written += n;
        }
        Ok(())
    }
}

impl<S: Stream + ?Sized> Stream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BufferError> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, BufferError> {
        (**self).write(buf)
    }

    fn length(&mut self) -> Result<u64, BufferError> {
        (**self).length()
    }
}

/// In-memory stream over a `Vec<u8>` with a shared read/write cursor.
///
/// Writes overwrite bytes at the cursor and extend the buffer past its end,
/// like `std::io::Cursor<Vec<u8>>`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStream {
    data: Vec<u8>,
    pos: usize,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing bytes with the cursor at the start.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor; positions past the end are clamped.
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.data.len());
    }

    /// Bytes left between the cursor and the end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl Stream for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BufferError> {
        let n = buf.len().min(self.remaining());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, BufferError> {
        let overlap = buf.len().min(self.remaining());
        self.data[self.pos..self.pos + overlap].copy_from_slice(&buf[..overlap]);
        self.data.extend_from_slice(&buf[overlap..]);
        self.pos += buf.len();
        Ok(buf.len())
    }

    fn length(&mut self) -> Result<u64, BufferError> {
        Ok(self.data.len() as u64)
    }
}

/// Adapts a host `Read + Write + Seek` handle (a `File`, an `io::Cursor`, ...)
/// to the [`Stream`] capability. The handle stays owned by the caller's
/// scope; `into_inner` gives it back.
#[derive(Debug)]
pub struct IoStream<T> {
    inner: T,
}

impl<T> IoStream<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write + Seek> Stream for IoStream<T> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, BufferError> {
        loop {
            match self.inner.read(buf) {
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                other => return Ok(other?),
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, BufferError> {
        loop {
            match self.inner.write(buf) {
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                other => return Ok(other?),
            }
        }
    }

    fn length(&mut self) -> Result<u64, BufferError> {
        let pos = self.inner.stream_position()?;
        let end = self.inner.seek(SeekFrom::End(0))?;
        if pos != end {
            self.inner.seek(SeekFrom::Start(pos))?;
        }
        Ok(end)
    }
}
