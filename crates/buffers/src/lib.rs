//! Stream capability and binary buffer utilities for treeform.
//!
//! Codecs never own their I/O. They borrow a [`Stream`] for the duration of a
//! single encode or decode call and stage fixed-layout headers through the
//! little-endian [`Reader`] and [`Writer`].
//!
//! # Overview
//!
//! - [`Stream`] - readable/writable byte stream with a known length
//! - [`MemoryStream`] - `Vec`-backed stream with a cursor
//! - [`IoStream`] - adapter over any `Read + Write + Seek`
//! - [`Reader`] - bounds-checked little-endian reads from a byte slice
//! - [`Writer`] - little-endian writes into a growing buffer
//!
//! # Example
//!
//! ```
//! use treeform_buffers::{MemoryStream, Reader, Stream, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! let data = writer.flush();
//!
//! let mut stream = MemoryStream::new();
//! stream.write_all(&data).unwrap();
//! stream.set_position(0);
//!
//! let mut header = [0u8; 3];
//! stream.read_exact(&mut header).unwrap();
//! let mut reader = Reader::new(&header);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! ```

mod reader;
mod stream;
mod writer;

pub use reader::Reader;
pub use stream::{IoStream, MemoryStream, Stream};
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer and stream operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The source ended before a fixed-size request could be satisfied.
    #[error("end of stream: needed {needed} bytes, {available} available")]
    EndOfStream { needed: u64, available: u64 },
    /// The sink accepted fewer bytes than requested.
    #[error("short write: {written} of {requested} bytes written")]
    ShortWrite { written: u64, requested: u64 },
    /// Failure reported by the underlying host I/O.
    #[error("i/o error ({kind:?}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl From<std::io::Error> for BufferError {
    fn from(err: std::io::Error) -> Self {
        BufferError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
