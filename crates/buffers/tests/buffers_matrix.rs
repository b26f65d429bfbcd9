//! Writer/Reader/Stream matrix for the buffers crate.

use treeform_buffers::{BufferError, IoStream, MemoryStream, Reader, Stream, Writer};

// ---------------------------------------------------------------------------
// Writer/Reader roundtrip matrix
// ---------------------------------------------------------------------------

#[test]
fn roundtrip_integer_widths() {
    let mut w = Writer::new();
    w.u8(0xFF);
    w.u16(0xBEEF);
    w.u32(0xDEAD_BEEF);
    w.u64(u64::MAX - 1);
    let data = w.flush();
    assert_eq!(data.len(), 1 + 2 + 4 + 8);
    assert!(w.is_empty());

    let mut r = Reader::new(&data);
    assert_eq!(r.u8().unwrap(), 0xFF);
    assert_eq!(r.u16().unwrap(), 0xBEEF);
    assert_eq!(r.u32().unwrap(), 0xDEAD_BEEF);
    assert_eq!(r.u64().unwrap(), u64::MAX - 1);
    assert_eq!(r.size(), 0);
}

#[test]
fn writer_layout_is_little_endian() {
    let mut w = Writer::new();
    w.u16(0x0102);
    w.u64(0x0102_0304_0506_0708);
    assert_eq!(
        w.as_slice(),
        &[0x02, 0x01, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
    );
}

#[test]
fn reader_reports_truncation_without_panicking() {
    let data = [1u8, 2, 3];
    let mut r = Reader::new(&data);
    assert!(matches!(
        r.u32(),
        Err(BufferError::EndOfStream {
            needed: 4,
            available: 3
        })
    ));
    assert_eq!(r.buf(3).unwrap(), &[1, 2, 3]);
    assert_eq!(r.peek(), None);
}

// ---------------------------------------------------------------------------
// Stream capability
// ---------------------------------------------------------------------------

fn exercise_stream<S: Stream>(stream: &mut S) {
    stream.write_all(b"0123456789").unwrap();
    assert_eq!(stream.length().unwrap(), 10);
}

#[test]
fn memory_and_io_streams_agree() {
    let mut memory = MemoryStream::new();
    exercise_stream(&mut memory);

    let mut io = IoStream::new(std::io::Cursor::new(Vec::new()));
    exercise_stream(&mut io);

    assert_eq!(memory.as_bytes(), io.into_inner().into_inner().as_slice());
}

#[test]
fn stream_by_mutable_reference() {
    let mut memory = MemoryStream::from_bytes(vec![5, 6]);
    let mut borrowed = &mut memory;
    let mut out = [0u8; 2];
    Stream::read_exact(&mut borrowed, &mut out).unwrap();
    assert_eq!(out, [5, 6]);
    assert_eq!(memory.remaining(), 0);
}

#[test]
fn io_stream_surfaces_host_errors() {
    struct Broken;
    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
        }
    }
    impl std::io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
    impl std::io::Seek for Broken {
        fn seek(&mut self, _: std::io::SeekFrom) -> std::io::Result<u64> {
            Ok(0)
        }
    }

    let mut stream = IoStream::new(Broken);
    let mut out = [0u8; 1];
    assert!(matches!(
        stream.read_exact(&mut out),
        Err(BufferError::Io { kind: std::io::ErrorKind::Other, .. })
    ));
    assert_eq!(
        stream.write_all(&[1, 2]),
        Err(BufferError::ShortWrite {
            written: 0,
            requested: 2
        })
    );
}
