//! Encoding and decoding of whole views.

use treeform_buffers::{Stream, Writer};

use super::descriptor::{read_exact, Descriptor};
use super::element::Scalar;
use super::error::ViewError;
use super::typed_view::{TypedView, View, ViewMut};

/// Payload bytes read per step by [`decode_owned`].
const CHUNK: usize = 64 * 1024;

/// Appends the descriptor and the little-endian elements of `view`.
pub fn encode_into<V: View + ?Sized>(view: &V, writer: &mut Writer) -> Result<(), ViewError> {
    let descriptor = Descriptor::of(view)?;
    let elements = view.elements();
    if descriptor.element_count() != Some(elements.len() as u64) {
        return Err(ViewError::ShapeMismatch {
            expected: descriptor.extents,
            found: vec![elements.len() as u64],
        });
    }
    descriptor.write_to(writer)?;
    let size = <V::Elem as Scalar>::SIZE;
    let mut payload = vec![0u8; elements.len() * size];
    for (out, &e) in payload.chunks_exact_mut(size).zip(elements) {
        e.write_le(out);
    }
    writer.buf(&payload);
    Ok(())
}

pub fn encode_to_vec<V: View + ?Sized>(view: &V) -> Result<Vec<u8>, ViewError> {
    let mut writer = Writer::new();
    encode_into(view, &mut writer)?;
    Ok(writer.flush())
}

/// Writes `view` to `stream`: descriptor first, then the elements.
pub fn encode<V, S>(view: &V, stream: &mut S) -> Result<(), ViewError>
where
    V: View + ?Sized,
    S: Stream + ?Sized,
{
    let bytes = encode_to_vec(view)?;
    let element_type = <V::Elem as Scalar>::ELEMENT_TYPE;
    tracing::debug!(
        rank = view.rank(),
        element_type = %element_type,
        bytes = bytes.len(),
        "encoding view"
    );
    stream.write_all(&bytes)?;
    Ok(())
}

fn check_type<T: Scalar>(descriptor: &Descriptor) -> Result<(), ViewError> {
    if descriptor.element_type_id != T::ELEMENT_TYPE.id() {
        return Err(ViewError::TypeMismatch {
            expected: T::ELEMENT_TYPE,
            found: descriptor.element_type_id,
        });
    }
    Ok(())
}

/// Reads one encoded view into `view`, whose type and shape must match the
/// encoded ones exactly.
///
/// The element type is checked first, then the extents, before any payload
/// is read. The payload is staged in a scratch buffer, so `view` is only
/// written once every byte has arrived.
pub fn decode<S, V>(stream: &mut S, view: &mut V) -> Result<(), ViewError>
where
    S: Stream + ?Sized,
    V: ViewMut + ?Sized,
{
    let descriptor = Descriptor::read(stream)?;
    tracing::debug!(
        rank = descriptor.rank(),
        element_type = descriptor.element_type_id,
        "decoding view"
    );
    let result = decode_payload(stream, view, &descriptor);
    if let Err(err) = &result {
        tracing::trace!(error = %err, "view decode failed");
    }
    result
}

fn decode_payload<S, V>(
    stream: &mut S,
    view: &mut V,
    descriptor: &Descriptor,
) -> Result<(), ViewError>
where
    S: Stream + ?Sized,
    V: ViewMut + ?Sized,
{
    check_type::<V::Elem>(descriptor)?;
    let extents = view.extents();
    if descriptor.extents.as_slice() != &*extents {
        return Err(ViewError::ShapeMismatch {
            expected: extents.into_owned(),
            found: descriptor.extents.clone(),
        });
    }
    let size = <V::Elem as Scalar>::SIZE;
    let mut scratch = vec![0u8; view.elements().len() * size];
    let header = descriptor.encoded_len() as u64;
    let end = header + scratch.len() as u64;
    read_exact(stream, &mut scratch, header, end)?;
    for (dst, src) in view.elements_mut().iter_mut().zip(scratch.chunks_exact(size)) {
        *dst = <V::Elem as Scalar>::read_le(src);
    }
    Ok(())
}

/// Reads one encoded view, adopting its shape. The element type must still be
/// `T`.
///
/// The payload is read in bounded chunks, so a header that claims more data
/// than the stream holds fails with [`ViewError::InsufficientData`] instead of
/// reserving memory for it up front.
pub fn decode_owned<T, S>(stream: &mut S) -> Result<TypedView<T>, ViewError>
where
    T: Scalar,
    S: Stream + ?Sized,
{
    let descriptor = Descriptor::read(stream)?;
    check_type::<T>(&descriptor)?;
    let too_large = || ViewError::TooLarge(descriptor.extents.clone());
    let total = descriptor.payload_len().ok_or_else(too_large)?;
    usize::try_from(total).map_err(|_| too_large())?;
    tracing::debug!(rank = descriptor.rank(), bytes = total, "decoding owned view");

    let header = descriptor.encoded_len() as u64;
    let mut data = Vec::new();
    let mut chunk = vec![0u8; CHUNK.min(total as usize)];
    let mut done = 0u64;
    while done < total {
        let n = CHUNK.min((total - done) as usize);
        read_exact(stream, &mut chunk[..n], header + done, header + total)?;
        data.extend(chunk[..n].chunks_exact(T::SIZE).map(T::read_le));
        done += n as u64;
    }
    TypedView::from_vec(&descriptor.extents, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use treeform_buffers::MemoryStream;

    fn stream_of(bytes: Vec<u8>) -> MemoryStream {
        MemoryStream::from_bytes(bytes)
    }

    #[test]
    fn encodes_header_then_payload() {
        let bytes = encode_to_vec(&[1u16, 0x0203]).unwrap();
        assert_eq!(
            bytes,
            vec![0x03, 1, 2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0x03, 0x02]
        );
    }

    #[test]
    fn decode_into_slice() {
        let bytes = encode_to_vec(&vec![-1i32, 7, 9]).unwrap();
        let mut out = [0i32; 3];
        decode(&mut stream_of(bytes), &mut out).unwrap();
        assert_eq!(out, [-1, 7, 9]);
    }

    #[test]
    fn type_is_checked_before_shape() {
        let bytes = encode_to_vec(&[1.0f64, 2.0]).unwrap();
        let mut out = [0u8; 5];
        assert_eq!(
            decode(&mut stream_of(bytes), &mut out),
            Err(ViewError::TypeMismatch {
                expected: crate::view::ElementType::U8,
                found: 0x0A
            })
        );
    }

    #[test]
    fn rank_zero_round_trip() {
        let view = TypedView::from_vec(&[], vec![42u64]).unwrap();
        let bytes = encode_to_vec(&view).unwrap();
        assert_eq!(bytes.len(), 2 + 8);
        let back: TypedView<u64> = decode_owned(&mut stream_of(bytes)).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn owned_decode_spanning_chunks() {
        let values: Vec<u32> = (0..40_000).collect();
        let view = TypedView::from_vec(&[200, 200], values).unwrap();
        let bytes = encode_to_vec(&view).unwrap();
        let back: TypedView<u32> = decode_owned(&mut stream_of(bytes)).unwrap();
        assert_eq!(back, view);
    }

    #[test]
    fn lying_header_does_not_allocate_payload() {
        let mut bytes = vec![0x01, 1];
        bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3]);
        let err = decode_owned::<u8, _>(&mut stream_of(bytes)).unwrap_err();
        assert_eq!(
            err,
            ViewError::InsufficientData {
                needed: 10 + (1u64 << 40),
                available: 13
            }
        );
    }
}
