//! Wire header of an encoded view.
//!
//! ```text
//! +---------+------+-----------------------------+
//! | type id | rank | extents: rank x u64 LE      |
//! |  u8     |  u8  |                             |
//! +---------+------+-----------------------------+
//! ```

use treeform_buffers::{Reader, Stream, Writer};

use super::element::ElementType;
use super::error::ViewError;
use super::typed_view::{check_rank, element_count, View};
use super::Scalar;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub element_type_id: u8,
    pub extents: Vec<u64>,
}

impl Descriptor {
    /// Describes `view`, failing when its rank does not fit in a byte.
    pub fn of<V: View + ?Sized>(view: &V) -> Result<Self, ViewError> {
        let extents = view.extents().into_owned();
        check_rank(&extents)?;
        Ok(Self {
            element_type_id: <V::Elem as Scalar>::ELEMENT_TYPE.id(),
            extents,
        })
    }

    pub fn rank(&self) -> usize {
        self.extents.len()
    }

    /// `None` for type ids outside the known range.
    pub fn element_type(&self) -> Option<ElementType> {
        ElementType::from_id(self.element_type_id)
    }

    pub fn element_count(&self) -> Option<u64> {
        element_count(&self.extents)
    }

    /// Size of the element payload, when the type is known and it fits a u64.
    pub fn payload_len(&self) -> Option<u64> {
        let size = self.element_type()?.size() as u64;
        self.element_count()?.checked_mul(size)
    }

    /// Size of the header itself.
    pub fn encoded_len(&self) -> usize {
        2 + 8 * self.extents.len()
    }

    pub fn write_to(&self, writer: &mut Writer) -> Result<(), ViewError> {
        check_rank(&self.extents)?;
        writer.u8(self.element_type_id);
        writer.u8(self.extents.len() as u8);
        for &extent in &self.extents {
            writer.u64(extent);
        }
        Ok(())
    }

    pub fn write<S: Stream + ?Sized>(&self, stream: &mut S) -> Result<(), ViewError> {
        let mut writer = Writer::with_capacity(self.encoded_len());
        self.write_to(&mut writer)?;
        stream.write_all(writer.as_slice())?;
        Ok(())
    }

    /// Reads a header. A stream that ends early fails with
    /// [`ViewError::InsufficientData`] counted against the full header size.
    pub fn read<S: Stream + ?Sized>(stream: &mut S) -> Result<Self, ViewError> {
        let mut prefix = [0u8; 2];
        read_exact(stream, &mut prefix, 0, 2)?;
        let rank = prefix[1] as usize;
        let mut raw = vec![0u8; rank * 8];
        let end = 2 + raw.len() as u64;
        read_exact(stream, &mut raw, 2, end)?;
        let mut reader = Reader::new(&raw);
        let extents = (0..rank)
            .map(|_| reader.u64())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            element_type_id: prefix[0],
            extents,
        })
    }
}

/// Fills `buf`, reporting a short stream as missing bytes of a `total`-byte
/// object of which `done` bytes were read before this call.
pub(crate) fn read_exact<S: Stream + ?Sized>(
    stream: &mut S,
    buf: &mut [u8],
    done: u64,
    total: u64,
) -> Result<(), ViewError> {
    match stream.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(treeform_buffers::BufferError::EndOfStream { available, .. }) => {
            Err(ViewError::InsufficientData {
                needed: total,
                available: done + available,
            })
        }
        Err(other) => Err(other.into()),
    }
}
