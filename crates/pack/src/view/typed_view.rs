//! View capabilities and the owned multi-dimensional [`TypedView`].

use std::borrow::Cow;

use super::element::Scalar;
use super::error::ViewError;

/// Read access to a contiguous, row-major block of scalars with a shape.
///
/// `elements().len()` must equal the product of `extents()`.
pub trait View {
    type Elem: Scalar;

    fn extents(&self) -> Cow<'_, [u64]>;

    fn elements(&self) -> &[Self::Elem];

    fn rank(&self) -> usize {
        self.extents().len()
    }
}

/// A [`View`] whose elements can be overwritten in place.
pub trait ViewMut: View {
    fn elements_mut(&mut self) -> &mut [Self::Elem];
}

impl<T: Scalar> View for [T] {
    type Elem = T;

    fn extents(&self) -> Cow<'_, [u64]> {
        Cow::Owned(vec![self.len() as u64])
    }

    fn elements(&self) -> &[T] {
        self
    }
}

impl<T: Scalar> ViewMut for [T] {
    fn elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Scalar> View for Vec<T> {
    type Elem = T;

    fn extents(&self) -> Cow<'_, [u64]> {
        Cow::Owned(vec![self.len() as u64])
    }

    fn elements(&self) -> &[T] {
        self
    }
}

impl<T: Scalar> ViewMut for Vec<T> {
    fn elements_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Scalar, const N: usize> View for [T; N] {
    type Elem = T;

    fn extents(&self) -> Cow<'_, [u64]> {
        Cow::Owned(vec![N as u64])
    }

    fn elements(&self) -> &[T] {
        self
    }
}

impl<T: Scalar, const N: usize> ViewMut for [T; N] {
    fn elements_mut(&mut self) -> &mut [T] {
        self
    }
}

/// Number of elements described by `extents`, or `None` on overflow.
pub fn element_count(extents: &[u64]) -> Option<u64> {
    extents.iter().try_fold(1u64, |acc, &e| acc.checked_mul(e))
}

/// Extents travel as a `u8` rank on the wire.
pub(crate) fn check_rank(extents: &[u64]) -> Result<(), ViewError> {
    if extents.len() > u8::MAX as usize {
        return Err(ViewError::RankTooLarge(extents.len()));
    }
    Ok(())
}

/// Owned n-dimensional block of scalars in row-major order.
///
/// Rank 0 is a single scalar. Any extent may be zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedView<T> {
    extents: Vec<u64>,
    data: Vec<T>,
}

impl<T: Scalar> TypedView<T> {
    /// A zero-filled view of the given shape.
    pub fn zeros(extents: &[u64]) -> Result<Self, ViewError> {
        check_rank(extents)?;
        let count = element_count(extents)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| ViewError::TooLarge(extents.to_vec()))?;
        Ok(Self {
            extents: extents.to_vec(),
            data: vec![T::default(); count],
        })
    }

    /// Wraps `data` with a shape; the element count must match.
    pub fn from_vec(extents: &[u64], data: Vec<T>) -> Result<Self, ViewError> {
        check_rank(extents)?;
        if element_count(extents) != Some(data.len() as u64) {
            return Err(ViewError::ShapeMismatch {
                expected: extents.to_vec(),
                found: vec![data.len() as u64],
            });
        }
        Ok(Self {
            extents: extents.to_vec(),
            data,
        })
    }

    pub fn shape(&self) -> &[u64] {
        &self.extents
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Changes the shape without touching the data.
    pub fn reshape(&mut self, extents: &[u64]) -> Result<(), ViewError> {
        check_rank(extents)?;
        if element_count(extents) != Some(self.data.len() as u64) {
            return Err(ViewError::ShapeMismatch {
                expected: self.extents.clone(),
                found: extents.to_vec(),
            });
        }
        self.extents = extents.to_vec();
        Ok(())
    }

    fn offset(&self, index: &[u64]) -> Option<usize> {
        if index.len() != self.extents.len() {
            return None;
        }
        let mut offset = 0u64;
        for (&i, &extent) in index.iter().zip(&self.extents) {
            if i >= extent {
                return None;
            }
            offset = offset * extent + i;
        }
        usize::try_from(offset).ok()
    }

    /// Element at a row-major multi-index, or `None` when out of bounds.
    pub fn get(&self, index: &[u64]) -> Option<&T> {
        self.offset(index).and_then(|at| self.data.get(at))
    }

    pub fn get_mut(&mut self, index: &[u64]) -> Option<&mut T> {
        self.offset(index).and_then(|at| self.data.get_mut(at))
    }
}

impl<T: Scalar> View for TypedView<T> {
    type Elem = T;

    fn extents(&self) -> Cow<'_, [u64]> {
        Cow::Borrowed(&self.extents)
    }

    fn elements(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> ViewMut for TypedView<T> {
    fn elements_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}
