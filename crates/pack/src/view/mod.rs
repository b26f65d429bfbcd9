//! Typed view codec: fixed-layout binary encoding of n-dimensional scalar
//! arrays.
//!
//! An encoded view is a [`Descriptor`] (element type id, rank, extents as
//! little-endian `u64`) followed by the elements in row-major order, each
//! little-endian. There is no padding and no trailer.
//!
//! ```
//! use treeform_buffers::MemoryStream;
//! use treeform_pack::view::{self, TypedView, ViewError};
//!
//! let src = TypedView::from_vec(&[2, 3], vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let mut stream = MemoryStream::new();
//! view::encode(&src, &mut stream).unwrap();
//!
//! stream.set_position(0);
//! let mut dst = TypedView::<f32>::zeros(&[2, 3]).unwrap();
//! view::decode(&mut stream, &mut dst).unwrap();
//! assert_eq!(dst, src);
//!
//! stream.set_position(0);
//! let mut wrong = TypedView::<f32>::zeros(&[3, 2]).unwrap();
//! assert!(matches!(
//!     view::decode(&mut stream, &mut wrong),
//!     Err(ViewError::ShapeMismatch { .. })
//! ));
//! ```

mod codec;
mod descriptor;
mod element;
mod error;
mod typed_view;

pub use codec::{decode, decode_owned, encode, encode_into, encode_to_vec};
pub use descriptor::Descriptor;
pub use element::{ElementType, Scalar};
pub use error::ViewError;
pub use typed_view::{element_count, TypedView, View, ViewMut};
