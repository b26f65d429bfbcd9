//! Universal value tree for treeform.
//!
//! A [`Value`] is the owned, recursive form used to build data
//! programmatically. A [`Tree`] stores the same data in an arena where every
//! node is addressed by a [`NodeId`]; navigation hands out borrowed [`Node`]
//! handles whose lifetime is bounded by the owning tree.
//!
//! ```
//! use treeform_value::{Tree, Value};
//!
//! let mut tree = Tree::new(Value::object([("name", Value::from("probe"))]));
//! let root = tree.root().id();
//! tree.insert(root, "samples", Value::from(vec![Value::from(1), Value::from(2)]))
//!     .unwrap();
//!
//! let samples = tree.root().get("samples").unwrap().unwrap();
//! assert_eq!(samples.len().unwrap(), 2);
//! assert_eq!(samples.at(1).unwrap().unwrap().as_number().unwrap(), 2.0);
//! ```

mod equal;
mod error;
mod interop;
mod kind;
mod node;
mod tree;
mod value;

pub use error::ValueError;
pub use kind::Kind;
pub use node::Node;
pub use tree::{NodeId, Tree, Walk};
pub use value::{Element, Value};
