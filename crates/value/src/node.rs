//! Borrowed navigation handle into a [`Tree`].

use std::collections::HashMap;
use std::fmt;

use crate::tree::Slot;
use crate::value::Element;
use crate::{Kind, NodeId, Tree, Value, ValueError};

/// A node of a [`Tree`], borrowed for the tree's lifetime.
///
/// Accessors never coerce: asking a `Number` node for a string, or an array
/// for a key, fails with [`ValueError::TypeMismatch`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub(crate) fn new(tree: &'t Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree {
        self.tree
    }

    pub(crate) fn slot(&self) -> &'t Slot {
        self.tree.slot(self.id)
    }

    fn child(&self, id: NodeId) -> Node<'t> {
        Node::new(self.tree, id)
    }

    pub fn kind(&self) -> Kind {
        self.slot().kind()
    }

    pub fn is_null(&self) -> bool {
        matches!(self.slot(), Slot::Null)
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self.slot() {
            Slot::Bool(b) => Ok(*b),
            other => Err(ValueError::mismatch(Kind::Bool, other.kind())),
        }
    }

    pub fn as_number(&self) -> Result<f64, ValueError> {
        match self.slot() {
            Slot::Number(n) => Ok(*n),
            other => Err(ValueError::mismatch(Kind::Number, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&'t str, ValueError> {
        match self.slot() {
            Slot::String(s) => Ok(s),
            other => Err(ValueError::mismatch(Kind::String, other.kind())),
        }
    }

    /// Number of items (array), pairs (object) or children (element).
    pub fn len(&self) -> Result<usize, ValueError> {
        match self.slot() {
            Slot::Array(items) => Ok(items.len()),
            Slot::Object(map) => Ok(map.len()),
            Slot::Element { children, .. } => Ok(children.len()),
            other => Err(ValueError::mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn is_empty(&self) -> Result<bool, ValueError> {
        Ok(self.len()? == 0)
    }

    /// Item `index` of an array, or child `index` of an element.
    pub fn at(&self, index: usize) -> Result<Option<Node<'t>>, ValueError> {
        Ok(self.item_ids()?.get(index).map(|&id| self.child(id)))
    }

    /// Value stored under `key` in an object.
    pub fn get(&self, key: &str) -> Result<Option<Node<'t>>, ValueError> {
        match self.slot() {
            Slot::Object(map) => Ok(map.get(key).map(|&id| self.child(id))),
            other => Err(ValueError::mismatch(Kind::Object, other.kind())),
        }
    }

    /// Items of an array or children of an element, in order.
    pub fn items(&self) -> Result<impl ExactSizeIterator<Item = Node<'t>> + 't, ValueError> {
        let tree = self.tree;
        Ok(self.item_ids()?.iter().map(move |&id| Node::new(tree, id)))
    }

    /// Key/value pairs of an object, in insertion order.
    pub fn entries(
        &self,
    ) -> Result<impl ExactSizeIterator<Item = (&'t str, Node<'t>)> + 't, ValueError> {
        let tree = self.tree;
        match self.slot() {
            Slot::Object(map) => Ok(map
                .iter()
                .map(move |(k, &id)| (k.as_str(), Node::new(tree, id)))),
            other => Err(ValueError::mismatch(Kind::Object, other.kind())),
        }
    }

    pub fn tag(&self) -> Result<&'t str, ValueError> {
        match self.slot() {
            Slot::Element { tag, .. } => Ok(tag),
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    pub fn attributes(
        &self,
    ) -> Result<impl ExactSizeIterator<Item = (&'t str, &'t str)> + 't, ValueError> {
        match self.slot() {
            Slot::Element { attributes, .. } => Ok(attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))),
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    pub fn attribute(&self, name: &str) -> Result<Option<&'t str>, ValueError> {
        match self.slot() {
            Slot::Element { attributes, .. } => Ok(attributes.get(name).map(String::as_str)),
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    /// Text content of an element.
    pub fn text(&self) -> Result<Option<&'t str>, ValueError> {
        match self.slot() {
            Slot::Element { text, .. } => Ok(text.as_deref()),
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    /// Rebuilds the owned form of this subtree.
    pub fn to_value(&self) -> Value {
        let tree = self.tree;
        // Reversed pre-order visits every child before its parent.
        let mut order = Vec::new();
        let mut stack = vec![self.id];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(tree.slot(id).child_ids());
        }
        let mut built: HashMap<NodeId, Value> = HashMap::with_capacity(order.len());
        for &id in order.iter().rev() {
            let mut take = |child: &NodeId| built.remove(child).unwrap_or(Value::Null);
            let value = match tree.slot(id) {
                Slot::Null => Value::Null,
                Slot::Bool(b) => Value::Bool(*b),
                Slot::Number(n) => Value::Number(*n),
                Slot::String(s) => Value::String(s.clone()),
                Slot::Array(items) => Value::Array(items.iter().map(&mut take).collect()),
                Slot::Object(map) => Value::Object(
                    map.iter()
                        .map(|(k, child)| (k.clone(), take(child)))
                        .collect(),
                ),
                Slot::Element {
                    tag,
                    attributes,
                    children,
                    text,
                } => Value::Element(Element {
                    tag: tag.clone(),
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                    children: children.iter().map(&mut take).collect(),
                    text: text.clone(),
                }),
            };
            built.insert(id, value);
        }
        built.remove(&self.id).unwrap_or(Value::Null)
    }

    fn item_ids(&self) -> Result<&'t [NodeId], ValueError> {
        match self.slot() {
            Slot::Array(items) => Ok(items),
            Slot::Element { children, .. } => Ok(children),
            other => Err(ValueError::mismatch(Kind::Array, other.kind())),
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", &self.to_value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new(Value::object([
            ("name", Value::from("sensor")),
            ("ok", Value::from(true)),
            (
                "readings",
                Value::from(vec![Value::from(1.5), Value::from(2.5)]),
            ),
        ]))
    }

    #[test]
    fn navigation_by_key_and_index() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(root.kind(), Kind::Object);
        assert_eq!(root.len().unwrap(), 3);
        assert_eq!(root.get("name").unwrap().unwrap().as_str().unwrap(), "sensor");
        assert!(root.get("ok").unwrap().unwrap().as_bool().unwrap());
        let readings = root.get("readings").unwrap().unwrap();
        assert_eq!(readings.at(1).unwrap().unwrap().as_number().unwrap(), 2.5);
        assert!(readings.at(2).unwrap().is_none());
        assert!(root.get("missing").unwrap().is_none());
    }

    #[test]
    fn wrong_variant_is_type_mismatch() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(
            root.at(0).unwrap_err(),
            ValueError::TypeMismatch {
                expected: Kind::Array,
                found: Kind::Object
            }
        );
        let name = root.get("name").unwrap().unwrap();
        assert!(name.as_number().is_err());
        assert!(name.len().is_err());
        assert!(name.tag().is_err());
        assert!(root.items().is_err());
    }

    #[test]
    fn entries_follow_insertion_order() {
        let tree = sample();
        let keys: Vec<&str> = tree.root().entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "ok", "readings"]);
    }

    #[test]
    fn element_navigation() {
        let tree = Tree::new(
            Value::element("doc")
                .attr("lang", "en")
                .child(Value::element("p").text("hi")),
        );
        let root = tree.root();
        assert_eq!(root.tag().unwrap(), "doc");
        assert_eq!(root.attribute("lang").unwrap(), Some("en"));
        assert_eq!(root.attribute("missing").unwrap(), None);
        let p = root.at(0).unwrap().unwrap();
        assert_eq!(p.text().unwrap(), Some("hi"));
        assert_eq!(root.items().unwrap().len(), 1);
    }

    #[test]
    fn to_value_round_trips() {
        let tree = sample();
        let rebuilt = Tree::new(tree.to_value());
        assert_eq!(rebuilt, tree);
    }
}
