//! Structural equality.
//!
//! Two values are equal iff their shapes and all leaves are equal. Arrays and
//! element children compare in order; object pairs and element attributes
//! compare as maps, ignoring order. Numbers compare with `==`, so `0.0` equals
//! `-0.0` and `NaN` equals nothing.

use indexmap::IndexMap;

use crate::tree::Slot;
use crate::{Node, Tree, Value};

/// Resolves repeated keys the same way tree construction does.
fn last_wins<'a, V>(pairs: &'a [(String, V)]) -> IndexMap<&'a str, &'a V> {
    let mut map = IndexMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        map.insert(k.as_str(), v);
    }
    map
}

fn maps_equal<V, F>(a: &IndexMap<&str, &V>, b: &IndexMap<&str, &V>, eq: F) -> bool
where
    F: Fn(&V, &V) -> bool,
{
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, va)| match b.get(key) {
        Some(vb) => eq(*va, *vb),
        None => false,
    })
}

pub(crate) fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut stack = vec![(a, b)];
    while let Some(pair) = stack.pop() {
        match pair {
            (Value::Null, Value::Null) => {}
            (Value::Bool(a), Value::Bool(b)) if a == b => {}
            (Value::Number(a), Value::Number(b)) if a == b => {}
            (Value::String(a), Value::String(b)) if a == b => {}

            (Value::Array(xs), Value::Array(ys)) if xs.len() == ys.len() => {
                stack.extend(xs.iter().zip(ys));
            }

            (Value::Object(xs), Value::Object(ys)) => {
                let (xs, ys) = (last_wins(xs), last_wins(ys));
                if xs.len() != ys.len() {
                    return false;
                }
                for (key, x) in xs {
                    match ys.get(key) {
                        Some(y) => stack.push((x, *y)),
                        None => return false,
                    }
                }
            }

            (Value::Element(el_a), Value::Element(el_b)) => {
                let same = el_a.tag == el_b.tag
                    && el_a.text == el_b.text
                    && el_a.children.len() == el_b.children.len()
                    && maps_equal(
                        &last_wins(&el_a.attributes),
                        &last_wins(&el_b.attributes),
                        |x: &String, y: &String| x == y,
                    );
                if !same {
                    return false;
                }
                stack.extend(el_a.children.iter().zip(&el_b.children));
            }

            // Different types are never equal
            _ => return false,
        }
    }
    true
}

/// Node equality, possibly across two different trees.
pub(crate) fn deep_equal_nodes(a: Node<'_>, b: Node<'_>) -> bool {
    let (ta, tb) = (a.tree(), b.tree());
    let mut stack = vec![(a.id(), b.id())];
    while let Some((x, y)) = stack.pop() {
        match (ta.slot(x), tb.slot(y)) {
            (Slot::Null, Slot::Null) => {}
            (Slot::Bool(a), Slot::Bool(b)) if a == b => {}
            (Slot::Number(a), Slot::Number(b)) if a == b => {}
            (Slot::String(a), Slot::String(b)) if a == b => {}
            (Slot::Array(xs), Slot::Array(ys)) if xs.len() == ys.len() => {
                stack.extend(xs.iter().copied().zip(ys.iter().copied()));
            }
            (Slot::Object(ma), Slot::Object(mb)) if ma.len() == mb.len() => {
                for (key, &x) in ma {
                    match mb.get(key) {
                        Some(&y) => stack.push((x, y)),
                        None => return false,
                    }
                }
            }
            (
                Slot::Element {
                    tag: tag_a,
                    attributes: attrs_a,
                    children: xs,
                    text: text_a,
                },
                Slot::Element {
                    tag: tag_b,
                    attributes: attrs_b,
                    children: ys,
                    text: text_b,
                },
            ) if tag_a == tag_b
                && text_a == text_b
                && attrs_a == attrs_b
                && xs.len() == ys.len() =>
            {
                stack.extend(xs.iter().copied().zip(ys.iter().copied()));
            }
            _ => return false,
        }
    }
    true
}

/// Compares a tree node against an owned value without materializing either.
pub(crate) fn node_equals_value(node: Node<'_>, value: &Value) -> bool {
    let tree = node.tree();
    let mut stack = vec![(node.id(), value)];
    while let Some((x, y)) = stack.pop() {
        match (tree.slot(x), y) {
            (Slot::Null, Value::Null) => {}
            (Slot::Bool(a), Value::Bool(b)) if a == b => {}
            (Slot::Number(a), Value::Number(b)) if a == b => {}
            (Slot::String(a), Value::String(b)) if a == b => {}
            (Slot::Array(xs), Value::Array(ys)) if xs.len() == ys.len() => {
                stack.extend(xs.iter().copied().zip(ys));
            }
            (Slot::Object(map), Value::Object(pairs)) => {
                let pairs = last_wins(pairs);
                if map.len() != pairs.len() {
                    return false;
                }
                for (key, &x) in map {
                    match pairs.get(key.as_str()) {
                        Some(y) => stack.push((x, *y)),
                        None => return false,
                    }
                }
            }
            (
                Slot::Element {
                    tag,
                    attributes,
                    children,
                    text,
                },
                Value::Element(el),
            ) => {
                let attrs = last_wins(&el.attributes);
                let same = *tag == el.tag
                    && *text == el.text
                    && children.len() == el.children.len()
                    && attributes.len() == attrs.len()
                    && attributes
                        .iter()
                        .all(|(k, v)| attrs.get(k.as_str()).is_some_and(|w| *w == v));
                if !same {
                    return false;
                }
                stack.extend(children.iter().copied().zip(&el.children));
            }
            _ => return false,
        }
    }
    true
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        deep_equal_nodes(*self, *other)
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        deep_equal_nodes(self.root(), other.root())
    }
}

impl PartialEq<Value> for Tree {
    fn eq(&self, other: &Value) -> bool {
        node_equals_value(self.root(), other)
    }
}

impl PartialEq<Value> for Node<'_> {
    fn eq(&self, other: &Value) -> bool {
        node_equals_value(*self, other)
    }
}
