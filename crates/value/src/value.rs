//! Owned, recursive value representation.

use crate::{Kind, ValueError};

/// One node of the universal tree, owning all of its descendants.
///
/// `Object` keeps its pairs in insertion order. Repeated keys are allowed in a
/// literal, but every consumer (tree construction, equality, serialization)
/// resolves them as "last write wins", with the surviving key placed at the
/// position of its last occurrence.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
    Element(Element),
}

/// XML-style element: tag, attributes, children and optional text content.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Value>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Value>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Element(_) => Kind::Element,
        }
    }

    /// Starts an [`Element`] builder; convert it back with `Value::from`.
    pub fn element(tag: impl Into<String>) -> Element {
        Element::new(tag)
    }

    /// Builds an object from key/value pairs, keeping their order.
    pub fn object<I, K>(pairs: I) -> Value
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(ValueError::mismatch(Kind::Bool, other.kind())),
        }
    }

    pub fn as_number(&self) -> Result<f64, ValueError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(ValueError::mismatch(Kind::Number, other.kind())),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(ValueError::mismatch(Kind::String, other.kind())),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], ValueError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(ValueError::mismatch(Kind::Array, other.kind())),
        }
    }

    pub fn as_object(&self) -> Result<&[(String, Value)], ValueError> {
        match self {
            Value::Object(pairs) => Ok(pairs),
            other => Err(ValueError::mismatch(Kind::Object, other.kind())),
        }
    }

    pub fn as_element(&self) -> Result<&Element, ValueError> {
        match self {
            Value::Element(el) => Ok(el),
            other => Err(ValueError::mismatch(Kind::Element, other.kind())),
        }
    }

    /// Looks up `key` in an object, honouring last-write-wins.
    pub fn get(&self, key: &str) -> Result<Option<&Value>, ValueError> {
        Ok(self
            .as_object()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Element> for Value {
    fn from(el: Element) -> Self {
        Value::Element(el)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
