//! XML formatter matrix.

use treeform_pack::xml::{self, XmlError};
use treeform_pack::{CodecError, ErrorCategory};
use treeform_value::{Kind, Tree, Value};

#[test]
fn attribute_escaping_is_reversible() {
    let tree = Tree::new(Value::element("node").attr("a", "a<b&c"));
    let out = xml::format(&tree, "").unwrap();
    assert_eq!(out, r#"<node a="a&lt;b&amp;c"/>"#);
    let start = out.find('"').unwrap() + 1;
    let end = out.rfind('"').unwrap();
    assert_eq!(xml::unescape(&out[start..end]).unwrap(), "a<b&c");
}

#[test]
fn quotes_in_attributes_and_text() {
    let tree = Tree::new(Value::element("q").attr("say", r#"it's "x""#).text(r#"it's "x" > y"#));
    assert_eq!(
        xml::format(&tree, "").unwrap(),
        r#"<q say="it&apos;s &quot;x&quot;">it's "x" &gt; y</q>"#
    );
}

#[test]
fn pretty_with_declaration() {
    let tree = Tree::new(
        Value::element("config")
            .child(Value::element("entry").attr("key", "port").child(8080))
            .child(Value::element("entry").attr("key", "debug").child(false)),
    );
    assert_eq!(
        xml::format(&tree, "pretty indent=4 declaration").unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <config>\n    \
         <entry key=\"port\">8080</entry>\n    \
         <entry key=\"debug\">false</entry>\n\
         </config>"
    );
}

#[test]
fn attributes_as_child_elements() {
    let tree = Tree::new(
        Value::element("user")
            .attr("id", "7")
            .child(Value::element("name").text("Ann")),
    );
    assert_eq!(
        xml::format(&tree, "attributes=elements").unwrap(),
        "<user><id>7</id><name>Ann</name></user>"
    );
    assert_eq!(
        xml::format(&tree, "attributes=elements,pretty").unwrap(),
        "<user>\n  <id>7</id>\n  <name>Ann</name>\n</user>"
    );
}

#[test]
fn non_element_roots_are_type_mismatch() {
    for value in [
        Value::Null,
        Value::from("text"),
        Value::object([("a", Value::from(1))]),
    ] {
        let kind = value.kind();
        let err = xml::format(&Tree::new(value), "").unwrap_err();
        assert_eq!(err, CodecError::Xml(XmlError::TypeMismatch { found: kind }));
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    }
}

#[test]
fn null_child_is_not_silently_dropped() {
    let tree = Tree::new(Value::element("r").child(Value::Null));
    assert_eq!(
        xml::format(&tree, ""),
        Err(CodecError::Xml(XmlError::UnsupportedChild {
            kind: Kind::Null,
            path: "/r".into()
        }))
    );
}

#[test]
fn tree_built_incrementally() {
    let mut tree = Tree::new(Value::element("list"));
    let root = tree.root().id();
    for i in 0..3 {
        let item = tree.push(root, Value::element("item")).unwrap();
        tree.set_attribute(item, "n", i.to_string()).unwrap();
    }
    tree.set_text(root, Some("items:".into())).unwrap();
    assert_eq!(
        xml::format(&tree, "").unwrap(),
        r#"<list>items:<item n="0"/><item n="1"/><item n="2"/></list>"#
    );
}

#[test]
fn format_into_keeps_buffer_on_error() {
    let mut out = String::from("<!-- head -->");
    let bad = Tree::new(Value::element("r").child(Value::from(vec![Value::Null])));
    assert!(xml::format_into(&mut out, &bad, "").is_err());
    assert_eq!(out, "<!-- head -->");
    xml::format_into(&mut out, &Tree::new(Value::element("r")), "").unwrap();
    assert_eq!(out, "<!-- head --><r/>");
}

#[test]
fn deep_pushed_element_chain_fails_cleanly() {
    let mut tree = Tree::new(Value::element("n"));
    let mut id = tree.root().id();
    for _ in 0..100_000 {
        id = tree.push(id, Value::element("n")).unwrap();
    }
    let err = xml::format(&tree, "pretty").unwrap_err();
    assert_eq!(err, CodecError::Xml(XmlError::TooDeep(treeform_pack::json::MAX_DEPTH)));
    assert_eq!(err.category(), ErrorCategory::TypeMismatch);
}

#[test]
fn pretty_mode_preserves_mixed_text() {
    let tree = Tree::new(
        Value::element("p")
            .text("Hello ")
            .child(Value::element("b").text("world"))
            .child("!"),
    );
    assert_eq!(
        xml::format(&tree, "pretty").unwrap(),
        "<p>Hello <b>world</b>!</p>"
    );
}
