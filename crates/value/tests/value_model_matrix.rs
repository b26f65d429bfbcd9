//! Value model matrix: construction, navigation, mutation and equality.

use proptest::prelude::*;
use treeform_value::{Kind, Tree, Value, ValueError};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e12f64..1.0e12).prop_map(Value::Number),
        "[a-z]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-d]{1,2}", inner), 0..6).prop_map(Value::Object),
        ]
    })
}

proptest! {
    #[test]
    fn tree_round_trips_owned_value(value in arb_value()) {
        let tree = Tree::new(value.clone());
        prop_assert_eq!(tree.to_value(), value.clone());
        prop_assert_eq!(Tree::new(tree.to_value()), tree);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric(a in arb_value(), b in arb_value()) {
        prop_assert_eq!(&a, &a);
        prop_assert_eq!(a == b, b == a);
    }

    #[test]
    fn walk_visits_every_reachable_node(value in arb_value()) {
        let tree = Tree::new(value);
        let walked = tree.walk().count();
        prop_assert_eq!(walked, tree.node_count());
        prop_assert!(walked >= 1);
    }
}

#[test]
fn building_a_document_programmatically() {
    let mut tree = Tree::new(Value::Object(vec![]));
    let root = tree.root().id();
    let list = tree.insert(root, "list", Value::Array(vec![])).unwrap();
    for i in 0..3 {
        tree.push(list, i).unwrap();
    }
    tree.insert(root, "label", "xyz").unwrap();

    let root = tree.root();
    assert_eq!(root.len().unwrap(), 2);
    let list = root.get("list").unwrap().unwrap();
    let items: Vec<f64> = list
        .items()
        .unwrap()
        .map(|n| n.as_number().unwrap())
        .collect();
    assert_eq!(items, vec![0.0, 1.0, 2.0]);
    assert_eq!(root.get("label").unwrap().unwrap().as_str().unwrap(), "xyz");
}

#[test]
fn type_mismatch_reports_both_kinds() {
    let tree = Tree::new(Value::from("text"));
    let err = tree.root().as_bool().unwrap_err();
    assert_eq!(
        err,
        ValueError::TypeMismatch {
            expected: Kind::Bool,
            found: Kind::String
        }
    );
    assert_eq!(err.to_string(), "type mismatch: expected bool, found string");
}

#[test]
fn serde_json_interop_round_trip() {
    let json = serde_json::json!({"a": [1, 2.5, "x", null, {"b": false}]});
    let tree = Tree::from(json.clone());
    let back = serde_json::Value::try_from(&tree).unwrap();
    assert_eq!(back, json);
}
