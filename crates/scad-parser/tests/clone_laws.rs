// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `clone_with` and `get_fields` laws, checked for every node variant.

use std::sync::Arc;

use scad_ast::{BinaryOp, CommentText, Composite, Fields, Node, NodeType, Position, UnaryOp, ValidationError};

fn pos(line: usize, column: usize, offset: usize) -> Position {
    Position::new(line, column, offset).unwrap()
}

fn leaf(node: Node) -> Arc<Node> {
    Arc::new(node)
}

fn id(name: &str) -> Arc<Node> {
    leaf(Node::identifier(name))
}

fn num(n: f64) -> Arc<Node> {
    leaf(Node::number(n).unwrap())
}

/// One positioned node of every variant.
fn samples() -> Vec<Node> {
    let unpositioned = vec![
        Node::number(1.5).unwrap(),
        Node::string("text"),
        Node::path("lib.scad"),
        Node::identifier("x"),
        Node::boolean(true),
        Node::undefined(),
        Node::comment(CommentText::Block(vec!["one".into(), "two".into()])),
        Node::block(vec![num(1.0)]),
        Node::package(vec![num(1.0), num(2.0)]),
        Node::unary_operator(UnaryOp::Neg, num(3.0)),
        Node::binary_operator(num(1.0), BinaryOp::Add, num(2.0)),
        Node::ternary_operator(leaf(Node::boolean(false)), num(1.0), num(2.0)),
        Node::assignment(id("a"), num(1.0)).unwrap(),
        Node::range(num(0.0), Some(num(2.0)), num(10.0)),
        Node::call(NodeType::FunctionCall, id("f"), vec![num(1.0)]).unwrap(),
        Node::call(NodeType::ModuleCall, id("cube"), vec![]).unwrap(),
        Node::call(NodeType::OperatorCall, id("union"), vec![num(1.0)]).unwrap(),
        Node::definition(NodeType::Function, id("f"), vec![id("a")], num(1.0)).unwrap(),
        Node::definition(NodeType::Module, id("m"), vec![], leaf(Node::block(vec![]))).unwrap(),
        Node::for_statement(num(0.0), num(1.0), num(2.0), leaf(Node::noop())),
        Node::if_statement(leaf(Node::boolean(true)), num(1.0), Some(num(2.0))),
        Node::member_lookup(leaf(Node::lookup(id("v")).unwrap()), id("x")).unwrap(),
        Node::array_lookup(leaf(Node::lookup(id("v")).unwrap()), num(0.0)),
        Node::lookup(id("v")).unwrap(),
        Node::file_import(NodeType::Include, leaf(Node::path("a.scad"))).unwrap(),
        Node::file_import(NodeType::Use, leaf(Node::path("b.scad"))).unwrap(),
        Node::noop(),
    ];
    unpositioned
        .into_iter()
        .map(|node| node.positioned(pos(1, 1, 0), pos(2, 3, 9)).unwrap())
        .collect()
}

#[test]
fn samples_cover_every_variant() {
    let samples = samples();
    for node_type in NodeType::ALL {
        assert!(
            samples.iter().any(|node| node.node_type() == node_type),
            "no sample for {node_type}"
        );
    }
}

#[test]
fn empty_override_clone_is_equal_but_distinct() {
    for node in samples() {
        let copy = node.clone_with(Fields::new()).unwrap();
        assert_eq!(copy, node, "{}", node.node_type());
        assert!(!std::ptr::eq(&copy, &node));
        assert_eq!(copy.span(), node.span());
    }
}

#[test]
fn rebuilding_from_fields_is_identity() {
    for node in samples() {
        let rebuilt = Node::new(node.node_type(), node.get_fields()).unwrap();
        assert_eq!(rebuilt, node, "{}", node.node_type());
    }
}

#[test]
fn fields_exclude_type_and_reject_readding() {
    for node in samples() {
        let mut fields = node.get_fields();
        assert!(!fields.contains("type"));
        let first = fields.names().next().map(str::to_string).unwrap();
        assert_eq!(
            fields.add_field(first.as_str(), 0.0),
            Err(ValidationError::FieldAlreadySet { field: first.clone() })
        );
    }
}

#[test]
fn override_changes_only_that_field() {
    let node = Node::binary_operator(num(1.0), BinaryOp::Add, num(2.0))
        .positioned(pos(1, 1, 0), pos(1, 6, 5))
        .unwrap();
    let copy = node
        .clone_with(Fields::new().with("right", Node::number(9.0).unwrap()).unwrap())
        .unwrap();

    let (before, after) = (node.get_fields(), copy.get_fields());
    for (name, field) in before.iter() {
        if name == "right" {
            assert_ne!(after.get(name), Some(field));
        } else {
            assert_eq!(after.get(name), Some(field), "{name} changed");
        }
    }
    assert_eq!(copy.span(), node.span());
    assert_eq!(**copy.children()[1], Node::number(9.0).unwrap());
}

#[test]
fn operator_override_is_validated() {
    let node = Node::unary_operator(UnaryOp::Not, leaf(Node::boolean(true)));
    let copy = node.clone_with(Fields::new().with("operator", "-").unwrap()).unwrap();
    assert!(matches!(
        copy.as_composite(),
        Some(Composite::UnaryOperator { operator: UnaryOp::Neg, .. })
    ));
    assert!(matches!(
        node.clone_with(Fields::new().with("operator", "**").unwrap()),
        Err(ValidationError::UnknownOperator { kind: "unary", .. })
    ));
}

#[test]
fn invalid_override_fails_like_constructor() {
    let node = Node::assignment(id("a"), num(1.0)).unwrap();
    let overridden = node.clone_with(Fields::new().with("identifier", Node::number(1.0).unwrap()).unwrap());
    let constructed = Node::construct(
        "Assignment",
        Fields::new()
            .with("identifier", Node::number(1.0).unwrap())
            .unwrap()
            .with("value", num(1.0))
            .unwrap(),
    );
    assert!(matches!(overridden, Err(ValidationError::WrongFieldKind { .. })));
    assert_eq!(overridden, constructed);
}

#[test]
fn type_override_is_ignored() {
    let node = Node::number(4.0).unwrap();
    let copy = node.clone_with(Fields::new().with("type", "String").unwrap()).unwrap();
    assert!(copy.is(NodeType::Number));
}
