use pretty_assertions::assert_eq;

use rec_ir::{Name, Span};

use super::*;
use crate::test_helpers::{match_op, record, Fixture};

#[test]
fn test_arg_shape_of_patterns() {
    let x = Name::from_raw(9);
    assert_eq!(ArgShape::of(&MatchPattern::var(x)), ArgShape::Any);
    assert_eq!(ArgShape::of(&MatchPattern::discard()), ArgShape::Any);
    assert_eq!(
        ArgShape::of(&MatchPattern::typed(x, TypeId::INT)),
        ArgShape::Binding(TypeId::INT)
    );
    assert_eq!(
        ArgShape::of(&MatchPattern::record(TypeId::STR, vec![])),
        ArgShape::Nested(TypeId::STR)
    );
}

#[test]
fn test_arg_shape_accepts() {
    let fx = Fixture::setup();
    let pool = fx.registry.pool();

    assert!(ArgShape::Any.accepts(pool, TypeId::BOOL, &[]));
    assert!(ArgShape::Binding(TypeId::INT).accepts(pool, TypeId::INT, &[]));
    assert!(!ArgShape::Binding(TypeId::STR).accepts(pool, TypeId::INT, &[]));
    assert!(ArgShape::Binding(TypeId::OBJECT).accepts(pool, fx.inner, &[]));
    assert!(ArgShape::Nested(fx.inner).accepts(pool, TypeId::OBJECT, &[fx.inner]));
    assert!(!ArgShape::Nested(fx.inner).accepts(pool, fx.point, &[fx.inner]));
    // Only the operator subjects matter, not the nested type itself.
    assert!(ArgShape::Nested(fx.inner).accepts(pool, fx.point, &[fx.point]));
}

#[test]
fn test_synthesized_operator_found() {
    let fx = Fixture::setup();

    let result = fx
        .registry
        .resolve_match(fx.point, &[ArgShape::Any, ArgShape::Any]);

    let OracleResult::Found(op) = result else {
        panic!("expected a single operator, got {result:?}");
    };
    assert!(op.is_synthesized());
    assert_eq!(op.owner, fx.point);
}

#[test]
fn test_wrong_arity_reports_existing_arities() {
    let fx = Fixture::setup();

    let result = fx.registry.resolve_match(fx.point, &[ArgShape::Any]);

    let OracleResult::NotFound { arities } = result else {
        panic!("expected no operator, got {result:?}");
    };
    assert_eq!(arities, vec![2]);
}

#[test]
fn test_type_without_operators() {
    let fx = Fixture::setup();

    let result = fx.registry.resolve_match(TypeId::STR, &[]);

    let OracleResult::NotFound { arities } = result else {
        panic!("expected no operator, got {result:?}");
    };
    assert!(arities.is_empty());
}

#[test]
fn test_typed_binding_selects_overload() {
    let mut fx = Fixture::setup();
    let shape = fx.registry.declare_record_type("Shape", TypeId::OBJECT);
    let decl = record(&fx.registry, "Shape", shape, &[("size", TypeId::INT)])
        .with_member(match_op(&fx.registry, shape, vec![TypeId::INT], 1))
        .with_member(match_op(&fx.registry, shape, vec![TypeId::STR], 2));
    fx.registry.declare(decl).unwrap();

    let by_int = fx
        .registry
        .resolve_match(shape, &[ArgShape::Binding(TypeId::INT)]);
    let by_str = fx
        .registry
        .resolve_match(shape, &[ArgShape::Binding(TypeId::STR)]);

    let (OracleResult::Found(int_op), OracleResult::Found(str_op)) = (by_int, by_str) else {
        panic!("typed bindings should pick distinct overloads");
    };
    assert_eq!(int_op.outputs, vec![TypeId::INT]);
    assert_eq!(str_op.outputs, vec![TypeId::STR]);
}

#[test]
fn test_untyped_binding_is_ambiguous() {
    let mut fx = Fixture::setup();
    let shape = fx.registry.declare_record_type("Shape", TypeId::OBJECT);
    let decl = record(&fx.registry, "Shape", shape, &[("size", TypeId::INT)])
        .with_member(match_op(&fx.registry, shape, vec![TypeId::INT], 1))
        .with_member(match_op(&fx.registry, shape, vec![TypeId::STR], 2));
    fx.registry.declare(decl).unwrap();

    let result = fx.registry.resolve_match(shape, &[ArgShape::Any]);

    let OracleResult::Ambiguous(candidates) = result else {
        panic!("expected ambiguity, got {result:?}");
    };
    let spans: Vec<Span> = candidates.iter().map(|op| op.span).collect();
    assert_eq!(spans, vec![Span::new(110, 115), Span::new(120, 125)]);
}

#[test]
fn test_operators_on_non_record_type() {
    let mut fx = Fixture::setup();
    let polar = fx.registry.declare_class_type("Polar", TypeId::OBJECT);
    let op = match_op(&fx.registry, fx.point, vec![TypeId::INT, TypeId::INT], 3);
    assert_eq!(fx.registry.add_match_operators(polar, &[op]), 1);

    let result = fx
        .registry
        .resolve_match(polar, &[ArgShape::Any, ArgShape::Any]);

    let OracleResult::Found(found) = result else {
        panic!("expected the Polar operator, got {result:?}");
    };
    assert_eq!(found.owner, polar);
    assert_eq!(found.subject, fx.point);
}

#[test]
fn test_nested_foreign_operator_checks_operator_subject() {
    let mut fx = Fixture::setup();
    let polar = fx.registry.declare_class_type("Polar", TypeId::OBJECT);
    let op = match_op(&fx.registry, fx.point, vec![TypeId::INT, TypeId::INT], 3);
    fx.registry.add_match_operators(polar, &[op]);
    let segment = fx.registry.declare_record_type("Segment", TypeId::OBJECT);
    let decl = record(&fx.registry, "Segment", segment, &[("a", fx.point), ("b", fx.point)]);
    fx.registry.declare(decl).unwrap();

    let result = fx
        .registry
        .resolve_match(segment, &[ArgShape::Nested(polar), ArgShape::Any]);

    let OracleResult::Found(op) = result else {
        panic!("expected the synthesized Segment operator, got {result:?}");
    };
    assert!(op.is_synthesized());
}

#[test]
fn test_nested_type_without_operators_uses_itself() {
    let fx = Fixture::setup();

    let accepted = fx
        .registry
        .resolve_match(fx.outer, &[ArgShape::Nested(TypeId::OBJECT), ArgShape::Any]);
    let rejected = fx
        .registry
        .resolve_match(fx.outer, &[ArgShape::Nested(TypeId::STR), ArgShape::Any]);

    assert!(matches!(accepted, OracleResult::Found(_)));
    assert!(matches!(rejected, OracleResult::NotFound { .. }));
}
