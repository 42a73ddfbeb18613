use pretty_assertions::assert_eq;

use rec_diagnostic::ErrorCode;
use rec_ir::{BodyId, PrimaryMember, Span};
use rec_value::{EvalErrorKind, NoHost};

use super::*;
use crate::test_helpers::{point_decl, registry_with_point_type, FnHost};

#[test]
fn test_declare_caches_all_artifacts() {
    let (mut registry, ty) = registry_with_point_type();
    let decl = point_decl(&registry, ty, vec![]);
    registry.declare(decl).unwrap();

    let info = registry.info(ty).unwrap();
    assert_eq!(info.members.len(), 2);
    assert!(info.equality.is_synthesized());
    assert_eq!(registry.match_operators(ty).count(), 1);
}

#[test]
fn test_declare_twice_fails() {
    let (mut registry, ty) = registry_with_point_type();
    let decl = point_decl(&registry, ty, vec![]);
    registry.declare(decl.clone()).unwrap();

    let err = registry.declare(decl).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2004);
}

#[test]
fn test_declare_non_record_type_fails() {
    let (mut registry, _) = registry_with_point_type();
    let class = registry.declare_class_type("Polar", TypeId::OBJECT);
    let decl = RecordDecl::new(registry.interner().intern("Polar"), class, vec![], Span::DUMMY);

    let err = registry.declare(decl).unwrap_err();
    assert_eq!(
        err,
        SynthError::NotARecord {
            name: "Polar".to_string(),
            span: Span::DUMMY,
        }
    );
}

#[test]
fn test_failed_declaration_is_not_cached() {
    let (mut registry, ty) = registry_with_point_type();
    let x = registry.interner().intern("x");
    let decl = RecordDecl::new(
        registry.interner().intern("Point"),
        ty,
        vec![
            PrimaryMember::new(x, TypeId::INT, Span::DUMMY),
            PrimaryMember::new(x, TypeId::INT, Span::DUMMY),
        ],
        Span::DUMMY,
    );

    assert!(registry.declare(decl).is_err());
    assert!(registry.info(ty).is_none());
    assert_eq!(registry.match_operators(ty).count(), 0);
}

#[test]
fn test_construct_checks_arity_and_types() {
    let (mut registry, ty) = registry_with_point_type();
    let decl = point_decl(&registry, ty, vec![]);
    registry.declare(decl).unwrap();

    let err = registry.construct(ty, vec![Value::Int(1)]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ConstructorArity {
            record: "Point".to_string(),
            expected: 2,
            found: 1,
        }
    );

    let err = registry
        .construct(ty, vec![Value::Int(1), Value::from("two")])
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ConstructorType {
            member: "y".to_string(),
            expected: "int".to_string(),
            found: "str".to_string(),
        }
    );

    let err = registry
        .construct(ty, vec![Value::Int(1), Value::Null])
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6002);
}

#[test]
fn test_construct_accepts_subtypes_and_null_references() {
    let (mut registry, _) = registry_with_point_type();
    let shape = registry.declare_class_type("Shape", TypeId::OBJECT);
    let circle = registry.declare_record_type("Circle", shape);
    let holder = registry.declare_record_type("Holder", TypeId::OBJECT);
    let interner = registry.interner();
    let circle_decl = RecordDecl::new(
        interner.intern("Circle"),
        circle,
        vec![PrimaryMember::new(interner.intern("r"), TypeId::INT, Span::DUMMY)],
        Span::DUMMY,
    );
    let holder_decl = RecordDecl::new(
        interner.intern("Holder"),
        holder,
        vec![PrimaryMember::new(interner.intern("shape"), shape, Span::DUMMY)],
        Span::DUMMY,
    );
    registry.declare(circle_decl).unwrap();
    registry.declare(holder_decl).unwrap();

    let c = registry.construct(circle, vec![Value::Int(2)]).unwrap();
    assert!(registry.construct(holder, vec![c]).is_ok());
    assert!(registry.construct(holder, vec![Value::Null]).is_ok());
}

#[test]
fn test_read_member_dispatch() {
    let (mut registry, ty) = registry_with_point_type();
    let y = registry.interner().intern("y");
    let decl = point_decl(
        &registry,
        ty,
        vec![UserMember::property(y, TypeId::INT, BodyId::new(4), Span::DUMMY)],
    );
    registry.declare(decl).unwrap();

    let mut host = FnHost::default();
    host.properties.insert(
        BodyId::new(4),
        Box::new(|receiver: &Value| {
            let Some(Value::Int(y)) = receiver.as_record().and_then(|r| r.field(1)) else {
                return Ok(Value::Null);
            };
            Ok(Value::Int(y * 10))
        }),
    );
    let p = registry
        .construct(ty, vec![Value::Int(1), Value::Int(2)])
        .unwrap();
    let x = registry.interner().intern("x");

    assert_eq!(registry.read_member(&p, x, &host).unwrap(), Value::Int(1));
    assert_eq!(registry.read_member(&p, y, &host).unwrap(), Value::Int(20));
    assert_eq!(host.calls.get(), 1);
}

#[test]
fn test_read_member_errors() {
    let (mut registry, ty) = registry_with_point_type();
    let decl = point_decl(&registry, ty, vec![]);
    registry.declare(decl).unwrap();
    let p = registry
        .construct(ty, vec![Value::Int(1), Value::Int(2)])
        .unwrap();
    let z = registry.interner().intern("z");

    let err = registry.read_member(&p, z, &NoHost).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E6003);

    let err = registry.read_member(&Value::Int(5), z, &NoHost).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NotARecord {
            found: "int".to_string()
        }
    );
}

#[test]
fn test_shadowing_method_keeps_stored_value_readable() {
    let (mut registry, ty) = registry_with_point_type();
    let x = registry.interner().intern("x");
    let decl = point_decl(
        &registry,
        ty,
        vec![UserMember::method(x, BodyId::new(1), Span::DUMMY)],
    );
    registry.declare(decl).unwrap();
    let p = registry
        .construct(ty, vec![Value::Int(8), Value::Int(9)])
        .unwrap();

    assert_eq!(registry.read_member(&p, x, &NoHost).unwrap(), Value::Int(8));
}

#[test]
fn test_operators_on_non_record_types() {
    let (mut registry, point) = registry_with_point_type();
    let polar = registry.declare_class_type("Polar", TypeId::OBJECT);
    let wk = registry.interner().well_known();
    let members = vec![
        UserMember::match_operator(
            wk.match_op,
            point,
            vec![TypeId::INT, TypeId::INT],
            BodyId::new(1),
            Span::DUMMY,
        ),
        UserMember::method(wk.equals, BodyId::new(2), Span::DUMMY),
    ];

    assert_eq!(registry.add_match_operators(polar, &members), 1);
    let ops: Vec<_> = registry.match_operators(polar).collect();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].owner, polar);
    assert_eq!(ops[0].subject, point);
}
