#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

const MODEL: &str = r#"
{
    "types": [
        {
            "namespace": "Demo.Logic",
            "name": "Cat",
            "annotation": { "register": true },
            "properties": [
                { "name": "Age", "type": { "kind": "primitive", "name": "int" }, "has_setter": true, "api_member": true },
                { "name": "Secret", "type": { "kind": "primitive", "name": "bool" }, "public": false, "api_member": true },
                { "name": "Version", "type": { "kind": "primitive", "name": "int" } }
            ],
            "methods": [
                { "name": "Rename", "parameters": [ { "name": "name", "type": { "kind": "primitive", "name": "string" } } ], "api_member": true },
                { "name": "Shared", "is_static": true, "api_member": true }
            ]
        },
        {
            "namespace": "Demo.Logic",
            "name": "Spike",
            "generic_params": [
                { "name": "T", "base": { "kind": "named", "namespace": "Demo.Logic", "name": "Item" } }
            ],
            "annotation": { "custom_name": "531renam3d Spike!" }
        },
        {
            "namespace": "Demo.Logic",
            "name": "ISimpleInterface",
            "kind": "interface"
        }
    ]
}
"#;

#[test]
fn catalog_indexes_by_qualified_reflection_name() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    assert_eq!(catalog.len(), 3);

    assert!(catalog.get("Demo.Logic.Cat").is_some());
    // Generic declarations carry the arity marker in their key.
    assert!(catalog.get("Demo.Logic.Spike`1").is_some());
    assert!(catalog.get("Demo.Logic.Spike").is_none());
    assert!(catalog.get("Demo.Logic.Dog").is_none());
}

#[test]
fn custom_names_are_sanitized_at_load() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    let spike = catalog.get("Demo.Logic.Spike`1").unwrap();
    // Leading digits dropped, invalid characters removed.
    assert_eq!(spike.custom_name(), "renam3dSpike");
}

#[test]
fn annotated_classes_are_candidates_interfaces_are_not() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    assert!(catalog.get("Demo.Logic.Cat").unwrap().is_api_class());
    assert!(!catalog.get("Demo.Logic.ISimpleInterface").unwrap().is_api_class());
}

#[test]
fn decl_for_matches_constructed_arity() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    let constructed = TypeExpr::named(
        "Demo.Logic",
        "Spike",
        vec![TypeExpr::named("Demo.Logic", "Item", vec![])],
    );
    assert!(catalog.decl_for(&constructed).is_some());

    let wrong_arity = TypeExpr::named("Demo.Logic", "Spike", vec![]);
    assert!(catalog.decl_for(&wrong_arity).is_none());
}

#[test]
fn member_filter_keeps_public_instance_annotated_members_in_order() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    let cat = catalog.get("Demo.Logic.Cat").unwrap();
    let filter = MemberFilter::new(cat);

    let properties = filter.api_properties();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "Age");

    let methods = filter.api_methods();
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "Rename");
}

#[test]
fn registration_defaults_to_opt_out_without_annotation() {
    let catalog = TypeCatalog::from_json(MODEL).unwrap();
    assert!(catalog.get("Demo.Logic.Cat").unwrap().should_be_registered());
    assert!(!catalog
        .get("Demo.Logic.ISimpleInterface")
        .unwrap()
        .should_be_registered());
}

#[test]
fn doc_names_render_framework_style() {
    assert_eq!(
        TypeExpr::primitive(Primitive::Int).doc_name(),
        "System.Int32"
    );
    assert_eq!(
        TypeExpr::Nullable {
            inner: Box::new(TypeExpr::primitive(Primitive::Bool)),
        }
        .doc_name(),
        "System.Nullable{System.Boolean}"
    );
    assert_eq!(
        TypeExpr::Array {
            element: Box::new(TypeExpr::primitive(Primitive::Byte)),
            rank: 3,
        }
        .doc_name(),
        "System.Byte[,,]"
    );
    assert_eq!(
        TypeExpr::named(
            "System.Collections.Generic",
            "List",
            vec![TypeExpr::primitive(Primitive::Str)],
        )
        .doc_name(),
        "System.Collections.Generic.List{System.String}"
    );
}

#[test]
fn reflection_names_carry_arity() {
    let constructed = TypeExpr::named(
        "System.Collections.Generic",
        "List",
        vec![TypeExpr::primitive(Primitive::Int)],
    );
    assert_eq!(constructed.reflection_name(), "List`1");
    assert_eq!(
        constructed.full_name(),
        "System.Collections.Generic.List`1"
    );

    assert_eq!(TypeExpr::param("T").reflection_name(), "T");
    assert_eq!(TypeExpr::param("T").full_name(), "T");
}

#[test]
fn type_expressions_round_trip_through_serde() {
    let expr = TypeExpr::Tuple {
        items: vec![
            TypeExpr::primitive(Primitive::Byte),
            TypeExpr::Nullable {
                inner: Box::new(TypeExpr::primitive(Primitive::Short)),
            },
        ],
    };
    let json = serde_json::to_string(&expr).unwrap();
    let back: TypeExpr = serde_json::from_str(&json).unwrap();
    assert_eq!(back, expr);
}
