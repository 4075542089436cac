#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use super::{alias_from_doc_name, resolve};
use crate::context::GenerationContext;
use crate::model::{
    ClassAnnotation, GenericParam, Primitive, TypeCatalog, TypeDecl, TypeExpr, TypeKind,
};
use crate::workflow::settings::{
    GenerationSettings, GenerationStrategy, RegistrationSettings,
};

fn settings(fully_qualified: bool) -> GenerationSettings {
    GenerationSettings {
        source_project_name: "Demo.Logic".into(),
        source_project_path: PathBuf::from("demo/logic"),
        source_catalog_path: PathBuf::from("demo/logic"),
        target_catalog_path: PathBuf::from("demo/api"),
        target_namespace: "Demo.Api".into(),
        strategy: Arc::new(GenerationStrategy {
            copyright: String::new(),
            file_stamp: String::new(),
            fully_qualified_names: fully_qualified,
            nested_folder: "Common".into(),
            registration: RegistrationSettings {
                file_name: "ApiRegistrations".into(),
                subfolders: vec![],
                di_import: "Demo.Injection".into(),
                di_service: "IServiceCollection".into(),
                di_method: "AddTransient".into(),
            },
        }),
    }
}

fn prim(p: Primitive) -> TypeExpr {
    TypeExpr::primitive(p)
}

fn nullable(inner: TypeExpr) -> TypeExpr {
    TypeExpr::Nullable {
        inner: Box::new(inner),
    }
}

fn array(element: TypeExpr, rank: usize) -> TypeExpr {
    TypeExpr::Array {
        element: Box::new(element),
        rank,
    }
}

fn tuple(items: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::Tuple { items }
}

fn generic(name: &str, args: Vec<TypeExpr>) -> TypeExpr {
    TypeExpr::named("System.Collections.Generic", name, args)
}

fn item() -> TypeExpr {
    TypeExpr::named("Demo.Things", "Item", vec![])
}

fn check(expr: &TypeExpr, fully_qualified: bool, expected: &str) {
    let catalog = TypeCatalog::empty();
    let mut ctx = GenerationContext::new(&catalog);
    let actual = resolve(expr, &settings(fully_qualified), &mut ctx).unwrap();
    assert_eq!(actual, expected, "resolving {expr:?}");
}

#[test]
fn primitives_resolve_to_aliases() {
    let cases = [
        (Primitive::Byte, "byte"),
        (Primitive::SByte, "sbyte"),
        (Primitive::Short, "short"),
        (Primitive::UShort, "ushort"),
        (Primitive::Int, "int"),
        (Primitive::UInt, "uint"),
        (Primitive::Long, "long"),
        (Primitive::ULong, "ulong"),
        (Primitive::Float, "float"),
        (Primitive::Double, "double"),
        (Primitive::Decimal, "decimal"),
        (Primitive::Bool, "bool"),
        (Primitive::Char, "char"),
        (Primitive::Str, "string"),
        (Primitive::Object, "object"),
        (Primitive::Void, "void"),
    ];
    for (primitive, alias) in cases {
        check(&prim(primitive), true, alias);
        check(&prim(primitive), false, alias);
    }
}

#[test]
fn nullable_primitives_append_the_question_mark() {
    check(&nullable(prim(Primitive::Bool)), true, "bool?");
    check(&nullable(prim(Primitive::Int)), false, "int?");
    check(&nullable(prim(Primitive::Decimal)), true, "decimal?");
}

#[test]
fn arrays_render_rank_commas() {
    check(&array(prim(Primitive::Byte), 1), true, "byte[]");
    check(&array(prim(Primitive::Byte), 2), true, "byte[,]");
    check(&array(prim(Primitive::Byte), 3), true, "byte[,,]");
    check(&array(prim(Primitive::Str), 1), false, "string[]");
    // Nullable element types keep their marker inside the brackets.
    check(&array(nullable(prim(Primitive::Int)), 1), true, "int?[]");
}

#[test]
fn containers_resolve_with_typed_arguments() {
    check(
        &generic("List", vec![prim(Primitive::Int)]),
        true,
        "System.Collections.Generic.List<int>",
    );
    check(&generic("List", vec![prim(Primitive::Int)]), false, "List<int>");
    check(
        &generic("List", vec![item()]),
        true,
        "System.Collections.Generic.List<Demo.Things.Item>",
    );
    check(&generic("List", vec![item()]), false, "List<Item>");
    check(
        &generic(
            "Dictionary",
            vec![prim(Primitive::Int), prim(Primitive::Byte)],
        ),
        false,
        "Dictionary<int, byte>",
    );
    check(
        &generic("IReadOnlyList", vec![prim(Primitive::Str)]),
        false,
        "IReadOnlyList<string>",
    );
    check(
        &TypeExpr::named(
            "System.Collections.Concurrent",
            "ConcurrentQueue",
            vec![prim(Primitive::Str)],
        ),
        false,
        "ConcurrentQueue<string>",
    );
}

#[test]
fn unbound_parameters_substitute_their_base_types() {
    // An unconstrained parameter falls back to object.
    check(
        &generic("List", vec![TypeExpr::param("T")]),
        true,
        "System.Collections.Generic.List<object>",
    );
    check(&generic("List", vec![TypeExpr::param("T")]), false, "List<object>");

    let constrained = TypeExpr::Param {
        name: "T".into(),
        base: Some(Box::new(item())),
    };
    check(
        &generic("List", vec![constrained.clone()]),
        true,
        "System.Collections.Generic.List<Demo.Things.Item>",
    );
    check(&generic("List", vec![constrained]), false, "List<Item>");
}

#[test]
fn bare_parameters_resolve_to_their_own_name() {
    check(&TypeExpr::param("T"), true, "T");
    check(&TypeExpr::param("TModel"), false, "TModel");
}

#[test]
fn nested_containers_resolve_recursively() {
    check(
        &generic(
            "Dictionary",
            vec![
                prim(Primitive::Str),
                generic("List", vec![prim(Primitive::Int)]),
            ],
        ),
        true,
        "System.Collections.Generic.Dictionary<string, System.Collections.Generic.List<int>>",
    );
    check(
        &generic(
            "List",
            vec![generic("List", vec![generic("List", vec![prim(Primitive::Int)])])],
        ),
        false,
        "List<List<List<int>>>",
    );
}

#[test]
fn key_value_pairs_resolve_like_containers() {
    check(
        &generic(
            "KeyValuePair",
            vec![prim(Primitive::Str), prim(Primitive::Str)],
        ),
        false,
        "KeyValuePair<string, string>",
    );
    check(
        &generic(
            "KeyValuePair",
            vec![prim(Primitive::Str), prim(Primitive::Str)],
        ),
        true,
        "System.Collections.Generic.KeyValuePair<string, string>",
    );
}

#[test]
fn legacy_list_resolves_by_alias() {
    let legacy = TypeExpr::named("System.Collections", "ArrayList", vec![]);
    check(&legacy, false, "ArrayList");
    check(&legacy, true, "System.Collections.ArrayList");
}

#[test]
fn reference_tuples_keep_their_generic_form() {
    let reference_tuple = TypeExpr::named(
        "System",
        "Tuple",
        vec![prim(Primitive::Byte), prim(Primitive::Short)],
    );
    check(&reference_tuple, false, "Tuple<byte, short>");
    check(&reference_tuple, true, "System.Tuple<byte, short>");
}

#[test]
fn value_tuples_render_in_round_brackets() {
    check(
        &tuple(vec![prim(Primitive::Byte), prim(Primitive::Short)]),
        true,
        "(byte, short)",
    );
    check(
        &tuple(vec![
            prim(Primitive::Byte),
            item(),
            nullable(prim(Primitive::Int)),
        ]),
        false,
        "(byte, Item, int?)",
    );
}

#[test]
fn nullable_value_tuples_append_the_marker_outside() {
    check(
        &nullable(tuple(vec![prim(Primitive::Byte), prim(Primitive::Short)])),
        true,
        "(byte, short)?",
    );
}

#[test]
fn nested_value_tuples_stay_nested_below_the_slot_limit() {
    check(
        &tuple(vec![
            prim(Primitive::Byte),
            tuple(vec![prim(Primitive::Short), prim(Primitive::Int)]),
        ]),
        true,
        "(byte, (short, int))",
    );
}

#[test]
fn eight_slot_value_tuples_flatten_the_remainder() {
    // Modeled the way the host runtime stores them: seven slots plus a
    // synthetic trailing tuple holding the rest.
    let stored = tuple(vec![
        prim(Primitive::Byte),
        prim(Primitive::Short),
        prim(Primitive::Int),
        prim(Primitive::Long),
        prim(Primitive::Float),
        prim(Primitive::Double),
        prim(Primitive::Decimal),
        tuple(vec![prim(Primitive::Bool)]),
    ]);
    check(
        &stored,
        true,
        "(byte, short, int, long, float, double, decimal, bool)",
    );

    // A flat eight-slot model resolves identically.
    let flat = tuple(vec![
        prim(Primitive::Byte),
        prim(Primitive::Short),
        prim(Primitive::Int),
        prim(Primitive::Long),
        prim(Primitive::Float),
        prim(Primitive::Double),
        prim(Primitive::Decimal),
        prim(Primitive::Bool),
    ]);
    check(
        &flat,
        false,
        "(byte, short, int, long, float, double, decimal, bool)",
    );
}

#[test]
fn plain_types_keep_their_name() {
    check(&item(), true, "Demo.Things.Item");
    check(&item(), false, "Item");
}

#[test]
fn custom_named_generic_classes_resolve_through_their_display_name() {
    let catalog = TypeCatalog::from_decls(vec![TypeDecl {
        namespace: "Demo.Things".into(),
        name: "Spike".into(),
        kind: TypeKind::Class,
        generic_params: vec![GenericParam {
            name: "T".into(),
            base: Some(TypeExpr::named("Demo.Things", "Item", vec![])),
            covariant: false,
        }],
        annotation: Some(ClassAnnotation {
            custom_name: Some("Renam3dSpike".into()),
            register: false,
            derived_from: vec![],
        }),
        properties: vec![],
        methods: vec![],
    }]);
    let mut ctx = GenerationContext::new(&catalog);

    let constructed = TypeExpr::named("Demo.Things", "Spike", vec![item()]);
    assert_eq!(
        resolve(&constructed, &settings(false), &mut ctx).unwrap(),
        "Renam3dSpike<Item>"
    );
    assert_eq!(
        resolve(&constructed, &settings(true), &mut ctx).unwrap(),
        "Demo.Things.Renam3dSpike<Demo.Things.Item>"
    );
}

#[test]
fn candidates_resolve_to_their_registered_interface() {
    let catalog = TypeCatalog::from_decls(vec![TypeDecl {
        namespace: "Demo.Logic".into(),
        name: "Cat".into(),
        kind: TypeKind::Class,
        generic_params: vec![],
        annotation: Some(ClassAnnotation::default()),
        properties: vec![],
        methods: vec![],
    }]);
    let mut ctx = GenerationContext::new(&catalog);
    ctx.try_add_pair("Cat", "Demo.Api.ICat");

    let cat = TypeExpr::named("Demo.Logic", "Cat", vec![]);
    assert_eq!(
        resolve(&cat, &settings(true), &mut ctx).unwrap(),
        "Demo.Api.ICat"
    );
}

#[test]
fn doc_style_names_map_back_through_the_alias_table() {
    let simplified = settings(false);
    assert_eq!(alias_from_doc_name("System.Int32", &simplified), "int");
    assert_eq!(alias_from_doc_name(" System.String ", &simplified), "string");
    assert_eq!(
        alias_from_doc_name("System.Nullable{System.Boolean}", &simplified),
        "bool?"
    );
    assert_eq!(alias_from_doc_name("System.Int32[]", &simplified), "int[]");
    assert_eq!(alias_from_doc_name("System.Byte[,,]", &simplified), "byte[,,]");
    assert_eq!(
        alias_from_doc_name("Demo.Things.Item", &simplified),
        "Demo.Things.Item"
    );
    assert_eq!(
        alias_from_doc_name("System.Collections.ArrayList", &simplified),
        "ArrayList"
    );
}
