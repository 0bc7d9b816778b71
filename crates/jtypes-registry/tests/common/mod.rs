#![allow(dead_code)]

//! Shared fixture universe for the conformance tests.
//!
//! The class hierarchy mirrors the shapes the type algebra has to cope with:
//! simple interface chains, bounded and recursively bounded parameters, a
//! diamond with array-typed arguments, raw inheritance, interdependent
//! recursive bounds, and a generic class nested in another generic class.

use std::sync::Arc;

use jtypes::{Type, TypeDeclaration};
use jtypes_registry::{ClassSpec, DeclarationRegistry, TypeParameterSpec, TypeRef};

/// A registry with the minimal JDK plus the fixture classes below.
pub fn registry() -> DeclarationRegistry {
    DeclarationRegistry::with_minimal_jdk_and(fixture_classes())
}

pub fn declaration(registry: &DeclarationRegistry, name: &str) -> Arc<TypeDeclaration> {
    registry
        .declaration(name)
        .unwrap_or_else(|error| panic!("fixture declaration {name}: {error}"))
}

/// The raw (or non-generic) type of a declaration, as written by its bare
/// name: no enclosing type, no type arguments.
pub fn raw(registry: &DeclarationRegistry, name: &str) -> Type {
    Type::declared(&declaration(registry, name), Vec::new()).unwrap()
}

pub fn parameterized(registry: &DeclarationRegistry, name: &str, arguments: Vec<Type>) -> Type {
    Type::declared(&declaration(registry, name), arguments).unwrap()
}

pub fn unbounded_wildcard() -> Type {
    Type::wildcard(None, None).unwrap()
}

pub fn extends_wildcard(bound: Type) -> Type {
    Type::wildcard(Some(bound), None).unwrap()
}

pub fn super_wildcard(bound: Type) -> Type {
    Type::wildcard(None, Some(bound)).unwrap()
}

fn fixture_classes() -> Vec<ClassSpec> {
    let integer_array = || TypeRef::array(TypeRef::named("java.lang.Integer"));
    let string_array = || TypeRef::array(TypeRef::named("java.lang.String"));
    let list_of = |argument| TypeRef::parameterized("java.util.List", vec![argument]);

    vec![
        ClassSpec::interface("fixture.SimpleA"),
        ClassSpec::interface("fixture.SimpleB").with_interface(TypeRef::named("fixture.SimpleA")),
        ClassSpec::interface("fixture.SimpleC").with_interface(TypeRef::named("fixture.SimpleB")),
        ClassSpec::interface("fixture.SimpleParameterized")
            .with_type_parameter(TypeParameterSpec::new("T"))
            .with_interface(TypeRef::named("java.io.Serializable")),
        ClassSpec::interface("fixture.ExtendsParameterized").with_type_parameter(
            TypeParameterSpec::new("T").with_bound(TypeRef::named("fixture.SimpleC")),
        ),
        ClassSpec::interface("fixture.SubExtendsParameterized")
            .with_type_parameter(
                TypeParameterSpec::new("T").with_bound(TypeRef::named("fixture.SimpleC")),
            )
            .with_interface(TypeRef::parameterized(
                "fixture.ExtendsParameterized",
                vec![TypeRef::variable("T")],
            )),
        // Inherits from the *raw* ExtendsParameterized.
        ClassSpec::interface("fixture.RawSubExtendsParameterized")
            .with_type_parameter(TypeParameterSpec::new("T"))
            .with_interface(TypeRef::named("fixture.ExtendsParameterized")),
        ClassSpec::interface("fixture.DiamondA")
            .with_type_parameter(TypeParameterSpec::new("T"))
            .with_type_parameter(TypeParameterSpec::new("U")),
        ClassSpec::interface("fixture.DiamondB")
            .with_type_parameter(TypeParameterSpec::new("T"))
            .with_interface(TypeRef::parameterized(
                "fixture.DiamondA",
                vec![TypeRef::array(TypeRef::variable("T")), integer_array()],
            )),
        ClassSpec::interface("fixture.DiamondC")
            .with_type_parameter(TypeParameterSpec::new("U"))
            .with_interface(TypeRef::parameterized(
                "fixture.DiamondA",
                vec![string_array(), TypeRef::array(TypeRef::variable("U"))],
            )),
        ClassSpec::interface("fixture.DiamondD")
            .with_interface(TypeRef::parameterized(
                "fixture.DiamondB",
                vec![TypeRef::named("java.lang.String")],
            ))
            .with_interface(TypeRef::parameterized(
                "fixture.DiamondC",
                vec![TypeRef::named("java.lang.Integer")],
            )),
        ClassSpec::interface("fixture.SubDiamondB")
            .with_type_parameter(TypeParameterSpec::new("T"))
            .with_interface(TypeRef::parameterized(
                "fixture.DiamondB",
                vec![TypeRef::array(TypeRef::variable("T"))],
            )),
        ClassSpec::interface("fixture.SubSubDiamondB").with_interface(TypeRef::parameterized(
            "fixture.SubDiamondB",
            vec![integer_array()],
        )),
        ClassSpec::class("fixture.IntegerListSet")
            .with_interface(TypeRef::parameterized(
                "java.util.Set",
                vec![list_of(TypeRef::named("java.lang.Integer"))],
            ))
            .with_interface(TypeRef::parameterized(
                "java.lang.Comparable",
                vec![TypeRef::named("fixture.IntegerListSet")],
            )),
        ClassSpec::class("fixture.ImmutableIntegerListSet")
            .with_superclass(TypeRef::named("fixture.IntegerListSet")),
        ClassSpec::class("fixture.InterdependentRecursiveBoundA")
            .with_type_parameter(TypeParameterSpec::new("T").with_bound(TypeRef::parameterized(
                "fixture.InterdependentRecursiveBoundA",
                vec![TypeRef::variable("T"), TypeRef::variable("U")],
            )))
            .with_type_parameter(TypeParameterSpec::new("U").with_bound(TypeRef::variable("T"))),
        ClassSpec::class("fixture.InterdependentRecursiveBoundB")
            .with_superclass(TypeRef::parameterized(
                "fixture.InterdependentRecursiveBoundA",
                vec![
                    TypeRef::named("fixture.InterdependentRecursiveBoundB"),
                    TypeRef::named("fixture.InterdependentRecursiveBoundB"),
                ],
            ))
            .with_interface(TypeRef::named("java.io.Serializable")),
        ClassSpec::class("fixture.OuterClass").with_type_parameter(
            TypeParameterSpec::new("T").with_bound(TypeRef::named("java.lang.Number")),
        ),
        ClassSpec::class("fixture.OuterClass.InnerClass")
            .nested_in("fixture.OuterClass")
            .with_type_parameter(
                TypeParameterSpec::new("U")
                    .with_bound(list_of(TypeRef::wildcard()))
                    .with_bound(TypeRef::named("java.io.Serializable")),
            ),
        // The scheduled-future corner of java.util.concurrent: Comparable is
        // reached from the raw ScheduledFuture through Delayed.
        ClassSpec::interface("java.util.concurrent.Delayed").with_interface(
            TypeRef::parameterized(
                "java.lang.Comparable",
                vec![TypeRef::named("java.util.concurrent.Delayed")],
            ),
        ),
        ClassSpec::interface("java.util.concurrent.Future")
            .with_type_parameter(TypeParameterSpec::new("V")),
        ClassSpec::interface("java.util.concurrent.ScheduledFuture")
            .with_type_parameter(TypeParameterSpec::new("V"))
            .with_interface(TypeRef::named("java.util.concurrent.Delayed"))
            .with_interface(TypeRef::parameterized(
                "java.util.concurrent.Future",
                vec![TypeRef::variable("V")],
            )),
        // Mutually convertible representations with interlocking bounds.
        ClassSpec::interface("fixture.ConvertibleTo")
            .with_type_parameter(TypeParameterSpec::new("T")),
        ClassSpec::class("fixture.Amount").with_interface(TypeRef::parameterized(
            "fixture.ConvertibleTo",
            vec![TypeRef::named("fixture.Amount")],
        )),
        ClassSpec::interface("fixture.ReprChange")
            .with_type_parameter(TypeParameterSpec::new("T").with_bound(TypeRef::parameterized(
                "fixture.ConvertibleTo",
                vec![TypeRef::variable("S")],
            )))
            .with_type_parameter(TypeParameterSpec::new("S").with_bound(TypeRef::parameterized(
                "fixture.ConvertibleTo",
                vec![TypeRef::variable("T")],
            ))),
    ]
}
