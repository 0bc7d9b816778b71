//! Projection of actual type arguments and substitution.

mod common;

use common::{declaration, parameterized, raw, registry, unbounded_wildcard};
use jtypes::{
    resolve_actual_type_arguments, substitute, PrimitiveKind, SubstitutionMap, Type,
};
use pretty_assertions::assert_eq;

#[test]
fn resolving_against_the_same_declaration() {
    let registry = registry();
    let list = declaration(&registry, "java.util.List");

    // The raw type resolves to the empty argument list…
    assert_eq!(
        resolve_actual_type_arguments(&registry, &list, &raw(&registry, "java.util.List")).unwrap(),
        Some(Vec::new())
    );

    // …a parameterized invocation to its own arguments.
    let integer = raw(&registry, "java.lang.Integer");
    let list_of_integers = parameterized(&registry, "java.util.List", vec![integer.clone()]);
    assert_eq!(
        resolve_actual_type_arguments(&registry, &list, &list_of_integers).unwrap(),
        Some(vec![integer])
    );
}

#[test]
fn resolving_through_the_hierarchy() {
    let registry = registry();
    let set = declaration(&registry, "java.util.Set");
    let list_of_integers = parameterized(
        &registry,
        "java.util.List",
        vec![raw(&registry, "java.lang.Integer")],
    );

    assert_eq!(
        resolve_actual_type_arguments(&registry, &set, &raw(&registry, "fixture.IntegerListSet"))
            .unwrap(),
        Some(vec![list_of_integers.clone()])
    );
    assert_eq!(
        resolve_actual_type_arguments(
            &registry,
            &set,
            &raw(&registry, "fixture.ImmutableIntegerListSet"),
        )
        .unwrap(),
        Some(vec![list_of_integers])
    );

    // A non-generic target resolves to the empty list.
    let integer_list_set = declaration(&registry, "fixture.IntegerListSet");
    assert_eq!(
        resolve_actual_type_arguments(
            &registry,
            &integer_list_set,
            &raw(&registry, "fixture.ImmutableIntegerListSet"),
        )
        .unwrap(),
        Some(Vec::new())
    );
}

#[test]
fn unrelated_types_yield_no_projection() {
    let registry = registry();

    let immutable = declaration(&registry, "fixture.ImmutableIntegerListSet");
    assert_eq!(
        resolve_actual_type_arguments(&registry, &immutable, &raw(&registry, "fixture.IntegerListSet"))
            .unwrap(),
        None
    );

    let list = declaration(&registry, "java.util.List");
    assert_eq!(
        resolve_actual_type_arguments(&registry, &list, &raw(&registry, "java.util.Collection"))
            .unwrap(),
        None
    );
    assert_eq!(
        resolve_actual_type_arguments(&registry, &list, &Type::primitive(PrimitiveKind::Int))
            .unwrap(),
        None
    );
}

#[test]
fn raw_inheritance_drops_the_arguments() {
    let registry = registry();
    let target = declaration(&registry, "fixture.ExtendsParameterized");

    // RawSubExtendsParameterized inherits from the raw ExtendsParameterized,
    // so nothing is resolvable and the result is the empty list.
    assert_eq!(
        resolve_actual_type_arguments(
            &registry,
            &target,
            &raw(&registry, "fixture.RawSubExtendsParameterized"),
        )
        .unwrap(),
        Some(Vec::new())
    );
}

#[test]
fn raw_sub_type_resolves_like_its_prototypical_type() {
    let registry = registry();
    let target = declaration(&registry, "fixture.ExtendsParameterized");
    let sub = declaration(&registry, "fixture.SubExtendsParameterized");

    let via_raw =
        resolve_actual_type_arguments(&registry, &target, &raw(&registry, "fixture.SubExtendsParameterized"))
            .unwrap();
    let via_prototype =
        resolve_actual_type_arguments(&registry, &target, &sub.as_type()).unwrap();
    assert_eq!(via_raw, via_prototype);

    // The prototypical type's arguments are the parameters' own variables.
    let prototype = sub.prototype();
    assert_eq!(
        prototype.type_arguments()[0],
        sub.type_parameters()[0].as_type()
    );
}

#[test]
fn array_arguments_are_projected_through_the_diamond() {
    let registry = registry();
    let diamond_a = declaration(&registry, "fixture.DiamondA");
    let string = raw(&registry, "java.lang.String");
    let integer = raw(&registry, "java.lang.Integer");
    let integer_array = Type::array(integer.clone());

    // DiamondB<String[]> projects onto DiamondA as (String[][], Integer[]).
    let diamond_b = parameterized(
        &registry,
        "fixture.DiamondB",
        vec![Type::array(string.clone())],
    );
    assert_eq!(
        resolve_actual_type_arguments(&registry, &diamond_a, &diamond_b).unwrap(),
        Some(vec![
            Type::array(Type::array(string.clone())),
            integer_array.clone(),
        ])
    );

    assert_eq!(
        resolve_actual_type_arguments(&registry, &diamond_a, &raw(&registry, "fixture.DiamondD"))
            .unwrap(),
        Some(vec![Type::array(string), integer_array.clone()])
    );

    // The raw SubDiamondB resolves through its prototypical type, leaving its
    // own type variable in the result.
    let sub_diamond_b = declaration(&registry, "fixture.SubDiamondB");
    let expected_variable_argument =
        Type::array(Type::array(sub_diamond_b.type_parameters()[0].as_type()));
    assert_eq!(
        resolve_actual_type_arguments(&registry, &diamond_a, &raw(&registry, "fixture.SubDiamondB"))
            .unwrap(),
        Some(vec![expected_variable_argument, integer_array.clone()])
    );

    assert_eq!(
        resolve_actual_type_arguments(&registry, &diamond_a, &raw(&registry, "fixture.SubSubDiamondB"))
            .unwrap(),
        Some(vec![
            Type::array(Type::array(Type::array(integer))),
            integer_array,
        ])
    );
}

#[test]
fn comparable_is_reached_from_the_raw_scheduled_future_through_delayed() {
    let registry = registry();
    let comparable = declaration(&registry, "java.lang.Comparable");

    // ScheduledFuture<V> extends Delayed, Future<V>; Delayed extends
    // Comparable<Delayed>. The shortest path from the raw ScheduledFuture
    // runs through Delayed and is unaffected by the raw type's parameters.
    assert_eq!(
        resolve_actual_type_arguments(
            &registry,
            &comparable,
            &raw(&registry, "java.util.concurrent.ScheduledFuture"),
        )
        .unwrap(),
        Some(vec![raw(&registry, "java.util.concurrent.Delayed")])
    );
}

#[test]
fn comparable_of_integer_is_integer() {
    let registry = registry();
    let comparable = declaration(&registry, "java.lang.Comparable");
    assert_eq!(
        resolve_actual_type_arguments(&registry, &comparable, &raw(&registry, "java.lang.Integer"))
            .unwrap(),
        Some(vec![raw(&registry, "java.lang.Integer")])
    );
}

#[test]
fn shortest_path_ties_are_resolved_deterministically() {
    let registry = registry();
    let diamond_a = declaration(&registry, "fixture.DiamondA");
    let diamond_d = raw(&registry, "fixture.DiamondD");

    // DiamondD reaches DiamondA through both DiamondB and DiamondC at the same
    // distance; the declaration order of its superinterfaces breaks the tie,
    // so DiamondB's projection wins on every run.
    let first = resolve_actual_type_arguments(&registry, &diamond_a, &diamond_d).unwrap();
    for _ in 0..16 {
        assert_eq!(
            resolve_actual_type_arguments(&registry, &diamond_a, &diamond_d).unwrap(),
            first
        );
    }
}

#[test]
fn substitution_replaces_mapped_parameters_only() {
    let registry = registry();
    let diamond_a = declaration(&registry, "fixture.DiamondA");
    let string = raw(&registry, "java.lang.String");

    let mut map = SubstitutionMap::new();
    map.insert(diamond_a.type_parameters()[0].clone(), string.clone());

    let substituted = substitute(&diamond_a.as_type(), &map).unwrap();
    let expected = parameterized(
        &registry,
        "fixture.DiamondA",
        vec![string.clone(), diamond_a.type_parameters()[1].as_type()],
    );
    assert_eq!(substituted, expected);

    // A wildcard with no variables in its bound passes through unchanged.
    let wildcard = Type::wildcard(Some(string), None).unwrap();
    assert_eq!(substitute(&wildcard, &map).unwrap(), wildcard);
}

#[test]
fn substitution_with_an_empty_map_is_the_identity() {
    let registry = registry();
    let map = SubstitutionMap::new();
    let samples = [
        raw(&registry, "java.lang.Object"),
        parameterized(
            &registry,
            "java.util.List",
            vec![raw(&registry, "java.lang.String")],
        ),
        Type::array(raw(&registry, "java.lang.Number")),
        parameterized(&registry, "java.util.Set", vec![unbounded_wildcard()]),
        Type::primitive(PrimitiveKind::Long),
        Type::Null,
        declaration(&registry, "java.util.List").type_parameters()[0].as_type(),
    ];
    for ty in &samples {
        assert_eq!(&substitute(ty, &map).unwrap(), ty);
    }
}
