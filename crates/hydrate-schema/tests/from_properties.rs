//! Integration tests: construct typed targets from property mappings.
//!
//! `Sample` declares one property of every annotation kind; `NullableItems`
//! declares a single `stdClass[]|null` property. The property-based tests
//! at the end check that disabling a flag never rejects more input and
//! that construction is repeatable.

use hydrate_core::{properties, Callable, Instance, Object, Options, Properties, Value};
use hydrate_schema::{construct, Hydrate, HydrateError, Schema};
use proptest::prelude::*;

#[derive(Debug, Default)]
struct Sample {
    flag: bool,
    count: i64,
    ratio: f64,
    label: String,
    list: Vec<Value>,
    typed_list: Vec<Object>,
    object: Option<Instance>,
    callback: Option<Callable>,
    iterable: Value,
}

impl Hydrate for Sample {
    fn schema() -> Schema<Self> {
        Schema::builder("Tests\\Sample")
            .field("bool", "bool", |s: &mut Sample, v: bool| s.flag = v)
            .field("int", "int", |s: &mut Sample, v: i64| s.count = v)
            .field("float", "float", |s: &mut Sample, v: f64| s.ratio = v)
            .field("string", "string", |s: &mut Sample, v: String| s.label = v)
            .field("array", "array", |s: &mut Sample, v: Vec<Value>| s.list = v)
            .field("typedArray", "stdClass[]", |s: &mut Sample, v: Vec<Object>| {
                s.typed_list = v
            })
            .field("object", "object", |s: &mut Sample, v: Option<Instance>| s.object = v)
            .field("callable", "callable", |s: &mut Sample, v: Option<Callable>| {
                s.callback = v
            })
            .field("iterable", "iterable", |s: &mut Sample, v: Value| s.iterable = v)
            .build()
    }
}

#[derive(Debug, Default)]
struct NullableItems {
    items: Option<Vec<Object>>,
}

impl Hydrate for NullableItems {
    fn schema() -> Schema<Self> {
        Schema::builder("Tests\\NullableItems")
            .field(
                "typedArrayOrNull",
                "stdClass[]|null",
                |n: &mut NullableItems, v: Option<Vec<Object>>| n.items = v,
            )
            .build()
    }
}

fn complete_sample() -> Properties {
    properties! {
        "bool" => true,
        "int" => 2_i64,
        "float" => 3.5,
        "string" => "example string",
        "array" => vec!["example array"],
        "typedArray" => vec![Object::std_class(), Object::std_class()],
        "object" => Object::std_class(),
        "callable" => Callable::new(|_| Value::Null),
        "iterable" => Object::array_object(Vec::new()),
    }
}

#[test]
fn test_correct_properties_create_instance() {
    let sample = Sample::from_properties(complete_sample()).unwrap();
    assert!(sample.flag);
    assert_eq!(sample.count, 2);
    assert_eq!(sample.ratio, 3.5);
    assert_eq!(sample.label, "example string");
    assert_eq!(sample.list, vec![Value::from("example array")]);
    assert_eq!(sample.typed_list.len(), 2);
    assert!(sample.object.is_some());
    assert!(sample.callback.is_some());
    assert!(sample.iterable.is_iterable());
}

#[test]
fn test_object_property_accepts_closure() {
    let mut input = complete_sample();
    input.insert("object", Callable::new(|_| Value::Null));
    let sample = Sample::from_properties(input).unwrap();
    assert!(sample.object.as_ref().is_some_and(|o| o.is_instance_of("Closure")));
}

#[test]
fn test_typed_array_accepts_traversable_object() {
    let mut input = complete_sample();
    input.insert("typedArray", Object::array_object(vec![Value::from(Object::std_class())]));
    let sample = Sample::from_properties(input).unwrap();
    assert_eq!(sample.typed_list.len(), 1);
}

#[test]
fn test_multi_type_property_accepts_each_member() {
    let empty = NullableItems::from_properties(properties! {
        "typedArrayOrNull" => Value::Array(Vec::new())
    })
    .unwrap();
    assert_eq!(empty.items, Some(Vec::new()));

    let null = NullableItems::from_properties(properties! {
        "typedArrayOrNull" => Value::Null
    })
    .unwrap();
    assert_eq!(null.items, None);
}

#[test]
fn test_redundant_properties_ignored_without_redundant_check() {
    let mut input = complete_sample();
    input.insert("redundant_1", "redundant");
    input.insert("redundant_2", "redundant");
    let sample =
        Sample::from_properties_with(input, Options::DEFAULT & !Options::VALIDATE_REDUNDANT).unwrap();
    assert_eq!(sample.count, 2);
}

#[test]
fn test_empty_input_without_missing_check() {
    let items = NullableItems::from_properties_with(
        Properties::new(),
        Options::DEFAULT & !Options::VALIDATE_MISSING,
    )
    .unwrap();
    assert_eq!(items.items, None);
}

#[test]
fn test_missing_properties_are_reported() {
    let err = Sample::from_properties(properties! {
        "bool" => true,
        "int" => 2_i64,
        "float" => 3.5,
        "string" => "example string",
    })
    .unwrap_err();
    assert!(err.is_invalid_argument());
    let message = err.to_string();
    assert!(message.starts_with("Errors encountered when constructing Tests\\Sample"));
    assert!(message.contains("Missing properties: array, typedArray, object, callable, iterable"));
    assert!(!message.contains("Redundant"));
}

#[test]
fn test_redundant_properties_are_reported() {
    let mut input = complete_sample();
    input.insert("redundant_1", "redundant");
    input.insert("redundant_2", "redundant");
    let err = Sample::from_properties(input).unwrap_err();
    assert!(err
        .to_string()
        .contains("Redundant properties: redundant_1, redundant_2"));
}

#[test]
fn test_invalid_properties_are_aggregated() {
    let err = Sample::from_properties_with(
        properties! {
            "typedArray" => Value::Array(vec![
                Value::from(Object::std_class()),
                Value::from("example"),
                Value::Int(1),
            ]),
            "callable" => 1_i64,
        },
        Options::VALIDATE_TYPES,
    )
    .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Invalid properties:"));
    assert!(message.contains("typedArray must be of the type stdClass[], [string, integer] given"));
    assert!(message.contains("callable must be of the type callable, integer given"));
    match err {
        HydrateError::InvalidTypes { violations, .. } => assert_eq!(violations.len(), 2),
        other => panic!("expected type violations, got {other:?}"),
    }
}

#[test]
fn test_existence_failure_hides_type_failures() {
    let mut input = complete_sample();
    input.insert("int", "not an int");
    input.remove("bool");
    let err = Sample::from_properties(input).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Missing properties: bool"));
    assert!(!message.contains("Invalid properties"));
}

#[test]
fn test_json_input() {
    let input = Properties::try_from(serde_json::json!({
        "typedArrayOrNull": [{"id": 1}, {"id": 2}]
    }))
    .unwrap();
    let items = NullableItems::from_properties(input).unwrap();
    let items = items.items.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].property("id"), Some(&Value::Int(2)));
}

#[test]
fn test_json_redundant_keys_keep_document_order() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"z":1,"typedArrayOrNull":null,"m":2,"a":3}"#).unwrap();
    let input = Properties::try_from(json).unwrap();
    let err = NullableItems::from_properties(input).unwrap_err();
    assert!(err.to_string().ends_with("Redundant properties: z, m, a"));
}

// -- Property-based tests -----------------------------------------------------

#[derive(Debug, Default, Clone, PartialEq)]
struct Loose {
    a: Value,
    b: Value,
    c: Value,
}

impl Hydrate for Loose {
    fn schema() -> Schema<Self> {
        Schema::builder("Tests\\Loose")
            .field("a", "int|float", |l: &mut Loose, v: Value| l.a = v)
            .field("b", "string[]|null", |l: &mut Loose, v: Value| l.b = v)
            .field("c", "mixed", |l: &mut Loose, v: Value| l.c = v)
            .build()
    }
}

fn any_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        "[a-z]{0,6}".prop_map(Value::String),
        Just(Value::from(Object::std_class())),
    ];
    leaf.prop_recursive(2, 8, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Value::Array)
    })
}

fn any_input() -> impl Strategy<Value = Properties> {
    let key = prop_oneof![Just("a"), Just("b"), Just("c"), Just("x"), Just("y")];
    prop::collection::vec((key, any_value()), 0..6).prop_map(|entries| entries.into_iter().collect())
}

fn any_options() -> impl Strategy<Value = Options> {
    (0u32..8).prop_map(Options::from_bits)
}

proptest! {
    /// Clearing any flag from a passing option set keeps the input passing.
    #[test]
    fn disabling_a_flag_never_rejects_more(input in any_input(), options in any_options()) {
        if construct::<Loose>(input.clone(), options).is_ok() {
            for flag in [Options::VALIDATE_MISSING, Options::VALIDATE_REDUNDANT, Options::VALIDATE_TYPES] {
                let relaxed = options.without(flag);
                prop_assert!(
                    construct::<Loose>(input.clone(), relaxed).is_ok(),
                    "{relaxed} rejected input accepted by {options}"
                );
            }
        }
    }

    /// Construction is a pure function of its inputs.
    #[test]
    fn construction_is_repeatable(input in any_input(), options in any_options()) {
        let first = construct::<Loose>(input.clone(), options);
        let second = construct::<Loose>(input, options);
        prop_assert_eq!(first, second);
    }

    /// Undefined option bits change nothing.
    #[test]
    fn undefined_bits_are_ignored(input in any_input(), bits in 0u32..8, noise in 1u32..1024) {
        let plain = construct::<Loose>(input.clone(), Options::from_bits(bits));
        let noisy = construct::<Loose>(input, Options::from_bits(bits | (noise << 3)));
        prop_assert_eq!(plain, noisy);
    }
}
