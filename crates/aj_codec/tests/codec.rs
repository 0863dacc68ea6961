use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Weak};

use aj_codec::{Codec, CodecConfig, DateTimeEncoding, DeserializeError, ValidationError};
use aj_reflect::derive::Record;
use aj_reflect::dynamic::{Dynamic, DynamicAttributes};
use aj_reflect::info::TypeHint;
use aj_reflect::ops::Record;
use aj_reflect::registry::{ConstructError, DuplicateTypeRegistrationError, Groups};
use aj_reflect::registry::{RegisterError, TypeMetadata, TypeReportRegistryArc};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Record, Default, Debug, PartialEq)]
#[aj(alias = "car")]
struct Car {
    id: u32,
    #[aj(groups("basic", "detailed"))]
    max_speed: u32,
    #[aj(groups("detailed"))]
    brand: String,
}

#[derive(Record, Default, Debug, PartialEq)]
struct Parent {
    #[aj(name = "aa")]
    a: i32,
}

#[derive(Record, Default, Debug, PartialEq)]
#[aj(extends(Parent))]
struct Child {
    #[aj(name = "aaa")]
    a: i32,
    b: i32,
}

#[derive(Record, Default)]
struct Node {
    me: Weak<Node>,
}

#[derive(Record, Default, Debug)]
struct Event {
    #[aj(required)]
    name: Option<String>,
    #[aj(d_format = "%Y/%m/%d")]
    day: Option<NaiveDateTime>,
}

#[derive(Record, Default, Debug)]
struct Account {
    #[aj(required)]
    login: String,
    #[aj(required)]
    age: u32,
}

#[derive(Record, Default)]
struct Money {
    cents: i64,
}

#[derive(Record, Default)]
struct Wallet {
    main: Money,
    history: Vec<Money>,
    by_name: BTreeMap<String, Money>,
}

#[derive(Record, Debug)]
#[aj(constructor = Counter::construct)]
struct Counter {
    start: i64,
    label: String,
}

impl Counter {
    fn construct(args: &[Dynamic]) -> Result<Box<dyn Record>, ConstructError> {
        let start = args
            .first()
            .and_then(Dynamic::as_i64)
            .ok_or_else(|| ConstructError::Failed {
                type_path: "Counter",
                reason: "a start value is needed".into(),
            })?;
        Ok(Box::new(Counter {
            start,
            label: String::new(),
        }))
    }
}

#[derive(Record, Default)]
struct Open {
    id: u32,
    #[aj(dynamic)]
    extra: DynamicAttributes,
}

#[derive(Record, Default, Debug)]
struct Loose {
    value: Dynamic,
}

#[derive(Record, Default, Debug)]
struct Unlisted {
    visible: u8,
    _hidden: u8,
}

#[derive(Record, Default, Debug, PartialEq)]
struct Stamp {
    at: NaiveDateTime,
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

// -----------------------------------------------------------------------------
// Serialization

#[test]
fn primitives_round_trip() {
    let codec = Codec::new();

    macro_rules! round_trip {
        ($($value:expr => $ty:ty),* $(,)?) => {$(
            let value: $ty = $value;
            let text = codec.serialize(&value, None);
            assert_eq!(codec.deserialize::<$ty>(&text).unwrap(), value, "{text}");
        )*};
    }

    round_trip!(
        -5 => i32,
        u64::MAX => u64,
        1.5 => f64,
        true => bool,
        'x' => char,
        String::from("2000-01-01T00:00:00") => String,
        vec![1, 2, 3] => Vec<i16>,
        Some(4) => Option<u8>,
        None => Option<u8>,
        (7, String::from("seven")) => (u8, String),
        BTreeMap::from([(String::from("a"), 1)]) => BTreeMap<String, i32>,
        HashMap::from([(3, true)]) => HashMap<u32, bool>,
        datetime(2021, 6, 7, 8, 9, 10) => NaiveDateTime,
    );
}

#[test]
fn groups_filter_attributes() {
    let codec = Codec::new();
    codec.register::<Car>().unwrap();
    let car = Car {
        id: 1,
        max_speed: 140,
        brand: "ford".into(),
    };

    let basic = Groups::from_iter(["basic"]);
    assert_eq!(
        codec.to_tree(&car, Some(&basic)),
        json!({"id": 1, "max_speed": 140})
    );

    let detailed = Groups::from_iter(["detailed"]);
    assert_eq!(
        codec.to_tree(&car, Some(&detailed)),
        json!({"id": 1, "max_speed": 140, "brand": "ford"})
    );

    assert_eq!(codec.to_tree(&car, Some(&Groups::new())), json!({"id": 1}));
    assert_eq!(
        codec.to_tree(&car, None),
        json!({"id": 1, "max_speed": 140, "brand": "ford"})
    );
}

#[test]
fn cycles_are_truncated_at_max_depth() {
    let node = Arc::new_cyclic(|me| Node { me: me.clone() });

    for max_depth in [2, 5, CodecConfig::DEFAULT_MAX_DEPTH] {
        let codec = Codec::with_config(CodecConfig::new().with_max_depth(max_depth));
        codec.register::<Node>().unwrap();

        let tree = codec.to_tree(&*node, None);
        let mut current = &tree;
        for _ in 0..max_depth {
            assert!(current.is_object(), "truncated too early at {max_depth}");
            current = &current["me"];
        }
        assert_eq!(current, &json!(aj_codec::DEPTH_SENTINEL));
    }

    // the default codec stops at 15 as well
    let tree = Codec::new().to_tree(&*node, None);
    let mut current = &tree;
    for _ in 0..15 {
        current = &current["me"];
    }
    assert_eq!(current, &json!("..."));
}

#[test]
fn datetime_format_round_trip() {
    let codec = Codec::new();
    codec.register::<Event>().unwrap();

    let event = Event {
        name: Some("launch".into()),
        day: Some(datetime(2000, 2, 1, 5, 30, 0)),
    };
    let tree = codec.to_tree(&event, None);
    assert_eq!(tree, json!({"name": "launch", "day": "2000/02/01"}));

    let back: Event = codec.from_tree(tree).unwrap();
    let day = back.day.unwrap();
    assert_eq!(day.date(), NaiveDate::from_ymd_opt(2000, 2, 1).unwrap());
    assert_eq!(day, datetime(2000, 2, 1, 0, 0, 0));
}

#[test]
fn child_wire_names_do_not_leak_into_parent() {
    let codec = Codec::new();
    codec.register::<Child>().unwrap();
    assert!(codec.registry().read().contains_type::<Parent>());

    assert_eq!(
        codec.to_tree(&Child { a: 1, b: 2 }, None),
        json!({"aaa": 1, "b": 2})
    );
    assert_eq!(codec.to_tree(&Parent { a: 1 }, None), json!({"aa": 1}));

    let child: Child = codec.from_tree(json!({"aaa": 5, "b": 6})).unwrap();
    assert_eq!(child, Child { a: 5, b: 6 });
    let parent: Parent = codec.from_tree(json!({"aa": 5})).unwrap();
    assert_eq!(parent, Parent { a: 5 });

    // the parent's key has no field on the child
    let child: Child = codec.from_tree(json!({"aa": 5})).unwrap();
    assert_eq!(child, Child::default());
}

#[test]
fn handlers_intercept_nested_values() {
    let codec = Codec::new();
    codec.register::<Wallet>().unwrap();
    codec.add_serialize_handler(|money: &Money, _, _| {
        Dynamic::from(format!("${}.{:02}", money.cents / 100, money.cents % 100))
    });

    let wallet = Wallet {
        main: Money { cents: 150 },
        history: vec![Money { cents: 5 }],
        by_name: BTreeMap::from([(String::from("x"), Money { cents: 200 })]),
    };
    assert_eq!(
        codec.to_tree(&wallet, None),
        json!({"main": "$1.50", "history": ["$0.05"], "by_name": {"x": "$2.00"}})
    );

    assert!(codec.remove_serialize_handler::<Money>());
    assert!(!codec.remove_serialize_handler::<Money>());
    assert_eq!(codec.to_tree(&wallet, None)["main"], json!({"cents": 150}));
}

#[test]
fn handlers_see_the_attribute_report() {
    let codec = Codec::new();
    codec.register::<Car>().unwrap();
    codec.add_serialize_handler(|_: &String, _, report| {
        Dynamic::from(report.map(|r| r.wire_name().to_owned()))
    });
    let car = Car::default();
    assert_eq!(codec.to_tree(&car, None)["brand"], json!("brand"));
    assert_eq!(codec.to_tree(&String::new(), None), json!(null));
}

#[test]
fn handlers_may_register_types() {
    let registry = TypeReportRegistryArc::default();
    let codec = Codec::with_registry(registry.clone(), CodecConfig::new());
    codec.register::<Wallet>().unwrap();

    let shared = registry.clone();
    codec.add_serialize_handler(move |money: &Money, _, _| {
        shared.write().register::<Car>().unwrap();
        Dynamic::from(money.cents)
    });

    let wallet = Wallet {
        main: Money { cents: 7 },
        ..Wallet::default()
    };
    assert_eq!(
        codec.to_tree(&wallet, None),
        json!({"main": 7, "history": [], "by_name": {}})
    );
    assert!(registry.read().contains_type::<Car>());
}

#[test]
fn legacy_datetime_mode() {
    let codec =
        Codec::with_config(CodecConfig::new().with_datetime_encoding(DateTimeEncoding::EpochMillis));
    codec.register::<Stamp>().unwrap();

    let stamp = Stamp {
        at: datetime(2001, 9, 9, 1, 46, 40),
    };
    let tree = codec.to_tree(&stamp, None);
    assert_eq!(tree, json!({"at": {"__date_time__": 1_000_000_000_000_i64}}));
    assert_eq!(codec.from_tree::<Stamp>(tree.clone()).unwrap(), stamp);

    let generic = codec.from_tree_dynamic(tree).unwrap();
    assert_eq!(generic.get("at"), Some(&Dynamic::DateTime(stamp.at)));
}

// -----------------------------------------------------------------------------
// Deserialization

#[test]
fn required_attributes() {
    let codec = Codec::new();
    codec.register::<Event>().unwrap();

    for tree in [json!({}), json!({"name": null})] {
        let err = codec.from_tree::<Event>(tree).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::Validation(ValidationError::EmptyRequiredAttribute(ref e))
                if e.attribute == "name"
        ));
    }

    let event: Event = codec.from_tree(json!({"name": "ok"})).unwrap();
    assert_eq!(event.name.as_deref(), Some("ok"));
}

#[test]
fn required_attributes_ignore_field_defaults() {
    let codec = Codec::new();
    codec.register::<Account>().unwrap();

    let missing = |err: DeserializeError, name: &str| {
        matches!(
            err,
            DeserializeError::Validation(ValidationError::EmptyRequiredAttribute(ref e))
                if e.attribute == name
        )
    };

    let err = codec.from_tree::<Account>(json!({})).unwrap_err();
    assert!(missing(err, "login"));

    let err = codec.from_tree::<Account>(json!({"login": "ann"})).unwrap_err();
    assert!(missing(err, "age"));

    let err = codec
        .from_tree::<Account>(json!({"login": null, "age": 3}))
        .unwrap_err();
    assert!(missing(err, "login"));

    // empty text and zero are values
    let account: Account = codec.from_tree(json!({"login": "", "age": 0})).unwrap();
    assert_eq!((account.login.as_str(), account.age), ("", 0));
}

#[test]
fn ambiguous_keys_are_rejected() {
    let codec = Codec::new();
    codec.register::<Child>().unwrap();
    let err = codec.from_tree::<Child>(json!({"a": 1})).unwrap_err();
    assert!(matches!(
        err,
        DeserializeError::AmbiguousAttributeName(ref e) if e.key == "a" && e.attribute == "a"
    ));
}

#[test]
fn unregistered_records() {
    let codec = Codec::new();
    let value = Unlisted {
        visible: 1,
        _hidden: 2,
    };
    assert_eq!(codec.to_tree(&value, None), json!({"visible": 1}));

    let err = codec.from_tree::<Unlisted>(json!({"visible": 1})).unwrap_err();
    assert!(matches!(err, DeserializeError::UnregisteredType { .. }));
}

#[test]
fn assignment_type_mismatch() {
    let codec = Codec::new();
    codec.register::<Car>().unwrap();
    let err = codec.from_tree::<Car>(json!({"id": "one"})).unwrap_err();
    assert!(matches!(
        err,
        DeserializeError::Validation(ValidationError::TypeMismatch(ref e))
            if e.attribute.as_deref() == Some("id")
    ));

    let err = codec.from_tree::<Car>(json!({"id": -1})).unwrap_err();
    assert!(matches!(err, DeserializeError::Validation(ValidationError::TypeMismatch(_))));
}

#[test]
fn declared_type_is_validated() {
    let codec = Codec::new();
    codec
        .register_type(
            TypeMetadata::of::<Loose>()
                .hint("value", TypeHint::Int)
                .default_constructor::<Loose>(),
        )
        .unwrap();

    let loose: Loose = codec.from_tree(json!({"value": 3})).unwrap();
    assert_eq!(loose.value, Dynamic::Int(3));

    let err = codec.from_tree::<Loose>(json!({"value": "three"})).unwrap_err();
    assert!(matches!(
        err,
        DeserializeError::Validation(ValidationError::TypeMismatch(_))
    ));
}

#[test]
fn constructor_arguments() {
    let codec = Codec::new();
    codec.register::<Counter>().unwrap();

    let counter: Counter = codec
        .from_tree_with(json!({"label": "clicks"}), &[Dynamic::Int(7)])
        .unwrap();
    assert_eq!((counter.start, counter.label.as_str()), (7, "clicks"));

    let err = codec.from_tree::<Counter>(json!({})).unwrap_err();
    assert!(matches!(
        err,
        DeserializeError::Construct(ConstructError::Failed { .. })
    ));
}

#[test]
fn unknown_keys_land_in_dynamic_attributes() {
    let codec = Codec::new();
    codec.register::<Open>().unwrap();

    let text = r#"{"id":1,"color":"red","sizes":[1,2]}"#;
    let open: Open = codec.deserialize(text).unwrap();
    assert_eq!(open.id, 1);
    assert_eq!(open.extra.get("color"), Some(&Dynamic::from("red")));
    assert_eq!(open.extra.len(), 2);

    assert_eq!(codec.serialize(&open, None), text);
}

#[test]
fn alias_lookup_and_arrays() {
    let codec = Codec::new();
    codec.register::<Car>().unwrap();

    let tree: Value = json!([{"id": 1}, {"id": 2, "brand": "jeep"}]);
    let cars = codec.from_tree_as(tree, "car", &[]).unwrap();
    let cars = cars.as_slice().unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[1].downcast_record_ref::<Car>().unwrap().brand, "jeep");

    let err = codec.deserialize_as("{}", "truck", &[]).unwrap_err();
    assert!(matches!(err, DeserializeError::UnknownAlias(ref alias) if alias == "truck"));

    let err = codec.deserialize::<Car>("{").unwrap_err();
    assert!(matches!(err, DeserializeError::Json(_)));
}

// -----------------------------------------------------------------------------
// Registration

#[test]
fn registration_errors() {
    struct Truck;

    let codec = Codec::new();
    codec.register::<Car>().unwrap();

    let err = codec
        .register_type(TypeMetadata::of::<Truck>().alias("car"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegisterError::DuplicateTypeRegistration(DuplicateTypeRegistrationError::Alias { .. })
    ));

    let err = codec
        .register_type(TypeMetadata::of::<Truck>().attribute("wheels", [("groups", "four")]))
        .unwrap_err();
    assert!(matches!(err, RegisterError::AnnotationParse(ref e) if e.option == "groups"));

    codec.clear_registry();
    assert!(codec.registry().read().is_empty());
}
