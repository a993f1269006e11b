//! End-to-end case tables modelled on two classic `match` statements: a
//! nested-record dispatcher with guards, and a general data analyzer that
//! mixes literals, sequences, mappings, records, or-patterns and `as`.
//!
//! Each test builds the table once, then checks which case every sample
//! subject selects and what it binds.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kase_eval::{
    select, try_select, Bindings, Case, CaseTable, Name, Pattern, SelectResult, Star, Value,
    ValueKind,
};
use pretty_assertions::assert_eq;

fn cap(name: &str) -> Pattern {
    Pattern::capture(name).unwrap()
}

fn lit(value: impl Into<Value>) -> Pattern {
    Pattern::literal(value)
}

fn map(required: Vec<(&str, Pattern)>, rest: Option<&str>) -> Pattern {
    Pattern::mapping(required, rest.map(Name::from)).unwrap()
}

fn ints(values: &[i64]) -> Value {
    Value::sequence(values.iter().copied().map(Value::int).collect())
}

fn strs(values: &[&str]) -> Value {
    Value::sequence(values.iter().copied().map(Value::string).collect())
}

fn point(x: i64, y: i64) -> Value {
    Value::record("Point", [("x", Value::int(x)), ("y", Value::int(y))])
}

#[allow(clippy::cast_precision_loss, reason = "sample numbers are small")]
fn number(bindings: &Bindings, name: &str) -> Result<f64, String> {
    let value = bindings.get(name).expect("guard reads a bound name");
    match value {
        Value::Scalar(kase_eval::Scalar::Int(n)) => Ok(*n as f64),
        Value::Scalar(kase_eval::Scalar::Float(f)) => Ok(*f),
        other => Err(format!(
            "'<' not supported between instances of '{}' and 'int'",
            other.type_name()
        )),
    }
}

// -- Nested dispatcher --

#[derive(Debug, Clone, Copy)]
enum DispatchGuard {
    Adult,
    Minor,
    MiddleNotEmpty,
    Diagonal,
    RestNotEmpty,
}

fn dispatch_table() -> CaseTable<DispatchGuard> {
    let user = || {
        let entry = map(
            vec![
                ("name", Pattern::typed_capture(ValueKind::Str, "name").unwrap()),
                ("age", Pattern::typed_capture(ValueKind::Int, "age").unwrap()),
            ],
            None,
        );
        map(
            vec![("users", Pattern::exact_sequence(vec![entry]).unwrap())],
            None,
        )
    };
    let status = Pattern::or(vec![lit("active"), lit("pending"), lit("processing")]).unwrap();
    let items = Pattern::sequence(
        vec![cap("first")],
        Some(Star::bind("middle").unwrap()),
        vec![cap("last")],
    )
    .unwrap();

    CaseTable::new(vec![
        Case::guarded(user(), DispatchGuard::Adult),
        Case::guarded(user(), DispatchGuard::Minor),
        Case::unguarded(map(vec![("status", status)], None)),
        Case::guarded(map(vec![("items", items)], None), DispatchGuard::MiddleNotEmpty),
        Case::unguarded(Pattern::record("Point", [("x", lit(0_i64)), ("y", lit(0_i64))]).unwrap()),
        Case::guarded(
            Pattern::record("Point", [("x", cap("x")), ("y", cap("y"))]).unwrap(),
            DispatchGuard::Diagonal,
        ),
        Case::guarded(
            map(vec![("required", cap("value"))], Some("rest")),
            DispatchGuard::RestNotEmpty,
        ),
        Case::unguarded(Pattern::wildcard()),
    ])
    .unwrap()
}

fn dispatch_guard(guard: &DispatchGuard, b: &Bindings) -> bool {
    match guard {
        DispatchGuard::Adult => b.get("age").and_then(Value::as_int).is_some_and(|a| a >= 18),
        DispatchGuard::Minor => b.get("age").and_then(Value::as_int).is_some_and(|a| a < 18),
        DispatchGuard::MiddleNotEmpty => b
            .get("middle")
            .and_then(Value::as_sequence)
            .is_some_and(|m| !m.is_empty()),
        DispatchGuard::Diagonal => b.get("x") == b.get("y"),
        DispatchGuard::RestNotEmpty => b
            .get("rest")
            .and_then(Value::as_mapping)
            .is_some_and(|r| !r.is_empty()),
    }
}

fn dispatch(value: &Value) -> SelectResult {
    select(dispatch_table().cases(), value, dispatch_guard)
}

fn user(name: &str, age: i64) -> Value {
    Value::mapping([(
        "users",
        Value::sequence(vec![Value::mapping([
            ("name", Value::string(name)),
            ("age", Value::int(age)),
        ])]),
    )])
}

#[test]
fn dispatcher_sample_inputs() {
    let samples = [
        (user("Alice", 25), 0),
        (user("Bob", 16), 1),
        (Value::mapping([("status", Value::string("active"))]), 2),
        (Value::mapping([("items", ints(&[1, 2, 3, 4, 5]))]), 3),
        (point(0, 0), 4),
        (point(3, 3), 5),
        (
            Value::mapping([
                ("required", Value::string("value")),
                ("optional1", Value::string("a")),
                ("optional2", Value::string("b")),
            ]),
            6,
        ),
        (Value::string("unmatched"), 7),
    ];
    for (value, expected) in &samples {
        assert_eq!(dispatch(value).index(), Some(*expected), "subject {value}");
    }
}

#[test]
fn dispatcher_bindings() {
    let adult = dispatch(&user("Alice", 25));
    let b = adult.bindings().unwrap();
    assert_eq!(b.get("name").and_then(Value::as_str), Some("Alice"));
    assert_eq!(b.get("age"), Some(&Value::int(25)));

    let items = dispatch(&Value::mapping([("items", ints(&[1, 2, 3, 4, 5]))]));
    let b = items.bindings().unwrap();
    assert_eq!(b.get("first"), Some(&Value::int(1)));
    assert_eq!(b.get("middle"), Some(&ints(&[2, 3, 4])));
    assert_eq!(b.get("last"), Some(&Value::int(5)));

    let required = dispatch(&Value::mapping([
        ("required", Value::string("value")),
        ("optional1", Value::string("a")),
    ]));
    let rest = required.bindings().and_then(|b| b.get("rest")).unwrap();
    assert_eq!(rest.to_string(), "{'optional1': 'a'}");
}

#[test]
fn dispatcher_fallthrough_on_guards() {
    // Empty middle rejects the items case; no other case wants a mapping
    // without "required", so the wildcard takes it.
    assert_eq!(dispatch(&Value::mapping([("items", ints(&[1, 2]))])).index(), Some(7));
    // Off-diagonal point.
    assert_eq!(dispatch(&point(1, 2)).index(), Some(7));
    // Empty rest.
    let only_required = Value::mapping([("required", Value::int(1))]);
    assert_eq!(dispatch(&only_required).index(), Some(7));
    // Age of the wrong kind never reaches the guards.
    let bad_age = Value::mapping([(
        "users",
        Value::sequence(vec![Value::mapping([
            ("name", Value::string("Eve")),
            ("age", Value::float(30.0)),
        ])]),
    )]);
    assert_eq!(dispatch(&bad_age).index(), Some(7));
}

// -- Data analyzer --

#[derive(Debug, Clone, Copy)]
enum AnalyzeGuard {
    Negative,
    Over100,
}

fn analyze_table() -> CaseTable<AnalyzeGuard> {
    let one = |p: Pattern| Pattern::exact_sequence(vec![p]).unwrap();
    CaseTable::new(vec![
        Case::unguarded(lit(0_i64)),
        Case::guarded(cap("x"), AnalyzeGuard::Negative),
        Case::unguarded(Pattern::exact_sequence(vec![]).unwrap()),
        Case::unguarded(one(cap("x"))),
        Case::unguarded(Pattern::exact_sequence(vec![cap("x"), cap("y")]).unwrap()),
        Case::unguarded(
            Pattern::sequence(vec![cap("x")], Some(Star::bind("rest").unwrap()), vec![]).unwrap(),
        ),
        Case::unguarded(map(
            vec![
                ("type", lit("user")),
                ("name", Pattern::typed_capture(ValueKind::Str, "name").unwrap()),
            ],
            None,
        )),
        Case::unguarded(map(
            vec![
                ("type", lit("admin")),
                (
                    "permissions",
                    Pattern::typed_capture(ValueKind::Sequence, "perms").unwrap(),
                ),
            ],
            None,
        )),
        Case::guarded(
            Pattern::record("Builder", [("value", cap("v"))]).unwrap(),
            AnalyzeGuard::Over100,
        ),
        Case::unguarded(Pattern::record("Builder", [("value", cap("v"))]).unwrap()),
        Case::unguarded(Pattern::or(vec![lit("start"), lit("begin"), lit("init")]).unwrap()),
        Case::unguarded(
            Pattern::capture_as(
                map(
                    vec![(
                        "data",
                        Pattern::typed_capture(ValueKind::Sequence, "items").unwrap(),
                    )],
                    None,
                ),
                "full_dict",
            )
            .unwrap(),
        ),
        Case::unguarded(Pattern::wildcard()),
    ])
    .unwrap()
}

/// Strict guards: comparing a non-number fails, as an ordering comparison
/// between a list and an int would.
fn analyze_guard(guard: &AnalyzeGuard, b: &Bindings) -> Result<bool, String> {
    Ok(match guard {
        AnalyzeGuard::Negative => number(b, "x")? < 0.0,
        AnalyzeGuard::Over100 => number(b, "v")? > 100.0,
    })
}

fn analyze_samples() -> Vec<Value> {
    vec![
        Value::int(42),
        Value::int(-5),
        ints(&[]),
        ints(&[1]),
        ints(&[1, 2]),
        ints(&[1, 2, 3, 4]),
        Value::mapping([("type", Value::string("user")), ("name", Value::string("Alice"))]),
        Value::mapping([
            ("type", Value::string("admin")),
            ("permissions", strs(&["read", "write"])),
        ]),
        Value::record("Builder", [("value", Value::int(150))]),
        Value::string("start"),
        Value::mapping([("data", ints(&[1, 2, 3])), ("meta", Value::string("info"))]),
    ]
}

#[test]
fn analyzer_numbers_select_directly() {
    let table = analyze_table();
    let pick = |v: Value| try_select(table.cases(), &v, analyze_guard).map(|r| r.index());
    assert_eq!(pick(Value::int(0)), Ok(Some(0)));
    assert_eq!(pick(Value::int(-5)), Ok(Some(1)));
    assert_eq!(pick(Value::float(-0.5)), Ok(Some(1)));
    assert_eq!(pick(Value::int(42)), Ok(Some(12)));
}

#[test]
fn analyzer_strict_guard_fails_on_non_numbers() {
    // The capture in case 1 matches everything, so every non-number subject
    // reaches its guard, and the guard error aborts the scan there.
    let table = analyze_table();
    for value in analyze_samples().iter().skip(2) {
        let failure = try_select(table.cases(), value, analyze_guard)
            .expect_err("non-number reaches the x < 0 guard");
        assert_eq!(failure.case_index, 1, "subject {value}");
        assert!(failure.source.contains(value.type_name()));
    }
}

#[test]
fn analyzer_lenient_guard_selects_each_shape() {
    // Treat a failed comparison as "no" to see which case each shape lands in.
    let table = analyze_table();
    let lenient = |g: &AnalyzeGuard, b: &Bindings| analyze_guard(g, b).unwrap_or(false);
    let picked: Vec<Option<usize>> = analyze_samples()
        .iter()
        .map(|v| select(table.cases(), v, lenient).index())
        .collect();
    let expected: Vec<Option<usize>> = [12, 1, 2, 3, 4, 5, 6, 7, 8, 10, 11]
        .into_iter()
        .map(Some)
        .collect();
    assert_eq!(picked, expected);
}

#[test]
fn analyzer_as_pattern_binds_full_subject() {
    let table = analyze_table();
    let subject = Value::mapping([("data", ints(&[1, 2, 3])), ("meta", Value::string("info"))]);
    let result = select(table.cases(), &subject, |g, b| {
        analyze_guard(g, b).unwrap_or(false)
    });
    let b = result.bindings().unwrap();
    assert_eq!(b.get("items"), Some(&ints(&[1, 2, 3])));
    assert_eq!(b.get("full_dict"), Some(&subject));
    assert_eq!(
        b.get("full_dict").map(ToString::to_string).as_deref(),
        Some("{'data': [1, 2, 3], 'meta': 'info'}")
    );
}

#[test]
fn analyzer_small_builder_falls_to_unguarded_record() {
    let table = analyze_table();
    let small = Value::record("Builder", [("value", Value::int(7))]);
    let result = select(table.cases(), &small, |g, b| {
        analyze_guard(g, b).unwrap_or(false)
    });
    assert_eq!(result.index(), Some(9));
    assert_eq!(result.bindings().and_then(|b| b.get("v")), Some(&Value::int(7)));
}
