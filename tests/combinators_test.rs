//! Integration tests for validator combinators.

use std::sync::Arc;

use parking_lot::Mutex;
use triage::prelude::*;

/// A validator that records every input it sees and always fails.
fn spy(calls: &Arc<Mutex<Vec<i32>>>, error: &'static str) -> Validator<i32, i32, &'static str> {
    let calls = Arc::clone(calls);
    Validator::new(move |input: i32| {
        calls.lock().push(input);
        ValidationResult::invalid(input, error)
    })
}

fn fails(error: &'static str) -> Validator<i32, i32, &'static str> {
    cond(|_| false, move |_| error)
}

fn passes() -> Validator<i32, i32, &'static str> {
    identity()
}

// ====== Sequential Tests ======

#[test]
fn test_sequentially_never_invokes_after_failure() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = sequentially(vec![passes(), fails("first"), spy(&calls, "spy")]);

    let result = v.validate(1);
    assert_eq!(result.errors(), &["first"]);
    assert!(calls.lock().is_empty());
}

#[test]
fn test_sequentially_runs_all_on_success() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = sequentially(vec![passes(), passes(), spy(&calls, "last")]);

    let result = v.validate(9);
    assert_eq!(result.errors(), &["last"]);
    assert_eq!(*calls.lock(), vec![9]);
}

// ====== Collect-All Tests ======

#[test]
fn test_every_invokes_all_and_keeps_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = every(vec![
        fails("a").keyed("x"),
        spy(&calls, "b"),
        fails("c").keyed("x"),
        fails("d"),
    ]);

    let result = v.validate(4);
    assert_eq!(result.errors(), &["b", "d"]);
    assert_eq!(result.errors_at(["x"]), &["a", "c"]);
    assert_eq!(*calls.lock(), vec![4]);
}

#[test]
fn test_every_of_nothing_has_no_value() {
    let result = every(Vec::<Validator<i32, i32, &str>>::new()).validate(1);
    assert!(result.is_valid());
    assert!(result.tree().is_identity());
    assert_eq!(result.value(), None);
}

#[test]
fn test_every_of_builds_domain_value() {
    #[derive(Debug, PartialEq)]
    struct Account {
        name: String,
        age: u8,
    }

    let account = every_of((
        field("name", |a: &(String, u8)| a.0.clone(), not_blank(|_| "name.blank")),
        field("age", |a: &(String, u8)| a.1, gte(18, |_| "age.minor")),
    ))
    .map_value(|(name, age)| Account { name, age });

    assert_eq!(
        account.validate(("Ada".into(), 36)).into_value(),
        Some(Account { name: "Ada".into(), age: 36 })
    );

    let result = account.validate((" ".into(), 12));
    assert_eq!(result.errors_at(["name"]), &["name.blank"]);
    assert_eq!(result.errors_at(["age"]), &["age.minor"]);
    assert_eq!(result.value(), None);
}

#[test]
fn test_every_of_wide_tuple() {
    let v = every_of((passes(), passes(), passes(), passes(), passes(), fails("sixth")));
    assert_eq!(v.validate(0).errors(), &["sixth"]);

    let v = every_of((passes(), passes(), passes()));
    assert_eq!(v.validate(5).into_value(), Some((5, 5, 5)));
}

// ====== Alternation Tests ======

#[test]
fn test_any_stops_at_first_success() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = any(vec![fails("a"), passes(), spy(&calls, "unused")]);

    let result = v.validate(2);
    assert!(result.is_valid());
    assert!(result.errors().is_empty());
    assert!(calls.lock().is_empty());
}

#[test]
fn test_any_merges_every_failure() {
    let v = any(vec![fails("a").keyed("k"), fails("b"), fails("c").keyed("k")]);
    let result = v.validate(0);

    assert_eq!(result.errors(), &["b"]);
    assert_eq!(result.errors_at(["k"]), &["a", "c"]);
    assert_eq!(result.value(), None);
}

// ====== Negation Tests ======

#[test]
fn test_not_discards_inner_errors() {
    let forbidden = not(member_of([13, 666], |_| "inner"), |n: &i32| {
        if *n == 13 { "unlucky" } else { "forbidden" }
    });

    assert_eq!(forbidden.validate(7).into_value(), Some(7));
    assert_eq!(forbidden.validate(13).errors(), &["unlucky"]);
    assert_eq!(forbidden.validate(666).errors(), &["forbidden"]);
}

#[test]
fn test_double_negation_restores_validity() {
    let positive = gt(0, |_: &i32| "not positive");
    let v = not(not(positive, |_| "positive"), |_| "not positive");
    assert!(v.validate(1).is_valid());
    assert_eq!(v.validate(-1).errors(), &["not positive"]);
}

// ====== Absence Tests ======

#[test]
fn test_required_rejects_none_without_invoking() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = required(spy(&calls, "inner"), || "missing");

    let result = v.validate(None);
    assert_eq!(result.errors(), &["missing"]);
    assert_eq!(result.input(), &None);
    assert!(calls.lock().is_empty());

    let result = v.validate(Some(3));
    assert_eq!(result.errors(), &["inner"]);
    assert_eq!(*calls.lock(), vec![3]);
}

#[test]
fn test_optional_accepts_none_without_invoking() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = optional(spy(&calls, "inner"));

    let result = v.validate(None);
    assert!(result.is_valid());
    assert_eq!(result.into_value(), Some(None));
    assert!(calls.lock().is_empty());

    assert_eq!(v.validate(Some(1)).errors(), &["inner"]);
}

#[test]
fn test_method_sugar_matches_free_functions() {
    let positive = gt(0, |_: &i32| "not positive");

    let sugared = positive.clone().required(|| "missing");
    let free = required(positive.clone(), || "missing");
    for input in [None, Some(-1), Some(1)] {
        assert_eq!(sugared.validate(input), free.validate(input));
    }

    let sugared = positive.clone().optional();
    let free = optional(positive);
    for input in [None, Some(-1), Some(1)] {
        assert_eq!(sugared.validate(input), free.validate(input));
    }
}

#[test]
fn test_optional_field_and_required_field() {
    struct Profile {
        nickname: Option<String>,
        email: Option<String>,
    }

    let profile = every_of((
        optional_field("nickname", |p: &Profile| p.nickname.clone(), length_between(2, 10, |_| "nickname.length")),
        required_field("email", |p: &Profile| p.email.clone(), contains("@", |_| "email.format"), || "email.required"),
    ));

    let result = profile.validate(Profile { nickname: None, email: None });
    assert!(result.tree().is_valid_at(["nickname"]));
    assert_eq!(result.errors_at(["email"]), &["email.required"]);

    let result = profile.validate(Profile {
        nickname: Some("x".into()),
        email: Some("a@b".into()),
    });
    assert_eq!(result.errors_at(["nickname"]), &["nickname.length"]);
    assert!(result.tree().is_valid_at(["email"]));
}

// ====== Chaining Tests ======

#[test]
fn test_and_then_feeds_value_forward() {
    let trimmed: Validator<String, String, &str> =
        Validator::new(|s: String| {
            let value = s.trim().to_string();
            ValidationResult::valid(s, value)
        });
    let v = trimmed.and_then(length_between(1, 3, |_| "length"));

    let result = v.validate("  ab  ".into());
    assert_eq!(result.input(), "  ab  ");
    assert_eq!(result.into_value(), Some("ab".to_string()));
    assert_eq!(v.validate("   ".into()).errors(), &["length"]);
}

#[test]
fn test_globally_inside_field() {
    let v = keyed("outer", every(vec![globally(fails("here")), fails("also here")]));
    assert_eq!(v.validate(0).errors_at(["outer"]), &["here", "also here"]);
}

#[test]
fn test_optional_or_reports_input_as_received() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let v = optional_or(spy(&calls, "checked"), || 42);

    let result = v.validate(None);
    assert_eq!(result.input(), &None);
    assert_eq!(result.errors(), &["checked"]);
    assert_eq!(*calls.lock(), vec![42]);

    let result = v.validate(Some(7));
    assert_eq!(result.input(), &Some(7));
    assert_eq!(*calls.lock(), vec![42, 7]);
}
