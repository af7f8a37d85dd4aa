//! Integration tests for the default error catalog.

use triage::catalog::{self, DefaultError, ErrorId};
use triage::prelude::{every, every_of, field, list, sequentially_element};

#[derive(Debug, Clone)]
struct Product {
    sku: String,
    price: Option<u32>,
    tags: Vec<String>,
}

fn product() -> triage::Validator<Product, (String, u32, Vec<String>), DefaultError> {
    every_of((
        field(
            "sku",
            |p: &Product| p.sku.clone(),
            every(vec![
                catalog::matches(r"^[A-Z]{3}-\d+$").unwrap(),
                catalog::length_between(5, 12),
            ]),
        ),
        catalog::required_field("price", |p: &Product| p.price, catalog::between(1, 10_000)),
        field(
            "tags",
            |p: &Product| p.tags.clone(),
            list(catalog::member_of(["new".to_string(), "sale".to_string()]), sequentially_element),
        ),
    ))
}

#[test]
fn test_catalog_errors_carry_ids_and_args() {
    let result = product().validate(Product {
        sku: "ab".into(),
        price: None,
        tags: vec!["new".into(), "old".into(), "bad".into()],
    });

    let sku = result.errors_at(["sku"]);
    assert_eq!(sku.len(), 2);
    assert_eq!(sku[0].id, ErrorId::StringDoesntMatch);
    assert_eq!(sku[1], DefaultError::new(ErrorId::StringLengthNotBetweenBounds).arg(5).arg(12).arg(2));

    assert_eq!(result.errors_at(["price"]), &[DefaultError::new(ErrorId::ValueRequired)]);

    assert_eq!(
        result.errors_at(["tags", "1"]),
        &[DefaultError::new(ErrorId::ValueNotInSet).arg("[new, sale]").arg("old")]
    );
    assert!(result.tree().get(["tags", "2"]).is_none());
}

#[test]
fn test_catalog_display_in_tree() {
    let result = product().validate(Product {
        sku: "ABC-1".into(),
        price: Some(0),
        tags: vec![],
    });

    assert_eq!(
        result.tree().to_string(),
        "price: ComparableNotBetweenBounds(1, 10000, 0)\n"
    );
}

#[test]
fn test_catalog_json() {
    let result = product().validate(Product {
        sku: "ABC-1".into(),
        price: Some(20_000),
        tags: vec![],
    });

    let json = result.tree().to_json().unwrap();
    assert_eq!(
        json["price"],
        serde_json::json!([{ "id": "ComparableNotBetweenBounds", "args": ["1", "10000", "20000"] }])
    );
}

#[test]
fn test_valid_product() {
    let result = product().validate(Product {
        sku: "XYZ-42".into(),
        price: Some(999),
        tags: vec!["sale".into()],
    });
    assert_eq!(
        result.into_value(),
        Some(("XYZ-42".to_string(), 999, vec!["sale".to_string()]))
    );
}

#[test]
fn test_error_ids_render_as_strings() {
    assert_eq!(ErrorId::KeyNotFound.to_string(), "KeyNotFound");
    assert_eq!(ErrorId::ValueNotInSet.as_str(), "ValueNotInSet");
    assert_eq!(
        serde_json::to_value(ErrorId::ComparableNotLowerThan).unwrap(),
        serde_json::json!("ComparableNotLowerThan")
    );
}
