//! Storefront test utilities.
//!
//! Fixture builders for collection documents and assertion helpers for
//! JSON responses.

use serde_json::{Map, Value as JsonValue, json};

/// Create a test course with a name and category.
pub fn test_course(name: &str, category: &str) -> TestDocument {
    TestDocument::new()
        .with_str("courseName", name)
        .with_str("category", category)
}

/// Create a test blog post with a title and category.
pub fn test_blog(title: &str, category: &str) -> TestDocument {
    TestDocument::new()
        .with_str("title", title)
        .with_str("category", category)
}

/// Create a test user body with an email.
pub fn test_user(name: &str, email: &str) -> TestDocument {
    TestDocument::new()
        .with_str("name", name)
        .with_str("email", email)
}

/// Numbered courses `"{prefix} 1"` .. `"{prefix} {n}"`, all in one category.
pub fn numbered_courses(prefix: &str, category: &str, n: usize) -> Vec<JsonValue> {
    (1..=n)
        .map(|i| test_course(&format!("{prefix} {i}"), category).build())
        .collect()
}

/// A JSON document builder for creating test fixtures.
#[derive(Debug, Clone, Default)]
pub struct TestDocument {
    fields: Map<String, JsonValue>,
}

impl TestDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Add a string field.
    pub fn with_str(self, name: &str, value: &str) -> Self {
        self.with_field(name, JsonValue::from(value))
    }

    /// Set a price.
    pub fn with_price(self, price: f64) -> Self {
        self.with_field("price", json!(price))
    }

    /// Finish as a JSON object.
    pub fn build(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that every element of `items` has `field` equal to `expected`.
    pub fn all_field_eq(items: &Value, field: &str, expected: &str) {
        let items = items.as_array().map(Vec::as_slice).unwrap_or_default();
        for item in items {
            assert_eq!(
                item.get(field).and_then(Value::as_str),
                Some(expected),
                "Expected '{field}' == '{expected}' in {item}"
            );
        }
    }

    /// String values of `field` across `items`, in order.
    pub fn field_values(items: &Value, field: &str) -> Vec<String> {
        items
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|item| {
                item.get(field)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }
}
