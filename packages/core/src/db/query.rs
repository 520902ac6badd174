//! Collection Query Shapes
//!
//! Collection fetches support exactly one narrowing predicate (a single
//! field equality) and one option (a result-count limit). No ranges,
//! composite filters, or ordering — anything richer belongs to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Single equality predicate: documents where `field == equals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Top-level field name to compare
    pub field: String,
    /// Value the field must equal
    pub equals: Value,
}

impl Filter {
    /// Build an equality filter
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            equals: value.into(),
        }
    }
}

/// Collection fetch options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Maximum number of records to return; unset means unbounded
    pub limit: Option<usize>,
}

impl QueryOptions {
    /// Options capping the result count at `limit`
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_builder_converts_primitive_values() {
        let filter = Filter::equals("status", "active");
        assert_eq!(filter.field, "status");
        assert_eq!(filter.equals, json!("active"));

        let numeric = Filter::equals("points", 10);
        assert_eq!(numeric.equals, json!(10));
    }

    #[test]
    fn default_options_are_unbounded() {
        assert_eq!(QueryOptions::default().limit, None);
        assert_eq!(QueryOptions::with_limit(5).limit, Some(5));
    }
}
