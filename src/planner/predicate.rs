//! Predicate representation
//!
//! Raw query values arrive in two shapes: a bare scalar (equality) or a
//! single-entry object naming a comparison operator. Both are resolved to a
//! tagged [`Predicate`] once, at this boundary, so downstream code never
//! re-inspects runtime shapes.
//!
//! A query's AND conjuncts flatten into one [`PredicateMap`] regardless of
//! how many conjuncts were supplied: zero, one bare predicate, or many.

use serde_json::Value;

use super::errors::{PlannerError, PlannerResult};

/// Native comparison operator codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Ne,
    In,
    Le,
    Lt,
    Ge,
    Gt,
    Between,
    Contains,
    NotContains,
    BeginsWith,
}

impl ComparisonOp {
    /// Maps a query operator key to its native code
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "=" => Some(ComparisonOp::Eq),
            "!=" => Some(ComparisonOp::Ne),
            "in" => Some(ComparisonOp::In),
            "<=" => Some(ComparisonOp::Le),
            "<" => Some(ComparisonOp::Lt),
            ">=" => Some(ComparisonOp::Ge),
            ">" => Some(ComparisonOp::Gt),
            "between" => Some(ComparisonOp::Between),
            "contains" => Some(ComparisonOp::Contains),
            "nin" => Some(ComparisonOp::NotContains),
            "startsWith" => Some(ComparisonOp::BeginsWith),
            _ => None,
        }
    }

    /// Returns the wire code for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "EQ",
            ComparisonOp::Ne => "NE",
            ComparisonOp::In => "IN",
            ComparisonOp::Le => "LE",
            ComparisonOp::Lt => "LT",
            ComparisonOp::Ge => "GE",
            ComparisonOp::Gt => "GT",
            ComparisonOp::Between => "BETWEEN",
            ComparisonOp::Contains => "CONTAINS",
            ComparisonOp::NotContains => "NOT_CONTAINS",
            ComparisonOp::BeginsWith => "BEGINS_WITH",
        }
    }
}

/// A resolved predicate on one attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Bare value, compared for equality
    Equals(Value),
    /// Explicit operator with its operand
    Operator(ComparisonOp, Value),
}

impl Predicate {
    /// Resolves a raw query value into a predicate.
    ///
    /// An object with exactly one entry whose key is a known operator
    /// becomes [`Predicate::Operator`]; an object with one entry and an
    /// unrecognized operator-looking key is rejected. Everything else,
    /// including multi-entry objects (plain map values), is equality.
    pub fn from_value(value: Value) -> PlannerResult<Self> {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                let (key, operand) = map.iter().next().expect("len checked");
                return match ComparisonOp::parse(key) {
                    Some(op) => Ok(Predicate::Operator(op, operand.clone())),
                    None => Err(PlannerError::unsupported_operator(key)),
                };
            }
        }
        Ok(Predicate::Equals(value))
    }

    /// Returns the equality value, if this predicate is a bare equality
    pub fn as_equality(&self) -> Option<&Value> {
        match self {
            Predicate::Equals(v) => Some(v),
            Predicate::Operator(..) => None,
        }
    }
}

/// Flat attribute -> predicate map with deterministic insertion order
///
/// Later entries for the same attribute replace earlier ones, matching the
/// merge semantics of flattening an AND conjunct list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateMap {
    entries: Vec<(String, Predicate)>,
}

impl PredicateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a predicate map from raw (attribute, value) conjuncts.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::UnsupportedOperator`] for any operator key
    /// outside the comparison table; no partial map is produced.
    pub fn from_conjuncts(
        conjuncts: impl IntoIterator<Item = (String, Value)>,
    ) -> PlannerResult<Self> {
        let mut map = Self::new();
        for (attribute, value) in conjuncts {
            let predicate = Predicate::from_value(value)?;
            map.insert(attribute, predicate);
        }
        Ok(map)
    }

    /// Inserts a predicate, replacing any earlier entry for the attribute
    pub fn insert(&mut self, attribute: String, predicate: Predicate) {
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| *a == attribute) {
            entry.1 = predicate;
        } else {
            self.entries.push((attribute, predicate));
        }
    }

    pub fn get(&self, attribute: &str) -> Option<&Predicate> {
        self.entries
            .iter()
            .find(|(a, _)| a == attribute)
            .map(|(_, p)| p)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.get(attribute).is_some()
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Predicate)> {
        self.entries.iter().map(|(a, p)| (a.as_str(), p))
    }

    /// Attribute names in insertion order
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(a, _)| a.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_resolves_to_equality() {
        let p = Predicate::from_value(json!("a")).unwrap();
        assert_eq!(p, Predicate::Equals(json!("a")));

        let p = Predicate::from_value(json!(42)).unwrap();
        assert_eq!(p, Predicate::Equals(json!(42)));
    }

    #[test]
    fn test_operator_object_resolves() {
        let p = Predicate::from_value(json!({ ">=": 10 })).unwrap();
        assert_eq!(p, Predicate::Operator(ComparisonOp::Ge, json!(10)));

        let p = Predicate::from_value(json!({ "startsWith": "dev" })).unwrap();
        assert_eq!(
            p,
            Predicate::Operator(ComparisonOp::BeginsWith, json!("dev"))
        );

        let p = Predicate::from_value(json!({ "between": [1, 9] })).unwrap();
        assert_eq!(
            p,
            Predicate::Operator(ComparisonOp::Between, json!([1, 9]))
        );
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let err = Predicate::from_value(json!({ "like": "a%" })).unwrap_err();
        assert_eq!(err.code(), "KEYPLANE_UNSUPPORTED_OPERATOR");
    }

    #[test]
    fn test_multi_entry_object_is_plain_equality() {
        // A two-entry object is a map value, not an operator wrapper
        let p = Predicate::from_value(json!({ "a": 1, "b": 2 })).unwrap();
        assert!(matches!(p, Predicate::Equals(_)));
    }

    #[test]
    fn test_operator_table_is_complete() {
        for (key, code) in [
            ("=", "EQ"),
            ("!=", "NE"),
            ("in", "IN"),
            ("<=", "LE"),
            ("<", "LT"),
            (">=", "GE"),
            (">", "GT"),
            ("between", "BETWEEN"),
            ("contains", "CONTAINS"),
            ("nin", "NOT_CONTAINS"),
            ("startsWith", "BEGINS_WITH"),
        ] {
            assert_eq!(ComparisonOp::parse(key).unwrap().as_str(), code);
        }
        assert!(ComparisonOp::parse("like").is_none());
    }

    #[test]
    fn test_conjunct_flattening() {
        let map = PredicateMap::from_conjuncts([
            ("deviceId".to_string(), json!("a")),
            ("timestamp".to_string(), json!({ ">": "100" })),
        ])
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("deviceId"), Some(&Predicate::Equals(json!("a"))));
        let names: Vec<_> = map.attribute_names().collect();
        assert_eq!(names, vec!["deviceId", "timestamp"]);
    }

    #[test]
    fn test_later_conjunct_wins() {
        let map = PredicateMap::from_conjuncts([
            ("deviceId".to_string(), json!("a")),
            ("deviceId".to_string(), json!("b")),
        ])
        .unwrap();

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("deviceId"), Some(&Predicate::Equals(json!("b"))));
    }

    #[test]
    fn test_empty_conjuncts_allowed() {
        let map = PredicateMap::from_conjuncts([]).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_bad_conjunct_produces_no_partial_map() {
        let result = PredicateMap::from_conjuncts([
            ("ok".to_string(), json!(1)),
            ("bad".to_string(), json!({ "like": "x" })),
        ]);
        assert!(result.is_err());
    }
}
