//! Condition builder
//!
//! Translates resolved predicates into native comparison conditions. Key
//! conditions cover only the plan's index keys; filter conditions cover
//! every remaining predicate attribute.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::planner::QueryPlan;
use super::predicate::{ComparisonOp, Predicate, PredicateMap};

/// A native comparison condition
///
/// `values` is always non-empty: scalar operands are wrapped into a
/// single-element sequence, array operands pass through element-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: ComparisonOp,
    pub values: Vec<Value>,
}

impl Condition {
    /// Builds the condition for one resolved predicate
    pub fn from_predicate(predicate: &Predicate) -> Self {
        match predicate {
            Predicate::Equals(value) => Self {
                operator: ComparisonOp::Eq,
                values: wrap_operand(value),
            },
            Predicate::Operator(op, value) => Self {
                operator: *op,
                values: wrap_operand(value),
            },
        }
    }
}

fn wrap_operand(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

// Wire shape: {"ComparisonOperator": "EQ", "AttributeValueList": [...]}
impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Condition", 2)?;
        state.serialize_field("ComparisonOperator", self.operator.as_str())?;
        state.serialize_field("AttributeValueList", &self.values)?;
        state.end()
    }
}

/// Conditions for the plan's index keys, keyed by attribute name
pub fn build_key_conditions(
    plan: &QueryPlan,
    predicates: &PredicateMap,
) -> BTreeMap<String, Condition> {
    let mut conditions = BTreeMap::new();
    for attribute in plan.index_keys.names() {
        if let Some(predicate) = predicates.get(attribute) {
            conditions.insert(attribute.to_string(), Condition::from_predicate(predicate));
        }
    }
    conditions
}

/// Conditions for the plan's filter keys, keyed by attribute name
pub fn build_filter_conditions(
    plan: &QueryPlan,
    predicates: &PredicateMap,
) -> BTreeMap<String, Condition> {
    let mut conditions = BTreeMap::new();
    for attribute in &plan.filter_keys {
        if let Some(predicate) = predicates.get(attribute) {
            conditions.insert(attribute.clone(), Condition::from_predicate(predicate));
        }
    }
    conditions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_wraps_to_single_element_list() {
        let condition = Condition::from_predicate(&Predicate::Equals(json!("a")));
        assert_eq!(condition.operator, ComparisonOp::Eq);
        assert_eq!(condition.values, vec![json!("a")]);
    }

    #[test]
    fn test_array_operand_passes_through() {
        let condition = Condition::from_predicate(&Predicate::Operator(
            ComparisonOp::Between,
            json!([1, 9]),
        ));
        assert_eq!(condition.values, vec![json!(1), json!(9)]);
    }

    #[test]
    fn test_operator_carried() {
        let condition = Condition::from_predicate(&Predicate::Operator(
            ComparisonOp::BeginsWith,
            json!("dev"),
        ));
        assert_eq!(condition.operator, ComparisonOp::BeginsWith);
        assert_eq!(condition.values, vec![json!("dev")]);
    }

    #[test]
    fn test_wire_shape() {
        let condition = Condition::from_predicate(&Predicate::Operator(
            ComparisonOp::Ge,
            json!(10),
        ));
        let json = serde_json::to_value(&condition).unwrap();
        assert_eq!(json["ComparisonOperator"], "GE");
        assert_eq!(json["AttributeValueList"], json!([10]));
    }
}
