//! Explain output
//!
//! Deterministic, human-readable rendering of a query plan for
//! diagnostics. Purely derived from the plan; rendering twice yields
//! identical text.

use std::fmt;

use super::planner::QueryPlan;

/// Explain rendering of a query plan
#[derive(Debug, Clone)]
pub struct ExplainPlan {
    pub strategy: String,
    pub index_name: Option<String>,
    pub key_attributes: Vec<String>,
    pub filter_attributes: Vec<String>,
}

impl ExplainPlan {
    pub fn from_plan(plan: &QueryPlan) -> Self {
        Self {
            strategy: plan.strategy.as_str().to_string(),
            index_name: plan.index_name.clone(),
            key_attributes: plan.index_keys.names().map(str::to_string).collect(),
            filter_attributes: plan.filter_keys.clone(),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ACCESS PLAN ===")?;
        writeln!(f, "Strategy: {}", self.strategy)?;
        if let Some(index) = &self.index_name {
            writeln!(f, "Index: {}", index)?;
        }
        if !self.key_attributes.is_empty() {
            writeln!(f, "Key Attributes:")?;
            for attr in &self.key_attributes {
                writeln!(f, "  - {}", attr)?;
            }
        }
        if !self.filter_attributes.is_empty() {
            writeln!(f, "Filter Attributes:")?;
            for attr in &self.filter_attributes {
                writeln!(f, "  - {}", attr)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{AccessPlanner, PredicateMap};
    use crate::schema::{compile, AttributeSpec, ModelDefinition};
    use serde_json::json;

    #[test]
    fn test_explain_renders_strategy_and_index() {
        let model = ModelDefinition::new("t")
            .with_attribute("id", AttributeSpec::new("string").with_role_tag("hash"))
            .with_attribute(
                "stamp",
                AttributeSpec::new("number").with_role_tag("local-secondary"),
            );
        let schema = compile(&model).unwrap().schema;

        let predicates = PredicateMap::from_conjuncts([
            ("id".to_string(), json!("a")),
            ("stamp".to_string(), json!({ ">": 1 })),
        ])
        .unwrap();
        let plan = AccessPlanner::new(&schema).plan(&predicates);

        let output = format!("{}", ExplainPlan::from_plan(&plan));
        assert!(output.contains("LOCAL_INDEX"));
        assert!(output.contains("id_stamp_local_index"));
        assert!(output.contains("- id"));
    }

    #[test]
    fn test_explain_deterministic() {
        let model = ModelDefinition::new("t")
            .with_attribute("id", AttributeSpec::new("string").with_role_tag("hash"));
        let schema = compile(&model).unwrap().schema;

        let predicates =
            PredicateMap::from_conjuncts([("other".to_string(), json!(1))]).unwrap();
        let plan = AccessPlanner::new(&schema).plan(&predicates);

        let first = format!("{}", ExplainPlan::from_plan(&plan));
        let second = format!("{}", ExplainPlan::from_plan(&plan));
        assert_eq!(first, second);
        assert!(first.contains("SCAN"));
    }
}
