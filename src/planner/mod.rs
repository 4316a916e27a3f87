//! Access Pattern Planner subsystem for keyplane
//!
//! Given a compiled table schema and a flat predicate map, the planner
//! picks the cheapest valid retrieval strategy and splits predicates into
//! index key conditions and post-hoc filter conditions.
//!
//! # Design Principles
//!
//! - Deterministic: same schema + predicates produce the same plan
//! - Total: every predicate map plans, the worst case being a full scan
//! - Cost preference: primary key > local index > global index >
//!   hash-only query > scan
//! - Predicate shapes resolve once at the boundary; no downstream
//!   re-inspection

mod condition;
mod errors;
mod explain;
mod planner;
mod predicate;

pub use condition::{build_filter_conditions, build_key_conditions, Condition};
pub use errors::{PlannerError, PlannerResult};
pub use explain::ExplainPlan;
pub use planner::{AccessPlanner, IndexKeys, QueryPlan, Strategy};
pub use predicate::{ComparisonOp, Predicate, PredicateMap};
