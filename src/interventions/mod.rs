/// Intervention recommendation layer: a fixed factor-to-action mapping table.
pub mod engine;

pub use engine::InterventionRuleEngine;
