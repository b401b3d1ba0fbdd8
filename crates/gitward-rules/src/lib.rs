//! Rule catalog for gitward.
//!
//! Every diagnostic gitward reports carries one of these rule ids.
//!
//! # Usage
//!
//! ```
//! use gitward_rules::RULES_DATA;
//!
//! for (id, name, category) in RULES_DATA {
//!     println!("{} [{}]: {}", id, category, name);
//! }
//! ```
//!
//! # Rule Categories
//!
//! - **CM-xxx**: commit message grammar
//! - **HK-xxx**: git hook installation

include!(concat!(env!("OUT_DIR"), "/rules_data.rs"));

/// Returns the total number of rules.
pub fn rule_count() -> usize {
    RULES_DATA.len()
}

/// Looks up a rule by ID, returning the name if found.
pub fn get_rule_name(id: &str) -> Option<&'static str> {
    RULES_DATA
        .iter()
        .find(|(rule_id, _, _)| *rule_id == id)
        .map(|(_, name, _)| *name)
}

/// All rule ids in a category (`"commit-msg"` or `"hooks"`).
pub fn rules_in_category(category: &str) -> impl Iterator<Item = &'static str> + '_ {
    RULES_DATA
        .iter()
        .filter(move |(_, _, cat)| *cat == category)
        .map(|(id, _, _)| *id)
}
