// 🏷️ Categorizer - Ordered keyword rules, first match wins
// Declaration order is the tie-break contract: "grocery bill" is Food, not
// Utilities, because Food is declared before Utilities

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::table::Table;

// ============================================================================
// CATEGORY
// ============================================================================

/// Category - Closed label set. Every transaction gets exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Rent,
    Food,
    Transport,
    Utilities,
    Entertainment,
    Income,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Rent,
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Income,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Rent => "Rent",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Income => "Income",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// One (label, keywords) pair. Keywords are lowercase substrings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    /// Check whether any keyword appears in the (already lowercased) text
    fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|kw| text_lower.contains(kw.as_str()))
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// RuleSet - Ordered rule list evaluated in sequence.
///
/// The Vec order IS the precedence order; there is no priority field on
/// purpose, so the tie-break stays a visible, testable declaration order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CategoryRule>,
}

impl RuleSet {
    /// Create engine from an ordered list of rules
    pub fn from_rules(rules: Vec<CategoryRule>) -> Self {
        RuleSet { rules }
    }

    /// Load rules from a JSON file (array of {category, keywords}).
    /// Array order in the file is the match order.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let rules: Vec<CategoryRule> = serde_json::from_str(&content)?;
        Ok(RuleSet::from_rules(rules))
    }

    /// Assign a category to one description. Pure and total: lowercases the
    /// text, walks the rules in order, falls back to `Other`.
    pub fn categorize(&self, description: &str) -> Category {
        let text_lower = description.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&text_lower) {
                return rule.category;
            }
        }
        Category::Other
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for RuleSet {
    /// The built-in rule set. Order matters and is part of the contract:
    /// Rent, Food, Transport, Utilities, Entertainment, Income.
    fn default() -> Self {
        fn rule(category: Category, keywords: &[&str]) -> CategoryRule {
            CategoryRule {
                category,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            }
        }

        RuleSet::from_rules(vec![
            rule(Category::Rent, &["rent", "lease"]),
            rule(Category::Food, &["grocery", "restaurant", "food", "cafe"]),
            rule(Category::Transport, &["bus", "train", "fuel", "taxi", "uber"]),
            rule(
                Category::Utilities,
                &["electricity", "water", "gas", "internet", "wifi", "bill"],
            ),
            rule(Category::Entertainment, &["movie", "concert", "subscription"]),
            rule(Category::Income, &["salary", "income"]),
        ])
    }
}

/// Label every row in place. Adds the Category column, never adds or
/// removes rows. Re-running ignores any existing label, so it is idempotent.
pub fn categorize_table(table: &mut Table, rules: &RuleSet) {
    for tx in &mut table.transactions {
        tx.category = Some(rules.categorize(&tx.description));
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Transaction;
    use chrono::NaiveDate;
    use std::io::Write;

    fn tx(description: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            -10.0,
            description,
        )
    }

    #[test]
    fn test_keyword_precedence_grocery_bill_is_food() {
        // "grocery" (Food) and "bill" (Utilities) both match;
        // Food is declared first, so Food wins
        let rules = RuleSet::default();
        assert_eq!(rules.categorize("grocery bill"), Category::Food);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let rules = RuleSet::default();
        assert_eq!(rules.categorize("MONTHLY RENT PAYMENT"), Category::Rent);
        assert_eq!(rules.categorize("Uber Trip"), Category::Transport);
    }

    #[test]
    fn test_no_match_falls_back_to_other() {
        let rules = RuleSet::default();
        assert_eq!(rules.categorize("mystery charge"), Category::Other);
    }

    #[test]
    fn test_substring_match() {
        // "restaurants" contains "restaurant"
        let rules = RuleSet::default();
        assert_eq!(rules.categorize("local restaurants inc"), Category::Food);
    }

    #[test]
    fn test_closure_every_row_gets_one_of_seven_labels() {
        let rules = RuleSet::default();
        let mut table = Table {
            columns: vec![],
            transactions: vec![
                tx("rent march"),
                tx("grocery run"),
                tx("bus ticket"),
                tx("electricity bill"),
                tx("movie night"),
                tx("salary deposit"),
                tx("???"),
            ],
        };
        categorize_table(&mut table, &rules);
        for t in &table.transactions {
            let cat = t.category.expect("every row must be labeled");
            assert!(Category::ALL.contains(&cat));
        }
    }

    #[test]
    fn test_idempotence() {
        let rules = RuleSet::default();
        let mut table = Table {
            columns: vec![],
            transactions: vec![tx("grocery run"), tx("salary deposit"), tx("???")],
        };
        categorize_table(&mut table, &rules);
        let first: Vec<_> = table.transactions.iter().map(|t| t.category).collect();
        categorize_table(&mut table, &rules);
        let second: Vec<_> = table.transactions.iter().map(|t| t.category).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_categorize_preserves_row_count() {
        let rules = RuleSet::default();
        let mut table = Table {
            columns: vec![],
            transactions: vec![tx("a"), tx("b"), tx("c")],
        };
        categorize_table(&mut table, &rules);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_rules_from_json_file_keep_file_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // Utilities listed before Food: "grocery bill" now resolves Utilities
        write!(
            file,
            r#"[
                {{"category": "Utilities", "keywords": ["bill"]}},
                {{"category": "Food", "keywords": ["grocery"]}}
            ]"#
        )
        .unwrap();

        let rules = RuleSet::from_file(file.path()).unwrap();
        assert_eq!(rules.rule_count(), 2);
        assert_eq!(rules.categorize("grocery bill"), Category::Utilities);
    }
}
