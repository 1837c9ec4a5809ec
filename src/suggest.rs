// 🔮 Category Suggester - Naive Bayes over labeled descriptions
// Learns word frequencies from the categorized table and suggests a label
// for a novel description. Complements the keyword rules; never replaces them.

use std::collections::{HashMap, HashSet};

use crate::capability::Capability;
use crate::categorizer::Category;
use crate::error::{Error, Result};
use crate::table::Table;

// ============================================================================
// MODEL
// ============================================================================

/// Word counts per category plus class priors, Laplace-smoothed at predict
#[derive(Debug, Clone)]
pub struct BayesModel {
    /// Labeled rows per category
    class_counts: HashMap<Category, usize>,

    /// Token occurrences per category
    word_counts: HashMap<Category, HashMap<String, usize>>,

    /// Tokens per category (denominator for likelihoods)
    class_token_totals: HashMap<Category, usize>,

    /// Distinct tokens across all classes
    vocabulary: HashSet<String>,

    /// Total labeled rows
    total_rows: usize,
}

impl BayesModel {
    /// Log P(class) + sum of log P(token | class) with add-one smoothing
    fn log_score(&self, category: Category, tokens: &[String]) -> f64 {
        let class_count = self.class_counts.get(&category).copied().unwrap_or(0);
        let prior = class_count as f64 / self.total_rows as f64;
        let mut score = prior.ln();

        let token_total = self
            .class_token_totals
            .get(&category)
            .copied()
            .unwrap_or(0) as f64;
        let vocab_size = self.vocabulary.len().max(1) as f64;
        let counts = self.word_counts.get(&category);

        for token in tokens {
            let count = counts
                .and_then(|m| m.get(token))
                .copied()
                .unwrap_or(0) as f64;
            score += ((count + 1.0) / (token_total + vocab_size)).ln();
        }

        score
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// SUGGESTER
// ============================================================================

pub struct CategorySuggester;

impl Capability for CategorySuggester {
    type Model = BayesModel;
    type Input = String;
    type Output = Category;

    fn name(&self) -> &'static str {
        "category-suggester"
    }

    /// Train on every labeled row of the table
    fn fit(&self, table: &Table) -> Result<BayesModel> {
        let mut class_counts: HashMap<Category, usize> = HashMap::new();
        let mut word_counts: HashMap<Category, HashMap<String, usize>> = HashMap::new();
        let mut class_token_totals: HashMap<Category, usize> = HashMap::new();
        let mut vocabulary: HashSet<String> = HashSet::new();
        let mut total_rows = 0;

        for tx in &table.transactions {
            let Some(category) = tx.category else { continue };
            total_rows += 1;
            *class_counts.entry(category).or_insert(0) += 1;

            for token in tokenize(&tx.description) {
                vocabulary.insert(token.clone());
                *class_token_totals.entry(category).or_insert(0) += 1;
                *word_counts
                    .entry(category)
                    .or_default()
                    .entry(token)
                    .or_insert(0) += 1;
            }
        }

        if total_rows == 0 {
            return Err(Error::InsufficientData(
                "no labeled transactions to learn from".to_string(),
            ));
        }

        Ok(BayesModel {
            class_counts,
            word_counts,
            class_token_totals,
            vocabulary,
            total_rows,
        })
    }

    /// Highest-scoring trained class wins. Unknown words fall back to the
    /// class priors, so the majority category carries novel descriptions.
    fn predict(&self, model: &BayesModel, description: String) -> Result<Category> {
        let tokens = tokenize(&description);

        let best = model
            .class_counts
            .keys()
            .map(|&category| (category, model.log_score(category, &tokens)))
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(category, _)| category);

        best.ok_or_else(|| {
            Error::InsufficientData("model has no trained classes".to_string())
        })
    }
}

/// Fit on the table and suggest a category for one description
pub fn suggest_category(table: &Table, description: &str) -> Result<Category> {
    let suggester = CategorySuggester;
    let model = suggester.fit(table)?;
    suggester.predict(&model, description.to_string())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Transaction;
    use chrono::NaiveDate;

    fn tx(description: &str, category: Category) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            -10.0,
            description,
        );
        t.category = Some(category);
        t
    }

    fn labeled_table() -> Table {
        Table {
            columns: vec![],
            transactions: vec![
                tx("weekly grocery haul", Category::Food),
                tx("grocery and snacks", Category::Food),
                tx("corner cafe latte", Category::Food),
                tx("uber to airport", Category::Transport),
                tx("fuel top up", Category::Transport),
                tx("monthly salary", Category::Income),
            ],
        }
    }

    #[test]
    fn test_suggests_category_with_shared_vocabulary() {
        let table = labeled_table();
        assert_eq!(
            suggest_category(&table, "grocery trip").unwrap(),
            Category::Food
        );
        assert_eq!(
            suggest_category(&table, "uber ride home").unwrap(),
            Category::Transport
        );
    }

    #[test]
    fn test_unknown_words_fall_back_to_majority_prior() {
        // Food has 3 of 6 labeled rows; all tokens unseen -> priors decide
        let table = labeled_table();
        assert_eq!(
            suggest_category(&table, "zzz qqq").unwrap(),
            Category::Food
        );
    }

    #[test]
    fn test_unlabeled_table_is_insufficient_data() {
        let table = Table {
            columns: vec![],
            transactions: vec![Transaction::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                -10.0,
                "grocery",
            )],
        };
        assert!(matches!(
            suggest_category(&table, "grocery"),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_tokenizer_splits_on_punctuation() {
        assert_eq!(
            tokenize("UBER *TRIP-4521, SF"),
            vec!["uber", "trip", "4521", "sf"]
        );
    }
}
