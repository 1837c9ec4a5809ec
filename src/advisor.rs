// 💡 Advisor - Rule-based savings tips from category shares
// Ordered rules, first match returned. Pure, total, no side effects.

use crate::categorizer::Category;
use crate::table::Table;

/// Share-of-total-activity rules, evaluated in order.
/// Share = |category total| / sum of |amount| over all rows.
const RULES: [(Category, f64, &str); 2] = [
    (
        Category::Food,
        0.30,
        "Food is over 30% of your activity. Meal planning and fewer restaurant \
         visits could free up real money.",
    ),
    (
        Category::Transport,
        0.20,
        "Transport is over 20% of your activity. Consider transit passes or \
         carpooling to cut fuel and ride costs.",
    ),
];

const BALANCED_TIP: &str =
    "Spending looks balanced across categories. Keep doing what you're doing.";

/// Pick a tip for the table. First matching rule wins; a table with no
/// activity (or none in the rule categories) gets the balanced message.
pub fn advise(table: &Table) -> &'static str {
    let total_abs: f64 = table.amounts().map(f64::abs).sum();
    if total_abs == 0.0 {
        return BALANCED_TIP;
    }

    for (category, threshold, tip) in RULES {
        let category_abs: f64 = table
            .transactions
            .iter()
            .filter(|tx| tx.category == Some(category))
            .map(|tx| tx.amount.abs())
            .sum();

        if category_abs / total_abs > threshold {
            return tip;
        }
    }

    BALANCED_TIP
}

// ============================================================================
// TESTS
// ============================================================================
