//! Expense aggregation for the summary view.
//!
//! Provides functions to group expenses by category or month, total each
//! group's income and spending, compute the overall balance, and build the
//! slices of the spending donut chart.

use std::{collections::HashMap, fmt};

use serde::Deserialize;
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::expense::models::Expense;

/// The label for expenses without an embedded category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The label for expenses whose date is missing or cannot be parsed.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// The colors of the donut chart slices, assigned in order and then repeated.
pub const CHART_PALETTE: [&str; 6] = [
    "#231651", "#4DCCBD", "#2374AB", "#FF8484", "#D1F5BE", "#694D75",
];

/// How expenses are grouped into summary rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Category,
    Month,
}

impl GroupBy {
    pub fn as_query_value(self) -> &'static str {
        match self {
            GroupBy::Category => "category",
            GroupBy::Month => "month",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Category => write!(f, "Category"),
            GroupBy::Month => write!(f, "Month"),
        }
    }
}

/// The totals for one group of expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// The category title or month, e.g. "Food" or "January 2024".
    pub label: String,
    /// The sum of the positive amounts.
    pub total: f64,
    /// The sum of the negative amounts, zero or less.
    pub spent: f64,
    /// The number of expenses in the group.
    pub count: usize,
}

/// The overall balance and spending across all expenses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Income minus spending, i.e. the sum of all amounts.
    pub balance: f64,
    /// The sum of the negative amounts, zero or less.
    pub spending: f64,
}

/// One slice of the spending donut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub name: String,
    /// The amount spent as a positive number.
    pub value: f64,
    pub color: &'static str,
}

/// The label of the group that `expense` belongs to.
pub fn group_label(expense: &Expense, group_by: GroupBy) -> String {
    match group_by {
        GroupBy::Category => expense
            .category
            .title()
            .unwrap_or(UNCATEGORIZED_LABEL)
            .to_owned(),
        GroupBy::Month => expense
            .date
            .as_deref()
            .and_then(parse_expense_date)
            .map(format_month_label)
            .unwrap_or_else(|| INVALID_DATE_LABEL.to_owned()),
    }
}

/// Parse the date of an expense.
///
/// Accepts plain dates ("2024-01-15"), RFC 3339 date-times
/// ("2024-01-15T10:00:00.000Z") and any string that starts with a plain date.
pub fn parse_expense_date(text: &str) -> Option<Date> {
    let date_format = format_description!("[year]-[month]-[day]");

    if let Ok(date) = Date::parse(text, &date_format) {
        return Some(date);
    }

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time.date());
    }

    text.get(..10)
        .and_then(|prefix| Date::parse(prefix, &date_format).ok())
}

/// Formats the month of `date` with the full month name and year, e.g. "January 2024".
pub fn format_month_label(date: Date) -> String {
    format!("{} {:04}", date.month(), date.year())
}

/// Groups `expenses` with `group_by` and totals each group.
///
/// Rows are returned in the order their groups first appear in `expenses`.
/// Positive amounts add to `total` and negative amounts to `spent`. Zero and
/// missing amounts add to neither, but every expense is counted.
pub fn summarize(expenses: &[Expense], group_by: GroupBy) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut row_index_by_label: HashMap<String, usize> = HashMap::new();

    for expense in expenses {
        let label = group_label(expense, group_by);

        let index = *row_index_by_label.entry(label).or_insert_with_key(|label| {
            rows.push(SummaryRow {
                label: label.clone(),
                total: 0.0,
                spent: 0.0,
                count: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[index];
        let amount = expense.signed_amount();

        if amount > 0.0 {
            row.total += amount;
        } else if amount < 0.0 {
            row.spent += amount;
        }

        row.count += 1;
    }

    rows
}

/// Calculates the overall balance and spending of `expenses`.
pub fn calculate_totals(expenses: &[Expense]) -> Totals {
    let (income, spending) =
        expenses
            .iter()
            .fold((0.0, 0.0), |(income, spending), expense| {
                let amount = expense.signed_amount();

                if amount > 0.0 {
                    (income + amount, spending)
                } else if amount < 0.0 {
                    (income, spending + amount)
                } else {
                    (income, spending)
                }
            });

    Totals {
        balance: income + spending,
        spending,
    }
}

/// Builds the donut chart slices for the groups with spending.
///
/// Groups that spent nothing are left out. Colors are assigned from
/// [CHART_PALETTE] by slice position.
pub fn chart_slices(rows: &[SummaryRow]) -> Vec<ChartSlice> {
    rows.iter()
        .filter(|row| row.spent < 0.0)
        .enumerate()
        .map(|(index, row)| ChartSlice {
            name: row.label.clone(),
            value: row.spent.abs(),
            color: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect()
}
