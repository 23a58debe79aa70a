//! Expenses: the records kept by the expense backend, the client that reads
//! and writes them, and the views and endpoints built on top.
//!
//! This module contains:
//! - `models`: expense, category and subcategory records
//! - `client`: the HTTP client for the expense backend
//! - `summary`: grouping and totals for the summary view
//! - `charts`: the spending donut chart
//! - the list, summary and creation views and their endpoints

mod charts;
mod client;
mod create_endpoint;
mod create_page;
mod list_page;
mod models;
mod subcategories_endpoint;
mod summary;
mod summary_page;

#[cfg(test)]
pub(crate) mod test_utils;

pub use charts::ECHARTS_SCRIPT_URL;
pub use client::{DEFAULT_BACKEND_URL, DEFAULT_REQUEST_TIMEOUT, ExpenseClient};
pub use create_endpoint::{EXPENSE_CREATED_EVENT, create_expense_endpoint};
pub use create_page::get_create_expense_page;
pub use list_page::get_expense_list_page;
pub use subcategories_endpoint::get_subcategory_options;
pub use summary_page::get_summary_page;

/// Shown in place of a view when the expenses could not be fetched.
pub(crate) const FETCH_ERROR_MESSAGE: &str = "Failed to fetch expenses.";
