//! The URIs served by the dashboard.

/// The home page with the summary, expense list and expense form sections.
pub const ROOT: &str = "/";
/// The page for the spending summary.
pub const SUMMARY_VIEW: &str = "/summary";
/// The page for the paginated table of expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for creating a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create an expense.
pub const EXPENSES_API: &str = "/api/expenses";
/// The route for the subcategory options of a category.
pub const SUBCATEGORIES_API: &str = "/api/subcategories";

/// Append `query` to `endpoint_path` as a URL encoded query string.
///
/// Returns `endpoint_path` unchanged if the query could not be encoded.
pub fn with_query<T: serde::Serialize>(endpoint_path: &str, query: &T) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(query) if !query.is_empty() => format!("{endpoint_path}?{query}"),
        Ok(_) => endpoint_path.to_owned(),
        Err(error) => {
            tracing::error!("Could not encode query for {endpoint_path}: {error}");
            endpoint_path.to_owned()
        }
    }
}
