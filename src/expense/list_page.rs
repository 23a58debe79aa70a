//! The paginated table of expenses.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    credentials::Credentials,
    endpoints,
    expense::{
        ExpenseClient, FETCH_ERROR_MESSAGE, models::Expense, summary::parse_expense_date,
    },
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, page},
    pagination::{
        PaginationConfig, create_pagination_indicators, pagination_view, split_into_pages,
    },
};

/// The ID of the element that holds the expense list.
const EXPENSE_LIST_ID: &str = "expense-list";

/// The state needed for the expense list.
#[derive(Debug, Clone)]
pub struct ExpenseListState {
    /// The client for the expense backend.
    pub client: ExpenseClient,
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpenseListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            client: state.client.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the expense list.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseListQuery {
    /// The page to display, starting from 1.
    pub page: Option<u64>,
}

/// Display the expense table, starting at the requested page.
///
/// Expenses are fetched once and every page is rendered, with all but the
/// requested page hidden, so that switching pages in the browser does not
/// go back to the backend. The page number is clamped to the pages that
/// exist, so a page past the end shows the last page. htmx requests get
/// only the table fragment.
pub async fn get_expense_list_page(
    State(state): State<ExpenseListState>,
    HxRequest(is_htmx_request): HxRequest,
    credentials: Credentials,
    Query(query): Query<ExpenseListQuery>,
) -> Response {
    let list = match state.client.list_expenses(&credentials, true).await {
        Ok(expenses) => expense_list_view(
            &expenses,
            query.page.unwrap_or(1),
            &state.pagination_config,
        ),
        Err(error) => {
            tracing::error!("Could not fetch expenses for the expense list: {error}");
            expense_list_error_view()
        }
    };

    if is_htmx_request {
        list.into_response()
    } else {
        page("Expenses", endpoints::EXPENSES_VIEW, &[], &list).into_response()
    }
}

fn expense_list_view(expenses: &[Expense], page: u64, config: &PaginationConfig) -> Markup {
    let pages = split_into_pages(expenses, config.page_size);
    let page_count = pages.len() as u64;
    let curr_page = page.clamp(1, page_count.max(1));

    if pages.is_empty() {
        return html!(
            section id=(EXPENSE_LIST_ID) class="w-full"
            {
                h2 class="text-xl font-bold mb-4" { "Expense List" }
                p class="text-gray-500 dark:text-gray-400" { "No expenses found." }
            }
        );
    }

    html!(
        section id=(EXPENSE_LIST_ID) data-paged class="w-full"
        {
            h2 class="text-xl font-bold mb-4" { "Expense List" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Subcategory" }
                        }
                    }

                    @for (page, page_expenses) in (1u64..).zip(pages.iter()) {
                        tbody data-page=(page) hidden[page != curr_page]
                        {
                            @for expense in page_expenses.iter() {
                                (expense_row(expense))
                            }
                        }
                    }
                }
            }

            @if page_count > 1 {
                @for page in 1..=page_count {
                    div data-page=(page) hidden[page != curr_page]
                    {
                        (pagination_view(
                            &create_pagination_indicators(page, page_count, config.max_pages),
                            |target| endpoints::with_query(endpoints::EXPENSES_VIEW, &[("page", target)]),
                        ))
                    }
                }
            }
        }
    )
}

fn expense_row(expense: &Expense) -> Markup {
    let description = match expense.description.as_deref() {
        Some(description) if !description.is_empty() => description,
        _ => "No description",
    };

    let amount = match expense.amount {
        Some(amount) => format_currency(amount),
        None => "N/A".to_owned(),
    };

    html!(
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (description) }
            td class=(TABLE_CELL_STYLE) { (amount) }
            td class=(TABLE_CELL_STYLE) { (format_date(expense.date.as_deref())) }
            td class=(TABLE_CELL_STYLE) { (expense.category.title().unwrap_or("No category")) }
            td class=(TABLE_CELL_STYLE) { (expense.sub_category.title().unwrap_or("No subcategory")) }
        }
    )
}

/// Dates are shown as "YYYY-MM-DD", dates that cannot be parsed are shown as they are.
fn format_date(date: Option<&str>) -> String {
    match date {
        None | Some("") => "No date".to_owned(),
        Some(text) => parse_expense_date(text)
            .map(|date| date.to_string())
            .unwrap_or_else(|| text.to_owned()),
    }
}

fn expense_list_error_view() -> Markup {
    html!(
        section id=(EXPENSE_LIST_ID) class="w-full"
        {
            h2 class="text-xl font-bold mb-4" { "Expense List" }
            p class="text-red-600 dark:text-red-400" { (FETCH_ERROR_MESSAGE) }
        }
    )
}
