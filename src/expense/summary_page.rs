//! The summary view: overall balance and spending, the spending donut chart
//! and a table of totals per category or month.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    credentials::Credentials,
    endpoints,
    expense::{
        ExpenseClient, FETCH_ERROR_MESSAGE,
        charts::{ECHARTS_SCRIPT_URL, SummaryChart, chart_view},
        models::Expense,
        summary::{GroupBy, SummaryRow, Totals, calculate_totals, chart_slices, summarize},
    },
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, page,
    },
};

/// The ID of the element that holds the summary.
const SUMMARY_VIEW_ID: &str = "summary-view";

const GROUPINGS: [GroupBy; 2] = [GroupBy::Category, GroupBy::Month];

const AMOUNT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const AMOUNT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// The query parameters for the summary view.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// The grouping shown before the select is changed.
    #[serde(default)]
    pub group_by: GroupBy,
}

/// Display the expense summary.
///
/// Both groupings are rendered from a single fetch and the select switches
/// between them in the browser. htmx requests get only the summary fragment,
/// other requests get the full page.
pub async fn get_summary_page(
    State(client): State<ExpenseClient>,
    HxRequest(is_htmx_request): HxRequest,
    credentials: Credentials,
    Query(query): Query<SummaryQuery>,
) -> Response {
    let summary = match client.list_expenses(&credentials, true).await {
        Ok(expenses) => summary_view(&expenses, query.group_by),
        Err(error) => {
            tracing::error!("Could not fetch expenses for the summary: {error}");
            summary_error_view()
        }
    };

    if is_htmx_request {
        summary.into_response()
    } else {
        let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];
        page("Summary", endpoints::SUMMARY_VIEW, &scripts, &summary).into_response()
    }
}

fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        AMOUNT_GREEN_STYLE
    } else {
        AMOUNT_RED_STYLE
    }
}

fn summary_view(expenses: &[Expense], group_by: GroupBy) -> Markup {
    let totals = calculate_totals(expenses);

    html!(
        section id=(SUMMARY_VIEW_ID) class="w-full space-y-4"
        {
            h2 class="text-xl font-bold" { "Expense Summary" }

            (totals_view(totals))

            div class="max-w-xs"
            {
                label for="group_by" class=(FORM_LABEL_STYLE) { "Group by" }

                select
                    id="group_by"
                    name="group_by"
                    data-group-by-select
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for option in GROUPINGS {
                        option
                            value=(option.as_query_value())
                            selected[option == group_by]
                        {
                            (option)
                        }
                    }
                }
            }

            @for grouping in GROUPINGS {
                (grouping_view(expenses, grouping, grouping != group_by))
            }
        }
    )
}

/// The chart and table for one grouping of `expenses`.
fn grouping_view(expenses: &[Expense], group_by: GroupBy, hidden: bool) -> Markup {
    let rows = summarize(expenses, group_by);
    let slices = chart_slices(&rows);

    html!(
        div data-group-by=(group_by.as_query_value()) hidden[hidden] class="space-y-4"
        {
            @if slices.is_empty() {
                p class="text-gray-500 dark:text-gray-400" { "No spending to show." }
            } @else {
                (chart_view(&SummaryChart::new(&slices, group_by)))
            }

            (summary_table(&rows, group_by))
        }
    )
}

fn totals_view(totals: Totals) -> Markup {
    html!(
        div class="flex flex-wrap gap-6 text-lg font-bold"
        {
            p id="balance"
            {
                "Balance: "
                span class=(amount_color_class(totals.balance)) { (format_currency(totals.balance)) }
            }

            p id="spending"
            {
                "Spending: "
                span class=(AMOUNT_RED_STYLE) { (format_currency(totals.spending)) }
            }
        }
    )
}

fn summary_table(rows: &[SummaryRow], group_by: GroupBy) -> Markup {
    html!(
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { (group_by) }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total Amount Spent" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"}
                            {
                                (row.label)
                            }
                            td class={(TABLE_CELL_STYLE) " " (AMOUNT_GREEN_STYLE)} { (format_currency(row.total)) }
                            td class={(TABLE_CELL_STYLE) " " (AMOUNT_RED_STYLE)} { (format_currency(row.spent)) }
                        }
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="3" class={(TABLE_CELL_STYLE) " text-center"} { "No expenses found." }
                        }
                    }
                }
            }
        }
    )
}

fn summary_error_view() -> Markup {
    html!(
        section id=(SUMMARY_VIEW_ID) class="w-full"
        {
            p class=(AMOUNT_RED_STYLE) { (FETCH_ERROR_MESSAGE) }
        }
    )
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use axum_htmx::HxRequest;
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        credentials::Credentials,
        expense::{
            FETCH_ERROR_MESSAGE,
            summary::GroupBy,
            test_utils::{FakeBackend, expense_json},
        },
        test_utils::{assert_valid_html, parse_html_document, parse_html_fragment},
    };

    use super::{SummaryQuery, get_summary_page};

    async fn backend_with_expenses() -> FakeBackend {
        let backend = FakeBackend::start().await;
        backend.set_expenses(vec![
            expense_json(100.0, "2024-01-15", Some("Salary")),
            expense_json(-40.0, "2024-01-16", Some("Food")),
            expense_json(-10.0, "2024-02-17", Some("Food")),
        ]);
        backend
    }

    async fn get_fragment(backend: &FakeBackend, group_by: GroupBy) -> Html {
        let response = get_summary_page(
            State(backend.client()),
            HxRequest(true),
            Credentials::default(),
            Query(SummaryQuery { group_by }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        parse_html_fragment(response).await
    }

    fn text_of(html: &Html, selector: &str) -> String {
        html.select(&Selector::parse(selector).unwrap())
            .next()
            .unwrap_or_else(|| panic!("No element matches {selector}"))
            .text()
            .collect::<String>()
    }

    /// The rows of the grouping that is currently shown.
    fn table_rows(html: &Html) -> Vec<Vec<String>> {
        let row_selector = Selector::parse("[data-group-by]:not([hidden]) tbody tr").unwrap();
        let cell_selector = Selector::parse("th, td").unwrap();

        html.select(&row_selector)
            .map(|row: ElementRef| {
                row.select(&cell_selector)
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect()
            })
            .collect()
    }

    #[tokio::test]
    async fn shows_balance_and_spending() {
        let backend = backend_with_expenses().await;

        let html = get_fragment(&backend, GroupBy::Category).await;

        assert_valid_html(&html);
        assert_eq!(text_of(&html, "#balance").trim(), "Balance: $50.00");
        assert_eq!(text_of(&html, "#spending").trim(), "Spending: -$50.00");
    }

    #[tokio::test]
    async fn groups_by_category() {
        let backend = backend_with_expenses().await;

        let html = get_fragment(&backend, GroupBy::Category).await;

        assert_eq!(
            table_rows(&html),
            vec![
                vec!["Salary", "$100.00", "$0.00"],
                vec!["Food", "$0.00", "-$50.00"],
            ]
        );
        assert_eq!(text_of(&html, "[data-group-by]:not([hidden]) thead th").trim(), "Category");
        assert!(
            text_of(&html, "[data-group-by]:not([hidden]) script").contains("Spent by Category")
        );
    }

    #[tokio::test]
    async fn groups_by_month() {
        let backend = backend_with_expenses().await;

        let html = get_fragment(&backend, GroupBy::Month).await;

        assert_eq!(
            table_rows(&html),
            vec![
                vec!["January 2024", "$100.00", "-$40.00"],
                vec!["February 2024", "$0.00", "-$10.00"],
            ]
        );
        assert_eq!(text_of(&html, "[data-group-by]:not([hidden]) thead th").trim(), "Month");
        assert!(
            text_of(&html, "[data-group-by]:not([hidden]) script").contains("Spent by Month")
        );
    }

    #[tokio::test]
    async fn group_by_select_switches_groupings_in_place() {
        let backend = backend_with_expenses().await;

        let html = get_fragment(&backend, GroupBy::Month).await;

        let select = html
            .select(&Selector::parse("select[name=group_by]").unwrap())
            .next()
            .expect("group by select missing");
        assert!(select.value().attr("data-group-by-select").is_some());
        assert!(select.value().attr("hx-get").is_none());

        let selected = html
            .select(&Selector::parse("option[selected]").unwrap())
            .next()
            .expect("no option selected");
        assert_eq!(selected.value().attr("value"), Some("month"));

        let groupings: Vec<_> = html
            .select(&Selector::parse("[data-group-by]").unwrap())
            .map(|grouping| {
                (
                    grouping.value().attr("data-group-by").unwrap_or_default(),
                    grouping.value().attr("hidden").is_some(),
                )
            })
            .collect();
        assert_eq!(groupings, [("category", true), ("month", false)]);
    }

    #[tokio::test]
    async fn both_groupings_come_from_one_backend_request() {
        let backend = backend_with_expenses().await;

        let html = get_fragment(&backend, GroupBy::Category).await;

        assert_eq!(backend.expense_requests(), 1);

        let labels: Vec<String> = html
            .select(&Selector::parse("[data-group-by=month] tbody th[scope=row]").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(labels, ["January 2024", "February 2024"]);

        let charts = html.select(&Selector::parse("[data-chart]").unwrap()).count();
        assert_eq!(charts, 2);
    }

    #[tokio::test]
    async fn no_chart_without_spending() {
        let backend = FakeBackend::start().await;
        backend.set_expenses(vec![expense_json(10.0, "2024-01-15", Some("Salary"))]);

        let html = get_fragment(&backend, GroupBy::Category).await;

        assert!(
            html.select(&Selector::parse("[data-chart]").unwrap())
                .next()
                .is_none()
        );
        assert!(html.html().contains("No spending to show."));
    }

    #[tokio::test]
    async fn shows_error_message_when_fetch_fails() {
        let backend = FakeBackend::start().await;
        backend.set_failing(true);

        let html = get_fragment(&backend, GroupBy::Category).await;

        assert_eq!(text_of(&html, "#summary-view").trim(), FETCH_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn full_page_loads_chart_library() {
        let backend = backend_with_expenses().await;

        let response = get_summary_page(
            State(backend.client()),
            HxRequest(false),
            Credentials::default(),
            Query(SummaryQuery::default()),
        )
        .await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("script[src*=echarts]").unwrap())
                .next()
                .is_some()
        );
        assert!(html.select(&Selector::parse("nav").unwrap()).next().is_some());
    }
}
