//! Defines the route handler and form for creating a new expense.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use maud::{Markup, html};

use crate::{
    credentials::Credentials,
    endpoints,
    expense::{
        ExpenseClient, models::Category, subcategories_endpoint::subcategory_options,
    },
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        loading_spinner, page,
    },
};

/// The ID of the expense form, the create endpoint replaces the form by this ID.
pub(crate) const EXPENSE_FORM_ID: &str = "expense-form";

/// Renders the form for creating an expense.
///
/// htmx requests get only the form, other requests get the full page.
pub async fn get_create_expense_page(
    State(client): State<ExpenseClient>,
    HxRequest(is_htmx_request): HxRequest,
    credentials: Credentials,
) -> Response {
    let categories = load_categories(&client, &credentials).await;
    let form = expense_form_view(&categories);

    if is_htmx_request {
        form.into_response()
    } else {
        page("New Expense", endpoints::NEW_EXPENSE_VIEW, &[], &form).into_response()
    }
}

/// Get the categories for the category select.
///
/// A failed fetch is only logged, the form is then shown without categories.
pub(crate) async fn load_categories(
    client: &ExpenseClient,
    credentials: &Credentials,
) -> Vec<Category> {
    client
        .list_categories(credentials)
        .await
        .unwrap_or_else(|error| {
            tracing::error!("Could not fetch categories for the expense form: {error}");
            Vec::new()
        })
}

/// An empty expense form.
///
/// The submit button starts disabled, `static/app.js` enables it once every
/// field has a value.
pub(crate) fn expense_form_view(categories: &[Category]) -> Markup {
    let spinner = loading_spinner();

    html! {
        div id=(EXPENSE_FORM_ID) class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target={"#" (EXPENSE_FORM_ID)}
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                data-require-complete
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Expense" }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        placeholder="0.00"
                        required
                        data-nonzero
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select
                        name="category"
                        id="category"
                        required
                        hx-get=(endpoints::SUBCATEGORIES_API)
                        hx-trigger="change"
                        hx-target="#sub_category"
                        hx-swap="innerHTML"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "Select Category" }

                        @for category in categories {
                            option value=(category.id) { (category.title) }
                        }
                    }
                }

                div
                {
                    label for="sub_category" class=(FORM_LABEL_STYLE) { "Subcategory" }

                    select
                        name="sub_category"
                        id="sub_category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (subcategory_options(&[]))
                    }
                }

                button
                    type="submit"
                    id="submit-button"
                    disabled
                    class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (spinner) }
                    " Create Expense"
                }
            }
        }
    }
}
