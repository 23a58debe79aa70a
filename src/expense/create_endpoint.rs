//! Defines the endpoint for creating a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of rejecting the whole form like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use maud::html;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    alert::Alert,
    credentials::Credentials,
    expense::{
        ExpenseClient,
        create_page::{expense_form_view, load_categories},
        models::NewExpense,
    },
};

/// The htmx event sent to the browser after an expense has been created.
///
/// The home page sections listen for it to reload their data.
pub const EXPENSE_CREATED_EVENT: &str = "expense-created";

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The client for the expense backend.
    pub client: ExpenseClient,
    /// How long the success and warning alerts stay on screen.
    pub alert_duration_ms: u64,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            client: state.client.clone(),
            alert_duration_ms: state.alert_duration_ms,
        }
    }
}

/// The form data for creating an expense.
///
/// Every field is optional so that an incomplete form can be answered with
/// a warning instead of a rejected request.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExpenseForm {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

impl ExpenseForm {
    /// Check that every field is filled in and build the create payload.
    ///
    /// # Errors
    /// Returns [Error::IncompleteExpense] if a field is missing or empty. An
    /// amount of zero or one that is not a number counts as empty.
    pub fn into_new_expense(self) -> Result<NewExpense, Error> {
        let amount = self
            .amount
            .as_deref()
            .and_then(|amount| amount.trim().parse::<f64>().ok())
            .filter(|amount| amount.is_finite() && *amount != 0.0)
            .ok_or(Error::IncompleteExpense)?;

        Ok(NewExpense {
            amount,
            description: required(self.description)?,
            date: required(self.date)?,
            category: required(self.category)?,
            sub_category: required(self.sub_category)?,
        })
    }
}

fn required(value: Option<String>) -> Result<String, Error> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(Error::IncompleteExpense)
}

/// A route handler for creating a new expense.
///
/// On success, responds with an empty form and a success alert. An
/// incomplete form is never sent to the backend.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    credentials: Credentials,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let new_expense = match form.into_new_expense() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            tracing::warn!("Rejected expense form: {error}");
            return error.into_alert_response(state.alert_duration_ms);
        }
    };

    let created = match state.client.create_expense(&credentials, &new_expense).await {
        Ok(created) => created,
        Err(error) => return error.into_alert_response(state.alert_duration_ms),
    };

    tracing::info!(
        "Created expense {}",
        created.id.as_deref().unwrap_or("without ID")
    );

    let categories = load_categories(&state.client, &credentials).await;
    let alert = Alert::Success {
        message: "Expense created successfully!".to_owned(),
        details: String::new(),
    };

    (
        [(HX_TRIGGER, EXPENSE_CREATED_EVENT)],
        html!(
            (expense_form_view(&categories))
            (alert.into_oob_html(state.alert_duration_ms))
        ),
    )
        .into_response()
}
