//! A fake expense backend served over real HTTP for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::expense::{ExpenseClient, client::DEFAULT_REQUEST_TIMEOUT};

#[derive(Default)]
struct BackendData {
    expenses: Vec<Value>,
    categories: Vec<Value>,
    subcategories: HashMap<String, Vec<Value>>,
    created: Vec<Value>,
    failing: bool,
    bare_expenses: bool,
    last_cookie: Option<String>,
    last_expenses_query: Option<String>,
    expense_requests: usize,
}

type SharedData = Arc<Mutex<BackendData>>;

/// An expense backend listening on an ephemeral local port.
///
/// The server task is dropped with the tokio runtime at the end of the test.
pub(crate) struct FakeBackend {
    base_url: String,
    data: SharedData,
}

impl FakeBackend {
    pub(crate) async fn start() -> Self {
        let data = SharedData::default();
        let router = Router::new()
            .route("/api/expenses", get(list_expenses).post(create_expense))
            .route("/api/categories", get(list_categories))
            .route("/api/subcategories", get(list_subcategories))
            .with_state(data.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Could not bind fake backend");
        let address = listener
            .local_addr()
            .expect("Could not get fake backend address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake backend stopped unexpectedly");
        });

        Self {
            base_url: format!("http://{address}/api"),
            data,
        }
    }

    pub(crate) fn client(&self) -> ExpenseClient {
        ExpenseClient::new(&self.base_url, DEFAULT_REQUEST_TIMEOUT)
            .expect("Could not create expense client")
    }

    pub(crate) fn set_expenses(&self, expenses: Vec<Value>) {
        self.lock().expenses = expenses;
    }

    pub(crate) fn set_wrap_expenses_in_envelope(&self, wrap: bool) {
        self.lock().bare_expenses = !wrap;
    }

    pub(crate) fn add_category(&self, id: &str, title: &str, subcategories: &[(&str, &str)]) {
        let mut data = self.lock();
        data.categories.push(json!({"id": id, "title": title}));
        data.subcategories.insert(
            id.to_owned(),
            subcategories
                .iter()
                .map(|(id, title)| json!({"id": id, "title": title}))
                .collect(),
        );
    }

    /// Make every endpoint respond with 500 Internal Server Error.
    pub(crate) fn set_failing(&self, failing: bool) {
        self.lock().failing = failing;
    }

    /// The bodies of the expenses created so far.
    pub(crate) fn created(&self) -> Vec<Value> {
        self.lock().created.clone()
    }

    pub(crate) fn last_cookie(&self) -> Option<String> {
        self.lock().last_cookie.clone()
    }

    pub(crate) fn last_expenses_query(&self) -> Option<String> {
        self.lock().last_expenses_query.clone()
    }

    /// How many times the expense list has been requested.
    pub(crate) fn expense_requests(&self) -> usize {
        self.lock().expense_requests
    }

    fn lock(&self) -> MutexGuard<'_, BackendData> {
        self.data.lock().expect("Could not lock fake backend data")
    }
}

/// An expense with an optional embedded category, as sent by the backend.
pub(crate) fn expense_json(amount: f64, date: &str, category: Option<&str>) -> Value {
    json!({
        "id": format!("{amount}-{date}"),
        "amount": amount,
        "description": format!("Expense on {date}"),
        "date": date,
        "category": category.map(|title| json!({"id": title.to_lowercase(), "title": title})),
        "subCategory": category.map(|title| json!({"id": "sub", "title": format!("{title} sub")})),
    })
}

fn record_cookie(data: &mut BackendData, headers: &HeaderMap) {
    data.last_cookie = headers
        .get(COOKIE)
        .and_then(|cookie| cookie.to_str().ok())
        .map(str::to_owned);
}

async fn list_expenses(
    State(data): State<SharedData>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    let mut data = data.lock().unwrap();
    record_cookie(&mut data, &headers);
    data.last_expenses_query = query;
    data.expense_requests += 1;

    if data.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    if data.bare_expenses {
        Json(Value::Array(data.expenses.clone())).into_response()
    } else {
        Json(json!({"docs": data.expenses, "totalDocs": data.expenses.len()})).into_response()
    }
}

async fn create_expense(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = data.lock().unwrap();
    record_cookie(&mut data, &headers);

    if data.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    data.created.push(body.clone());
    let mut created = body;
    created["id"] = json!(format!("e{}", data.created.len()));

    (StatusCode::CREATED, Json(created)).into_response()
}

async fn list_categories(State(data): State<SharedData>, headers: HeaderMap) -> Response {
    let mut data = data.lock().unwrap();
    record_cookie(&mut data, &headers);

    if data.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    Json(json!({"docs": data.categories})).into_response()
}

#[derive(Deserialize)]
struct SubcategoryQuery {
    category: String,
}

async fn list_subcategories(
    State(data): State<SharedData>,
    headers: HeaderMap,
    Query(query): Query<SubcategoryQuery>,
) -> Response {
    let mut data = data.lock().unwrap();
    record_cookie(&mut data, &headers);

    if data.failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let docs = data
        .subcategories
        .get(&query.category)
        .cloned()
        .unwrap_or_default();

    Json(json!({"docs": docs})).into_response()
}
