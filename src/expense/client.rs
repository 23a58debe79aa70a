//! The HTTP client for the expense backend.
//!
//! Every read failure is reported as [Error::RemoteFetchFailed] and a failed
//! create as [Error::RemoteWriteFailed]. Requests are attempted exactly once.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{
    Error,
    credentials::Credentials,
    expense::models::{Category, Collection, Expense, NewExpense, Subcategory},
};

/// How long to wait for the backend when no other timeout is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The base URL of the backend API when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api";

/// Reads and writes expense records through the backend's REST API.
///
/// Cloning is cheap, clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ExpenseClient {
    http: Client,
    base_url: String,
}

impl ExpenseClient {
    /// Create a client for the API rooted at `base_url`, e.g. "http://localhost:3000/api".
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be created.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        Url::parse(base_url).map_err(|error| {
            tracing::error!("Could not parse backend URL {base_url}: {error}");
            Error::InvalidBackendUrl(base_url.to_owned())
        })?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::HttpClientBuildFailed(error.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// The base URL of the backend API, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get every expense.
    ///
    /// If `populate` is true, the backend is asked to embed the category and
    /// subcategory records instead of sending their IDs.
    pub async fn list_expenses(
        &self,
        credentials: &Credentials,
        populate: bool,
    ) -> Result<Vec<Expense>, Error> {
        let mut query = vec![("limit", "0")];

        if populate {
            query.insert(0, ("populate", "category,subCategory"));
        }

        self.get_collection(credentials, "expenses", &query).await
    }

    /// Get every category.
    pub async fn list_categories(&self, credentials: &Credentials) -> Result<Vec<Category>, Error> {
        self.get_collection(credentials, "categories", &[]).await
    }

    /// Get the subcategories that belong to the category with `category_id`.
    pub async fn list_subcategories(
        &self,
        credentials: &Credentials,
        category_id: &str,
    ) -> Result<Vec<Subcategory>, Error> {
        self.get_collection(
            credentials,
            "subcategories",
            &[("category", category_id)],
        )
        .await
    }

    /// Create an expense and return the record stored by the backend.
    pub async fn create_expense(
        &self,
        credentials: &Credentials,
        expense: &NewExpense,
    ) -> Result<Expense, Error> {
        let url = self.url("expenses");
        tracing::debug!("POST {url}");

        let response = credentials
            .apply(self.http.post(&url).json(expense))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| {
                tracing::error!("POST {url} failed: {error}");
                Error::RemoteWriteFailed(error.to_string())
            })?;

        response.json::<Expense>().await.map_err(|error| {
            tracing::error!("Could not decode the expense created by POST {url}: {error}");
            Error::RemoteWriteFailed(error.to_string())
        })
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        credentials: &Credentials,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let url = self.url(path);
        tracing::debug!("GET {url} with query {query:?}");

        let response = credentials
            .apply(self.http.get(&url).query(query))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| {
                tracing::error!("GET {url} failed: {error}");
                Error::RemoteFetchFailed(error.to_string())
            })?;

        let collection = response.json::<Collection<T>>().await.map_err(|error| {
            tracing::error!("Could not decode the response of GET {url}: {error}");
            Error::RemoteFetchFailed(error.to_string())
        })?;

        Ok(collection.into_vec())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}
