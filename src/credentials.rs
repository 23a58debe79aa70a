//! Forwards the browser's credentials to the expense backend.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header::COOKIE, request::Parts},
};

/// The cookies sent by the browser, passed on to every backend request.
///
/// The backend authenticates the user from its own session cookie, so the
/// dashboard relays the `Cookie` header unchanged. Requests without cookies
/// are forwarded without one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials(Option<HeaderValue>);

impl Credentials {
    /// Credentials holding a raw `Cookie` header value.
    pub fn from_cookie(cookie: HeaderValue) -> Self {
        Self(Some(cookie))
    }

    /// Attach the credentials to an outgoing backend request.
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.0 {
            Some(cookie) => request.header(COOKIE, cookie.clone()),
            None => request,
        }
    }
}

impl<S> FromRequestParts<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(COOKIE)
            .cloned()
            .map(Self::from_cookie)
            .unwrap_or_default())
    }
}
