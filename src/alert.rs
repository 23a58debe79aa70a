//! Alert system for displaying success, warning and error messages to users.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the
//! `#alert-container` element defined in [crate::html::base]. Every alert
//! carries a `data-auto-dismiss` attribute which `static/app.js` uses to
//! remove the alert once the delay has elapsed.

use maud::{Markup, html};

/// How long an alert stays on screen when no other duration is configured.
pub const DEFAULT_ALERT_DURATION_MS: u64 = 3000;

/// An alert message with a headline and optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Warning { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert so that it removes itself after `duration_ms` milliseconds.
    pub fn into_html_with_duration(self, duration_ms: u64) -> Markup {
        let (container_style, role, message, details) = match self {
            Alert::Success { message, details } => (
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800",
                "status",
                message,
                details,
            ),
            Alert::Warning { message, details } => (
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800",
                "alert",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800",
                "alert",
                message,
                details,
            ),
        };

        html! {
            div
                class={"flex flex-col p-4 mb-4 text-sm border rounded-lg shadow " (container_style)}
                role=(role)
                data-auto-dismiss=(duration_ms)
            {
                span class="font-semibold" { (message) }

                @if !details.is_empty() {
                    p class="mt-1" { (details) }
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap into the alert container.
    ///
    /// Used when the main response body targets another element, e.g. the
    /// cleared expense form after a successful submission.
    pub fn into_oob_html(self, duration_ms: u64) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_html_with_duration(duration_ms))
            }
        }
    }
}
