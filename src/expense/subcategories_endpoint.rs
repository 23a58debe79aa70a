//! Supplies the subcategory options of the expense form when the category changes.

use axum::extract::{Query, State};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    credentials::Credentials,
    expense::{ExpenseClient, models::Subcategory},
};

/// The query parameters for the subcategory options.
#[derive(Debug, Default, Deserialize)]
pub struct SubcategoryQuery {
    /// The ID of the selected category, empty when no category is selected.
    #[serde(default)]
    pub category: Option<String>,
}

/// Render the `<option>` elements for the subcategories of the selected category.
///
/// There are no subcategories to choose from until a category is selected.
/// A failed fetch is logged and treated the same way.
pub async fn get_subcategory_options(
    State(client): State<ExpenseClient>,
    credentials: Credentials,
    Query(query): Query<SubcategoryQuery>,
) -> Markup {
    let category_id = query
        .category
        .as_deref()
        .filter(|category_id| !category_id.is_empty());

    let subcategories = match category_id {
        Some(category_id) => client
            .list_subcategories(&credentials, category_id)
            .await
            .unwrap_or_else(|error| {
                tracing::error!("Could not fetch subcategories for category {category_id}: {error}");
                Vec::new()
            }),
        None => Vec::new(),
    };

    subcategory_options(&subcategories)
}

/// The options of the subcategory select, starting with the empty placeholder.
pub(crate) fn subcategory_options(subcategories: &[Subcategory]) -> Markup {
    html!(
        option value="" { "Select Subcategory" }

        @for subcategory in subcategories {
            option value=(subcategory.id) { (subcategory.title) }
        }
    )
}
