//! The home page, which shows the summary, the expense list and the expense
//! form together.

use maud::{Markup, html};

use crate::{
    endpoints,
    expense::{ECHARTS_SCRIPT_URL, EXPENSE_CREATED_EVENT},
    html::{HeadElement, lazy_section, page},
};

/// Display the home page.
///
/// Each section requests its own fragment once the page has loaded, so a
/// slow or failing section does not hold up the others. The summary and the
/// list reload after an expense is created.
pub async fn get_home_page() -> Markup {
    let content = html!(
        h1 class="text-2xl font-bold" { "Expense Dashboard" }

        (lazy_section("summary-section", endpoints::SUMMARY_VIEW, Some(EXPENSE_CREATED_EVENT)))
        (lazy_section("expense-list-section", endpoints::EXPENSES_VIEW, Some(EXPENSE_CREATED_EVENT)))
        (lazy_section("expense-form-section", endpoints::NEW_EXPENSE_VIEW, None))
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT_URL.to_owned())];

    page("Home", endpoints::ROOT, &scripts, &content)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{endpoints, expense::EXPENSE_CREATED_EVENT, test_utils::assert_valid_html};

    use super::get_home_page;

    #[tokio::test]
    async fn sections_load_their_own_fragments() {
        let html = Html::parse_document(&get_home_page().await.into_string());
        assert_valid_html(&html);

        let sections: Vec<_> = html
            .select(&Selector::parse("[hx-get]").unwrap())
            .filter(|element| element.value().attr("hx-trigger").is_some())
            .map(|element| {
                (
                    element.value().attr("hx-get").unwrap_or_default(),
                    element.value().attr("hx-trigger").unwrap_or_default(),
                )
            })
            .collect();

        let refresh_trigger = format!("load, {EXPENSE_CREATED_EVENT} from:body");
        assert_eq!(
            sections,
            [
                (endpoints::SUMMARY_VIEW, refresh_trigger.as_str()),
                (endpoints::EXPENSES_VIEW, refresh_trigger.as_str()),
                (endpoints::NEW_EXPENSE_VIEW, "load"),
            ]
        );
    }
}
