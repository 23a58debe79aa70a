//! The spending donut chart shown on the summary view.
//!
//! The chart is generated as an ECharts configuration with `charming` and
//! rendered as a container div plus an inline script that initializes the
//! chart. The script is inline rather than in the page head so that the chart
//! also works when the summary is swapped into the home page by htmx.

use charming::{
    Chart,
    component::{Legend, Title},
    datatype::DataPointItem,
    element::{ItemStyle, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::expense::summary::{ChartSlice, GroupBy};

/// The ECharts bundle, loaded by every page that can show the summary.
pub const ECHARTS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub(crate) struct SummaryChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: String,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

impl SummaryChart {
    pub(crate) fn new(slices: &[ChartSlice], group_by: GroupBy) -> Self {
        Self {
            id: format!("spending-chart-{}", group_by.as_query_value()),
            options: spending_chart(slices, group_by).to_string(),
        }
    }
}

/// The chart title for `group_by`.
pub fn chart_title(group_by: GroupBy) -> &'static str {
    match group_by {
        GroupBy::Category => "Spent by Category",
        GroupBy::Month => "Spent by Month",
    }
}

/// Renders the chart container followed by the script that draws the chart.
///
/// Resizing and theme changes are handled once for every chart by
/// `static/app.js`, so the script only draws.
pub(crate) fn chart_view(chart: &SummaryChart) -> Markup {
    html!(
        div
            id=(chart.id)
            data-chart
            class="min-h-[380px] w-full rounded dark:bg-gray-100"
        {}

        script { (chart_script(chart)) }
    )
}

/// Make `json` safe to embed in a `<script>` element.
///
/// Category titles come from the backend, so a title such as `</script>`
/// must not be able to close the element. `<` only appears inside JSON
/// strings, where `\u003c` decodes to the same character.
fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

fn chart_script(chart: &SummaryChart) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            if (!chartDom || typeof echarts === "undefined") {{
                return;
            }}

            const isDarkMode = window.matchMedia('(prefers-color-scheme: dark)').matches;
            const chart = echarts.getInstanceByDom(chartDom)
                || echarts.init(chartDom, isDarkMode ? 'dark' : null);
            chart.setOption({}, true);
        }})();"#,
        chart.id,
        escape_script_json(&chart.options)
    ))
}

fn spending_chart(slices: &[ChartSlice], group_by: GroupBy) -> Chart {
    let data: Vec<DataPointItem> = slices
        .iter()
        .map(|slice| {
            DataPointItem::new(slice.value)
                .name(slice.name.clone())
                .item_style(ItemStyle::new().color(slice.color))
        })
        .collect();

    Chart::new()
        .title(Title::new().text(chart_title(group_by)).left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name(chart_title(group_by))
                .radius(vec!["40%", "70%"])
                .item_style(ItemStyle::new().border_radius(4))
                .label(Label::new().show(true).formatter("{b}"))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::expense::summary::{CHART_PALETTE, ChartSlice, GroupBy};

    use super::{SummaryChart, chart_title, chart_view};

    fn slices() -> Vec<ChartSlice> {
        vec![
            ChartSlice {
                name: "Food".to_owned(),
                value: 50.0,
                color: CHART_PALETTE[0],
            },
            ChartSlice {
                name: "Rent".to_owned(),
                value: 700.0,
                color: CHART_PALETTE[1],
            },
        ]
    }

    #[test]
    fn title_depends_on_grouping() {
        assert_eq!(chart_title(GroupBy::Category), "Spent by Category");
        assert_eq!(chart_title(GroupBy::Month), "Spent by Month");
    }

    #[test]
    fn options_contain_slices_and_colors() {
        let chart = SummaryChart::new(&slices(), GroupBy::Month);

        assert!(chart.options.contains("Spent by Month"));
        assert!(chart.options.contains("\"Food\""));
        assert!(chart.options.contains("\"Rent\""));
        assert!(chart.options.contains(CHART_PALETTE[0]));
        assert!(chart.options.contains(CHART_PALETTE[1]));
        assert!(chart.options.contains("40%"));
        assert!(chart.options.contains("70%"));
    }

    #[test]
    fn view_renders_container_and_script() {
        let chart = SummaryChart::new(&slices(), GroupBy::Category);

        let html = Html::parse_fragment(&chart_view(&chart).into_string());

        let container = html
            .select(&Selector::parse("#spending-chart-category[data-chart]").unwrap())
            .next();
        assert!(container.is_some(), "chart container missing");

        let script = html
            .select(&Selector::parse("script").unwrap())
            .next()
            .expect("chart script missing")
            .inner_html();
        assert!(script.contains("echarts.init"));
        assert!(script.contains("Spent by Category"));
    }

    #[test]
    fn each_grouping_has_its_own_container() {
        let by_category = SummaryChart::new(&slices(), GroupBy::Category);
        let by_month = SummaryChart::new(&slices(), GroupBy::Month);

        assert_ne!(by_category.id, by_month.id);
    }

    #[test]
    fn titles_cannot_close_the_script_element() {
        let chart = SummaryChart::new(
            &[ChartSlice {
                name: "</script><script>alert(1)</script>".to_owned(),
                value: 10.0,
                color: CHART_PALETTE[0],
            }],
            GroupBy::Category,
        );

        let markup = chart_view(&chart).into_string();

        assert!(!markup.contains("</script><script>"));
        assert_eq!(markup.matches("</script>").count(), 1);
        assert!(markup.contains("\\u003c/script>\\u003cscript>alert(1)"));
    }

    #[test]
    fn script_does_not_register_window_listeners() {
        let chart = SummaryChart::new(&slices(), GroupBy::Month);

        let markup = chart_view(&chart).into_string();

        assert!(!markup.contains("addEventListener"));
    }
}
