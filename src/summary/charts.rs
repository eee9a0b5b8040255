//! ECharts configuration for the month summary panel.
//!
//! - **Price ranges**: a bar chart of item counts per price range
//! - **Categories**: a doughnut chart of item counts per category

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, html};
use time::Month;

use crate::html::inline_script;

use super::models::MonthSummary;

/// A summary chart with its HTML container ID and ECharts configuration.
pub(super) struct SummaryChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the charts for `summary`.
pub(super) fn summary_charts(month: Month, summary: &MonthSummary) -> [SummaryChart; 2] {
    [
        SummaryChart {
            id: "price-range-chart",
            options: price_range_chart(month, summary).to_string(),
        },
        SummaryChart {
            id: "category-chart",
            options: category_chart(month, summary).to_string(),
        },
    ]
}

/// Renders the chart containers followed by the script that draws them.
///
/// The script runs wherever the markup is inserted, so the charts are drawn
/// both on a full page load and after an HTMX swap. It expects the ECharts
/// library to be loaded by the page.
pub(super) fn charts_view(charts: &[SummaryChart]) -> Markup {
    let script = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom || typeof echarts === "undefined") {{
                        return;
                    }}
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(
        div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
        {
            @for chart in charts {
                div
                    id=(chart.id)
                    class="min-h-[380px] rounded dark:bg-gray-100"
                {}
            }
        }

        (inline_script(&script))
    )
}

fn price_range_chart(month: Month, summary: &MonthSummary) -> Chart {
    let (labels, counts): (Vec<String>, Vec<f64>) = summary
        .price_ranges()
        .into_iter()
        .map(|(label, count)| (label.to_owned(), count as f64))
        .unzip();

    Chart::new()
        .title(
            Title::new()
                .text("Price Ranges")
                .subtext(format!("Items per price range in {month}")),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Items").data(counts))
}

fn category_chart(month: Month, summary: &MonthSummary) -> Chart {
    let data = summary
        .categories()
        .into_iter()
        .map(|(category, count)| (count as f64, category))
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Categories")
                .subtext(format!("Items per category in {month}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left(250).top("1%"))
        .series(
            Pie::new()
                .name("Items")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
