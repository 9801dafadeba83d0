//! Sample spec catalog.
//!
//! A [`SpecProducer`] serving a fixed set of chart shapes that together cover
//! the whole contract: built-in and custom chart types, explicit dimensions,
//! opaque options pass-through, and grouped rows that exercise the pivot.
//! Used by the demo binary and as integration fixture data; a real host
//! replaces this with its own producer.

use serde_json::json;

use crate::api::SpecProducer;
use crate::core::{ChartSpec, ChartType, DataRow, EncodeMapping, Value, row};
use crate::error::ChartResult;

#[derive(Debug, Default)]
pub struct SampleCatalog;

impl SpecProducer for SampleCatalog {
    fn build_all(&self) -> ChartResult<Vec<ChartSpec>> {
        Ok(vec![
            weather_line()?,
            revenue_bar()?,
            market_share_pie()?,
            scatter_distribution()?,
            app_downloads_line()?,
            gdp_horizontal_bar()?,
            stacked_revenue_bar()?,
            stacked_region_sales()?,
            normalized_revenue_bar()?,
            kpi_gauge_ring()?,
        ])
    }
}

fn weather_line() -> ChartResult<ChartSpec> {
    let rows = [
        ("08:00", 18.2),
        ("10:00", 22.5),
        ("12:00", 26.1),
        ("14:00", 28.4),
        ("16:00", 25.7),
        ("18:00", 21.3),
        ("20:00", 17.9),
    ]
    .into_iter()
    .map(|(time, temp)| row([("time", Value::text(time)), ("temp", Value::number(temp))]))
    .collect();

    ChartSpec::builder("weather_chart", rows)
        .title("Temperature trend")
        .chart_type(ChartType::Line)
        .encode(EncodeMapping::xy("time", "temp"))
        .build()
}

fn revenue_bar() -> ChartResult<ChartSpec> {
    let rows = [
        ("Jan", 8500.0),
        ("Feb", 9200.0),
        ("Mar", 11_400.0),
        ("Apr", 10_100.0),
        ("May", 13_300.0),
        ("Jun", 15_600.0),
    ]
    .into_iter()
    .map(|(date, revenue)| row([("date", Value::text(date)), ("revenue", Value::number(revenue))]))
    .collect();

    ChartSpec::builder("revenue_chart", rows)
        .title("Monthly revenue")
        .chart_type(ChartType::Bar)
        .encode(EncodeMapping::xy("date", "revenue"))
        .options(json!({ "color": ["#22d3ee", "#6366f1"] }))
        .build()
}

fn market_share_pie() -> ChartResult<ChartSpec> {
    let rows = [
        ("Mobile", 43.0),
        ("Desktop", 31.0),
        ("Tablet", 12.0),
        ("Smart TV", 9.0),
        ("Other", 5.0),
    ]
    .into_iter()
    .map(|(category, share)| {
        row([("category", Value::text(category)), ("share", Value::number(share))])
    })
    .collect();

    ChartSpec::builder("market_pie_chart", rows)
        .title("Device market share")
        .chart_type(ChartType::Pie)
        .encode(EncodeMapping::item_value("category", "share"))
        .build()
}

fn scatter_distribution() -> ChartResult<ChartSpec> {
    let rows = [
        (1.2, 4.5),
        (2.3, 6.1),
        (3.1, 3.2),
        (4.8, 7.4),
        (2.9, 5.5),
        (5.3, 8.2),
        (1.8, 2.9),
    ]
    .into_iter()
    .map(|(x, y)| row([("x_val", Value::number(x)), ("y_val", Value::number(y))]))
    .collect();

    ChartSpec::builder("scatter_chart", rows)
        .title("Point distribution")
        .chart_type(ChartType::Scatter)
        .encode(EncodeMapping::xy("x_val", "y_val"))
        .build()
}

fn app_downloads_line() -> ChartResult<ChartSpec> {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let ios = [120.0, 135.0, 110.0, 148.0, 162.0, 175.0];
    let android = [95.0, 118.0, 99.0, 130.0, 155.0, 168.0];
    let rows = months
        .iter()
        .zip(ios.iter().zip(android.iter()))
        .map(|(month, (ios, android))| {
            row([
                ("month", Value::text(*month)),
                ("ios", Value::number(*ios)),
                ("android", Value::number(*android)),
            ])
        })
        .collect();

    // Multi-series charts name each series' encode explicitly via options.
    ChartSpec::builder("app_download_chart", rows)
        .title("App downloads: iOS vs Android")
        .chart_type(ChartType::Line)
        .dimensions(vec!["month".to_owned(), "ios".to_owned(), "android".to_owned()])
        .encode(EncodeMapping::new().with_role("x", "month"))
        .options(json!({
            "series": [
                { "type": "line", "name": "iOS", "encode": { "x": "month", "y": "ios" } },
                { "type": "line", "name": "Android", "encode": { "x": "month", "y": "android" } }
            ]
        }))
        .build()
}

fn gdp_horizontal_bar() -> ChartResult<ChartSpec> {
    let rows = [
        ("Taiwan", 790.0),
        ("Singapore", 465.0),
        ("HongKong", 359.0),
        ("Japan", 4230.0),
        ("Korea", 1710.0),
    ]
    .into_iter()
    .map(|(country, gdp)| row([("country", Value::text(country)), ("gdp", Value::number(gdp))]))
    .collect();

    // Horizontal bars swap the x/y roles and flip the axes via options.
    ChartSpec::builder("gdp_bar_chart", rows)
        .title("GDP ranking")
        .chart_type(ChartType::Bar)
        .encode(EncodeMapping::xy("gdp", "country"))
        .options(json!({
            "xAxis": { "type": "value" },
            "yAxis": { "type": "category" }
        }))
        .build()
}

fn channel_revenue_rows() -> Vec<DataRow> {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let channels = [
        ("Online", [5000.0, 6200.0, 7100.0, 6800.0, 8300.0, 9400.0]),
        ("Offline", [3500.0, 3000.0, 3800.0, 4100.0, 3700.0, 4500.0]),
        ("App", [1800.0, 2100.0, 2500.0, 2900.0, 3200.0, 3800.0]),
    ];
    let mut rows = Vec::with_capacity(months.len() * channels.len());
    for (channel, revenues) in channels {
        for (month, revenue) in months.iter().zip(revenues) {
            rows.push(row([
                ("date", Value::text(*month)),
                ("channel", Value::text(channel)),
                ("revenue", Value::number(revenue)),
            ]));
        }
    }
    rows
}

fn stacked_revenue_bar() -> ChartResult<ChartSpec> {
    ChartSpec::builder("stacked_bar_chart", channel_revenue_rows())
        .title("Monthly revenue by channel")
        .chart_type(ChartType::Bar)
        .encode(EncodeMapping::xy("date", "revenue"))
        .group_field("channel")
        .build()
}

fn stacked_region_sales() -> ChartResult<ChartSpec> {
    let months = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
    let regions = [
        ("North", [820.0, 932.0, 1100.0, 934.0, 1290.0, 1330.0]),
        ("Central", [620.0, 710.0, 890.0, 770.0, 1010.0, 1150.0]),
        ("South", [440.0, 530.0, 680.0, 590.0, 780.0, 910.0]),
    ];
    let mut rows = Vec::with_capacity(months.len() * regions.len());
    for (region, sales) in regions {
        for (month, amount) in months.iter().zip(sales) {
            rows.push(row([
                ("date", Value::text(*month)),
                ("region", Value::text(region)),
                ("sales", Value::number(amount)),
            ]));
        }
    }

    // Stacked area line: same grouped-row shape as the stacked bar, but the
    // group field is a different column.
    ChartSpec::builder("stacked_line_chart", rows)
        .title("Regional sales")
        .chart_type(ChartType::Line)
        .encode(EncodeMapping::xy("date", "sales"))
        .group_field("region")
        .build()
}

fn normalized_revenue_bar() -> ChartResult<ChartSpec> {
    // Same flat rows; the "bar-normalized" preset on the surface side turns
    // the stacked series into percentages.
    ChartSpec::builder("normalized_bar_chart", channel_revenue_rows())
        .title("Channel share of revenue")
        .chart_type(ChartType::Custom("bar-normalized".to_owned()))
        .encode(EncodeMapping::xy("date", "revenue"))
        .group_field("channel")
        .build()
}

fn kpi_gauge_ring() -> ChartResult<ChartSpec> {
    let rows = [
        ("Monthly target", 85.0),
        ("Quarterly target", 63.0),
        ("Yearly target", 42.0),
    ]
    .into_iter()
    .map(|(name, value)| row([("name", Value::text(name)), ("value", Value::number(value))]))
    .collect();

    ChartSpec::builder("gauge_ring_chart", rows)
        .title("KPI attainment")
        .chart_type(ChartType::Custom("gauge-ring".to_owned()))
        .encode(EncodeMapping::item_value("name", "value"))
        .build()
}
