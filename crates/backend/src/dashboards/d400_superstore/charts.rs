use contracts::dashboards::d400_superstore::{
    CityBreakdownResponse, GeoResponse, GroupTotals, Metric, ProductDrilldownResponse,
    ProductTotalsResponse, RankingResponse,
};
use contracts::shared::figure::{
    Axis, BarTrace, ChoroplethTrace, ColorBar, Figure, Font, Geo, Layout, PieTrace, Title, Trace,
};

// Dark dashboard theme
pub const PLOT_BGCOLOR: &str = "#A9A9A9";
pub const PAPER_BGCOLOR: &str = "#000000";
pub const FONT_COLOR: &str = "#FFFFFF";
const X_TICK_ANGLE: i32 = -45;

/// Carto "Bluyl" sequential scale
const BLUYL: [&str; 7] = [
    "rgb(247, 254, 174)",
    "rgb(183, 230, 165)",
    "rgb(124, 203, 162)",
    "rgb(70, 174, 160)",
    "rgb(8, 144, 153)",
    "rgb(0, 113, 139)",
    "rgb(4, 82, 117)",
];

fn layout(title: Option<String>) -> Layout {
    Layout {
        title: title.map(Title::new),
        plot_bgcolor: PLOT_BGCOLOR.to_string(),
        paper_bgcolor: PAPER_BGCOLOR.to_string(),
        font: Font {
            color: FONT_COLOR.to_string(),
        },
        xaxis: None,
        yaxis: None,
        barmode: None,
        geo: None,
    }
}

fn bar_layout(title: Option<String>, y_label: &str) -> Layout {
    Layout {
        xaxis: Some(Axis {
            tickangle: Some(X_TICK_ANGLE),
            title: None,
        }),
        yaxis: Some(Axis {
            tickangle: None,
            title: Some(Title::new(y_label)),
        }),
        ..layout(title)
    }
}

fn metric_bar(groups: &[GroupTotals], metric: Metric, title: Option<String>) -> Figure {
    Figure {
        data: vec![Trace::Bar(BarTrace {
            x: groups.iter().map(|g| g.key.clone()).collect(),
            y: groups.iter().map(|g| g.value(metric)).collect(),
            name: None,
        })],
        layout: bar_layout(title, metric.as_str()),
    }
}

fn colorscale() -> Vec<(f64, String)> {
    let last = (BLUYL.len() - 1) as f64;
    BLUYL
        .iter()
        .enumerate()
        .map(|(i, colour)| (i as f64 / last, colour.to_string()))
        .collect()
}

/// Choropleth of the USA, coloured by the metric per state
pub fn choropleth(geo: &GeoResponse, metric: Metric) -> Figure {
    Figure {
        data: vec![Trace::Choropleth(ChoroplethTrace {
            locations: geo.states.iter().map(|g| g.key.clone()).collect(),
            z: geo.states.iter().map(|g| g.value(metric)).collect(),
            locationmode: "USA-states".to_string(),
            colorscale: colorscale(),
            colorbar: ColorBar {
                title: Title::new(metric.as_str()),
            },
        })],
        layout: Layout {
            geo: Some(Geo {
                scope: "usa".to_string(),
            }),
            ..layout(Some(metric.to_string()))
        },
    }
}

/// "state with most sales" style bar chart
pub fn region_top(ranking: &RankingResponse) -> Figure {
    let title = format!("{} with most {}", ranking.grouping, ranking.metric);
    metric_bar(&ranking.top, ranking.metric, Some(title))
}

/// "state with least sales" style bar chart
pub fn region_bottom(ranking: &RankingResponse) -> Figure {
    let title = format!("{} with least {}", ranking.grouping, ranking.metric);
    metric_bar(&ranking.bottom, ranking.metric, Some(title))
}

pub fn product_totals(totals: &ProductTotalsResponse) -> Figure {
    let title = format!("Product vs {}", totals.metric);
    metric_bar(&totals.products, totals.metric, Some(title))
}

pub fn product_top_cities(drilldown: &ProductDrilldownResponse) -> Figure {
    metric_bar(&drilldown.cities, drilldown.metric, None)
}

/// Profit and sales side by side per sub-category of a city
pub fn category_bars(breakdown: &CityBreakdownResponse) -> Figure {
    let x: Vec<String> = breakdown.categories.iter().map(|g| g.key.clone()).collect();
    let trace = |metric: Metric| {
        Trace::Bar(BarTrace {
            x: x.clone(),
            y: breakdown.categories.iter().map(|g| g.value(metric)).collect(),
            name: Some(metric.to_string()),
        })
    };

    Figure {
        data: vec![trace(Metric::Profit), trace(Metric::Sales)],
        layout: Layout {
            barmode: Some("group".to_string()),
            xaxis: Some(Axis {
                tickangle: Some(X_TICK_ANGLE),
                title: None,
            }),
            ..layout(None)
        },
    }
}

pub fn category_pie(breakdown: &CityBreakdownResponse, metric: Metric) -> Figure {
    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: breakdown.categories.iter().map(|g| g.key.clone()).collect(),
            values: breakdown.categories.iter().map(|g| g.value(metric)).collect(),
        })],
        layout: layout(Some("Category".to_string())),
    }
}

pub fn segment_pie(breakdown: &CityBreakdownResponse) -> Figure {
    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: breakdown.segments.iter().map(|s| s.segment.clone()).collect(),
            values: breakdown.segments.iter().map(|s| s.count as f64).collect(),
        })],
        layout: layout(Some("Customer segment".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d400_superstore::{Grouping, SegmentShare};

    fn totals(key: &str, sales: f64, profit: f64) -> GroupTotals {
        GroupTotals {
            key: key.to_string(),
            sales,
            profit,
        }
    }

    fn title(figure: &Figure) -> Option<&str> {
        figure.layout.title.as_ref().map(|t| t.text.as_str())
    }

    #[test]
    fn test_region_titles_follow_selection() {
        let ranking = RankingResponse {
            metric: Metric::Profit,
            grouping: Grouping::City,
            top: vec![totals("Seattle", 10.0, 4.0)],
            bottom: vec![totals("Dallas", 1.0, -2.0)],
        };

        let top = region_top(&ranking);
        assert_eq!(title(&top), Some("city with most profit"));
        match &top.data[0] {
            Trace::Bar(bar) => {
                assert_eq!(bar.x, ["Seattle"]);
                assert_eq!(bar.y, [4.0]);
            }
            other => panic!("unexpected trace: {other:?}"),
        }
        assert_eq!(title(&region_bottom(&ranking)), Some("city with least profit"));
    }

    #[test]
    fn test_choropleth_uses_state_codes_and_theme() {
        let geo = GeoResponse {
            states: vec![totals("CA", 100.0, 20.0), totals("TX", 50.0, -3.0)],
        };
        let figure = choropleth(&geo, Metric::Sales);

        assert_eq!(title(&figure), Some("sales"));
        assert_eq!(figure.layout.paper_bgcolor, PAPER_BGCOLOR);
        assert_eq!(figure.layout.geo.as_ref().unwrap().scope, "usa");
        match &figure.data[0] {
            Trace::Choropleth(c) => {
                assert_eq!(c.locations, ["CA", "TX"]);
                assert_eq!(c.z, [100.0, 50.0]);
                assert_eq!(c.locationmode, "USA-states");
                assert_eq!(c.colorscale.first().unwrap().0, 0.0);
                assert_eq!(c.colorscale.last().unwrap().0, 1.0);
            }
            other => panic!("unexpected trace: {other:?}"),
        }
    }

    #[test]
    fn test_category_bars_group_profit_and_sales() {
        let breakdown = CityBreakdownResponse {
            city: "Los Angeles".to_string(),
            categories: vec![totals("Chairs", 731.94, 219.582)],
            segments: vec![SegmentShare {
                segment: "Consumer".to_string(),
                count: 3,
            }],
        };

        let bars = category_bars(&breakdown);
        assert_eq!(bars.layout.barmode.as_deref(), Some("group"));
        let names: Vec<_> = bars
            .data
            .iter()
            .map(|t| match t {
                Trace::Bar(b) => b.name.clone().unwrap_or_default(),
                _ => String::new(),
            })
            .collect();
        assert_eq!(names, ["profit", "sales"]);

        let pie = segment_pie(&breakdown);
        assert_eq!(title(&pie), Some("Customer segment"));
        match &pie.data[0] {
            Trace::Pie(p) => assert_eq!(p.values, [3.0]),
            other => panic!("unexpected trace: {other:?}"),
        }

        match &category_pie(&breakdown, Metric::Profit).data[0] {
            Trace::Pie(p) => assert_eq!(p.values, [219.582]),
            other => panic!("unexpected trace: {other:?}"),
        }
    }
}
