use contracts::dashboards::d400_superstore::{
    CategoryAmount, Choice, CitiesResponse, CityBreakdownResponse, GeoResponse, GroupTotals,
    Grouping, HeadlineResponse, Metric, OptionsResponse, ProductDrilldownResponse,
    ProductTotalsResponse, RankingResponse, SegmentShare, Selection, Tile,
};

use crate::shared::aggregate::{count_by, grand_totals, max_by_metric, sort_by_metric, sum_by};
use crate::shared::data::dataset::unique_in_order;
use crate::shared::data::SalesDataset;
use crate::shared::format::format_currency;

/// Bars in each ranking chart
pub const RANKING_SIZE: usize = 10;

/// Selector domains and the initial selection
pub fn get_options(dataset: &SalesDataset, defaults: &Selection) -> OptionsResponse {
    OptionsResponse {
        states: dataset.states(),
        products: dataset.products(),
        metrics: Metric::ALL.into_iter().map(Choice::from).collect(),
        groupings: Grouping::ALL.into_iter().map(Choice::from).collect(),
        defaults: defaults.clone(),
    }
}

/// Cities of a state in first-encountered order; empty for an unknown state
pub fn cities_for_state(dataset: &SalesDataset, state: &str) -> Vec<String> {
    unique_in_order(
        dataset
            .records()
            .iter()
            .filter(|r| r.state == state)
            .map(|r| r.city.as_str()),
    )
}

pub fn get_cities(dataset: &SalesDataset, state: &str) -> CitiesResponse {
    CitiesResponse {
        state: state.to_string(),
        cities: cities_for_state(dataset, state),
    }
}

/// Totals for a state plus its best-selling and most profitable sub-category
pub fn get_headline(dataset: &SalesDataset, state: &str) -> HeadlineResponse {
    let rows: Vec<_> = dataset.records().iter().filter(|r| r.state == state).collect();

    let (total_sales, total_profit) = grand_totals(rows.iter().copied());
    let categories = sum_by(rows.iter().copied(), |r| r.sub_category.as_str());

    let leader = |metric: Metric| {
        max_by_metric(&categories, metric).map(|g| CategoryAmount {
            sub_category: g.key.clone(),
            amount: g.value(metric),
        })
    };
    let top_selling = leader(Metric::Sales);
    let high_profit = leader(Metric::Profit);

    let tiles = vec![
        Tile {
            title: "Total Sales".to_string(),
            amount: format_currency(total_sales),
            caption: state.to_string(),
        },
        Tile {
            title: "Total Profit".to_string(),
            amount: format_currency(total_profit),
            caption: state.to_string(),
        },
        leader_tile("Top Selling Product", top_selling.as_ref()),
        leader_tile("Product With High Profit", high_profit.as_ref()),
    ];

    HeadlineResponse {
        state: state.to_string(),
        total_sales,
        total_profit,
        top_selling,
        high_profit,
        tiles,
    }
}

fn leader_tile(title: &str, leader: Option<&CategoryAmount>) -> Tile {
    match leader {
        Some(l) => Tile {
            title: title.to_string(),
            amount: format_currency(l.amount),
            caption: l.sub_category.clone(),
        },
        None => Tile {
            title: title.to_string(),
            amount: format_currency(0.0),
            caption: "n/a".to_string(),
        },
    }
}

/// Ten largest and ten smallest states (or cities) by the metric.
///
/// `top` is the tail of the ascending order, so the largest group comes last.
/// `bottom` is the head of the same order reversed, so the smallest comes last.
/// Both come from one ordering, which keeps them disjoint whenever there are
/// at least `2 * RANKING_SIZE` groups.
pub fn get_regional_ranking(
    dataset: &SalesDataset,
    metric: Metric,
    grouping: Grouping,
) -> RankingResponse {
    let records = dataset.records();
    let mut groups = match grouping {
        Grouping::State => sum_by(records, |r| r.state.as_str()),
        Grouping::City => sum_by(records, |r| r.city.as_str()),
    };
    sort_by_metric(&mut groups, metric, false);

    let split = groups.len().saturating_sub(RANKING_SIZE);
    let top = groups[split..].to_vec();
    let bottom = groups.iter().take(RANKING_SIZE).rev().cloned().collect();

    RankingResponse {
        metric,
        grouping,
        top,
        bottom,
    }
}

/// Sales and profit per state code, for the choropleth
pub fn get_state_totals(dataset: &SalesDataset) -> GeoResponse {
    GeoResponse {
        states: sum_by(dataset.records(), |r| r.state_abbrev),
    }
}

/// Sub-category sums and segment row counts for one city
pub fn get_city_breakdown(dataset: &SalesDataset, city: &str) -> CityBreakdownResponse {
    let rows: Vec<_> = dataset.records().iter().filter(|r| r.city == city).collect();

    let categories = sum_by(rows.iter().copied(), |r| r.sub_category.as_str());
    let segments = count_by(rows.iter().copied(), |r| r.segment.as_str())
        .into_iter()
        .map(|(segment, count)| SegmentShare { segment, count })
        .collect();

    CityBreakdownResponse {
        city: city.to_string(),
        categories,
        segments,
    }
}

/// Ten cities with the highest metric for one sub-category, highest first
pub fn get_product_drilldown(
    dataset: &SalesDataset,
    product: &str,
    metric: Metric,
) -> ProductDrilldownResponse {
    let rows = dataset.records().iter().filter(|r| r.sub_category == product);
    let mut cities = sum_by(rows, |r| r.city.as_str());
    sort_by_metric(&mut cities, metric, true);
    cities.truncate(RANKING_SIZE);

    ProductDrilldownResponse {
        product: product.to_string(),
        metric,
        cities,
    }
}

/// Every sub-category over the whole dataset, highest metric first
pub fn get_product_totals(dataset: &SalesDataset, metric: Metric) -> ProductTotalsResponse {
    let mut products: Vec<GroupTotals> = sum_by(dataset.records(), |r| r.sub_category.as_str());
    sort_by_metric(&mut products, metric, true);

    ProductTotalsResponse { metric, products }
}
