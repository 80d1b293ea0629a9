use serde::{Deserialize, Serialize};

use super::selection::{Grouping, Metric, Selection, SelectionChange};
use crate::shared::figure::Figure;

/// Summed sales and profit for one group key (state, city, sub-category...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotals {
    pub key: String,
    pub sales: f64,
    pub profit: f64,
}

impl GroupTotals {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales,
            Metric::Profit => self.profit,
        }
    }
}

/// Sub-category leading a headline tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub sub_category: String,
    pub amount: f64,
}

/// Summary tile: big formatted amount with a caption underneath
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub title: String,
    pub amount: String,
    pub caption: String,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// GET /api/d400/cities, /api/d400/headline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateQuery {
    pub state: String,
}

/// GET /api/d400/city-breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// GET /api/d400/ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub grouping: Grouping,
}

/// GET /api/d400/product-totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricQuery {
    #[serde(default)]
    pub metric: Metric,
}

/// GET /api/d400/product-drilldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuery {
    pub product: String,
    #[serde(default)]
    pub metric: Metric,
}

/// POST /api/d400/view
///
/// Without `selection` the server defaults are used; without `change` every
/// output slot is rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewRequest {
    #[serde(default)]
    pub selection: Option<Selection>,
    #[serde(default)]
    pub change: Option<SelectionChange>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Radio button entry: wire value plus display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

impl From<Metric> for Choice<Metric> {
    fn from(metric: Metric) -> Self {
        Self {
            value: metric,
            label: metric.label().to_string(),
        }
    }
}

impl From<Grouping> for Choice<Grouping> {
    fn from(grouping: Grouping) -> Self {
        Self {
            value: grouping,
            label: grouping.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsResponse {
    /// Unique states in first-encountered order
    pub states: Vec<String>,
    /// Unique sub-categories in first-encountered order
    pub products: Vec<String>,
    pub metrics: Vec<Choice<Metric>>,
    pub groupings: Vec<Choice<Grouping>>,
    pub defaults: Selection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub state: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineResponse {
    pub state: String,
    pub total_sales: f64,
    pub total_profit: f64,
    /// `None` when the state has no rows
    pub top_selling: Option<CategoryAmount>,
    pub high_profit: Option<CategoryAmount>,
    /// Total sales, total profit, top selling, high profit
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingResponse {
    pub metric: Metric,
    pub grouping: Grouping,
    /// Ten largest groups, ordered low to high
    pub top: Vec<GroupTotals>,
    /// Ten smallest groups, ordered high to low
    pub bottom: Vec<GroupTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoResponse {
    /// Keyed by two-letter state code, sorted by code
    pub states: Vec<GroupTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentShare {
    pub segment: String,
    /// Number of rows (orders) in the segment
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityBreakdownResponse {
    pub city: String,
    /// Per sub-category, sorted by sub-category
    pub categories: Vec<GroupTotals>,
    /// Segments in first-encountered order
    pub segments: Vec<SegmentShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDrilldownResponse {
    pub product: String,
    pub metric: Metric,
    /// At most ten cities, highest first
    pub cities: Vec<GroupTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductTotalsResponse {
    pub metric: Metric,
    /// Every sub-category, highest first
    pub products: Vec<GroupTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Reactive view
// ---------------------------------------------------------------------------

/// Named display region of the dashboard page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSlot {
    CityOptions,
    TotalSales,
    TotalProfit,
    TopSelling,
    HighProfit,
    CategoryBars,
    CategoryPie,
    SegmentPie,
    Choropleth,
    RegionTop,
    RegionBottom,
    ProductTotals,
    ProductTopCities,
}

impl OutputSlot {
    /// Every slot, in page order
    pub const ALL: [OutputSlot; 13] = [
        OutputSlot::CityOptions,
        OutputSlot::TotalSales,
        OutputSlot::TotalProfit,
        OutputSlot::TopSelling,
        OutputSlot::HighProfit,
        OutputSlot::CategoryBars,
        OutputSlot::CategoryPie,
        OutputSlot::SegmentPie,
        OutputSlot::Choropleth,
        OutputSlot::RegionTop,
        OutputSlot::RegionBottom,
        OutputSlot::ProductTotals,
        OutputSlot::ProductTopCities,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputValue {
    Options { options: Vec<String> },
    Tile(Tile),
    Figure(Figure),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputUpdate {
    pub slot: OutputSlot,
    pub value: OutputValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    /// Selection after the change, with the city moved if the state changed
    pub selection: Selection,
    /// Recomputed slots, in page order
    pub updates: Vec<OutputUpdate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_totals_value_by_metric() {
        let totals = GroupTotals {
            key: "Chairs".to_string(),
            sales: 100.0,
            profit: -5.0,
        };
        assert_eq!(totals.value(Metric::Sales), 100.0);
        assert_eq!(totals.value(Metric::Profit), -5.0);
    }

    #[test]
    fn test_choices_carry_display_labels() {
        let json = serde_json::to_value(Choice::from(Metric::Profit)).unwrap();
        assert_eq!(json, serde_json::json!({"value": "profit", "label": "Profit"}));
        assert_eq!(Choice::from(Grouping::City).label, "City");
    }

    #[test]
    fn test_output_value_tagged_by_kind() {
        let update = OutputUpdate {
            slot: OutputSlot::CityOptions,
            value: OutputValue::Options {
                options: vec!["Houston".to_string()],
            },
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["slot"], "city_options");
        assert_eq!(json["value"]["kind"], "options");
        assert_eq!(json["value"]["options"][0], "Houston");
    }

    #[test]
    fn test_view_request_fields_are_optional() {
        let request: ViewRequest = serde_json::from_str("{}").unwrap();
        assert!(request.selection.is_none());
        assert!(request.change.is_none());
    }
}
