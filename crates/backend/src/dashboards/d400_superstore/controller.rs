//! Reactive view controller for the superstore dashboard.
//!
//! Each selector is bound to a fixed set of output slots. Applying a change
//! overwrites one selection value and recomputes exactly the slots bound to it
//! (plus the city-bound slots when a state change moves the city).

use contracts::dashboards::d400_superstore::{
    CityBreakdownResponse, HeadlineResponse, OutputSlot, OutputUpdate, OutputValue,
    RankingResponse, Selection, SelectionChange, SelectionInput,
};
use std::collections::BTreeSet;
use thiserror::Error;

use super::{charts, service};
use crate::shared::data::SalesDataset;

/// Selection value outside the dataset domain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("City {city:?} is not in state {state:?}")]
    UnknownCity { state: String, city: String },

    #[error("Unknown product: {0}")]
    UnknownProduct(String),
}

/// Output slots that depend on a selector
pub fn bound_outputs(input: SelectionInput) -> &'static [OutputSlot] {
    use OutputSlot::*;
    match input {
        SelectionInput::State => &[CityOptions, TotalSales, TotalProfit, TopSelling, HighProfit],
        SelectionInput::City => &[CategoryBars, CategoryPie, SegmentPie],
        SelectionInput::Metric => &[
            CategoryPie,
            Choropleth,
            RegionTop,
            RegionBottom,
            ProductTotals,
            ProductTopCities,
        ],
        SelectionInput::Grouping => &[Choropleth, RegionTop, RegionBottom, ProductTotals],
        SelectionInput::Product => &[ProductTopCities],
    }
}

/// Move out-of-domain values of a configured selection to the first valid
/// value, so a stale config still yields a usable dashboard.
pub fn fit_to_dataset(dataset: &SalesDataset, mut selection: Selection) -> Selection {
    if !dataset.has_state(&selection.state) {
        if let Some(first) = dataset.states().into_iter().next() {
            tracing::warn!(
                "Default state {:?} not in dataset, using {:?}",
                selection.state,
                first
            );
            selection.state = first;
        }
    }

    let cities = service::cities_for_state(dataset, &selection.state);
    let city_valid = matches!(&selection.city, Some(c) if cities.contains(c));
    if !city_valid {
        let first = cities.into_iter().next();
        tracing::warn!(
            "Default city {:?} not in {:?}, using {:?}",
            selection.city,
            selection.state,
            first
        );
        selection.city = first;
    }

    if !dataset.has_product(&selection.product) {
        if let Some(first) = dataset.products().into_iter().next() {
            tracing::warn!(
                "Default product {:?} not in dataset, using {:?}",
                selection.product,
                first
            );
            selection.product = first;
        }
    }

    selection
}

pub struct ViewController<'a> {
    dataset: &'a SalesDataset,
    selection: Selection,
}

impl<'a> ViewController<'a> {
    /// Validate `selection` against the dataset. A missing city is filled in
    /// with the first city of the state.
    pub fn new(dataset: &'a SalesDataset, mut selection: Selection) -> Result<Self, SelectionError> {
        if !dataset.has_state(&selection.state) {
            return Err(SelectionError::UnknownState(selection.state));
        }

        let cities = service::cities_for_state(dataset, &selection.state);
        match selection.city.clone() {
            Some(city) if !cities.contains(&city) => {
                return Err(SelectionError::UnknownCity {
                    state: selection.state,
                    city,
                });
            }
            Some(_) => {}
            None => selection.city = cities.into_iter().next(),
        }

        if !dataset.has_product(&selection.product) {
            return Err(SelectionError::UnknownProduct(selection.product));
        }

        Ok(Self { dataset, selection })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    /// Every slot, for the initial page load
    pub fn render_all(&self) -> Vec<OutputUpdate> {
        self.render(OutputSlot::ALL)
    }

    /// Overwrite one selector and recompute the slots bound to it.
    ///
    /// On error the selection is left untouched.
    pub fn apply(&mut self, change: SelectionChange) -> Result<Vec<OutputUpdate>, SelectionError> {
        let input = change.input();
        let mut dirty: BTreeSet<OutputSlot> = bound_outputs(input).iter().copied().collect();

        match change {
            SelectionChange::State(state) => {
                if !self.dataset.has_state(&state) {
                    return Err(SelectionError::UnknownState(state));
                }
                let cities = service::cities_for_state(self.dataset, &state);
                self.selection.state = state;

                let city_valid = matches!(&self.selection.city, Some(c) if cities.contains(c));
                if !city_valid {
                    self.selection.city = cities.into_iter().next();
                    dirty.extend(bound_outputs(SelectionInput::City));
                }
            }
            SelectionChange::City(city) => {
                let cities = service::cities_for_state(self.dataset, &self.selection.state);
                if !cities.contains(&city) {
                    return Err(SelectionError::UnknownCity {
                        state: self.selection.state.clone(),
                        city,
                    });
                }
                self.selection.city = Some(city);
            }
            SelectionChange::Metric(metric) => self.selection.metric = metric,
            SelectionChange::Grouping(grouping) => self.selection.grouping = grouping,
            SelectionChange::Product(product) => {
                if !self.dataset.has_product(&product) {
                    return Err(SelectionError::UnknownProduct(product));
                }
                self.selection.product = product;
            }
        }

        tracing::debug!("{:?} changed, recomputing {:?}", input, dirty);
        Ok(self.render(dirty))
    }

    fn render(&self, slots: impl IntoIterator<Item = OutputSlot>) -> Vec<OutputUpdate> {
        let mut pass = RenderPass::new(self.dataset, &self.selection);
        slots
            .into_iter()
            .map(|slot| OutputUpdate {
                slot,
                value: pass.value(slot),
            })
            .collect()
    }
}

/// One recomputation. Aggregations shared by several slots run at most once.
struct RenderPass<'a> {
    dataset: &'a SalesDataset,
    selection: &'a Selection,
    headline: Option<HeadlineResponse>,
    breakdown: Option<CityBreakdownResponse>,
    ranking: Option<RankingResponse>,
}

impl<'a> RenderPass<'a> {
    fn new(dataset: &'a SalesDataset, selection: &'a Selection) -> Self {
        Self {
            dataset,
            selection,
            headline: None,
            breakdown: None,
            ranking: None,
        }
    }

    fn headline(&mut self) -> &HeadlineResponse {
        let (dataset, selection) = (self.dataset, self.selection);
        self.headline
            .get_or_insert_with(|| service::get_headline(dataset, &selection.state))
    }

    fn breakdown(&mut self) -> &CityBreakdownResponse {
        let (dataset, selection) = (self.dataset, self.selection);
        let city = selection.city.as_deref().unwrap_or_default();
        self.breakdown
            .get_or_insert_with(|| service::get_city_breakdown(dataset, city))
    }

    fn ranking(&mut self) -> &RankingResponse {
        let (dataset, metric, grouping) =
            (self.dataset, self.selection.metric, self.selection.grouping);
        self.ranking
            .get_or_insert_with(|| service::get_regional_ranking(dataset, metric, grouping))
    }

    fn tile(&mut self, index: usize) -> OutputValue {
        OutputValue::Tile(self.headline().tiles[index].clone())
    }

    fn value(&mut self, slot: OutputSlot) -> OutputValue {
        let metric = self.selection.metric;
        match slot {
            OutputSlot::CityOptions => OutputValue::Options {
                options: service::cities_for_state(self.dataset, &self.selection.state),
            },
            OutputSlot::TotalSales => self.tile(0),
            OutputSlot::TotalProfit => self.tile(1),
            OutputSlot::TopSelling => self.tile(2),
            OutputSlot::HighProfit => self.tile(3),
            OutputSlot::CategoryBars => OutputValue::Figure(charts::category_bars(self.breakdown())),
            OutputSlot::CategoryPie => {
                OutputValue::Figure(charts::category_pie(self.breakdown(), metric))
            }
            OutputSlot::SegmentPie => OutputValue::Figure(charts::segment_pie(self.breakdown())),
            OutputSlot::Choropleth => OutputValue::Figure(charts::choropleth(
                &service::get_state_totals(self.dataset),
                metric,
            )),
            OutputSlot::RegionTop => OutputValue::Figure(charts::region_top(self.ranking())),
            OutputSlot::RegionBottom => OutputValue::Figure(charts::region_bottom(self.ranking())),
            OutputSlot::ProductTotals => OutputValue::Figure(charts::product_totals(
                &service::get_product_totals(self.dataset, metric),
            )),
            OutputSlot::ProductTopCities => OutputValue::Figure(charts::product_top_cities(
                &service::get_product_drilldown(self.dataset, &self.selection.product, metric),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::dataset::sample_dataset;
    use contracts::dashboards::d400_superstore::{Grouping, Metric};
    use contracts::shared::figure::Trace;

    fn slots(updates: &[OutputUpdate]) -> Vec<OutputSlot> {
        updates.iter().map(|u| u.slot).collect()
    }

    fn value_of(updates: &[OutputUpdate], slot: OutputSlot) -> &OutputValue {
        &updates.iter().find(|u| u.slot == slot).unwrap().value
    }

    #[test]
    fn test_render_all_covers_every_slot() {
        let dataset = sample_dataset();
        let controller = ViewController::new(&dataset, Selection::default()).unwrap();
        let updates = controller.render_all();
        assert_eq!(slots(&updates), OutputSlot::ALL);

        match value_of(&updates, OutputSlot::CityOptions) {
            OutputValue::Options { options } => assert!(options.contains(&"Los Angeles".to_string())),
            other => panic!("unexpected value: {other:?}"),
        }
        match value_of(&updates, OutputSlot::TotalSales) {
            OutputValue::Tile(tile) => assert_eq!(tile.amount, "$ 4217.08"),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_product_change_touches_only_drilldown() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();

        let updates = controller
            .apply(SelectionChange::Product("Phones".to_string()))
            .unwrap();
        assert_eq!(slots(&updates), [OutputSlot::ProductTopCities]);
        assert_eq!(controller.selection().product, "Phones");

        match value_of(&updates, OutputSlot::ProductTopCities) {
            OutputValue::Figure(figure) => match &figure.data[0] {
                Trace::Bar(bar) => assert_eq!(bar.x[0], "Chicago"),
                other => panic!("unexpected trace: {other:?}"),
            },
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_metric_change_recomputes_metric_slots() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();

        let updates = controller.apply(SelectionChange::Metric(Metric::Profit)).unwrap();
        assert_eq!(slots(&updates), bound_outputs(SelectionInput::Metric));
        assert_eq!(controller.selection().metric, Metric::Profit);
    }

    #[test]
    fn test_grouping_change() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();

        let updates = controller.apply(SelectionChange::Grouping(Grouping::City)).unwrap();
        assert_eq!(
            slots(&updates),
            [
                OutputSlot::Choropleth,
                OutputSlot::RegionTop,
                OutputSlot::RegionBottom,
                OutputSlot::ProductTotals
            ]
        );
        match value_of(&updates, OutputSlot::RegionTop) {
            OutputValue::Figure(figure) => assert_eq!(
                figure.layout.title.as_ref().unwrap().text,
                "city with most sales"
            ),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_state_change_cascades_to_city() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();

        let updates = controller
            .apply(SelectionChange::State("Texas".to_string()))
            .unwrap();
        assert_eq!(controller.selection().city.as_deref(), Some("Fort Worth"));
        assert_eq!(
            slots(&updates),
            [
                OutputSlot::CityOptions,
                OutputSlot::TotalSales,
                OutputSlot::TotalProfit,
                OutputSlot::TopSelling,
                OutputSlot::HighProfit,
                OutputSlot::CategoryBars,
                OutputSlot::CategoryPie,
                OutputSlot::SegmentPie,
            ]
        );
        match value_of(&updates, OutputSlot::CityOptions) {
            OutputValue::Options { options } => {
                assert_eq!(options, &["Fort Worth", "Houston", "Dallas"])
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_state_change_keeps_valid_city() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();

        let updates = controller
            .apply(SelectionChange::State("California".to_string()))
            .unwrap();
        assert_eq!(slots(&updates), bound_outputs(SelectionInput::State));
        assert_eq!(controller.selection().city.as_deref(), Some("Los Angeles"));
    }

    #[test]
    fn test_invalid_changes_leave_selection_untouched() {
        let dataset = sample_dataset();
        let mut controller = ViewController::new(&dataset, Selection::default()).unwrap();
        let before = controller.selection().clone();

        assert_eq!(
            controller
                .apply(SelectionChange::State("Atlantis".to_string()))
                .unwrap_err(),
            SelectionError::UnknownState("Atlantis".to_string())
        );
        assert!(matches!(
            controller.apply(SelectionChange::City("Houston".to_string())),
            Err(SelectionError::UnknownCity { .. })
        ));
        assert!(matches!(
            controller.apply(SelectionChange::Product("Hoverboards".to_string())),
            Err(SelectionError::UnknownProduct(_))
        ));
        assert_eq!(controller.selection(), &before);
    }

    #[test]
    fn test_new_validates_and_fills_city() {
        let dataset = sample_dataset();

        let selection = Selection {
            city: None,
            ..Selection::default()
        };
        let controller = ViewController::new(&dataset, selection).unwrap();
        assert_eq!(controller.selection().city.as_deref(), Some("Los Angeles"));

        let selection = Selection {
            city: Some("Houston".to_string()),
            ..Selection::default()
        };
        assert!(ViewController::new(&dataset, selection).is_err());
    }

    #[test]
    fn test_same_selection_renders_identically() {
        let dataset = sample_dataset();
        let a = ViewController::new(&dataset, Selection::default()).unwrap();
        let b = ViewController::new(&dataset, Selection::default()).unwrap();
        assert_eq!(a.render_all(), b.render_all());
    }

    #[test]
    fn test_fit_to_dataset_replaces_unknown_defaults() {
        let dataset = sample_dataset();
        let fitted = fit_to_dataset(
            &dataset,
            Selection {
                state: "Atlantis".to_string(),
                city: Some("Poseidonia".to_string()),
                metric: Metric::Profit,
                grouping: Grouping::City,
                product: "Hoverboards".to_string(),
            },
        );
        assert_eq!(fitted.state, "California");
        assert_eq!(fitted.city.as_deref(), Some("Los Angeles"));
        assert_eq!(fitted.product, "Bookcases");
        assert_eq!(fitted.metric, Metric::Profit);

        assert_eq!(
            fit_to_dataset(&dataset, Selection::default()),
            Selection::default()
        );
    }
}
