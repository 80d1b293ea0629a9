use axum::extract::State;
use axum::Json;
use contracts::dashboards::d400_superstore::{
    CitiesResponse, CityBreakdownResponse, CityQuery, GeoResponse, HeadlineResponse,
    MetricQuery, OptionsResponse, ProductDrilldownResponse, ProductQuery, ProductTotalsResponse,
    RankingQuery, RankingResponse, StateQuery, ViewRequest, ViewResponse,
};
use std::sync::Arc;

use crate::api::{ApiError, ApiJson, ApiQuery};
use crate::dashboards::d400_superstore::{service, SelectionError, ViewController};
use crate::AppState;

/// GET /api/d400/options
pub async fn get_options(State(app): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let response = service::get_options(&app.dataset, &app.defaults);
    tracing::info!(
        "D400 Dashboard: Returning {} states and {} products",
        response.states.len(),
        response.products.len()
    );
    Json(response)
}

/// GET /api/d400/cities?state=California
///
/// An unknown state yields an empty city list.
pub async fn get_cities(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<StateQuery>,
) -> Json<CitiesResponse> {
    let response = service::get_cities(&app.dataset, &query.state);
    tracing::info!(
        "D400 Dashboard: {} cities in {}",
        response.cities.len(),
        response.state
    );
    Json(response)
}

/// GET /api/d400/headline?state=California
pub async fn get_headline(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<StateQuery>,
) -> Json<HeadlineResponse> {
    tracing::info!("D400 Dashboard: Getting headline for {}", query.state);
    Json(service::get_headline(&app.dataset, &query.state))
}

/// GET /api/d400/ranking?metric=profit&grouping=city
pub async fn get_ranking(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<RankingQuery>,
) -> Json<RankingResponse> {
    tracing::info!(
        "D400 Dashboard: Ranking {} by {}",
        query.grouping,
        query.metric
    );
    Json(service::get_regional_ranking(
        &app.dataset,
        query.metric,
        query.grouping,
    ))
}

/// GET /api/d400/geo
pub async fn get_geo(State(app): State<Arc<AppState>>) -> Json<GeoResponse> {
    Json(service::get_state_totals(&app.dataset))
}

/// GET /api/d400/city-breakdown?city=Los%20Angeles
///
/// A city with no rows yields empty categories and segments.
pub async fn get_city_breakdown(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<CityQuery>,
) -> Json<CityBreakdownResponse> {
    let response = service::get_city_breakdown(&app.dataset, &query.city);
    tracing::info!(
        "D400 Dashboard: {} sub-categories for {}",
        response.categories.len(),
        response.city
    );
    Json(response)
}

/// GET /api/d400/product-drilldown?product=Phones&metric=sales
///
/// An unknown product yields no cities.
pub async fn get_product_drilldown(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Json<ProductDrilldownResponse> {
    tracing::info!(
        "D400 Dashboard: Top cities for {} by {}",
        query.product,
        query.metric
    );
    Json(service::get_product_drilldown(
        &app.dataset,
        &query.product,
        query.metric,
    ))
}

/// GET /api/d400/product-totals?metric=profit
pub async fn get_product_totals(
    State(app): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<MetricQuery>,
) -> Json<ProductTotalsResponse> {
    Json(service::get_product_totals(&app.dataset, query.metric))
}

/// POST /api/d400/view
///
/// Without a `change` every slot is rendered for the given (or default)
/// selection. With one, only the slots bound to the changed selector.
pub async fn post_view(
    State(app): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ViewRequest>,
) -> Result<Json<ViewResponse>, ApiError> {
    let change = request
        .change
        .as_ref()
        .map(|c| format!("{:?}", c.input()))
        .unwrap_or_else(|| "initial".to_string());

    let response = tokio::task::spawn_blocking(move || render_view(&app, request))
        .await
        .map_err(anyhow::Error::from)??;

    tracing::info!(
        "D400 Dashboard: View ({}) returned {} updates",
        change,
        response.updates.len()
    );
    Ok(Json(response))
}

fn render_view(app: &AppState, request: ViewRequest) -> Result<ViewResponse, SelectionError> {
    let selection = request.selection.unwrap_or_else(|| app.defaults.clone());
    let mut controller = ViewController::new(&app.dataset, selection)?;
    let updates = match request.change {
        Some(change) => controller.apply(change)?,
        None => controller.render_all(),
    };

    Ok(ViewResponse {
        selection: controller.into_selection(),
        updates,
    })
}
