//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::Result,
    panels::{contacts::CONTACTS, supplies::normalize_category, LightMode},
    state::{AppState, View},
};
use super::responses::{
    ActionResponse, BatteryResponse, BrightnessRequest, CategoryQuery, CategoryRequest,
    HealthResponse, PowerSaveRequest, ShellResponse, TuneRequest, VolumeRequest,
};

type ApiResult<T> = Result<Json<ActionResponse<T>>>;

fn respond<T: serde::Serialize>(state: &AppState, result: T) -> ApiResult<T> {
    Ok(Json(ActionResponse::ok(state.current_view()?, result)))
}

/// Handle GET /shell - Render the current shell
pub async fn shell_handler(State(state): State<Arc<AppState>>) -> Result<Json<ShellResponse>> {
    let (shell, panel) = state.render()?;
    let (last_action, last_action_time) = state.get_last_action();
    Ok(Json(ShellResponse::new(shell, panel, last_action, last_action_time)))
}

/// Handle POST /navigate/:view
pub async fn navigate_handler(
    State(state): State<Arc<AppState>>,
    Path(view): Path<String>,
) -> Result<Json<ShellResponse>> {
    let view: View = view.parse()?;
    state.navigate(view)?;
    shell_handler(State(state)).await
}

/// Handle POST /back - Always lands on main
pub async fn back_handler(State(state): State<Arc<AppState>>) -> Result<Json<ShellResponse>> {
    state.back()?;
    shell_handler(State(state)).await
}

/// Handle POST /sos - Start the SOS flow
pub async fn sos_handler(State(state): State<Arc<AppState>>) -> ApiResult<String> {
    let status = state.trigger_sos()?;
    info!("SOS endpoint called");
    respond(&state, status)
}

/// Handle POST /battery/power-save
pub async fn power_save_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PowerSaveRequest>,
) -> ApiResult<BatteryResponse> {
    let battery = state.set_power_save(request.enabled)?;
    respond(&state, BatteryResponse::from(&battery))
}

/// Handle GET /contacts
pub async fn contacts_handler() -> Json<Value> {
    Json(json!({ "contacts": &CONTACTS }))
}

/// Handle POST /flashlight/toggle
pub async fn flashlight_toggle_handler(State(state): State<Arc<AppState>>) -> ApiResult<Value> {
    let light = state.toggle_flashlight()?;
    respond(&state, json!(light))
}

/// Handle POST /flashlight/mode/:mode
pub async fn flashlight_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> ApiResult<Value> {
    let mode: LightMode = mode.parse()?;
    let light = state.set_flashlight_mode(mode)?;
    respond(&state, json!(light))
}

/// Handle POST /flashlight/brightness
pub async fn flashlight_brightness_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BrightnessRequest>,
) -> ApiResult<Value> {
    let light = state.set_flashlight_brightness(request.brightness)?;
    respond(&state, json!(light))
}

/// Handle POST /radio/power
pub async fn radio_power_handler(State(state): State<Arc<AppState>>) -> ApiResult<Value> {
    let radio = state.toggle_radio_power()?;
    respond(&state, json!(radio))
}

/// Handle POST /radio/scan
pub async fn radio_scan_handler(State(state): State<Arc<AppState>>) -> ApiResult<Value> {
    let radio = state.toggle_radio_scan()?;
    respond(&state, json!(radio))
}

/// Handle POST /radio/volume
pub async fn radio_volume_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<VolumeRequest>,
) -> ApiResult<Value> {
    let radio = state.set_radio_volume(request.volume)?;
    respond(&state, json!(radio))
}

/// Handle POST /radio/tune
pub async fn radio_tune_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TuneRequest>,
) -> ApiResult<Value> {
    let radio = state.tune_radio(request.frequency)?;
    respond(&state, json!(radio))
}

/// Handle POST /radio/channel/:index
pub async fn radio_channel_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> ApiResult<Value> {
    let radio = state.select_radio_channel(index)?;
    respond(&state, json!(radio))
}

/// Handle GET /supplies?category= - Filter without changing the selected category
pub async fn supplies_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Value> {
    let supplies = state.supplies()?;
    let category = normalize_category(
        query
            .category
            .as_deref()
            .unwrap_or(supplies.selected_category.as_str()),
    );
    let result = json!({
        "category": category,
        "items": supplies.filter_by_category(category),
        "categories": supplies.categories(),
        "progress": supplies.progress(),
    });
    respond(&state, result)
}

/// Handle POST /supplies/:id/toggle
pub async fn supply_toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let item = state.toggle_supply(&id)?;
    respond(&state, json!(item))
}

/// Handle POST /supplies/category
pub async fn supply_category_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CategoryRequest>,
) -> ApiResult<Value> {
    let category = normalize_category(&request.category);
    let items = state.select_supply_category(category)?;
    respond(&state, json!({ "category": category, "items": items }))
}

/// Handle POST /manual/topic/:id
pub async fn manual_topic_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let topic = state.select_topic(View::Survival, &id)?;
    respond(&state, json!(topic))
}

/// Handle POST /manual/close
pub async fn manual_close_handler(State(state): State<Arc<AppState>>) -> ApiResult<()> {
    state.close_topic(View::Survival)?;
    respond(&state, ())
}

/// Handle POST /firstaid/topic/:id
pub async fn first_aid_topic_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let topic = state.select_topic(View::FirstAid, &id)?;
    respond(&state, json!(topic))
}

/// Handle POST /firstaid/close
pub async fn first_aid_close_handler(State(state): State<Arc<AppState>>) -> ApiResult<()> {
    state.close_topic(View::FirstAid)?;
    respond(&state, ())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.get_uptime()))
}
