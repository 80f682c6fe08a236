//! Corridor catalogue endpoints

use crate::application::service::{CorridorPatch, CorridorStats, DEFAULT_PER_PAGE, Page, Paginated};
use crate::domain::corridor::{Corridor, CorridorCode};
use crate::domain::remittance::{Currency, Remittance};
use crate::error::RemitError;
use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{ApiError, ApiState};

fn require_label(field: &str, value: &str) -> Result<(), RemitError> {
    if value.trim().len() < 2 {
        return Err(RemitError::Validation(format!(
            "{field} needs at least 2 characters"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct RegisterCorridorRequest {
    pub code: String,
    pub name: String,
    pub origin_country: String,
    pub destination_country: String,
    pub currency_sent: Currency,
    pub currency_received: Currency,
    pub base_fee_percentage: Decimal,
}

impl RegisterCorridorRequest {
    fn validate(&self) -> Result<(), RemitError> {
        require_label("corridor name", &self.name)?;
        require_label("origin country", &self.origin_country)?;
        require_label("destination country", &self.destination_country)
    }
}

pub async fn register(
    State(state): State<ApiState>,
    Json(payload): Json<RegisterCorridorRequest>,
) -> Result<(StatusCode, Json<Corridor>), ApiError> {
    payload.validate()?;
    let code = CorridorCode::parse(&payload.code)?;
    let corridor = Corridor::new(
        code,
        payload.name,
        payload.origin_country,
        payload.destination_country,
        payload.currency_sent,
        payload.currency_received,
        payload.base_fee_percentage,
    );
    state.service.register_corridor(corridor.clone()).await?;
    Ok((StatusCode::CREATED, Json(corridor)))
}

#[derive(Debug, Default, Deserialize)]
pub struct CorridorListParams {
    pub is_active: Option<bool>,
}

pub async fn list(
    State(state): State<ApiState>,
    Query(params): Query<CorridorListParams>,
) -> Result<Json<Vec<Corridor>>, ApiError> {
    Ok(Json(state.service.corridors(params.is_active).await?))
}

pub async fn stats(State(state): State<ApiState>) -> Result<Json<Vec<CorridorStats>>, ApiError> {
    Ok(Json(state.service.corridor_stats().await?))
}

pub async fn get(
    State(state): State<ApiState>,
    Path(code): Path<String>,
) -> Result<Json<Corridor>, ApiError> {
    let code = CorridorCode::parse(&code)?;
    Ok(Json(state.service.corridor(&code).await?))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(code): Path<String>,
    Json(patch): Json<CorridorPatch>,
) -> Result<Json<Corridor>, ApiError> {
    if let Some(name) = &patch.name {
        require_label("corridor name", name)?;
    }
    if let Some(origin) = &patch.origin_country {
        require_label("origin country", origin)?;
    }
    if let Some(destination) = &patch.destination_country {
        require_label("destination country", destination)?;
    }

    let code = CorridorCode::parse(&code)?;
    Ok(Json(state.service.update_corridor(&code, patch).await?))
}

pub async fn remove(
    State(state): State<ApiState>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    let code = CorridorCode::parse(&code)?;
    state.service.remove_corridor(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

pub async fn remittances(
    State(state): State<ApiState>,
    Path(code): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<Remittance>>, ApiError> {
    let code = CorridorCode::parse(&code)?;
    let page = Page::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?;
    Ok(Json(state.service.corridor_remittances(&code, page).await?))
}
