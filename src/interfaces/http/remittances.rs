//! Remittance API endpoints

use crate::application::service::{
    DEFAULT_PER_PAGE, Page, Paginated, RemittanceFilter, RemittancePatch, Sort, Stats,
};
use crate::domain::factory::NewRemittance;
use crate::domain::ids::{RecipientId, ReferenceCode, SenderId, TransactionId};
use crate::domain::money;
use crate::domain::remittance::{Currency, Remittance, TransferMethod};
use crate::error::RemitError;
use axum::extract::{Path, Query, State};
use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiError, ApiState};

/// Largest amount accepted per transfer at this surface. The core itself
/// has no ceiling; this is the product rule the original API enforced.
const MAX_SEND_AMOUNT: Decimal = dec!(10000);

fn validate_amount_bounds(amount: Decimal) -> Result<(), RemitError> {
    if !money::is_two_dp(amount) {
        return Err(RemitError::InvalidAmount(format!(
            "amount must have at most 2 decimal places, got {amount}"
        )));
    }
    if amount > MAX_SEND_AMOUNT {
        return Err(RemitError::InvalidAmount(format!(
            "amount exceeds the {MAX_SEND_AMOUNT} per-transfer cap"
        )));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct CreateRemittanceRequest {
    pub sender_id: String,
    pub recipient_id: String,
    pub amount_sent: Decimal,
    pub currency_sent: Currency,
    pub currency_received: Currency,
    pub exchange_rate: Decimal,
    pub method: TransferMethod,
}

impl CreateRemittanceRequest {
    fn validate(&self) -> Result<(), RemitError> {
        if self.sender_id.trim().is_empty() || self.recipient_id.trim().is_empty() {
            return Err(RemitError::Validation(
                "sender_id and recipient_id are required".to_string(),
            ));
        }
        validate_amount_bounds(self.amount_sent)
    }

    fn into_request(self) -> NewRemittance {
        NewRemittance {
            sender_id: SenderId::new(self.sender_id),
            recipient_id: RecipientId::new(self.recipient_id),
            amount_sent: self.amount_sent,
            currency_sent: self.currency_sent,
            currency_received: self.currency_received,
            exchange_rate: self.exchange_rate,
            method: self.method,
        }
    }
}

pub async fn create(
    State(state): State<ApiState>,
    Json(payload): Json<CreateRemittanceRequest>,
) -> Result<(StatusCode, Json<Remittance>), ApiError> {
    payload.validate()?;
    let created = state.service.create(payload.into_request()).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub status: Option<String>,
    pub currency: Option<String>,
    pub method: Option<String>,
    pub sender_id: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

pub async fn list(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Remittance>>, ApiError> {
    let page = Page::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(DEFAULT_PER_PAGE),
    )?;

    let filter = RemittanceFilter {
        status: params.status.map(|s| s.parse()).transpose()?,
        currency: params.currency.map(|c| c.parse()).transpose()?,
        method: params.method.map(|m| m.parse()).transpose()?,
        sender_id: params.sender_id.map(SenderId::new),
        min_amount: params.min_amount,
        max_amount: params.max_amount,
    };
    let sort = Sort {
        field: params
            .sort_by
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default(),
        order: params
            .order
            .map(|o| o.parse())
            .transpose()?
            .unwrap_or_default(),
    };

    Ok(Json(state.service.list(&filter, sort, page).await?))
}

pub async fn stats(State(state): State<ApiState>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.service.stats().await?))
}

pub async fn get(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Remittance>, ApiError> {
    Ok(Json(state.service.get(&TransactionId::from(id)).await?))
}

pub async fn get_by_tracking(
    State(state): State<ApiState>,
    Path(code): Path<String>,
) -> Result<Json<Remittance>, ApiError> {
    let code = ReferenceCode::parse(&code)?;
    Ok(Json(state.service.get_by_reference(&code).await?))
}

pub async fn update(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RemittancePatch>,
) -> Result<Json<Remittance>, ApiError> {
    if let Some(amount) = patch.amount_sent {
        validate_amount_bounds(amount)?;
    }
    Ok(Json(
        state.service.update(&TransactionId::from(id), patch).await?,
    ))
}

pub async fn delete(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&TransactionId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn process(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Remittance>, ApiError> {
    Ok(Json(state.service.process(&TransactionId::from(id)).await?))
}

pub async fn complete(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Remittance>, ApiError> {
    Ok(Json(
        state.service.complete(&TransactionId::from(id)).await?,
    ))
}

pub async fn cancel(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Remittance>, ApiError> {
    Ok(Json(state.service.cancel(&TransactionId::from(id)).await?))
}

pub async fn fail(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Remittance>, ApiError> {
    Ok(Json(state.service.fail(&TransactionId::from(id)).await?))
}
