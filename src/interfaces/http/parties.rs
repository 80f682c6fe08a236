//! Sender and recipient registry endpoints

use crate::domain::ids::{RecipientId, SenderId};
use crate::domain::person::{IdDocumentType, PayoutDetails, Person, Recipient, Sender};
use crate::domain::remittance::TransferMethod;
use crate::error::RemitError;
use axum::extract::{Path, State};
use axum::{Json, http::StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiState};

/// SWIFT/BIC shape: 8 or 11 characters, uppercase letters and digits.
fn valid_swift_bic(value: &str) -> bool {
    matches!(value.len(), 8 | 11)
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

fn valid_document_number(value: &str) -> bool {
    (5..=20).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Shape check only: one `@`, something before it, a dotted domain after.
fn valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub document_type: IdDocumentType,
    pub document_number: String,
}

impl PersonPayload {
    fn validate(&self) -> Result<(), RemitError> {
        if self.first_name.trim().len() < 2 || self.last_name.trim().len() < 2 {
            return Err(RemitError::Validation(
                "first and last name need at least 2 characters".to_string(),
            ));
        }
        if self.country.trim().len() < 2 {
            return Err(RemitError::Validation(
                "country needs at least 2 characters".to_string(),
            ));
        }
        if !valid_email(&self.email) {
            return Err(RemitError::Validation(format!(
                "malformed email: {}",
                self.email
            )));
        }
        if !valid_document_number(&self.document_number) {
            return Err(RemitError::Validation(
                "document number must be 5 to 20 alphanumerics".to_string(),
            ));
        }
        Ok(())
    }

    fn into_person(self) -> Person {
        Person {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            country: self.country,
            document_type: self.document_type,
            document_number: self.document_number,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterSenderRequest {
    pub id: String,
    #[serde(flatten)]
    pub person: PersonPayload,
    pub monthly_limit: Decimal,
}

pub async fn register_sender(
    State(state): State<ApiState>,
    Json(payload): Json<RegisterSenderRequest>,
) -> Result<(StatusCode, Json<Sender>), ApiError> {
    if payload.id.trim().is_empty() {
        return Err(RemitError::Validation("sender id is required".to_string()).into());
    }
    payload.person.validate()?;
    if payload.monthly_limit <= Decimal::ZERO {
        return Err(RemitError::Validation("monthly limit must be positive".to_string()).into());
    }

    let RegisterSenderRequest {
        id,
        person,
        monthly_limit,
    } = payload;
    let sender = Sender::new(SenderId::new(id), person.into_person(), monthly_limit);
    state.service.register_sender(sender.clone()).await?;
    Ok((StatusCode::CREATED, Json(sender)))
}

pub async fn get_sender(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Sender>, ApiError> {
    Ok(Json(state.service.sender(&SenderId::new(id)).await?))
}

#[derive(Debug, Serialize)]
pub struct AllowanceResponse {
    pub sender_id: String,
    pub monthly_limit: Decimal,
    pub total_sent: Decimal,
    pub remaining: Decimal,
}

pub async fn get_allowance(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<AllowanceResponse>, ApiError> {
    let sender_id = SenderId::new(id);
    let sender = state.service.sender(&sender_id).await?;
    let total_sent = state.service.total_sent(&sender_id).await?;
    let remaining = state.service.allowance(&sender_id).await?;

    Ok(Json(AllowanceResponse {
        sender_id: sender_id.to_string(),
        monthly_limit: sender.monthly_limit,
        total_sent,
        remaining,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoutPayload {
    BankAccount {
        account_number: String,
        bank_name: String,
        swift_bic: Option<String>,
    },
    MobileWallet {
        wallet_id: String,
    },
}

impl PayoutPayload {
    fn validate(&self) -> Result<(), RemitError> {
        match self {
            PayoutPayload::BankAccount {
                account_number,
                bank_name,
                swift_bic,
            } => {
                let digits_ok = (5..=34).contains(&account_number.len())
                    && account_number.bytes().all(|b| b.is_ascii_alphanumeric());
                if !digits_ok {
                    return Err(RemitError::Validation(
                        "account number must be 5 to 34 alphanumerics".to_string(),
                    ));
                }
                if bank_name.trim().is_empty() {
                    return Err(RemitError::Validation("bank name is required".to_string()));
                }
                if let Some(bic) = swift_bic
                    && !valid_swift_bic(bic)
                {
                    return Err(RemitError::Validation(format!(
                        "malformed SWIFT/BIC code: {bic}"
                    )));
                }
                Ok(())
            }
            PayoutPayload::MobileWallet { wallet_id } => {
                if wallet_id.trim().is_empty() {
                    return Err(RemitError::Validation("wallet id is required".to_string()));
                }
                Ok(())
            }
        }
    }

    fn into_details(self) -> PayoutDetails {
        match self {
            PayoutPayload::BankAccount {
                account_number,
                bank_name,
                swift_bic,
            } => PayoutDetails::BankAccount {
                account_number,
                bank_name,
                swift_bic,
            },
            PayoutPayload::MobileWallet { wallet_id } => PayoutDetails::MobileWallet { wallet_id },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRecipientRequest {
    pub id: String,
    #[serde(flatten)]
    pub person: PersonPayload,
    pub preferred_method: TransferMethod,
    pub payout: Option<PayoutPayload>,
}

pub async fn register_recipient(
    State(state): State<ApiState>,
    Json(payload): Json<RegisterRecipientRequest>,
) -> Result<(StatusCode, Json<Recipient>), ApiError> {
    if payload.id.trim().is_empty() {
        return Err(RemitError::Validation("recipient id is required".to_string()).into());
    }
    payload.person.validate()?;
    if let Some(payout) = &payload.payout {
        payout.validate()?;
    }

    let RegisterRecipientRequest {
        id,
        person,
        preferred_method,
        payout,
    } = payload;
    let recipient = Recipient::new(
        RecipientId::new(id),
        person.into_person(),
        preferred_method,
        payout.map(PayoutPayload::into_details),
    );
    state.service.register_recipient(recipient.clone()).await?;
    Ok((StatusCode::CREATED, Json(recipient)))
}

pub async fn get_recipient(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Recipient>, ApiError> {
    Ok(Json(state.service.recipient(&RecipientId::new(id)).await?))
}
