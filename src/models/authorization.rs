// src/models/authorization.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        error::AppError,
        format::{format_limit, format_permission},
    },
    middleware::i18n::Locale,
};

// --- LIMITE DE TRANSAÇÃO ---

/// Limite numérico de uma transação.
/// No fio: `-1` = ilimitado, `0` = bloqueado, `> 0` = teto em reais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum TransactionLimit {
    Unlimited,
    Blocked,
    Capped(Decimal),
}

impl TryFrom<Decimal> for TransactionLimit {
    type Error = AppError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value == Decimal::NEGATIVE_ONE {
            Ok(TransactionLimit::Unlimited)
        } else if value.is_zero() {
            Ok(TransactionLimit::Blocked)
        } else if value.is_sign_positive() {
            Ok(TransactionLimit::Capped(value))
        } else {
            Err(AppError::InvalidLimit(value.to_string()))
        }
    }
}

impl From<TransactionLimit> for Decimal {
    fn from(limit: TransactionLimit) -> Self {
        match limit {
            TransactionLimit::Unlimited => Decimal::NEGATIVE_ONE,
            TransactionLimit::Blocked => Decimal::ZERO,
            TransactionLimit::Capped(value) => value,
        }
    }
}

// --- AUTORIZAÇÃO ---

/// Pacote de permissões de transação, aplicado dentro de um local seguro
/// ou fora de qualquer local seguro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub can_register_virtual_card: bool,

    #[schema(value_type = Option<f64>, example = 500.0)]
    pub loan_limit: Option<TransactionLimit>,
    #[schema(value_type = Option<f64>, example = -1.0)]
    pub pix_limit: Option<TransactionLimit>,
    #[schema(value_type = Option<f64>, example = 0.0)]
    pub wire_limit: Option<TransactionLimit>,
    #[schema(value_type = Option<f64>, example = 1500.0)]
    pub split_limit: Option<TransactionLimit>,

    pub can_change_password: bool,
}

/// A autorização pronta para exibição: valores crus + rótulos.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationView {
    pub authorization: Authorization,

    #[schema(example = "permitted")]
    pub virtual_card: String,
    #[schema(example = "blocked")]
    pub change_password: String,
    #[schema(example = "R$ 500,00")]
    pub loan: String,
    #[schema(example = "unlimited")]
    pub pix: String,
    #[schema(example = "blocked")]
    pub wire: String,
    #[schema(example = "R$ 1.500,00")]
    pub split: String,
}

impl AuthorizationView {
    pub fn render(authorization: &Authorization, locale: &Locale) -> Self {
        Self {
            authorization: authorization.clone(),
            virtual_card: format_permission(authorization.can_register_virtual_card, locale),
            change_password: format_permission(authorization.can_change_password, locale),
            loan: format_limit(authorization.loan_limit, locale),
            pix: format_limit(authorization.pix_limit, locale),
            wire: format_limit(authorization.wire_limit, locale),
            split: format_limit(authorization.split_limit, locale),
        }
    }
}
