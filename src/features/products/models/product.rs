use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::{BASE_CURRENCY, SECONDARY_CURRENCY};
use crate::shared::currency;

/// Database model for product. `price` is in USD.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price converted to EUR. Derived on every call, never stored.
    pub fn price_eur(&self) -> Decimal {
        currency::convert(self.price, BASE_CURRENCY, SECONDARY_CURRENCY)
    }
}

/// Validated product fields, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
}
