use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::products::models::{Product, ProductDraft};
use crate::shared::constants::{MAX_NAME_LENGTH, MAX_PRICE};
use crate::shared::types::FieldErrors;
use crate::shared::validation::{error_with_message, to_field_errors, NUMERIC_REGEX};

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(error_with_message(
            "required",
            "The name field is required.".to_string(),
        ));
    }
    if name.chars().count() as u64 > MAX_NAME_LENGTH {
        return Err(error_with_message(
            "max",
            format!(
                "The name may not be greater than {} characters.",
                MAX_NAME_LENGTH
            ),
        ));
    }
    Ok(())
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    let price = price.trim();
    if price.is_empty() {
        return Err(error_with_message(
            "required",
            "The price field is required.".to_string(),
        ));
    }

    let not_numeric = || error_with_message("numeric", "The price must be a number.".to_string());
    if !NUMERIC_REGEX.is_match(price) {
        return Err(not_numeric());
    }
    let value = Decimal::from_str(price).map_err(|_| not_numeric())?;

    if value <= Decimal::ZERO {
        return Err(error_with_message(
            "gt",
            "The price must be greater than 0.".to_string(),
        ));
    }
    if value > MAX_PRICE {
        return Err(error_with_message(
            "max",
            format!("The price may not be greater than {}.", MAX_PRICE),
        ));
    }
    if value.normalize().scale() > 2 {
        return Err(error_with_message(
            "decimal",
            "The price may not have more than 2 decimal places.".to_string(),
        ));
    }
    Ok(())
}

/// Raw product fields as submitted, before validation.
///
/// Both the HTML form and the JSON API funnel into this type so they share
/// one set of rules and messages.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProductInput {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_price"))]
    pub price: String,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
        }
    }

    /// Validate and convert into persistable fields.
    ///
    /// Names are trimmed, prices carried with exactly 2 decimal places.
    pub fn into_draft(self) -> Result<ProductDraft, FieldErrors> {
        self.validate().map_err(|e| to_field_errors(&e))?;

        let mut price = Decimal::from_str(self.price.trim()).map_err(|_| {
            FieldErrors::from([(
                "price".to_string(),
                vec!["The price must be a number.".to_string()],
            )])
        })?;
        price.rescale(2);

        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            price,
        })
    }

    /// Submitted values, echoed back into the form after a failed validation
    pub fn old_input(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), self.name.clone()),
            ("price".to_string(), self.price.clone()),
        ])
    }
}

/// HTML form body for store/update.
///
/// `_method` lets a POST stand in for PUT/DELETE.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: String,

    #[serde(default, rename = "_method")]
    pub method: Option<String>,
}

impl From<ProductForm> for ProductInput {
    fn from(form: ProductForm) -> Self {
        Self {
            name: form.name,
            price: form.price,
        }
    }
}

/// Request body for `POST /api/products`.
///
/// Fields are loosely typed so that a wrong type surfaces as a field error
/// (422) instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateProductDto {
    #[serde(default)]
    #[schema(value_type = String, example = "Product 1")]
    pub name: Option<serde_json::Value>,

    /// Price in USD, as a number or numeric string
    #[serde(default)]
    #[schema(value_type = f64, example = 100)]
    pub price: Option<serde_json::Value>,
}

fn loose_string(value: Option<serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl From<CreateProductDto> for ProductInput {
    fn from(dto: CreateProductDto) -> Self {
        Self {
            name: loose_string(dto.name),
            price: loose_string(dto.price),
        }
    }
}

/// Response DTO for product
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    /// Price in USD
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Price converted to EUR
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price_eur: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            price_eur: p.price_eur(),
            id: p.id,
            name: p.name,
            price: p.price,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Row of the product listing / edit form
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub price_eur: String,
}

impl From<Product> for ProductView {
    fn from(p: Product) -> Self {
        Self {
            price_eur: p.price_eur().to_string(),
            price: p.price.to_string(),
            id: p.id,
            name: p.name,
        }
    }
}
