use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::category::CategoryCatalog;
use crate::domain::product::NewProductInput;

/// Minimum allowed length for a product name.
const NAME_MIN_LEN: u64 = 2;

/// Minimum allowed length for an image address.
const IMAGE_URL_MIN_LEN: u64 = 2;

/// Lowest accepted category identifier.
const CATEGORY_MIN: f64 = 1.0;

/// Lowest accepted base price.
const BASE_PRICE_MIN: f64 = 1.0;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing the product form.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Every field that failed validation, including coercion failures.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl ProductFormError {
    /// Per-field messages suitable for rendering next to the inputs.
    pub fn field_messages(&self) -> BTreeMap<String, Vec<String>> {
        match self {
            ProductFormError::Validation(errors) => field_messages(errors),
        }
    }
}

/// Raw values of the "Add product" form, kept as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AddProductForm {
    /// Product name.
    #[validate(length(
        min = NAME_MIN_LEN,
        message = "O nome precisa ter pelo menos 2 caracteres."
    ))]
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    /// Category identifier in string form.
    #[serde(default, deserialize_with = "text_or_number")]
    pub category: String,
    /// Base price in string form.
    #[serde(default, deserialize_with = "text_or_number")]
    pub base_price: String,
    /// Discount percentage in string form.
    #[serde(default, deserialize_with = "text_or_number")]
    pub discount_percentage: String,
    /// Product picture address.
    #[validate(length(
        min = IMAGE_URL_MIN_LEN,
        message = "A url da imagem precisa ter pelo menos 2 caracteres."
    ))]
    #[serde(default, deserialize_with = "text_or_number")]
    pub image_url: String,
}

impl AddProductForm {
    /// Blank form with the catalog's default category preselected.
    pub fn with_defaults(catalog: &CategoryCatalog) -> Self {
        Self {
            category: catalog.default_value().to_string(),
            ..Self::default()
        }
    }

    /// Validates and coerces the payload into a domain `NewProductInput`.
    ///
    /// All violated fields are reported together.
    pub fn into_new_product_input(
        self,
        catalog: &CategoryCatalog,
    ) -> ProductFormResult<NewProductInput> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let category = match coerce_number(&self.category) {
            None => {
                errors.add("category", not_a_number());
                None
            }
            Some(value) if value.fract() != 0.0 || value > f64::from(i32::MAX) => {
                errors.add(
                    "category",
                    ValidationError::new("integer")
                        .with_message(Cow::Borrowed("Selecione uma categoria válida.")),
                );
                None
            }
            Some(value) if value < CATEGORY_MIN => {
                errors.add(
                    "category",
                    ValidationError::new("range")
                        .with_message(Cow::Borrowed("Selecione uma categoria.")),
                );
                None
            }
            Some(value) => {
                let value = value as i32;
                if catalog.contains(value) {
                    Some(value)
                } else {
                    errors.add(
                        "category",
                        ValidationError::new("choice")
                            .with_message(Cow::Borrowed("Categoria desconhecida.")),
                    );
                    None
                }
            }
        };

        let base_price = match coerce_number(&self.base_price) {
            None => {
                errors.add("base_price", not_a_number());
                None
            }
            Some(value) if value < BASE_PRICE_MIN => {
                errors.add(
                    "base_price",
                    ValidationError::new("range")
                        .with_message(Cow::Borrowed("O preço base deve ser no mínimo 1.")),
                );
                None
            }
            Some(value) => Some(value),
        };

        let discount_percentage = coerce_number(&self.discount_percentage);
        if discount_percentage.is_none() {
            errors.add("discount_percentage", not_a_number());
        }

        match (category, base_price, discount_percentage) {
            (Some(category), Some(base_price), Some(discount)) if errors.is_empty() => {
                Ok(
                    NewProductInput::new(self.name, category, base_price, self.image_url)
                        .with_discount(discount),
                )
            }
            _ => Err(ProductFormError::Validation(errors)),
        }
    }
}

/// Flatten `validator` errors into `field -> messages`.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages = field_errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Number coercion for text inputs: blank means zero, anything that is not a
/// finite number is rejected.
fn coerce_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn not_a_number() -> ValidationError {
    ValidationError::new("number").with_message(Cow::Borrowed("Informe um número válido."))
}

/// Accept both strings (HTML forms) and JSON numbers for text fields.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}
