use serde::{Deserialize, Serialize};

/// Validated payload sent to the catalog service to create a product.
///
/// Instances are built from the current form values for a single
/// submission attempt and dropped once the call settles.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewProductInput {
    /// Human-readable name of the product.
    pub name: String,
    /// Identifier of the category the product belongs to.
    pub category: i32,
    /// Price before any discount is applied.
    pub base_price: f64,
    /// Discount applied on top of the base price, in percent.
    pub discount_percentage: f64,
    /// Address of the product picture.
    pub image_url: String,
}

impl NewProductInput {
    /// Build a payload with no discount.
    pub fn new(
        name: impl Into<String>,
        category: i32,
        base_price: f64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            base_price,
            discount_percentage: 0.0,
            image_url: image_url.into(),
        }
    }

    /// Attach a discount percentage to the payload.
    pub fn with_discount(mut self, discount_percentage: f64) -> Self {
        self.discount_percentage = discount_percentage;
        self
    }
}
