use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::CatalogClient;
use crate::domain::category::{CategoryCatalog, CategoryOption};
use crate::domain::notification::{NOTIFICATION_TTL_MS, Notification};
use crate::domain::product::NewProductInput;
use crate::forms::products::AddProductForm;
use crate::services::submission::{FormOptions, ProductFormController, SubmitError};

/// Data required to render the product form template.
#[derive(Debug, Serialize)]
pub struct ProductPageData {
    /// Values shown in the inputs.
    pub form: AddProductForm,
    /// Options of the category selector.
    pub categories: Vec<CategoryOption>,
    /// Field errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
    /// Notification raised by the last submission, if still visible.
    pub notification: Option<Notification>,
    /// Caption of the submit button.
    pub submit_label: &'static str,
    /// How long transient notifications stay on screen.
    pub notification_ttl_ms: i64,
}

impl ProductPageData {
    fn from_controller(
        controller: &ProductFormController,
        errors: BTreeMap<String, Vec<String>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            form: controller.values(),
            categories: controller.selector().options().to_vec(),
            errors,
            notification: controller.visible_notification(now).cloned(),
            submit_label: controller.submit_label(),
            notification_ttl_ms: NOTIFICATION_TTL_MS,
        }
    }
}

/// Result of handling a submitted product form.
#[derive(Debug)]
pub enum SubmitPageOutcome {
    /// The catalog accepted the product; the form starts over.
    Created(NewProductInput),
    /// Validation failed; nothing was sent.
    Invalid(ProductPageData),
    /// The catalog call failed; entered values are kept.
    Failed(ProductPageData),
}

/// Loads a blank product form.
pub fn load_product_page(catalog: &CategoryCatalog, options: FormOptions) -> ProductPageData {
    let controller = ProductFormController::new(catalog.clone(), options);
    ProductPageData::from_controller(&controller, BTreeMap::new(), Utc::now())
}

/// Validates the submitted values and forwards them to the catalog service.
///
/// `clock` is read after the call settles; the page shows the notification
/// as of that moment.
pub async fn submit_product<C, F>(
    client: &C,
    catalog: &CategoryCatalog,
    options: FormOptions,
    form: AddProductForm,
    clock: F,
) -> SubmitPageOutcome
where
    C: CatalogClient + ?Sized,
    F: Fn() -> DateTime<Utc>,
{
    let mut controller = ProductFormController::from_values(catalog.clone(), options, form);

    let result = controller.submit(client, &clock).await;
    let now = clock();

    match result {
        Ok(input) => SubmitPageOutcome::Created(input),
        Err(SubmitError::Validation(err)) => SubmitPageOutcome::Invalid(
            ProductPageData::from_controller(&controller, err.field_messages(), now),
        ),
        Err(err) => {
            log::debug!("Product submission settled with an error: {err}");
            SubmitPageOutcome::Failed(ProductPageData::from_controller(
                &controller,
                BTreeMap::new(),
                now,
            ))
        }
    }
}
