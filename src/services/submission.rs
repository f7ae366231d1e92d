use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::{CatalogClient, ClientError};
use crate::domain::category::CategoryCatalog;
use crate::domain::notification::{Notification, NotificationDisplay, NotificationKind};
use crate::domain::product::NewProductInput;
use crate::domain::selector::CategorySelector;
use crate::forms::products::{AddProductForm, ProductFormError};

/// Submit button caption while idle.
pub const SUBMIT_LABEL: &str = "Criar";
/// Submit button caption while a submission is pending.
pub const LOADING_LABEL: &str = "Carregando...";
/// Message shown after the catalog accepted the product.
pub const SUCCESS_MESSAGE: &str = "Produto criado com sucesso!";
/// Message shown for any failed creation call.
pub const FAILURE_MESSAGE: &str = "Erro ao criar produto!";

/// Behaviour switches for the product form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    /// Raise transient success/failure banners. When disabled, failures
    /// raise a blocking alert and successes are silent.
    #[serde(default)]
    pub show_notifications: bool,
}

impl FormOptions {
    pub fn with_notifications() -> Self {
        Self {
            show_notifications: true,
        }
    }
}

/// Whether a submission is pending.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// How the last submission settled.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success,
    Failure,
}

/// Errors returned when submitting the product form.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form did not pass validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ProductFormError),
    /// Another submission is still pending.
    #[error("a submission is already in progress")]
    AlreadySubmitting,
    /// The catalog service call failed.
    #[error(transparent)]
    Remote(#[from] ClientError),
}

/// Editable fields of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Category,
    BasePrice,
    DiscountPercentage,
    ImageUrl,
}

/// State of one product form: field values, category selector, submission
/// lifecycle and the notification raised by the last settlement.
#[derive(Debug, Clone)]
pub struct ProductFormController {
    catalog: CategoryCatalog,
    options: FormOptions,
    fields: AddProductForm,
    selector: CategorySelector,
    state: SubmissionState,
    last_outcome: Option<SubmissionOutcome>,
    notification: Option<Notification>,
}

impl ProductFormController {
    /// Fresh form with default values.
    pub fn new(catalog: CategoryCatalog, options: FormOptions) -> Self {
        let fields = AddProductForm::with_defaults(&catalog);
        let selector = CategorySelector::new(&catalog);
        Self {
            catalog,
            options,
            fields,
            selector,
            state: SubmissionState::Idle,
            last_outcome: None,
            notification: None,
        }
    }

    /// Form prefilled with previously entered values.
    pub fn from_values(
        catalog: CategoryCatalog,
        options: FormOptions,
        values: AddProductForm,
    ) -> Self {
        let mut controller = Self::new(catalog, options);
        controller.selector.set_value(values.category.clone());
        controller.fields = values;
        controller
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Snapshot of the current field values.
    pub fn values(&self) -> AddProductForm {
        AddProductForm {
            category: self.selector.value().to_string(),
            ..self.fields.clone()
        }
    }

    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProductField::Name => self.fields.name = value,
            ProductField::Category => self.selector.set_value(value),
            ProductField::BasePrice => self.fields.base_price = value,
            ProductField::DiscountPercentage => self.fields.discount_percentage = value,
            ProductField::ImageUrl => self.fields.image_url = value,
        }
    }

    pub fn selector(&self) -> &CategorySelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut CategorySelector {
        &mut self.selector
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.last_outcome
    }

    /// Caption for the submit button.
    pub fn submit_label(&self) -> &'static str {
        match self.state {
            SubmissionState::Idle => SUBMIT_LABEL,
            SubmissionState::Submitting => LOADING_LABEL,
        }
    }

    /// Clear every field and restore the default category.
    pub fn reset(&mut self) {
        self.fields = AddProductForm::with_defaults(&self.catalog);
        self.selector.reset();
    }

    /// Validate the current values and mark the form as submitting.
    ///
    /// Returns the payload to send. On validation failure the form stays
    /// idle and nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<NewProductInput, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::AlreadySubmitting);
        }

        let input = self.values().into_new_product_input(&self.catalog)?;
        self.state = SubmissionState::Submitting;
        Ok(input)
    }

    /// Reflect the result of the pending call and return to idle.
    pub fn settle(&mut self, outcome: SubmissionOutcome, now: DateTime<Utc>) {
        if !self.is_submitting() {
            log::warn!("Ignoring {outcome:?} settlement without a pending submission");
            return;
        }

        match outcome {
            SubmissionOutcome::Success => {
                self.reset();
                self.notification = self.options.show_notifications.then(|| {
                    Notification::transient(NotificationKind::Success, SUCCESS_MESSAGE, now)
                });
            }
            SubmissionOutcome::Failure => {
                self.notification = Some(if self.options.show_notifications {
                    Notification::transient(NotificationKind::Error, FAILURE_MESSAGE, now)
                } else {
                    Notification::alert(FAILURE_MESSAGE, now)
                });
            }
        }

        self.last_outcome = Some(outcome);
        self.state = SubmissionState::Idle;
    }

    /// Validate, send exactly one creation request and settle.
    ///
    /// `clock` is read once the call has resolved, so notifications count
    /// their display time from settlement.
    pub async fn submit<C, F>(
        &mut self,
        client: &C,
        clock: F,
    ) -> Result<NewProductInput, SubmitError>
    where
        C: CatalogClient + ?Sized,
        F: Fn() -> DateTime<Utc>,
    {
        let input = self.begin_submit()?;

        let result = client.create_product(&input).await;
        let settled_at = clock();

        match result {
            Ok(()) => {
                log::info!("Created product `{}`", input.name);
                self.settle(SubmissionOutcome::Success, settled_at);
                Ok(input)
            }
            Err(err) => {
                log::error!("Failed to create product `{}`: {err}", input.name);
                self.settle(SubmissionOutcome::Failure, settled_at);
                Err(SubmitError::Remote(err))
            }
        }
    }

    /// Notification still on screen at `now`.
    pub fn visible_notification(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notification
            .as_ref()
            .filter(|notification| notification.is_visible_at(now))
    }

    /// Drop a transient notification whose display time has elapsed.
    pub fn clear_expired(&mut self, now: DateTime<Utc>) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| !notification.is_visible_at(now))
        {
            self.notification = None;
        }
    }

    /// Close a blocking failure alert.
    pub fn acknowledge_alert(&mut self) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.display == NotificationDisplay::Alert)
        {
            self.notification = None;
        }
    }
}
