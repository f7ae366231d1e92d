use actix_web::{HttpResponse, Responder, get, post, web};
use chrono::Utc;
use serde_json::json;

use crate::client::CatalogClient;
use crate::domain::category::CategoryCatalog;
use crate::forms::products::AddProductForm;
use crate::services::products::{self, SubmitPageOutcome};
use crate::services::submission::{FAILURE_MESSAGE, FormOptions};

#[get("/v1/categories")]
/// Return the category list the form offers.
pub async fn api_v1_categories(catalog: web::Data<CategoryCatalog>) -> impl Responder {
    HttpResponse::Ok().json(catalog.options())
}

#[post("/v1/products")]
/// Validate a JSON product and forward it to the catalog service.
///
/// Answers `201` with the payload that was sent, `422` with field errors,
/// or `502` when the catalog call failed.
pub async fn api_v1_create_product(
    client: web::Data<dyn CatalogClient>,
    catalog: web::Data<CategoryCatalog>,
    options: web::Data<FormOptions>,
    web::Json(form): web::Json<AddProductForm>,
) -> impl Responder {
    let outcome = products::submit_product(
        client.get_ref(),
        catalog.get_ref(),
        *options.get_ref(),
        form,
        Utc::now,
    )
    .await;

    match outcome {
        SubmitPageOutcome::Created(input) => HttpResponse::Created().json(input),
        SubmitPageOutcome::Invalid(data) => {
            HttpResponse::UnprocessableEntity().json(json!({ "errors": data.errors }))
        }
        SubmitPageOutcome::Failed(_) => {
            HttpResponse::BadGateway().json(json!({ "message": FAILURE_MESSAGE }))
        }
    }
}
