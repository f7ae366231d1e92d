use actix_web::http::StatusCode;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use tera::{Context, Tera};

use crate::client::CatalogClient;
use crate::domain::category::CategoryCatalog;
use crate::forms::products::AddProductForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::products::{self, ProductPageData, SubmitPageOutcome};
use crate::services::submission::{FormOptions, SUCCESS_MESSAGE};

const TEMPLATE: &str = "products/new.html";

#[get("/")]
pub async fn show_product_form(
    flash_messages: IncomingFlashMessages,
    catalog: web::Data<CategoryCatalog>,
    options: web::Data<FormOptions>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = products::load_product_page(catalog.get_ref(), *options.get_ref());
    let context = page_context(&flash_messages, &data);
    render_template(&tera, TEMPLATE, &context, StatusCode::OK)
}

#[post("/products")]
pub async fn add_product(
    flash_messages: IncomingFlashMessages,
    client: web::Data<dyn CatalogClient>,
    catalog: web::Data<CategoryCatalog>,
    options: web::Data<FormOptions>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    let options = *options.get_ref();
    let outcome = products::submit_product(
        client.get_ref(),
        catalog.get_ref(),
        options,
        form,
        Utc::now,
    )
    .await;

    match outcome {
        SubmitPageOutcome::Created(_) => {
            if options.show_notifications {
                FlashMessage::success(SUCCESS_MESSAGE).send();
            }
            redirect("/")
        }
        SubmitPageOutcome::Invalid(data) => {
            let context = page_context(&flash_messages, &data);
            render_template(&tera, TEMPLATE, &context, StatusCode::UNPROCESSABLE_ENTITY)
        }
        SubmitPageOutcome::Failed(data) => {
            let context = page_context(&flash_messages, &data);
            render_template(&tera, TEMPLATE, &context, StatusCode::BAD_GATEWAY)
        }
    }
}

fn page_context(flash_messages: &IncomingFlashMessages, data: &ProductPageData) -> Context {
    let mut context = base_context(flash_messages);
    context.insert("form", &data.form);
    context.insert("categories", &data.categories);
    context.insert("errors", &data.errors);
    context.insert("notification", &data.notification);
    context.insert("submit_label", data.submit_label);
    context.insert("notification_ttl_ms", &data.notification_ttl_ms);
    context
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::cookie::Key;
    use actix_web::http::header;
    use actix_web::{App, test};
    use actix_web_flash_messages::FlashMessagesFramework;
    use actix_web_flash_messages::storage::CookieMessageStore;

    use super::*;
    use crate::client::ClientError;
    use crate::client::mock::MockCatalogClient;
    use crate::services::submission::FAILURE_MESSAGE;

    fn templates() -> Tera {
        match Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")) {
            Ok(tera) => tera,
            Err(err) => panic!("failed to load templates: {err}"),
        }
    }

    fn flash_framework() -> FlashMessagesFramework {
        let store = CookieMessageStore::builder(Key::generate()).build();
        FlashMessagesFramework::builder(store).build()
    }

    fn client_data(client: MockCatalogClient) -> web::Data<dyn CatalogClient> {
        let client: Arc<dyn CatalogClient> = Arc::new(client);
        web::Data::from(client)
    }

    const RICE_BODY: &str =
        "name=Arroz&category=3&base_price=5.50&discount_percentage=0&image_url=http%3A%2F%2Fx%2Fy.png";

    #[actix_web::test]
    async fn show_product_form_renders_defaults() {
        let app = test::init_service(
            App::new()
                .wrap(flash_framework())
                .app_data(client_data(MockCatalogClient::new()))
                .app_data(web::Data::new(CategoryCatalog::builtin()))
                .app_data(web::Data::new(FormOptions::with_notifications()))
                .app_data(web::Data::new(templates()))
                .service(show_product_form),
        )
        .await;

        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("Adicionar produtos!"));
        assert!(html.contains("Mercearia"));
        assert!(html.contains("Criar"));
    }

    #[actix_web::test]
    async fn add_product_redirects_after_success() {
        let mut client = MockCatalogClient::new();
        client
            .expect_create_product()
            .times(1)
            .withf(|input| {
                assert_eq!(input.name, "Arroz");
                assert_eq!(input.category, 3);
                assert_eq!(input.base_price, 5.5);
                true
            })
            .returning(|_| Ok(()));

        let app = test::init_service(
            App::new()
                .wrap(flash_framework())
                .app_data(client_data(client))
                .app_data(web::Data::new(CategoryCatalog::builtin()))
                .app_data(web::Data::new(FormOptions::with_notifications()))
                .app_data(web::Data::new(templates()))
                .service(add_product),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/products")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(RICE_BODY)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );
    }

    #[actix_web::test]
    async fn add_product_rerenders_invalid_form_without_calling_catalog() {
        let mut client = MockCatalogClient::new();
        client.expect_create_product().times(0);

        let app = test::init_service(
            App::new()
                .wrap(flash_framework())
                .app_data(client_data(client))
                .app_data(web::Data::new(CategoryCatalog::builtin()))
                .app_data(web::Data::new(FormOptions::with_notifications()))
                .app_data(web::Data::new(templates()))
                .service(add_product),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/products")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload("name=A&category=3&base_price=5&discount_percentage=0&image_url=img")
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = test::read_body(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains("O nome precisa ter pelo menos 2 caracteres."));
    }

    #[actix_web::test]
    async fn add_product_keeps_values_when_catalog_fails() {
        let mut client = MockCatalogClient::new();
        client
            .expect_create_product()
            .times(1)
            .returning(|_| Err(ClientError::Status { status: 500 }));

        let app = test::init_service(
            App::new()
                .wrap(flash_framework())
                .app_data(client_data(client))
                .app_data(web::Data::new(CategoryCatalog::builtin()))
                .app_data(web::Data::new(FormOptions::default()))
                .app_data(web::Data::new(templates()))
                .service(add_product),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/products")
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(RICE_BODY)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = test::read_body(response).await;
        let html = String::from_utf8_lossy(&body);
        assert!(html.contains(FAILURE_MESSAGE));
        assert!(html.contains("value=\"Arroz\""));
        assert!(html.contains("y.png"));
    }
}
