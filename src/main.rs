use std::sync::Arc;

use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use supermarket_products::client::{CatalogClient, HttpCatalogClient};
use supermarket_products::config::ServerConfig;
use supermarket_products::routes::api::{api_v1_categories, api_v1_create_product};
use supermarket_products::routes::products::{add_product, show_product_form};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &config.secret {
        Some(key) => Key::derive_from(key.as_bytes()),
        None => {
            log::warn!("SECRET_KEY not set, flash message cookies use a random key");
            Key::generate()
        }
    };

    let catalog = match config.category_catalog() {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("Failed to load categories: {e}");
            std::process::exit(1);
        }
    };

    let tera = match Tera::new(&config.templates_glob) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "Posting products to {} (notifications {})",
        config.catalog_service_url,
        if config.show_notifications { "on" } else { "off" }
    );

    let client: Arc<dyn CatalogClient> =
        Arc::new(HttpCatalogClient::new(config.catalog_service_url.clone()));
    let client = web::Data::from(client);
    let catalog = web::Data::new(catalog);
    let options = web::Data::new(config.form_options());
    let tera = web::Data::new(tera);

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(show_product_form)
            .service(add_product)
            .service(
                web::scope("/api")
                    .service(api_v1_categories)
                    .service(api_v1_create_product),
            )
            .app_data(client.clone())
            .app_data(catalog.clone())
            .app_data(options.clone())
            .app_data(tera.clone())
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
