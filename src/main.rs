mod config;
mod dtos;
mod handlers;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};
use reqwest::Client;

use crate::handlers::chrome_handlers::get_chrome;
use crate::handlers::health_handlers::store_health;
use crate::handlers::post_handlers::{create_post, get_feed};
use crate::models::chrome::laf_chrome;
use crate::repositories::post_repository::{PostRepo, PostSupabaseRepo};
use crate::repositories::storage_repository::{MediaStore, StorageSupabaseRepo};
use crate::services::feed::{FeedStore, load_feed};
use crate::services::post_service::PostService;

fn mask_key(k: &str) -> String {
    if k.len() <= 8 {
        "[REDACTED]".to_string()
    } else {
        format!("{}***{}", &k[..4], &k[k.len() - 4..])
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let cfg = match config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Supabase URL: {}", cfg.supabase_url);
    info!("Supabase Key: {}", mask_key(&cfg.service_role_key));
    info!("Storage bucket: {}", cfg.storage_bucket);

    let http_client = Client::builder()
        .user_agent("laf-be/0.1")
        .build()
        .expect("failed to build http client");

    let records: Arc<dyn PostRepo> = Arc::new(PostSupabaseRepo::new(http_client.clone(), &cfg));
    let media: Arc<dyn MediaStore> = Arc::new(StorageSupabaseRepo::new(http_client, &cfg));
    let feed = Arc::new(FeedStore::new());

    // one-shot feed load; failure leaves the feed unavailable until restart
    load_feed(records.as_ref(), &feed).await;

    let post_service = web::Data::new(PostService::new(
        records,
        media,
        feed.clone(),
        cfg.max_upload_bytes,
    ));
    let feed_data = web::Data::from(feed);
    let chrome = web::Data::new(laf_chrome());

    let allowed_origins = cfg.allowed_origins.clone();
    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(post_service.clone())
            .app_data(feed_data.clone())
            .app_data(chrome.clone())
            .service(
                web::scope("/api")
                    .service(get_feed) // GET /api/feed
                    .service(create_post) // POST /api/posts
                    .service(get_chrome), // GET /api/chrome
            )
            .service(store_health) // GET /health/store
    })
    .bind(&bind_address)?
    .run()
    .await
}
