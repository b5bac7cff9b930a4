use actix_web::{HttpResponse, get, web};
use log::error;

use crate::services::post_service::PostService;

#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    status: String,
    message: String,
    data: Option<T>,
}

/// GET /health/store
/// Live probe against the post store, for operators and uptime checks.
#[get("/health/store")]
pub async fn store_health(svc: web::Data<PostService>) -> HttpResponse {
    match svc.check_store().await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse {
            status: "success".to_string(),
            message: "Post store reachable".to_string(),
            data: Some(serde_json::json!({ "posts": "ok" })),
        }),
        Err(e) => {
            error!("store health probe failed: {}", e);
            HttpResponse::ServiceUnavailable().json(ApiResponse::<()> {
                status: "error".to_string(),
                message: "Post store unreachable".to_string(),
                data: None,
            })
        }
    }
}
