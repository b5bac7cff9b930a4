use actix_web::{HttpResponse, get, web};

use crate::models::chrome::ChromeConfig;

#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    status: String,
    message: String,
    data: Option<T>,
}

/// Shell config for the frontend: branding, palette tokens, inert nav
/// and card actions, copy strings.
#[get("/chrome")]
pub async fn get_chrome(chrome: web::Data<ChromeConfig>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        status: "success".to_string(),
        message: "Chrome retrieved successfully".to_string(),
        data: Some(chrome.get_ref().clone()),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use super::*;
    use crate::models::chrome::laf_chrome;

    #[actix_web::test]
    async fn chrome_endpoint_serves_the_config() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(laf_chrome()))
                .service(get_chrome),
        )
        .await;

        let req = test::TestRequest::get().uri("/chrome").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["brand"]["name"], "LAF");
        assert_eq!(body["data"]["nav"].as_array().unwrap().len(), 3);
    }
}
