use actix_web::{HttpResponse, get, post, web};
use log::error;

use crate::dtos::post_dtos::{CreatePostRequest, FeedCardOut};
use crate::models::post::Post;
use crate::services::feed::{FeedState, FeedStore};
use crate::services::post_service::PostService;

#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    status: String,
    message: String,
    data: Option<T>,
}

/// Pure presentation step: one stored post, one feed card.
fn to_feed_card(post: &Post) -> FeedCardOut {
    FeedCardOut {
        id: post.id,
        title: post.title.clone(),
        image_url: post.image_url.clone(),
        posted_at: post.created_at.to_rfc3339(),
    }
}

#[post("/posts")]
pub async fn create_post(
    svc: web::Data<PostService>,
    body: web::Json<CreatePostRequest>,
) -> HttpResponse {
    match svc.submit(body.into_inner()).await {
        Ok(created) => HttpResponse::Ok().json(ApiResponse {
            status: "success".to_string(),
            message: "Post created!".to_string(),
            data: Some(to_feed_card(&created)),
        }),
        Err(e) if e.is_validation() => HttpResponse::BadRequest().json(ApiResponse::<()> {
            status: "error".to_string(),
            message: e.to_string(),
            data: None,
        }),
        Err(e) => {
            error!("create post failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::<()> {
                status: "error".to_string(),
                message: "Error creating post. Please try again later.".to_string(),
                data: None,
            })
        }
    }
}

#[get("/feed")]
pub async fn get_feed(feed: web::Data<FeedStore>) -> HttpResponse {
    match feed.snapshot().await {
        FeedState::Ready(posts) => {
            let cards: Vec<FeedCardOut> = posts.iter().map(to_feed_card).collect();
            HttpResponse::Ok().json(ApiResponse {
                status: "success".to_string(),
                message: "Feed retrieved successfully".to_string(),
                data: Some(cards),
            })
        }
        FeedState::Unavailable(reason) => HttpResponse::ServiceUnavailable().json(ApiResponse::<()> {
            status: "error".to_string(),
            message: reason,
            data: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use base64::{Engine as _, engine::general_purpose};

    use super::*;
    use crate::repositories::fakes::{FakeMediaStore, FakePostRepo, sample_post};
    use crate::services::feed::FEED_UNAVAILABLE;

    fn post_service(feed: Arc<FeedStore>) -> web::Data<PostService> {
        web::Data::new(PostService::new(
            Arc::new(FakePostRepo::default()),
            Arc::new(FakeMediaStore::default()),
            feed,
            5 * 1024 * 1024,
        ))
    }

    #[actix_web::test]
    async fn feed_lists_cards_in_feed_order() {
        let feed = Arc::new(FeedStore::new());
        feed.replace_all(vec![sample_post(2, "newer"), sample_post(1, "older")])
            .await;

        let app =
            test::init_service(App::new().app_data(web::Data::from(feed)).service(get_feed)).await;

        let req = test::TestRequest::get().uri("/feed").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "success");
        let cards = body["data"].as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["id"], 2);
        assert_eq!(cards[0]["title"], "newer");
        assert_eq!(cards[1]["id"], 1);
    }

    #[actix_web::test]
    async fn unavailable_feed_is_a_503() {
        let feed = Arc::new(FeedStore::new());
        feed.set_unavailable(FEED_UNAVAILABLE).await;

        let app =
            test::init_service(App::new().app_data(web::Data::from(feed)).service(get_feed)).await;

        let req = test::TestRequest::get().uri("/feed").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn create_post_round_trips_into_the_feed() {
        let feed = Arc::new(FeedStore::new());
        let app = test::init_service(
            App::new()
                .app_data(post_service(feed.clone()))
                .app_data(web::Data::from(feed))
                .service(create_post)
                .service(get_feed),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(serde_json::json!({
                "title": "cat meme",
                "image_data": general_purpose::STANDARD.encode(b"jpeg bytes"),
                "file_name": "cat.jpg",
                "content_type": "image/jpeg",
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["data"]["title"], "cat meme");

        let req = test::TestRequest::get().uri("/feed").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let cards = body["data"].as_array().unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0]["title"], "cat meme");
    }

    #[actix_web::test]
    async fn missing_image_is_a_400() {
        let feed = Arc::new(FeedStore::new());
        let app = test::init_service(
            App::new()
                .app_data(post_service(feed))
                .service(create_post),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/posts")
            .set_json(serde_json::json!({
                "title": "no image",
                "image_data": "",
                "file_name": "x.jpg",
                "content_type": "image/jpeg",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
