pub mod feed;
pub mod post_service;
