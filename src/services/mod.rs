pub mod compose_service;
pub mod csv_codec;
pub mod input;
pub mod register_service;
pub mod schema;
pub mod sort_filter;
pub mod tag_service;
pub mod word_store;
