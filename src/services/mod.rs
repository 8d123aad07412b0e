pub mod tag_service;
pub mod taggable;
