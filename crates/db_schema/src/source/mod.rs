pub mod comment;
pub mod person;
pub mod post;
pub mod post_media;
pub mod profile;
