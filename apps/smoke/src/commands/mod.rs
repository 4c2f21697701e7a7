pub mod create_post;
pub mod probe;
