mod client;
mod models;

pub use client::{WordPressClient, PER_PAGE, TOTAL_PAGES_HEADER};
pub use models::Post;
