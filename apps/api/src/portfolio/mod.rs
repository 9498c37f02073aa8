// Portfolio persistence: submitted portfolios saved to and served from the flat-file store.

pub mod handlers;
pub mod models;
pub mod store;
