//! Backend API, one module per resource family

mod analysis;
mod auth;
mod client;
mod dashboard;
mod petani;

pub use auth::login_error_message;
pub use client::{use_api, ApiClient};
pub use dashboard::Distribution;
