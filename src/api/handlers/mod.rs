//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod generate;
pub mod health;
pub mod long_url;
pub mod missing_path;
pub mod redirect;
pub mod visits;

pub use generate::generate_short_url_handler;
pub use health::health_handler;
pub use long_url::long_url_handler;
pub use missing_path::missing_path_handler;
pub use redirect::redirect_handler;
pub use visits::visits_handler;
