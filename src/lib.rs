pub mod api_client;
pub mod error;
pub mod logging;

pub use api_client::UserApiClient;
pub use error::ApiError;
