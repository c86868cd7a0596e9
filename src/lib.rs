pub mod app_config;
pub mod error;
pub mod steam;
pub mod table;
pub mod time_util;

pub use error::app_error::AppError;
pub use steam::steam_client::SteamClient;
pub use table::Table;
