pub mod listings;
pub mod orders;
pub mod overview;
pub mod price_history;
