pub mod record;
pub mod favorite;

pub use record::{Record, Schema};
pub use favorite::FavoriteEntry;
