pub mod search;

mod error;

pub use error::{Error, Result};
pub use search::{ListingsPage, Role, SearchListingsRequest, Viewer};

use haven_config::Config;
use haven_storage::db::Db;

pub struct ListingService {
	pub cfg: Config,
	pub db: Db,
}
impl ListingService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
