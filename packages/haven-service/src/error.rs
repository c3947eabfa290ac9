pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
impl From<haven_storage::Error> for Error {
	fn from(err: haven_storage::Error) -> Self {
		match err {
			haven_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}
