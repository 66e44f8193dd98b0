pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Store unavailable: {message}")]
	Connectivity { message: String },
	#[error("Store query failed: {message}")]
	Query { message: String },
}
impl From<tagrank_storage::Error> for Error {
	fn from(err: tagrank_storage::Error) -> Self {
		if err.is_connectivity() {
			return Self::Connectivity { message: err.to_string() };
		}

		Self::Query { message: err.to_string() }
	}
}
