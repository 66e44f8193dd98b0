#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Neo4j(#[from] neo4rs::Error),
	#[error("Failed to decode column {column}: {message}")]
	Decode { column: &'static str, message: String },
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}
impl Error {
	/// True when the store could not be reached, as opposed to the store rejecting the query.
	pub fn is_connectivity(&self) -> bool {
		matches!(
			self,
			Self::Neo4j(
				neo4rs::Error::IOError { .. }
					| neo4rs::Error::ConnectionError
					| neo4rs::Error::AuthenticationError(_)
			)
		)
	}
}
