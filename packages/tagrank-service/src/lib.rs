pub mod top_people;

mod error;

pub use error::{Error, Result};
pub use tagrank_storage::models::{RankedPerson, TagWeight};
pub use top_people::{TopPeopleRequest, TopPeopleResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use tagrank_config::Config;
use tagrank_storage::{memory::MemoryStore, neo4j::Neo4jStore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Ranks people for a weighted tag set. Implemented by the Neo4j store and the in-memory store.
pub trait PeopleIndex
where
	Self: Send + Sync,
{
	fn top_people<'a>(
		&'a self,
		tag_weights: &'a [TagWeight],
		threshold: f64,
		limit: i64,
	) -> BoxFuture<'a, tagrank_storage::Result<Vec<RankedPerson>>>;
}

pub struct TagRankService {
	pub cfg: Config,
	pub index: Arc<dyn PeopleIndex>,
}

impl PeopleIndex for Neo4jStore {
	fn top_people<'a>(
		&'a self,
		tag_weights: &'a [TagWeight],
		threshold: f64,
		limit: i64,
	) -> BoxFuture<'a, tagrank_storage::Result<Vec<RankedPerson>>> {
		Box::pin(Neo4jStore::top_people(self, tag_weights, threshold, limit))
	}
}

impl PeopleIndex for MemoryStore {
	fn top_people<'a>(
		&'a self,
		tag_weights: &'a [TagWeight],
		threshold: f64,
		limit: i64,
	) -> BoxFuture<'a, tagrank_storage::Result<Vec<RankedPerson>>> {
		let result = MemoryStore::top_people(self, tag_weights, threshold, limit);

		Box::pin(async move { result })
	}
}

impl TagRankService {
	pub fn new(cfg: Config, index: Arc<dyn PeopleIndex>) -> Self {
		Self { cfg, index }
	}
}
