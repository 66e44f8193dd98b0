use std::sync::Arc;

use tagrank_service::{PeopleIndex, TagRankService};
use tagrank_storage::neo4j::Neo4jStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<TagRankService>,
}
impl AppState {
	pub async fn new(config: tagrank_config::Config) -> color_eyre::Result<Self> {
		let store = Neo4jStore::connect(&config.storage.neo4j, &config.ranking).await?;

		Ok(Self::with_index(config, Arc::new(store)))
	}

	pub fn with_index(config: tagrank_config::Config, index: Arc<dyn PeopleIndex>) -> Self {
		Self { service: Arc::new(TagRankService::new(config, index)) }
	}
}
