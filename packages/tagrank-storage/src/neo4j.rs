use neo4rs::{ConfigBuilder, Graph, Row};

use crate::{
	Error, Result,
	models::{RankedPerson, TagWeight},
	queries::{self, TopPeopleParams},
};

pub struct Neo4jStore {
	pub graph: Graph,
	pub index_name: String,
	pub candidate_k: i64,
}
impl Neo4jStore {
	pub async fn connect(
		cfg: &tagrank_config::Neo4j,
		ranking: &tagrank_config::Ranking,
	) -> Result<Self> {
		let config = ConfigBuilder::default()
			.uri(cfg.uri.as_str())
			.user(cfg.user.as_str())
			.password(cfg.password.as_str())
			.max_connections(cfg.max_connections)
			.fetch_size(cfg.fetch_size)
			.build()?;
		let graph = Graph::connect(config).await?;

		tracing::info!(uri = %cfg.uri, index = %ranking.index_name, "Neo4j driver initialized.");

		Ok(Self {
			graph,
			index_name: ranking.index_name.clone(),
			candidate_k: ranking.candidate_k,
		})
	}

	/// Runs the weighted ranking query and drains the whole result stream before returning, so a
	/// failure mid-stream yields an error rather than a truncated list.
	pub async fn top_people(
		&self,
		tag_weights: &[TagWeight],
		threshold: f64,
		limit: i64,
	) -> Result<Vec<RankedPerson>> {
		let query = queries::top_people(&TopPeopleParams {
			tag_weights,
			threshold,
			limit,
			index_name: self.index_name.as_str(),
			candidate_k: self.candidate_k,
		});
		let mut stream = self.graph.execute(query).await?;
		let mut people = Vec::new();

		while let Some(row) = stream.next().await? {
			people.push(decode_ranked_person(&row)?);
		}

		Ok(people)
	}
}

fn decode_ranked_person(row: &Row) -> Result<RankedPerson> {
	let id = row
		.get::<i64>("id")
		.map_err(|err| Error::Decode { column: "id", message: err.to_string() })?;
	let name = row
		.get::<Option<String>>("name")
		.map_err(|err| Error::Decode { column: "name", message: err.to_string() })?;
	let score = row
		.get::<f64>("score")
		.map_err(|err| Error::Decode { column: "score", message: err.to_string() })?;

	Ok(RankedPerson { id, name, score })
}
