use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub neo4j: Neo4j,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Neo4j {
	/// Bolt endpoint. A bare `host:port` is accepted and normalized to `bolt://host:port`.
	#[serde(default)]
	pub uri: String,
	#[serde(default = "default_user")]
	pub user: String,
	#[serde(default)]
	pub password: String,
	#[serde(default = "default_max_connections")]
	pub max_connections: usize,
	#[serde(default = "default_fetch_size")]
	pub fetch_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Applied when a request omits `threshold`.
	pub default_threshold: f64,
	/// Applied when a request omits `limit`.
	pub default_limit: i64,
	/// Name of the vector index over `Person.embedding`.
	pub index_name: String,
	/// Nearest neighbours fetched per tag before threshold filtering.
	pub candidate_k: i64,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			default_threshold: 0.7,
			default_limit: 20,
			index_name: "PersonEmbeddingIndex".to_string(),
			candidate_k: 10_000,
		}
	}
}

fn default_user() -> String {
	"neo4j".to_string()
}

fn default_max_connections() -> usize {
	16
}

fn default_fetch_size() -> usize {
	200
}
