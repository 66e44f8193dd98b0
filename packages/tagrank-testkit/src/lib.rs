mod error;

pub use error::{Error, Result};

use std::{env, thread};

use neo4rs::{BoltList, BoltType, ConfigBuilder, Graph, query};
use tokio::runtime::Builder;
use uuid::Uuid;

pub const TEST_INDEX_NAME: &str = "PersonEmbeddingIndex";
pub const TEST_VECTOR_DIM: usize = 2;

/// Connection parameters for the external Neo4j used by ignored integration tests.
#[derive(Debug, Clone)]
pub struct Neo4jEnv {
	pub uri: String,
	pub user: String,
	pub password: String,
}

/// Seeds `Tag` and `Person` nodes under ids unique to this fixture and removes them on cleanup.
///
/// Every node carries a `testRun` property so cleanup never touches data it did not create.
pub struct TestGraph {
	graph: Graph,
	env: Neo4jEnv,
	run_id: String,
	id_base: i64,
	cleaned: bool,
}
impl TestGraph {
	pub async fn new(env: &Neo4jEnv) -> Result<Self> {
		let graph = connect(env).await?;
		let run = Uuid::new_v4();
		// Keep ids well inside i64 and spaced so per-test local ids never collide.
		let id_base = ((run.as_u128() >> 88) as i64) * 1_000 + 1_000_000_000;

		graph
			.run(query(&format!(
				"\
CREATE VECTOR INDEX {TEST_INDEX_NAME} IF NOT EXISTS
FOR (p:Person) ON (p.embedding)
OPTIONS {{indexConfig: {{`vector.dimensions`: {TEST_VECTOR_DIM}, `vector.similarity_function`: 'cosine'}}}}"
			)))
			.await?;
		graph.run(query("CALL db.awaitIndexes(300)")).await?;

		Ok(Self {
			graph,
			env: env.clone(),
			run_id: run.simple().to_string(),
			id_base,
			cleaned: false,
		})
	}

	/// Store id for a test-local id.
	pub fn id(&self, local: i64) -> i64 {
		self.id_base + local
	}

	/// True for ids handed out by this fixture, so assertions can ignore unrelated nodes.
	pub fn owns(&self, id: i64) -> bool {
		(self.id_base..self.id_base + 1_000).contains(&id)
	}

	pub async fn create_tag(&self, local: i64, embedding: &[f32]) -> Result<i64> {
		let id = self.id(local);

		self.graph
			.run(
				query("CREATE (:Tag {id: $id, embedding: $embedding, testRun: $run})")
					.param("id", id)
					.param("embedding", embedding_param(embedding)?)
					.param("run", self.run_id.as_str()),
			)
			.await?;

		Ok(id)
	}

	pub async fn create_person(&self, local: i64, name: &str, embedding: &[f32]) -> Result<i64> {
		let id = self.id(local);

		self.graph
			.run(
				query(
					"CREATE (:Person {id: $id, name: $name, embedding: $embedding, testRun: $run})",
				)
				.param("id", id)
				.param("name", name)
				.param("embedding", embedding_param(embedding)?)
				.param("run", self.run_id.as_str()),
			)
			.await?;

		Ok(id)
	}

	/// A `Person` with no `name` property.
	pub async fn create_unnamed_person(&self, local: i64, embedding: &[f32]) -> Result<i64> {
		let id = self.id(local);

		self.graph
			.run(
				query("CREATE (:Person {id: $id, embedding: $embedding, testRun: $run})")
					.param("id", id)
					.param("embedding", embedding_param(embedding)?)
					.param("run", self.run_id.as_str()),
			)
			.await?;

		Ok(id)
	}

	pub async fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner().await
	}

	async fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		delete_run(&self.graph, &self.run_id).await?;

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestGraph {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}

		let env = self.env.clone();
		let run_id = self.run_id.clone();
		let cleanup_thread = thread::spawn(move || {
			let runtime = match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime,
				Err(err) => {
					eprintln!("Test graph cleanup failed: {err}.");

					return;
				},
			};
			let result = runtime.block_on(async {
				let graph = connect(&env).await?;

				delete_run(&graph, &run_id).await
			});

			if let Err(err) = result {
				eprintln!("Test graph cleanup failed: {err}.");
			}
		});
		let _ = cleanup_thread.join();
	}
}

pub fn env_neo4j() -> Option<Neo4jEnv> {
	let uri = env::var("TAGRANK_NEO4J_URI").ok()?;
	let user = env::var("TAGRANK_NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string());
	let password = env::var("TAGRANK_NEO4J_PASSWORD").unwrap_or_default();

	Some(Neo4jEnv { uri, user, password })
}

async fn connect(env: &Neo4jEnv) -> Result<Graph> {
	let config = ConfigBuilder::default()
		.uri(env.uri.as_str())
		.user(env.user.as_str())
		.password(env.password.as_str())
		.max_connections(2)
		.build()?;

	Ok(Graph::connect(config).await?)
}

async fn delete_run(graph: &Graph, run_id: &str) -> Result<()> {
	graph
		.run(query("MATCH (n {testRun: $run}) DETACH DELETE n").param("run", run_id))
		.await?;

	Ok(())
}

fn embedding_param(embedding: &[f32]) -> Result<BoltType> {
	if embedding.len() != TEST_VECTOR_DIM {
		return Err(Error::Message(format!(
			"Test embeddings must have {TEST_VECTOR_DIM} dimensions, got {}.",
			embedding.len()
		)));
	}

	let mut list = BoltList::new();

	for value in embedding {
		list.push(BoltType::from(f64::from(*value)));
	}

	Ok(BoltType::List(list))
}
