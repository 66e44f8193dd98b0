use tagrank_config::{Neo4j, Ranking};
use tagrank_storage::{models::TagWeight, neo4j::Neo4jStore};
use tagrank_testkit::{TEST_INDEX_NAME, TestGraph};

async fn connect(env: &tagrank_testkit::Neo4jEnv) -> Neo4jStore {
	let cfg = Neo4j {
		uri: tagrank_config::normalize_uri(&env.uri).expect("TAGRANK_NEO4J_URI must be valid."),
		user: env.user.clone(),
		password: env.password.clone(),
		max_connections: 2,
		fetch_size: 200,
	};
	let ranking = Ranking { index_name: TEST_INDEX_NAME.to_string(), ..Ranking::default() };

	Neo4jStore::connect(&cfg, &ranking).await.expect("Failed to connect to Neo4j.")
}

#[tokio::test]
#[ignore = "Requires external Neo4j. Set TAGRANK_NEO4J_URI to run."]
async fn weighted_tags_rank_people_in_score_order() {
	let Some(env) = tagrank_testkit::env_neo4j() else {
		eprintln!("Skipping weighted_tags_rank_people_in_score_order; set TAGRANK_NEO4J_URI to run.");

		return;
	};
	let graph = TestGraph::new(&env).await.expect("Failed to prepare test graph.");
	let x = graph.create_tag(1, &[1.0, 0.0]).await.expect("Failed to create tag.");
	let y = graph.create_tag(2, &[0.0, 1.0]).await.expect("Failed to create tag.");
	let both = graph
		.create_person(10, "Tanaka Taro", &[0.707_1, 0.707_1])
		.await
		.expect("Failed to create person.");
	let only_x =
		graph.create_person(11, "Suzuki Jiro", &[1.0, 0.0]).await.expect("Failed to create person.");

	graph.create_person(12, "Yamada Kenichi", &[-1.0, 0.0]).await.expect("Failed to create person.");

	let store = connect(&env).await;
	let people = store
		.top_people(&[TagWeight { id: x, weight: 1.0 }, TagWeight { id: y, weight: 1.0 }], 0.8, 10)
		.await
		.expect("Ranking query failed.");
	let ids =
		people.iter().map(|person| person.id).filter(|id| graph.owns(*id)).collect::<Vec<_>>();

	// Cosine scores from the index are normalized to [0, 1]: Tanaka scores ~0.85 on each tag and
	// Suzuki 1.0 on x only, so the two-tag match wins.
	assert_eq!(ids, vec![both, only_x]);
	assert!(people.windows(2).all(|pair| pair[0].score >= pair[1].score));

	graph.cleanup().await.expect("Failed to cleanup test graph.");
}

#[tokio::test]
#[ignore = "Requires external Neo4j. Set TAGRANK_NEO4J_URI to run."]
async fn unknown_tag_and_zero_limit_return_nothing() {
	let Some(env) = tagrank_testkit::env_neo4j() else {
		eprintln!("Skipping unknown_tag_and_zero_limit_return_nothing; set TAGRANK_NEO4J_URI to run.");

		return;
	};
	let graph = TestGraph::new(&env).await.expect("Failed to prepare test graph.");
	let tag = graph.create_tag(1, &[1.0, 0.0]).await.expect("Failed to create tag.");

	graph.create_person(10, "Mori Keiko", &[1.0, 0.0]).await.expect("Failed to create person.");

	let store = connect(&env).await;
	let unknown = store
		.top_people(&[TagWeight { id: graph.id(999), weight: 1.0 }], 0.0, 10)
		.await
		.expect("Unknown tags must not fail the query.");

	assert!(unknown.is_empty());

	let limited = store
		.top_people(&[TagWeight { id: tag, weight: 1.0 }], 0.0, 0)
		.await
		.expect("Zero limit must not fail the query.");

	assert!(limited.is_empty());

	graph.cleanup().await.expect("Failed to cleanup test graph.");
}

#[tokio::test]
#[ignore = "Requires external Neo4j. Set TAGRANK_NEO4J_URI to run."]
async fn person_without_name_is_returned_with_no_name() {
	let Some(env) = tagrank_testkit::env_neo4j() else {
		eprintln!("Skipping person_without_name_is_returned_with_no_name; set TAGRANK_NEO4J_URI to run.");

		return;
	};
	let graph = TestGraph::new(&env).await.expect("Failed to prepare test graph.");
	let tag = graph.create_tag(1, &[1.0, 0.0]).await.expect("Failed to create tag.");
	let unnamed =
		graph.create_unnamed_person(10, &[1.0, 0.0]).await.expect("Failed to create person.");
	let store = connect(&env).await;
	let people = store
		.top_people(&[TagWeight { id: tag, weight: 1.0 }], 0.99, 100)
		.await
		.expect("A missing name must not fail the query.");
	let owned = people.iter().filter(|person| graph.owns(person.id)).collect::<Vec<_>>();

	assert_eq!(owned.len(), 1);
	assert_eq!(owned[0].id, unnamed);
	assert_eq!(owned[0].name, None);

	graph.cleanup().await.expect("Failed to cleanup test graph.");
}
