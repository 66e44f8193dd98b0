use neo4rs::{BoltList, BoltMap, BoltString, BoltType, Query};

use crate::models::TagWeight;

pub const TOP_PEOPLE: &str = "\
UNWIND $tagWeights AS tw
MATCH (t:Tag {id: tw.id})
CALL db.index.vector.queryNodes($indexName, $candidateK, t.embedding)
	YIELD node AS person, score
WHERE score >= $threshold
WITH person, sum(tw.weight * score) AS weightedScore
RETURN person.id AS id, person.name AS name, weightedScore AS score
ORDER BY score DESC, id ASC
LIMIT $limit";

pub struct TopPeopleParams<'a> {
	pub tag_weights: &'a [TagWeight],
	pub threshold: f64,
	pub limit: i64,
	pub index_name: &'a str,
	pub candidate_k: i64,
}

pub fn top_people(params: &TopPeopleParams<'_>) -> Query {
	neo4rs::query(TOP_PEOPLE)
		.param("tagWeights", tag_weights_param(params.tag_weights))
		.param("threshold", params.threshold)
		.param("limit", params.limit)
		.param("indexName", params.index_name)
		.param("candidateK", params.candidate_k)
}

pub fn tag_weights_param(tag_weights: &[TagWeight]) -> BoltType {
	let mut list = BoltList::new();

	for tag in tag_weights {
		let mut entry = BoltMap::new();

		entry.put(BoltString::from("id"), BoltType::from(tag.id));
		entry.put(BoltString::from("weight"), BoltType::from(tag.weight));

		list.push(BoltType::Map(entry));
	}

	BoltType::List(list)
}
