//! In-process people index.
//!
//! Evaluates the same ranking contract as [`crate::queries::TOP_PEOPLE`] without a database:
//! per-tag nearest neighbours by cosine similarity, threshold filtering before aggregation,
//! a weighted sum per person, then ordering and truncation.
//!
//! Scores use the range of a Neo4j cosine vector index, `(1 + cosine) / 2` in `[0, 1]`, so the
//! same data and threshold select the same people in both stores.

use std::{cmp::Ordering, collections::HashMap};

use crate::{
	Error, Result,
	models::{PersonNode, RankedPerson, TagNode, TagWeight},
};

/// One person returned by a nearest-neighbour lookup for a single tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub id: i64,
	pub name: Option<String>,
	pub score: f64,
}

/// Nearest neighbours for one supplied tag together with the caller's weight for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TagMatches {
	pub weight: f64,
	pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct MemoryStore {
	tags: HashMap<i64, TagNode>,
	people: Vec<PersonNode>,
	candidate_k: usize,
}
impl MemoryStore {
	pub fn new(candidate_k: usize) -> Self {
		Self { tags: HashMap::new(), people: Vec::new(), candidate_k }
	}

	pub fn with_tag(mut self, id: i64, embedding: Vec<f32>) -> Self {
		self.insert_tag(TagNode { id, embedding });

		self
	}

	pub fn with_person(mut self, id: i64, name: impl Into<String>, embedding: Vec<f32>) -> Self {
		self.insert_person(PersonNode { id, name: Some(name.into()), embedding });

		self
	}

	pub fn insert_tag(&mut self, tag: TagNode) {
		self.tags.insert(tag.id, tag);
	}

	/// Replaces any person already stored under the same id.
	pub fn insert_person(&mut self, person: PersonNode) {
		self.people.retain(|existing| existing.id != person.id);
		self.people.push(person);
	}

	/// Up to `candidate_k` people closest to `query`, best first.
	pub fn nearest(&self, query: &[f32]) -> Vec<Candidate> {
		let mut candidates = self
			.people
			.iter()
			.filter_map(|person| {
				cosine_similarity(query, &person.embedding).map(|cosine| Candidate {
					id: person.id,
					name: person.name.clone(),
					score: index_score(cosine),
				})
			})
			.collect::<Vec<_>>();

		candidates.sort_by(|a, b| by_score_then_id(a.score, a.id, b.score, b.id));
		candidates.truncate(self.candidate_k);

		candidates
	}

	pub fn top_people(
		&self,
		tag_weights: &[TagWeight],
		threshold: f64,
		limit: i64,
	) -> Result<Vec<RankedPerson>> {
		let limit = usize::try_from(limit).map_err(|_| {
			Error::InvalidArgument(format!("LIMIT must be a non-negative integer, got {limit}."))
		})?;
		let matches = tag_weights
			.iter()
			.filter_map(|tag_weight| {
				self.tags.get(&tag_weight.id).map(|tag| TagMatches {
					weight: tag_weight.weight,
					candidates: self.nearest(&tag.embedding),
				})
			})
			.collect::<Vec<_>>();

		Ok(aggregate(matches, threshold, limit))
	}
}

/// Sums `weight * score` per person over every candidate that reaches `threshold`, then orders by
/// aggregated score descending with person id ascending on ties and keeps the first `limit`.
pub fn aggregate<I>(matches: I, threshold: f64, limit: usize) -> Vec<RankedPerson>
where
	I: IntoIterator<Item = TagMatches>,
{
	let mut by_person: HashMap<i64, RankedPerson> = HashMap::new();

	for tag in matches {
		for candidate in tag.candidates {
			if candidate.score < threshold {
				continue;
			}

			let contribution = tag.weight * candidate.score;

			by_person
				.entry(candidate.id)
				.and_modify(|person| person.score += contribution)
				.or_insert(RankedPerson {
					id: candidate.id,
					name: candidate.name,
					score: contribution,
				});
		}
	}

	let mut ranked = by_person.into_values().collect::<Vec<_>>();

	ranked.sort_by(|a, b| by_score_then_id(a.score, a.id, b.score, b.id));
	ranked.truncate(limit);

	ranked
}

/// `None` when the vectors differ in length or either has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f64> {
	if a.len() != b.len() || a.is_empty() {
		return None;
	}

	let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);

	for (x, y) in a.iter().zip(b) {
		let (x, y) = (f64::from(*x), f64::from(*y));

		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return None;
	}

	Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Maps a cosine in `[-1, 1]` onto the `[0, 1]` score a cosine vector index reports.
pub fn index_score(cosine: f64) -> f64 {
	(1.0 + cosine) / 2.0
}

fn by_score_then_id(a_score: f64, a_id: i64, b_score: f64, b_id: i64) -> Ordering {
	b_score.total_cmp(&a_score).then_with(|| a_id.cmp(&b_id))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn candidate(id: i64, name: &str, score: f64) -> Candidate {
		Candidate { id, name: Some(name.to_string()), score }
	}

	#[test]
	fn single_tag_keeps_store_order_above_threshold() {
		let matches = vec![TagMatches {
			weight: 1.0,
			candidates: vec![
				candidate(1, "A", 0.95),
				candidate(2, "B", 0.92),
				candidate(3, "C", 0.81),
			],
		}];
		let ranked = aggregate(matches, 0.9, 5);

		assert_eq!(ranked.len(), 2);
		assert_eq!((ranked[0].id, ranked[0].score), (1, 0.95));
		assert_eq!((ranked[1].id, ranked[1].score), (2, 0.92));
	}

	#[test]
	fn contributions_from_several_tags_are_summed() {
		let matches = vec![
			TagMatches { weight: 0.5, candidates: vec![candidate(7, "Sato", 0.8)] },
			TagMatches { weight: 0.5, candidates: vec![candidate(7, "Sato", 0.9)] },
		];
		let ranked = aggregate(matches, 0.7, 20);

		assert_eq!(ranked.len(), 1);
		assert!((ranked[0].score - 0.85).abs() < 1e-12);
	}

	#[test]
	fn threshold_applies_before_aggregation() {
		// 0.6 is below the threshold, so only the 0.75 match contributes even though the sum
		// would clear it.
		let matches = vec![
			TagMatches { weight: 1.0, candidates: vec![candidate(1, "A", 0.6)] },
			TagMatches { weight: 1.0, candidates: vec![candidate(1, "A", 0.75)] },
		];
		let ranked = aggregate(matches, 0.7, 20);

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].score, 0.75);
	}

	#[test]
	fn ties_break_on_person_id() {
		let matches = vec![TagMatches {
			weight: 1.0,
			candidates: vec![candidate(9, "Z", 0.8), candidate(3, "Y", 0.8), candidate(5, "X", 0.9)],
		}];
		let ids = aggregate(matches, 0.0, 10).into_iter().map(|p| p.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![5, 3, 9]);
	}

	#[test]
	fn zero_limit_yields_nothing() {
		let matches =
			vec![TagMatches { weight: 1.0, candidates: vec![candidate(1, "A", 0.99)] }];

		assert!(aggregate(matches, 0.5, 0).is_empty());
	}

	#[test]
	fn cosine_rejects_mismatched_and_zero_vectors() {
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), None);
		assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), None);
		assert_eq!(cosine_similarity(&[2.0, 0.0], &[3.0, 0.0]), Some(1.0));
	}

	#[test]
	fn nearest_is_capped_at_candidate_k() {
		let store = MemoryStore::new(2)
			.with_person(1, "A", vec![1.0, 0.0])
			.with_person(2, "B", vec![0.9, 0.1])
			.with_person(3, "C", vec![0.5, 0.5]);
		let ids = store.nearest(&[1.0, 0.0]).into_iter().map(|c| c.id).collect::<Vec<_>>();

		assert_eq!(ids, vec![1, 2]);
	}

	#[test]
	fn nearest_scores_follow_the_cosine_index_range() {
		let store = MemoryStore::new(10)
			.with_person(1, "Same", vec![2.0, 0.0])
			.with_person(2, "Orthogonal", vec![0.0, 1.0])
			.with_person(3, "Opposite", vec![-1.0, 0.0]);
		let scored =
			store.nearest(&[1.0, 0.0]).into_iter().map(|c| (c.id, c.score)).collect::<Vec<_>>();

		assert_eq!(scored, vec![(1, 1.0), (2, 0.5), (3, 0.0)]);
	}

	#[test]
	fn unnamed_person_ranks_with_no_name() {
		let mut store = MemoryStore::new(10).with_tag(1, vec![1.0, 0.0]);

		store.insert_person(PersonNode { id: 4, name: None, embedding: vec![1.0, 0.0] });

		let ranked = store
			.top_people(&[TagWeight { id: 1, weight: 1.0 }], 0.9, 5)
			.expect("Unnamed people must not fail ranking.");

		assert_eq!(ranked, vec![RankedPerson { id: 4, name: None, score: 1.0 }]);
	}

	#[test]
	fn negative_limit_is_rejected() {
		let store = MemoryStore::new(10).with_tag(1, vec![1.0, 0.0]);
		let err = store
			.top_people(&[TagWeight { id: 1, weight: 1.0 }], 0.7, -1)
			.expect_err("Negative limit must be rejected.");

		assert!(matches!(err, Error::InvalidArgument(_)));
	}
}
