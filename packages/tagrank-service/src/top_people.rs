use serde::{Deserialize, Deserializer, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::{Error, RankedPerson, Result, TagRankService, TagWeight};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPeopleRequest {
	pub tag_weights: Vec<TagWeight>,
	/// Minimum per-tag similarity. Passed to the store unchecked.
	#[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
	pub threshold: Option<f64>,
	/// Maximum number of results. Passed to the store unchecked.
	#[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
	pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopPeopleResponse {
	pub results: Vec<RankedPerson>,
}

impl TagRankService {
	pub async fn top_people(&self, req: TopPeopleRequest) -> Result<TopPeopleResponse> {
		let threshold = req.threshold.unwrap_or(self.cfg.ranking.default_threshold);
		let limit = req.limit.unwrap_or(self.cfg.ranking.default_limit);
		let span = tracing::info_span!(
			"top_people",
			request_id = %Uuid::new_v4(),
			tags = req.tag_weights.len(),
			threshold,
			limit
		);

		async move {
			if req.tag_weights.is_empty() {
				tracing::info!("No tag weights supplied; skipping store query.");

				return Ok(TopPeopleResponse { results: Vec::new() });
			}

			let results = match self.index.top_people(&req.tag_weights, threshold, limit).await {
				Ok(results) => results,
				Err(err) => {
					tracing::warn!(
						error = %err,
						connectivity = err.is_connectivity(),
						"People index query failed."
					);

					return Err(Error::from(err));
				},
			};

			tracing::info!(results = results.len(), "People ranked.");

			Ok(TopPeopleResponse { results })
		}
		.instrument(span)
		.await
	}
}

/// An omitted field falls back to its default; an explicit `null` is a type error.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	T::deserialize(deserializer).map(Some)
}
