use serde::{Deserialize, Serialize};

/// One weighted tag reference supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagWeight {
	pub id: i64,
	pub weight: f64,
}

/// A person with the aggregated weighted similarity across every matched tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPerson {
	pub id: i64,
	/// `None` when the stored person has no name; serialized as `null`.
	pub name: Option<String>,
	pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonNode {
	pub id: i64,
	pub name: Option<String>,
	pub embedding: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
	pub id: i64,
	pub embedding: Vec<f32>,
}
