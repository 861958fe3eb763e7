use serde::{Deserialize, Serialize};

/// A word row as shown by any of the tabular views.
///
/// `base` is the only stable identity. Two rows with the same `base` are the same word for
/// saved-set and example-cache purposes even if their other fields disagree.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct Candidate {
	#[serde(alias = "word")]
	pub base: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<i64>,
	/// Empty when the row carried none; readers use [`Candidate::display_form`].
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub surface: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reading: Option<String>,
	/// JLPT level, 1 (hardest) to 5 (easiest).
	#[serde(default)]
	pub level: Option<u8>,
	#[serde(default)]
	pub frequency_rank: Option<u32>,
	#[serde(default)]
	pub kana_frequency_rank: Option<u32>,
	#[serde(default)]
	pub meanings: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parts_of_speech: Option<Vec<String>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
	#[serde(default, alias = "count_in_episode", skip_serializing_if = "Option::is_none")]
	pub occurrence_count: Option<u32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<String>,
	#[serde(default, alias = "source_history_id", skip_serializing_if = "Option::is_none")]
	pub source_reference_id: Option<i64>,
}
impl Candidate {
	pub fn new(base: impl Into<String>) -> Self {
		let base = base.into();

		Self { surface: base.clone(), base, ..Default::default() }
	}

	/// The form to display. Rows decoded without a surface fall back to `base`.
	pub fn display_form(&self) -> &str {
		if self.surface.is_empty() { &self.base } else { &self.surface }
	}

	pub fn with_level(mut self, level: u8) -> Self {
		self.level = Some(level);

		self
	}

	pub fn with_frequency_rank(mut self, rank: u32) -> Self {
		self.frequency_rank = Some(rank);

		self
	}

	pub fn with_kana_frequency_rank(mut self, rank: u32) -> Self {
		self.kana_frequency_rank = Some(rank);

		self
	}

	pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
		self.reading = Some(reading.into());

		self
	}

	pub fn with_meanings<I, S>(mut self, meanings: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.meanings = meanings.into_iter().map(Into::into).collect();

		self
	}

	pub fn with_occurrence_count(mut self, count: u32) -> Self {
		self.occurrence_count = Some(count);

		self
	}

	pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
		self.created_at = Some(created_at.into());

		self
	}

	pub fn with_context(mut self, context: impl Into<String>) -> Self {
		self.context = Some(context.into());

		self
	}
}

#[cfg(test)]
mod tests {
	use crate::candidate::Candidate;

	#[test]
	fn decodes_backend_aliases() {
		let raw = serde_json::json!({
			"word": "猫",
			"reading": "ねこ",
			"meanings": ["cat"],
			"level": 4,
			"frequency_rank": 50,
			"kana_frequency_rank": null,
			"count_in_episode": 3,
			"source_history_id": 9
		});
		let candidate: Candidate = serde_json::from_value(raw).expect("Failed to decode row.");

		assert_eq!(candidate.base, "猫");
		assert_eq!(candidate.display_form(), "猫");
		assert_eq!(candidate.occurrence_count, Some(3));
		assert_eq!(candidate.source_reference_id, Some(9));
		assert_eq!(candidate.kana_frequency_rank, None);
	}

	#[test]
	fn missing_surface_is_not_exported_as_empty() {
		let candidate: Candidate =
			serde_json::from_value(serde_json::json!({ "base": "犬" })).expect("Failed to decode row.");
		let encoded = serde_json::to_value(&candidate).expect("Failed to encode row.");

		assert_eq!(candidate.display_form(), "犬");
		assert!(encoded.get("surface").is_none());
		assert_eq!(
			serde_json::to_value(Candidate::new("猫")).expect("Failed to encode row.")["surface"],
			"猫"
		);
	}
}
