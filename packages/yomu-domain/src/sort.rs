//! Column ordering for the word tables.
//!
//! `freq` orders by the plain minimum of both frequency signals. It does not share the
//! strict-less attribution rule in [`crate::rank`]; do not merge the two.

use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{candidate::Candidate, rank::UNRANKED_SENTINEL};

const MISSING_LEVEL: u8 = 99;
const MISSING_COUNT: u32 = 0;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
	Level,
	Freq,
	Word,
	Date,
	Count,
	/// A column this engine does not know how to order. Sorting by it is a stable no-op.
	Other(String),
}
impl SortKey {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Level => "level",
			Self::Freq => "freq",
			Self::Word => "word",
			Self::Date => "date",
			Self::Count => "count",
			Self::Other(raw) => raw,
		}
	}
}
impl FromStr for SortKey {
	type Err = Infallible;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		Ok(match raw {
			"level" => Self::Level,
			"freq" => Self::Freq,
			"word" => Self::Word,
			"date" => Self::Date,
			"count" => Self::Count,
			other => Self::Other(other.to_string()),
		})
	}
}
impl From<String> for SortKey {
	fn from(raw: String) -> Self {
		match raw.parse() {
			Ok(key) => key,
			Err(never) => match never {},
		}
	}
}
impl From<SortKey> for String {
	fn from(key: SortKey) -> Self {
		key.as_str().to_string()
	}
}
impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
	#[default]
	Asc,
	Desc,
}
impl SortOrder {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}

	pub fn flipped(self) -> Self {
		match self {
			Self::Asc => Self::Desc,
			Self::Desc => Self::Asc,
		}
	}
}
impl FromStr for SortOrder {
	type Err = String;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"asc" => Ok(Self::Asc),
			"desc" => Ok(Self::Desc),
			other => Err(format!("sort order must be asc or desc, got '{other}'.")),
		}
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SortState {
	pub sort_by: SortKey,
	pub sort_order: SortOrder,
}
impl SortState {
	pub fn new(sort_by: SortKey, sort_order: SortOrder) -> Self {
		Self { sort_by, sort_order }
	}

	/// Header-click semantics: the active column flips direction, any other column becomes
	/// active in ascending order.
	pub fn select_column(&mut self, column: SortKey) {
		if self.sort_by == column {
			self.sort_order = self.sort_order.flipped();
		} else {
			self.sort_by = column;
			self.sort_order = SortOrder::Asc;
		}
	}
}
impl Default for SortState {
	fn default() -> Self {
		Self { sort_by: SortKey::Freq, sort_order: SortOrder::Asc }
	}
}

pub fn compare(a: &Candidate, b: &Candidate, sort_by: &SortKey, sort_order: SortOrder) -> Ordering {
	let natural = match sort_by {
		SortKey::Level => level_key(a).cmp(&level_key(b)),
		SortKey::Freq => freq_key(a).cmp(&freq_key(b)),
		SortKey::Word => a.base.cmp(&b.base),
		SortKey::Date => date_key(a).cmp(date_key(b)),
		SortKey::Count => count_key(a).cmp(&count_key(b)),
		SortKey::Other(_) => Ordering::Equal,
	};

	match sort_order {
		SortOrder::Asc => natural,
		SortOrder::Desc => natural.reverse(),
	}
}

/// Stable in-place sort; equal keys keep their input order in both directions.
pub fn sort_candidates(rows: &mut [&Candidate], sort: &SortState) {
	if matches!(sort.sort_by, SortKey::Other(_)) {
		return;
	}

	rows.sort_by(|a, b| compare(a, b, &sort.sort_by, sort.sort_order));
}

/// Stable sort of positions into `candidates`.
pub fn sort_indices(candidates: &[Candidate], indices: &mut [usize], sort: &SortState) {
	if matches!(sort.sort_by, SortKey::Other(_)) {
		return;
	}

	indices.sort_by(|&a, &b| compare(&candidates[a], &candidates[b], &sort.sort_by, sort.sort_order));
}

fn level_key(candidate: &Candidate) -> u8 {
	candidate.level.unwrap_or(MISSING_LEVEL)
}

fn freq_key(candidate: &Candidate) -> u32 {
	candidate
		.frequency_rank
		.unwrap_or(UNRANKED_SENTINEL)
		.min(candidate.kana_frequency_rank.unwrap_or(UNRANKED_SENTINEL))
}

fn date_key(candidate: &Candidate) -> &str {
	candidate.created_at.as_deref().unwrap_or("")
}

fn count_key(candidate: &Candidate) -> u32 {
	candidate.occurrence_count.unwrap_or(MISSING_COUNT)
}
