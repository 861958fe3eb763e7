use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{candidate::Candidate, rank};

/// The user-controlled predicate set. Every field is ANDed.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(default)]
pub struct FilterState {
	pub selected_level: Option<u8>,
	pub search_query: String,
	pub min_frequency: Option<u32>,
	pub max_frequency: Option<u32>,
	pub hide_saved: bool,
}
impl FilterState {
	pub fn matches(&self, candidate: &Candidate, saved: &HashSet<String>) -> bool {
		let needle = normalized_query(&self.search_query);

		self.matches_with_needle(candidate, saved, needle.as_deref())
	}

	fn matches_with_needle(
		&self,
		candidate: &Candidate,
		saved: &HashSet<String>,
		needle: Option<&str>,
	) -> bool {
		if let Some(level) = self.selected_level
			&& candidate.level != Some(level)
		{
			return false;
		}
		if self.hide_saved && saved.contains(&candidate.base) {
			return false;
		}
		if !self.frequency_in_range(candidate) {
			return false;
		}

		match needle {
			Some(needle) => matches_search(candidate, needle),
			None => true,
		}
	}

	// The two bounds are asymmetric: the minimum never rejects an unranked word, while the
	// maximum requires a known rank.
	fn frequency_in_range(&self, candidate: &Candidate) -> bool {
		if self.min_frequency.is_none() && self.max_frequency.is_none() {
			return true;
		}

		let resolved = rank::effective_rank(candidate);

		if let Some(min) = self.min_frequency
			&& let Some(rank) = resolved.rank
			&& rank < min
		{
			return false;
		}
		if let Some(max) = self.max_frequency {
			return resolved.rank.is_some_and(|rank| rank <= max);
		}

		true
	}
}

/// Returns the candidates that pass `filter`, in input order.
pub fn filter_candidates<'a>(
	candidates: &'a [Candidate],
	filter: &FilterState,
	saved: &HashSet<String>,
) -> Vec<&'a Candidate> {
	filter_indices(candidates, filter, saved).into_iter().map(|index| &candidates[index]).collect()
}

/// Positions of the candidates that pass `filter`, ascending.
pub fn filter_indices(
	candidates: &[Candidate],
	filter: &FilterState,
	saved: &HashSet<String>,
) -> Vec<usize> {
	let needle = normalized_query(&filter.search_query);

	candidates
		.iter()
		.enumerate()
		.filter(|(_, candidate)| filter.matches_with_needle(candidate, saved, needle.as_deref()))
		.map(|(index, _)| index)
		.collect()
}

fn normalized_query(query: &str) -> Option<String> {
	let trimmed = query.trim();

	(!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn matches_search(candidate: &Candidate, needle: &str) -> bool {
	let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

	contains(&candidate.base)
		|| candidate.reading.as_deref().is_some_and(contains)
		|| candidate.meanings.iter().any(|meaning| contains(meaning))
}
