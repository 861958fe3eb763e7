use crate::candidate::Candidate;

/// Stand-in value for a missing frequency signal.
pub const UNRANKED_SENTINEL: u32 = 999_999;
/// Values at or above this threshold carry no real rank.
pub const RANKED_THRESHOLD: u32 = 900_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveRank {
	/// The resolved rank, present only when the word is ranked.
	pub rank: Option<u32>,
	pub is_ranked: bool,
	/// True when the kana-only signal beat the standard-script signal.
	pub used_alternate_signal: bool,
}

pub fn effective_rank(candidate: &Candidate) -> EffectiveRank {
	resolve(candidate.frequency_rank, candidate.kana_frequency_rank)
}

pub fn resolve(frequency_rank: Option<u32>, kana_frequency_rank: Option<u32>) -> EffectiveRank {
	let primary = frequency_rank.unwrap_or(UNRANKED_SENTINEL);
	let alternate = kana_frequency_rank.unwrap_or(UNRANKED_SENTINEL);
	let used_alternate_signal = alternate < primary;
	let value = if used_alternate_signal { alternate } else { primary };
	let is_ranked = value < RANKED_THRESHOLD;

	EffectiveRank { rank: is_ranked.then_some(value), is_ranked, used_alternate_signal }
}

#[cfg(test)]
mod tests {
	use crate::rank::{RANKED_THRESHOLD, resolve};

	#[test]
	fn kana_signal_wins_when_strictly_lower() {
		let rank = resolve(Some(50_000), Some(200));

		assert_eq!(rank.rank, Some(200));
		assert!(rank.is_ranked);
		assert!(rank.used_alternate_signal);
	}

	#[test]
	fn equal_signals_keep_primary() {
		let rank = resolve(Some(300), Some(300));

		assert_eq!(rank.rank, Some(300));
		assert!(!rank.used_alternate_signal);
	}

	#[test]
	fn missing_primary_falls_back_to_kana() {
		let rank = resolve(None, Some(1_200));

		assert_eq!(rank.rank, Some(1_200));
		assert!(rank.used_alternate_signal);
	}

	#[test]
	fn unranked_iff_both_signals_absent_or_sentinel() {
		let signals = [
			None,
			Some(1),
			Some(899_999),
			Some(RANKED_THRESHOLD),
			Some(950_000),
			Some(999_999),
		];

		for primary in signals {
			for alternate in signals {
				let unranked = |value: Option<u32>| value.is_none_or(|v| v >= RANKED_THRESHOLD);
				let expected_ranked = !(unranked(primary) && unranked(alternate));
				let rank = resolve(primary, alternate);

				assert_eq!(rank.is_ranked, expected_ranked, "{primary:?} / {alternate:?}");
				assert_eq!(rank.rank.is_some(), expected_ranked);
			}
		}
	}

	#[test]
	fn sentinel_value_is_unranked() {
		let rank = resolve(Some(RANKED_THRESHOLD), None);

		assert!(!rank.is_ranked);
		assert_eq!(rank.rank, None);
		assert!(!rank.used_alternate_signal);
	}
}
