use std::collections::HashSet;

use yomu_domain::{
	Candidate, ContextSource, FilterState, PAGE_SIZE, SortKey, SortOrder, SortState,
	effective_rank, filter_candidates, page_count, page_range, parse_context, sort_candidates,
};

fn bases(rows: &[&Candidate]) -> Vec<String> {
	rows.iter().map(|candidate| candidate.base.clone()).collect()
}

#[test]
fn frequency_window_keeps_only_common_words() {
	let candidates = vec![
		Candidate::new("猫").with_level(4).with_frequency_rank(50),
		Candidate::new("犬").with_level(3).with_frequency_rank(20_000),
	];
	let filter =
		FilterState { min_frequency: Some(0), max_frequency: Some(1_000), ..Default::default() };
	let result = filter_candidates(&candidates, &filter, &HashSet::new());

	assert_eq!(bases(&result), vec!["猫"]);
}

#[test]
fn kana_signal_overrides_a_rarer_kanji_rank() {
	let candidate =
		Candidate::new("ありがとう").with_frequency_rank(50_000).with_kana_frequency_rank(200);
	let rank = effective_rank(&candidate);

	assert_eq!(rank.rank, Some(200));
	assert!(rank.is_ranked);
	assert!(rank.used_alternate_signal);
}

#[test]
fn count_descending_orders_by_occurrences() {
	let candidates = vec![
		Candidate::new("a").with_occurrence_count(3),
		Candidate::new("b").with_occurrence_count(10),
		Candidate::new("c").with_occurrence_count(1),
	];
	let mut rows: Vec<&Candidate> = candidates.iter().collect();

	sort_candidates(&mut rows, &SortState::new(SortKey::Count, SortOrder::Desc));

	let counts: Vec<Option<u32>> = rows.iter().map(|row| row.occurrence_count).collect();

	assert_eq!(counts, vec![Some(10), Some(3), Some(1)]);
}

#[test]
fn freq_sort_uses_the_lower_of_both_signals() {
	let candidates = vec![
		Candidate::new("b").with_frequency_rank(300),
		Candidate::new("a").with_frequency_rank(900).with_kana_frequency_rank(100),
	];
	let mut rows: Vec<&Candidate> = candidates.iter().collect();

	sort_candidates(&mut rows, &SortState::default());

	assert_eq!(bases(&rows), vec!["a", "b"]);
}

#[test]
fn filter_sort_and_page_compose() {
	let candidates: Vec<Candidate> = (0..130)
		.map(|i| {
			Candidate::new(format!("語{i:03}"))
				.with_level(if i % 2 == 0 { 5 } else { 4 })
				.with_frequency_rank(1_000 - i)
		})
		.collect();
	let saved: HashSet<String> = ["語128".to_string()].into_iter().collect();
	let filter = FilterState { selected_level: Some(5), hide_saved: true, ..Default::default() };
	let mut rows = filter_candidates(&candidates, &filter, &saved);

	sort_candidates(&mut rows, &SortState::default());

	// Even indices 0..=126 survive; the most frequent (lowest rank) comes first.
	assert_eq!(rows.len(), 64);
	assert_eq!(rows[0].base, "語126");
	assert_eq!(page_count(rows.len(), PAGE_SIZE), 2);
	assert_eq!(page_range(2, rows.len(), PAGE_SIZE), 50..64);
}

#[test]
fn unranked_words_pass_minimum_but_not_maximum() {
	let candidates = vec![Candidate::new("珍"), Candidate::new("常").with_frequency_rank(10)];
	let saved = HashSet::new();
	let min_only = FilterState { min_frequency: Some(100), ..Default::default() };
	let max_only = FilterState { max_frequency: Some(100), ..Default::default() };

	assert_eq!(bases(&filter_candidates(&candidates, &min_only, &saved)), vec!["珍"]);
	assert_eq!(bases(&filter_candidates(&candidates, &max_only, &saved)), vec!["常"]);
}

#[test]
fn search_matches_reading_and_meanings() {
	let candidates = vec![
		Candidate::new("猫").with_reading("ねこ").with_meanings(["Cat"]),
		Candidate::new("犬").with_reading("いぬ").with_meanings(["dog"]),
	];
	let saved = HashSet::new();
	let by_meaning = FilterState { search_query: " CAT ".to_string(), ..Default::default() };
	let by_reading = FilterState { search_query: "いぬ".to_string(), ..Default::default() };

	assert_eq!(bases(&filter_candidates(&candidates, &by_meaning, &saved)), vec!["猫"]);
	assert_eq!(bases(&filter_candidates(&candidates, &by_reading, &saved)), vec!["犬"]);
}

#[test]
fn context_payloads_fall_back_to_text() {
	let structured = Candidate::new("猫")
		.with_context(r#"{"anime_title":"Frieren","episode":3,"sentence":"猫だ。"}"#);
	let plain = Candidate::new("犬").with_context("{not json");

	match parse_context(structured.context.as_deref().unwrap_or_default()) {
		ContextSource::Episode(context) => {
			assert_eq!(context.series_title, "Frieren");
			assert_eq!(context.episode_number, Some(3));
		},
		other => panic!("Expected episode context, got {other:?}."),
	}

	assert_eq!(
		parse_context(plain.context.as_deref().unwrap_or_default()),
		ContextSource::Text("{not json".to_string())
	);
}
