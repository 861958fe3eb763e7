//! Filter, sort and pagination state shared by every word table.
//!
//! A [`BrowseController`] runs in one of two modes fixed at construction. In local mode it owns
//! the full candidate list and evaluates predicates, ordering and page slicing itself. In remote
//! mode it only tracks state and hands a [`QueryParams`] bundle to a [`QuerySink`]; the rows it
//! holds are whatever page the caller last applied.

mod remote_sync;

use std::{collections::HashSet, sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use yomu_config::DEFAULT_REMOTE_DEBOUNCE_MS;
use yomu_domain::{
	Candidate, FilterState, PAGE_SIZE, SortKey, SortOrder, SortState, clamp_page, filter_indices,
	page_count, page_range, sort_indices,
};

use crate::QuerySink;
use remote_sync::RemoteSync;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseMode {
	Local,
	Remote,
}

/// Everything a remote listing needs to reproduce the current view.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
	/// 1-based.
	pub page: usize,
	pub page_size: usize,
	pub search: String,
	pub level: Option<u8>,
	pub min_frequency: Option<u32>,
	pub max_frequency: Option<u32>,
	pub sort_by: SortKey,
	pub sort_order: SortOrder,
	pub hide_saved: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryEmission {
	/// Strictly increasing per controller. Responses carry it back to
	/// [`BrowseController::apply_remote_page`] so late replies can be discarded.
	pub seq: u64,
	pub params: QueryParams,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
pub struct RemotePage {
	pub items: Vec<Candidate>,
	pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageView {
	pub items: Vec<Candidate>,
	pub total_count: usize,
	pub current_page: usize,
	pub total_pages: usize,
	pub page_size: usize,
}

/// The rows an export collaborator should write, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportSnapshot {
	pub label: String,
	pub items: Vec<Candidate>,
}

pub struct BrowseController {
	mode: BrowseMode,
	label: String,
	filter: FilterState,
	sort: SortState,
	current_page: usize,
	candidates: Vec<Candidate>,
	saved: HashSet<String>,
	// Local mode: positions into `candidates` after filtering and sorting.
	ordered: Vec<usize>,
	remote_total: usize,
	last_applied_seq: u64,
	remote: Option<RemoteSync>,
}
impl BrowseController {
	pub fn local(candidates: Vec<Candidate>, saved: HashSet<String>) -> Self {
		let mut controller = Self::with_mode(BrowseMode::Local, None);

		controller.candidates = candidates;
		controller.saved = saved;
		controller.refresh();

		controller
	}

	pub fn remote(sink: Arc<dyn QuerySink>) -> Self {
		Self::remote_with_debounce(sink, Duration::from_millis(DEFAULT_REMOTE_DEBOUNCE_MS))
	}

	pub fn remote_with_debounce(sink: Arc<dyn QuerySink>, debounce: Duration) -> Self {
		Self::with_mode(BrowseMode::Remote, Some(RemoteSync::new(sink, debounce)))
	}

	fn with_mode(mode: BrowseMode, remote: Option<RemoteSync>) -> Self {
		Self {
			mode,
			label: String::new(),
			filter: FilterState::default(),
			sort: SortState::default(),
			current_page: 1,
			candidates: Vec::new(),
			saved: HashSet::new(),
			ordered: Vec::new(),
			remote_total: 0,
			last_applied_seq: 0,
			remote,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = label.into();

		self
	}

	pub fn with_sort(mut self, sort: SortState) -> Self {
		self.sort = sort;
		self.refresh();

		self
	}

	pub fn mode(&self) -> BrowseMode {
		self.mode
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn filter(&self) -> &FilterState {
		&self.filter
	}

	pub fn sort(&self) -> &SortState {
		&self.sort
	}

	pub fn current_page(&self) -> usize {
		self.current_page
	}

	pub fn total_count(&self) -> usize {
		match self.mode {
			BrowseMode::Local => self.ordered.len(),
			BrowseMode::Remote => self.remote_total,
		}
	}

	pub fn total_pages(&self) -> usize {
		page_count(self.total_count(), PAGE_SIZE)
	}

	pub fn query_params(&self) -> QueryParams {
		QueryParams {
			page: self.current_page,
			page_size: PAGE_SIZE,
			search: self.filter.search_query.clone(),
			level: self.filter.selected_level,
			min_frequency: self.filter.min_frequency,
			max_frequency: self.filter.max_frequency,
			sort_by: self.sort.sort_by.clone(),
			sort_order: self.sort.sort_order,
			hide_saved: self.filter.hide_saved,
		}
	}

	/// Emits the current parameters immediately, once. Later calls do nothing.
	///
	/// Local controllers have nothing to emit and always return `false`.
	pub fn mount(&mut self) -> bool {
		let params = self.query_params();

		match self.remote.as_mut() {
			Some(remote) => remote.mount(params),
			None => false,
		}
	}

	pub fn is_mounted(&self) -> bool {
		self.remote.as_ref().is_some_and(RemoteSync::is_mounted)
	}

	/// Whether a debounced emission is waiting for its quiet period to end.
	pub fn has_pending_emission(&self) -> bool {
		self.remote.as_ref().is_some_and(RemoteSync::has_pending)
	}

	pub fn set_level(&mut self, level: Option<u8>) {
		if self.filter.selected_level == level {
			return;
		}

		self.filter.selected_level = level;
		self.filter_changed();
	}

	pub fn set_search_query(&mut self, query: impl Into<String>) {
		let query = query.into();

		if self.filter.search_query == query {
			return;
		}

		self.filter.search_query = query;
		self.filter_changed();
	}

	pub fn set_min_frequency(&mut self, min: Option<u32>) {
		if self.filter.min_frequency == min {
			return;
		}

		self.filter.min_frequency = min;
		self.filter_changed();
	}

	pub fn set_max_frequency(&mut self, max: Option<u32>) {
		if self.filter.max_frequency == max {
			return;
		}

		self.filter.max_frequency = max;
		self.filter_changed();
	}

	pub fn set_hide_saved(&mut self, hide_saved: bool) {
		if self.filter.hide_saved == hide_saved {
			return;
		}

		self.filter.hide_saved = hide_saved;
		self.filter_changed();
	}

	/// Header click: flips the active column, or activates a new one ascending. Keeps the page.
	pub fn select_sort_column(&mut self, column: SortKey) {
		self.sort.select_column(column);
		self.sort_changed();
	}

	pub fn set_sort_order(&mut self, order: SortOrder) {
		if self.sort.sort_order == order {
			return;
		}

		self.sort.sort_order = order;
		self.sort_changed();
	}

	pub fn toggle_sort_order(&mut self) {
		self.set_sort_order(self.sort.sort_order.flipped());
	}

	/// Local mode clamps to the available pages. Remote mode only enforces the 1-based floor,
	/// since the authoritative total may be stale while a request is in flight.
	pub fn set_page(&mut self, page: usize) {
		let page = match self.mode {
			BrowseMode::Local => clamp_page(page, self.ordered.len(), PAGE_SIZE),
			BrowseMode::Remote => page.max(1),
		};

		if self.current_page == page {
			return;
		}

		self.current_page = page;
		self.schedule_emission();
	}

	pub fn next_page(&mut self) {
		self.set_page(self.current_page.saturating_add(1));
	}

	pub fn previous_page(&mut self) {
		self.set_page(self.current_page.saturating_sub(1));
	}

	/// Replaces the rows. In local mode this is the full candidate list; in remote mode it is the
	/// current page as delivered by the caller.
	pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
		self.candidates = candidates;
		self.refresh();
	}

	/// Replaces the saved-word snapshot used by `hide_saved` in local mode.
	pub fn set_saved(&mut self, saved: HashSet<String>) {
		if self.saved == saved {
			return;
		}

		self.saved = saved;

		if self.filter.hide_saved {
			self.refresh();
		}
	}

	/// Drops a row locally, e.g. after the saved-words view confirmed a delete.
	pub fn remove_candidate(&mut self, base: &str) -> bool {
		let before = self.candidates.len();

		self.candidates.retain(|candidate| candidate.base != base);

		let removed = self.candidates.len() != before;

		if removed {
			if self.mode == BrowseMode::Remote {
				self.remote_total = self.remote_total.saturating_sub(1);
			}

			self.refresh();
		}

		removed
	}

	/// Applies a remote listing reply. Replies older than the newest one already applied are
	/// dropped and `false` is returned.
	pub fn apply_remote_page(&mut self, seq: u64, page: RemotePage) -> bool {
		if self.mode != BrowseMode::Remote {
			tracing::warn!(seq, "Ignoring a remote page on a local browse controller.");

			return false;
		}
		if seq < self.last_applied_seq {
			tracing::debug!(seq, latest = self.last_applied_seq, "Dropping a stale remote page.");

			return false;
		}

		self.last_applied_seq = seq;
		self.candidates = page.items;
		self.remote_total = page.total;

		true
	}

	/// Sequence number of the most recent emission, 0 before mount.
	pub fn last_emitted_seq(&self) -> u64 {
		self.remote.as_ref().map(RemoteSync::last_seq).unwrap_or(0)
	}

	pub fn view(&self) -> PageView {
		let items = match self.mode {
			BrowseMode::Local => {
				let range = page_range(self.current_page, self.ordered.len(), PAGE_SIZE);

				self.ordered[range].iter().map(|&index| self.candidates[index].clone()).collect()
			},
			BrowseMode::Remote => self.candidates.clone(),
		};

		PageView {
			items,
			total_count: self.total_count(),
			current_page: self.current_page,
			total_pages: self.total_pages(),
			page_size: PAGE_SIZE,
		}
	}

	pub fn export_snapshot(&self) -> ExportSnapshot {
		let items = match self.mode {
			BrowseMode::Local => {
				self.ordered.iter().map(|&index| self.candidates[index].clone()).collect()
			},
			BrowseMode::Remote => self.candidates.clone(),
		};

		ExportSnapshot { label: self.label.clone(), items }
	}

	fn filter_changed(&mut self) {
		self.current_page = 1;
		self.refresh();
		self.schedule_emission();
	}

	fn sort_changed(&mut self) {
		self.refresh();
		self.schedule_emission();
	}

	fn refresh(&mut self) {
		if self.mode != BrowseMode::Local {
			return;
		}

		let mut ordered = filter_indices(&self.candidates, &self.filter, &self.saved);

		sort_indices(&self.candidates, &mut ordered, &self.sort);

		self.ordered = ordered;

		let clamped = clamp_page(self.current_page, self.ordered.len(), PAGE_SIZE);

		if clamped != self.current_page {
			tracing::debug!(from = self.current_page, to = clamped, "Clamping browse page.");

			self.current_page = clamped;
		}
	}

	fn schedule_emission(&mut self) {
		let params = self.query_params();

		if let Some(remote) = self.remote.as_mut() {
			remote.schedule(params);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use yomu_domain::{Candidate, SortKey, SortOrder};

	use crate::browse::BrowseController;

	fn numbered(count: usize) -> Vec<Candidate> {
		(0..count)
			.map(|index| {
				Candidate::new(format!("w{index:04}"))
					.with_frequency_rank(index as u32 + 1)
					.with_level((index % 5) as u8 + 1)
			})
			.collect()
	}

	#[test]
	fn slices_the_sorted_result() {
		let mut controller = BrowseController::local(numbered(120), HashSet::new());

		controller.set_page(3);

		let view = controller.view();

		assert_eq!(view.total_count, 120);
		assert_eq!(view.total_pages, 3);
		assert_eq!(view.items.len(), 20);
		assert_eq!(view.items[0].base, "w0100");
	}

	#[test]
	fn search_resets_page_but_sort_keeps_it() {
		let mut controller = BrowseController::local(numbered(250), HashSet::new());

		controller.set_page(4);
		controller.toggle_sort_order();

		assert_eq!(controller.current_page(), 4);

		controller.select_sort_column(SortKey::Word);

		assert_eq!(controller.current_page(), 4);

		controller.set_search_query("w01");

		assert_eq!(controller.current_page(), 1);
	}

	#[test]
	fn shrinking_result_clamps_the_page() {
		let mut controller = BrowseController::local(numbered(250), HashSet::new());

		controller.set_page(5);
		controller.set_candidates(numbered(60));

		assert_eq!(controller.current_page(), 2);

		controller.set_candidates(Vec::new());

		assert_eq!(controller.current_page(), 1);
		assert!(controller.view().items.is_empty());
	}

	#[test]
	fn saved_snapshot_only_matters_when_hiding_saved() {
		let mut controller = BrowseController::local(numbered(3), HashSet::new());

		controller.set_saved(["w0000".to_string()].into_iter().collect());

		assert_eq!(controller.total_count(), 3);

		controller.set_hide_saved(true);

		assert_eq!(controller.total_count(), 2);
	}

	#[test]
	fn local_controller_never_mounts() {
		let mut controller = BrowseController::local(numbered(3), HashSet::new());

		assert!(!controller.mount());
		assert!(!controller.is_mounted());
		assert_eq!(controller.last_emitted_seq(), 0);
	}

	#[test]
	fn export_covers_every_filtered_row_in_order() {
		let mut controller =
			BrowseController::local(numbered(120), HashSet::new()).with_label("Frieren");

		controller.set_sort_order(SortOrder::Desc);
		controller.set_level(Some(1));

		let snapshot = controller.export_snapshot();

		assert_eq!(snapshot.label, "Frieren");
		assert_eq!(snapshot.items.len(), 24);
		assert_eq!(snapshot.items[0].base, "w0115");
	}
}
