//! Browse flags shared by every subcommand that shows a word table.

use yomu_domain::{SortKey, SortOrder, SortState};
use yomu_service::BrowseController;

#[derive(Clone, Debug, Default, clap::Args)]
pub struct ViewArgs {
	#[arg(long, default_value = "")]
	pub search: String,
	#[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
	pub level: Option<u8>,
	#[arg(long, value_name = "RANK")]
	pub min_freq: Option<u32>,
	#[arg(long, value_name = "RANK")]
	pub max_freq: Option<u32>,
	#[arg(long)]
	pub hide_saved: bool,
	#[arg(long, value_name = "COLUMN")]
	pub sort: Option<SortKey>,
	#[arg(long, value_name = "ORDER")]
	pub order: Option<SortOrder>,
	#[arg(long, default_value_t = 1)]
	pub page: usize,
	/// Print every filtered row instead of a single page.
	#[arg(long)]
	pub export: bool,
	#[arg(long, default_value = "words")]
	pub label: String,
	/// Prepare a bulk save of every unsaved row that passes the filters.
	#[arg(long)]
	pub save_all: bool,
	/// Confirm the bulk save instead of only reporting it.
	#[arg(long, requires = "save_all")]
	pub yes: bool,
}
impl ViewArgs {
	/// Applies the filters before the page, so the page is clamped against the final result.
	/// The sort is fixed at construction through [`ViewArgs::sort_state`].
	pub fn apply(&self, controller: &mut BrowseController) {
		controller.set_search_query(self.search.clone());
		controller.set_level(self.level);
		controller.set_min_frequency(self.min_freq);
		controller.set_max_frequency(self.max_freq);
		controller.set_hide_saved(self.hide_saved);
		controller.set_page(self.page);
	}

	pub fn sort_state(&self) -> SortState {
		SortState::new(self.sort.clone().unwrap_or(SortKey::Freq), self.order.unwrap_or_default())
	}
}
