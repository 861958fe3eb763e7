use std::ops::Range;

pub const PAGE_SIZE: usize = 50;

/// Number of pages for `total` rows. An empty result still has one (empty) page.
pub fn page_count(total: usize, page_size: usize) -> usize {
	total.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
	page.clamp(1, page_count(total, page_size))
}

/// Index range of `page` (1-based) within a result of `total` rows.
pub fn page_range(page: usize, total: usize, page_size: usize) -> Range<usize> {
	let start = page.saturating_sub(1).saturating_mul(page_size).min(total);
	let end = start.saturating_add(page_size).min(total);

	start..end
}
