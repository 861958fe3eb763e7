pub mod candidate;
pub mod context;
pub mod example;
pub mod filter;
pub mod pagination;
pub mod rank;
pub mod sort;

pub use candidate::Candidate;
pub use context::{ContextSource, EpisodeContext, parse_context};
pub use example::ExampleSentence;
pub use filter::{FilterState, filter_candidates, filter_indices};
pub use pagination::{PAGE_SIZE, clamp_page, page_count, page_range};
pub use rank::{EffectiveRank, effective_rank};
pub use sort::{SortKey, SortOrder, SortState, compare, sort_candidates, sort_indices};
