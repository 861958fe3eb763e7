//! Lazy example-sentence cache for expandable word rows.

use std::{
	collections::{HashMap, HashSet},
	sync::{Arc, Mutex, MutexGuard},
};

use yomu_domain::ExampleSentence;

use crate::{
	ExampleSource,
	notify::{Notice, Notifier},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
	/// An entry already existed, possibly empty.
	Cached,
	AlreadyLoading,
	/// Stored this many sentences.
	Fetched(usize),
	Failed,
}

#[derive(Default)]
struct ExampleState {
	entries: HashMap<String, Vec<ExampleSentence>>,
	loading: HashSet<String>,
	expanded: HashSet<String>,
}

/// Each base form is fetched at most once per cache lifetime. An empty reply is cached like any
/// other; a failed fetch stores nothing so a later expand retries.
pub struct ExampleCache {
	source: Arc<dyn ExampleSource>,
	notifier: Arc<dyn Notifier>,
	state: Mutex<ExampleState>,
}
impl ExampleCache {
	pub fn new(source: Arc<dyn ExampleSource>, notifier: Arc<dyn Notifier>) -> Self {
		Self { source, notifier, state: Mutex::new(ExampleState::default()) }
	}

	/// Flips the row's expanded state and returns the new state.
	pub fn toggle_expanded(&self, base: &str) -> bool {
		let mut state = self.lock();

		if state.expanded.remove(base) {
			false
		} else {
			state.expanded.insert(base.to_string());

			true
		}
	}

	pub fn is_expanded(&self, base: &str) -> bool {
		self.lock().expanded.contains(base)
	}

	pub fn is_loading(&self, base: &str) -> bool {
		self.lock().loading.contains(base)
	}

	pub fn examples(&self, base: &str) -> Option<Vec<ExampleSentence>> {
		self.lock().entries.get(base).cloned()
	}

	pub async fn fetch_examples(&self, base: &str) -> FetchOutcome {
		{
			let mut state = self.lock();

			if state.entries.contains_key(base) {
				return FetchOutcome::Cached;
			}
			if !state.loading.insert(base.to_string()) {
				return FetchOutcome::AlreadyLoading;
			}
		}

		let _loading = LoadingGuard { cache: self, base };
		let result = self.source.fetch_examples(base).await;
		let mut state = self.lock();

		state.loading.remove(base);

		match result {
			Ok(sentences) => {
				let count = sentences.len();

				tracing::debug!(base, count, "Cached example sentences.");

				state.entries.insert(base.to_string(), sentences);

				FetchOutcome::Fetched(count)
			},
			Err(err) => {
				drop(state);
				tracing::warn!(error = %err, base, "Failed to fetch example sentences.");

				self.notifier.notify(Notice::error("Failed to load example sentences."));

				FetchOutcome::Failed
			},
		}
	}

	/// Toggles the row and fetches when it just became expanded. Collapsing returns `None`.
	pub async fn expand(&self, base: &str) -> Option<FetchOutcome> {
		if !self.toggle_expanded(base) {
			return None;
		}

		Some(self.fetch_examples(base).await)
	}

	fn lock(&self) -> MutexGuard<'_, ExampleState> {
		self.state.lock().unwrap_or_else(|err| err.into_inner())
	}
}

/// Clears the loading flag when a fetch ends, including when its future is dropped mid-flight.
struct LoadingGuard<'a> {
	cache: &'a ExampleCache,
	base: &'a str,
}
impl Drop for LoadingGuard<'_> {
	fn drop(&mut self) {
		self.cache.lock().loading.remove(self.base);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};

	use yomu_domain::ExampleSentence;

	use crate::{
		BoxFuture, Error, ExampleSource, Result, TracingNotifier,
		examples::{ExampleCache, FetchOutcome},
	};

	struct CountingSource {
		calls: AtomicUsize,
		fail: bool,
	}
	impl ExampleSource for CountingSource {
		fn fetch_examples<'a>(
			&'a self,
			_base: &'a str,
		) -> BoxFuture<'a, Result<Vec<ExampleSentence>>> {
			Box::pin(async move {
				self.calls.fetch_add(1, Ordering::SeqCst);

				if self.fail {
					return Err(Error::Remote { message: "offline".to_string() });
				}

				Ok(Vec::new())
			})
		}
	}

	fn cache(fail: bool) -> (ExampleCache, Arc<CountingSource>) {
		let source = Arc::new(CountingSource { calls: AtomicUsize::new(0), fail });

		(ExampleCache::new(source.clone(), Arc::new(TracingNotifier)), source)
	}

	#[test]
	fn toggle_flips_membership() {
		let (cache, _) = cache(false);

		assert!(cache.toggle_expanded("猫"));
		assert!(cache.is_expanded("猫"));
		assert!(!cache.toggle_expanded("猫"));
		assert!(!cache.is_expanded("猫"));
	}

	#[tokio::test]
	async fn collapse_does_not_fetch() {
		let (cache, source) = cache(false);

		assert_eq!(cache.expand("猫").await, Some(FetchOutcome::Fetched(0)));
		assert_eq!(cache.expand("猫").await, None);
		assert_eq!(cache.expand("猫").await, Some(FetchOutcome::Cached));
		assert_eq!(source.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn failure_leaves_no_entry() {
		let (cache, source) = cache(true);

		assert_eq!(cache.fetch_examples("猫").await, FetchOutcome::Failed);
		assert_eq!(cache.examples("猫"), None);
		assert!(!cache.is_loading("猫"));
		assert_eq!(cache.fetch_examples("猫").await, FetchOutcome::Failed);
		assert_eq!(source.calls.load(Ordering::SeqCst), 2);
	}
}
