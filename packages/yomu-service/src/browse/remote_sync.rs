use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle, time};

use crate::{
	QuerySink,
	browse::{QueryEmission, QueryParams},
};

/// Debounced delivery of remote-mode parameters.
///
/// The first emission goes out synchronously on mount. Every later change restarts a single
/// delayed task; only the snapshot that survives the quiet period is emitted.
pub(crate) struct RemoteSync {
	sink: Arc<dyn QuerySink>,
	debounce: Duration,
	mounted: bool,
	pending: Option<JoinHandle<()>>,
	last_seq: Arc<AtomicU64>,
}
impl RemoteSync {
	pub(crate) fn new(sink: Arc<dyn QuerySink>, debounce: Duration) -> Self {
		Self { sink, debounce, mounted: false, pending: None, last_seq: Arc::new(AtomicU64::new(0)) }
	}

	pub(crate) fn is_mounted(&self) -> bool {
		self.mounted
	}

	pub(crate) fn last_seq(&self) -> u64 {
		self.last_seq.load(Ordering::SeqCst)
	}

	pub(crate) fn mount(&mut self, params: QueryParams) -> bool {
		if self.mounted {
			return false;
		}

		self.mounted = true;
		self.cancel_pending();

		emit(self.sink.as_ref(), &self.last_seq, params);

		true
	}

	pub(crate) fn schedule(&mut self, params: QueryParams) {
		if !self.mounted {
			return;
		}

		self.cancel_pending();

		let Ok(handle) = Handle::try_current() else {
			tracing::warn!("No async runtime for debounced emission; emitting immediately.");

			emit(self.sink.as_ref(), &self.last_seq, params);

			return;
		};
		let sink = Arc::clone(&self.sink);
		let last_seq = Arc::clone(&self.last_seq);
		let debounce = self.debounce;

		self.pending = Some(handle.spawn(async move {
			time::sleep(debounce).await;

			emit(sink.as_ref(), &last_seq, params);
		}));
	}

	pub(crate) fn has_pending(&self) -> bool {
		self.pending.as_ref().is_some_and(|pending| !pending.is_finished())
	}

	fn cancel_pending(&mut self) {
		if let Some(pending) = self.pending.take() {
			pending.abort();
		}
	}
}
impl Drop for RemoteSync {
	fn drop(&mut self) {
		self.cancel_pending();
	}
}

fn emit(sink: &dyn QuerySink, last_seq: &AtomicU64, params: QueryParams) {
	let seq = last_seq.fetch_add(1, Ordering::SeqCst) + 1;

	tracing::debug!(seq, page = params.page, "Emitting browse parameters.");

	sink.emit(QueryEmission { seq, params });
}
