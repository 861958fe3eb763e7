use tokio::sync::mpsc::UnboundedSender;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Success,
	Error,
}

/// A transient, non-blocking message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}
impl Notice {
	pub fn info(message: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Info, message: message.into() }
	}

	pub fn success(message: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Success, message: message.into() }
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self { level: NoticeLevel::Error, message: message.into() }
	}
}

pub trait Notifier
where
	Self: Send + Sync,
{
	fn notify(&self, notice: Notice);
}

/// Writes notices to the log. Used where no interactive surface exists.
pub struct TracingNotifier;
impl Notifier for TracingNotifier {
	fn notify(&self, notice: Notice) {
		match notice.level {
			NoticeLevel::Info => tracing::info!(message = %notice.message, "Notice."),
			NoticeLevel::Success => tracing::info!(message = %notice.message, "Success notice."),
			NoticeLevel::Error => tracing::warn!(message = %notice.message, "Error notice."),
		}
	}
}

impl Notifier for UnboundedSender<Notice> {
	fn notify(&self, notice: Notice) {
		if self.send(notice).is_err() {
			tracing::debug!("Notice receiver dropped.");
		}
	}
}
