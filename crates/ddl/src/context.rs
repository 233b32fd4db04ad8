// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use sqlayer_type::{diagnostic::query::query_cancelled, return_error};
use tracing::warn;

/// Value changed while converting it to a narrower type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruncateNotice {
	pub original: String,
	pub truncated: String,
}

/// What the planner needs from the statement's execution context.
pub trait QueryContext {
	fn is_cancelled(&self) -> bool;

	fn report_truncate(&self, original: &str, truncated: &str);

	/// Fails with `QUERY_CANCELLED` once the statement was cancelled.
	fn check_cancelled(&self) -> crate::Result<()> {
		if self.is_cancelled() {
			return_error!(query_cancelled());
		}
		Ok(())
	}
}

/// Context collecting truncation notices, cancellable from another thread.
#[derive(Debug, Default)]
pub struct ExecutionContext {
	cancelled: AtomicBool,
	notices: Mutex<Vec<TruncateNotice>>,
}

impl ExecutionContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn cancel(&self) {
		self.cancelled.store(true, Ordering::Release);
	}

	pub fn notices(&self) -> Vec<TruncateNotice> {
		self.notices.lock().clone()
	}

	pub fn take_notices(&self) -> Vec<TruncateNotice> {
		std::mem::take(&mut *self.notices.lock())
	}
}

impl QueryContext for ExecutionContext {
	fn is_cancelled(&self) -> bool {
		self.cancelled.load(Ordering::Acquire)
	}

	fn report_truncate(&self, original: &str, truncated: &str) {
		warn!(original, truncated, "value truncated");
		self.notices.lock().push(TruncateNotice {
			original: original.to_string(),
			truncated: truncated.to_string(),
		});
	}
}
