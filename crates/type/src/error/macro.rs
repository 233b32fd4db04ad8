// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wrap a [`Diagnostic`](crate::Diagnostic) into an [`Error`](crate::Error).
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($diagnostic)
	};
}

/// `Err(error!(..))`
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

/// Return early with `Err(error!(..))`.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// Build an internal error diagnostic carrying the call site.
#[macro_export]
macro_rules! internal {
	($($arg:tt)*) => {
		$crate::error::diagnostic::internal::internal_with_context(
			format!($($arg)*),
			file!(),
			line!(),
			column!(),
			module_path!(),
		)
	};
}
