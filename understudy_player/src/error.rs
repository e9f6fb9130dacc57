// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// Failure reported by a [`HoverStyler`](crate::HoverStyler).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShimError {
    /// The shim's script could not be fetched or evaluated.
    #[error("failed to load script from {url}: {reason}")]
    ScriptLoad {
        /// Where the script was requested from.
        url: String,
        /// Host-provided detail.
        reason: String,
    },
    /// The document's style sheets could not be indexed.
    #[error("failed to load document styles: {0}")]
    Styles(String),
}

/// Errors from [`Player`](crate::Player) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// The hover styling shim could not be initialized.
    #[error("hover styling shim unavailable")]
    HoverShim(#[from] ShimError),
}
