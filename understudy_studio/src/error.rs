// Copyright 2025 the Understudy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

/// The host could not write to the system clipboard.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Errors from a recording session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StudioError {
    /// The script was built but could not be copied.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
    /// The session was already stopped.
    #[error("recording session already stopped")]
    AlreadyStopped,
}
