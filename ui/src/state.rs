//! Page and form state.
//!
//! Each page holds one [`PageState`] instead of separate loading/error
//! flags, and forms add a [`FormPhase`] for submission.

use catalog_core::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// The requested record does not exist.
    NotFound,
    Failed(String),
}

impl<T> PageState<T> {
    /// Any error becomes `Failed` with a user-facing message.
    pub fn settle(result: Result<T, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(value) => PageState::Ready(value),
            Err(err) => PageState::Failed(load_failure(&err, fallback)),
        }
    }

    /// Like [`settle`](Self::settle), but a 404 or a missing record
    /// becomes `NotFound`.
    pub fn settle_record(result: Result<Option<T>, ApiError>, fallback: &str) -> Self {
        match result {
            Ok(Some(value)) => PageState::Ready(value),
            Ok(None) => PageState::NotFound,
            Err(err) if err.is_not_found() => PageState::NotFound,
            Err(err) => PageState::Failed(load_failure(&err, fallback)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    /// Client-side validation failed; nothing was sent.
    Invalid(String),
    /// The server or the network rejected the submission.
    Failed(String),
    Submitting,
}

impl FormPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormPhase::Invalid(msg) | FormPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// What a list region shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<R> {
    Loading,
    Failed(String),
    /// Loaded but nothing to show; informational, not an error.
    Empty(&'static str),
    Items(Vec<R>),
}

/// Message for a failed load or delete: connectivity when nothing came
/// back, otherwise the page's own fallback.
pub fn load_failure(err: &ApiError, fallback: &str) -> String {
    if err.is_transport() {
        err.describe()
    } else {
        fallback.to_string()
    }
}

/// Message for a failed submit: the server's own message when it sent one.
pub fn submit_failure(err: &ApiError, fallback: &str) -> String {
    if let Some(msg) = err.server_message() {
        return msg;
    }
    load_failure(err, fallback)
}
