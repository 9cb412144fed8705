//! Module to contain code related to errors that could be produced by the API.
use core::fmt::{Debug, Display};
use std::time::Duration;
use std::{io, sync::Arc};

/// Alias for a Result with the error type ytdata-rs::Error.
pub type Result<T> = core::result::Result<T, Error>;

/// This type represents all errors this API could produce.
pub struct Error {
    // This is boxed to avoid passing around very large errors - in the case of a decode error we
    // want to provide the source item to the caller.
    inner: Box<ErrorKind>,
}

/// The kind of the error.
/// This list may grow over time, and it's not recommended to exhaustively match
/// on it.
#[non_exhaustive]
pub enum ErrorKind {
    /// General web error.
    Web(reqwest::Error),
    /// General io error.
    Io(io::Error),
    /// Caller supplied input the API cannot be called with (e.g, an empty
    /// list of IDs).
    InvalidInput { message: String },
    /// No API key or bearer token was provided.
    NoAuth,
    /// The API had no record of one or more of the requested resources.
    /// `ids` contains exactly the identifiers that were not returned.
    ResourceNotFound {
        kind: ResourceKind,
        ids: Vec<String>,
    },
    /// The API answered with an error status or an embedded error object.
    HttpError { status: u16, message: String },
    /// The request did not complete within the configured time limit.
    Timeout { limit: Duration },
    /// Expected field did not occur in the item metadata, or was not in the
    /// expected format.
    MissingData {
        /// The target path (JSON pointer notation) that we tried to decode.
        field: String,
        /// The source item metadata.
        // NOTE: decoding could theoretically produce multiple errors referring to the same source
        // json. Hence reference counted, Arc particularly to ensure Error is thread safe.
        json: Arc<String>,
    },
    /// Received a response from the API that was not in the expected (JSON)
    /// format.
    InvalidResponse { response: String },
}

/// The category of resource an API call acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResourceKind {
    Video,
    Channel,
    Playlist,
    PlaylistItem,
    Comment,
    CommentThread,
    Caption,
    Subscription,
    VideoCategory,
    Region,
    Language,
    SearchResult,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResourceKind::Video => "video",
            ResourceKind::Channel => "channel",
            ResourceKind::Playlist => "playlist",
            ResourceKind::PlaylistItem => "playlist item",
            ResourceKind::Comment => "comment",
            ResourceKind::CommentThread => "comment thread",
            ResourceKind::Caption => "caption track",
            ResourceKind::Subscription => "subscription",
            ResourceKind::VideoCategory => "video category",
            ResourceKind::Region => "region",
            ResourceKind::Language => "language",
            ResourceKind::SearchResult => "search result",
        };
        write!(f, "{name}")
    }
}

impl Error {
    /// Extract the inner kind from the error for pattern matching.
    pub fn into_kind(self) -> ErrorKind {
        *self.inner
    }
    /// If an error is a MissingData error, return the source item json and
    /// the field at the location of the error.
    pub fn get_json_and_field(&self) -> Option<(String, &String)> {
        match self.inner.as_ref() {
            ErrorKind::MissingData { json, field } => Some((json.to_string(), field)),
            _ => None,
        }
    }
    /// If an error is a ResourceNotFound error, return the resource kind and
    /// the identifiers the API had no record of.
    pub fn get_missing_ids(&self) -> Option<(ResourceKind, &[String])> {
        match self.inner.as_ref() {
            ErrorKind::ResourceNotFound { kind, ids } => Some((*kind, ids.as_slice())),
            _ => None,
        }
    }
    pub(crate) fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self {
            inner: Box::new(ErrorKind::InvalidInput {
                message: message.into(),
            }),
        }
    }
    pub(crate) fn no_auth() -> Self {
        Self {
            inner: Box::new(ErrorKind::NoAuth),
        }
    }
    pub(crate) fn not_found(kind: ResourceKind, ids: Vec<String>) -> Self {
        Self {
            inner: Box::new(ErrorKind::ResourceNotFound { kind, ids }),
        }
    }
    pub(crate) fn http<S: Into<String>>(status: u16, message: S) -> Self {
        Self {
            inner: Box::new(ErrorKind::HttpError {
                status,
                message: message.into(),
            }),
        }
    }
    pub(crate) fn timeout(limit: Duration) -> Self {
        Self {
            inner: Box::new(ErrorKind::Timeout { limit }),
        }
    }
    pub(crate) fn missing_data<S: Into<String>>(field: S, json: Arc<String>) -> Self {
        Self {
            inner: Box::new(ErrorKind::MissingData {
                field: field.into(),
                json,
            }),
        }
    }
    pub(crate) fn response<S: Into<String>>(response: S) -> Self {
        let response = response.into();
        Self {
            inner: Box::new(ErrorKind::InvalidResponse { response }),
        }
    }
}

impl std::error::Error for Error {}
impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Web(e) => write!(f, "Web error {e} received."),
            ErrorKind::Io(e) => write!(f, "IO error {e} received."),
            ErrorKind::InvalidInput { message } => write!(f, "Invalid input: {message}."),
            ErrorKind::NoAuth => write!(f, "No API key or bearer token provided."),
            ErrorKind::ResourceNotFound { kind, ids } => {
                write!(f, "No {kind} found matching {}.", ids.join(", "))
            }
            ErrorKind::HttpError { status, message } => {
                write!(f, "Http error code {status} received in response. Message: <{message}>.")
            }
            ErrorKind::Timeout { limit } => {
                write!(f, "Request did not complete within {limit:?}.")
            }
            ErrorKind::MissingData { field, json: _ } => {
                write!(f, "Field {field} not found in item metadata.")
            }
            ErrorKind::InvalidResponse { response: _ } => {
                write!(f, "Response is invalid json - unable to deserialize.")
            }
        }
    }
}
// As this is displayed when unwrapping, we don't want to end up including the
// entire format of this struct (potentially including entire source json).
impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.inner, f)
    }
}
impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&*self.inner, f)
    }
}
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self {
            inner: Box::new(ErrorKind::Web(e)),
        }
    }
}
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self {
            inner: Box::new(ErrorKind::Io(err)),
        }
    }
}
