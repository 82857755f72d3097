//! Terminal failures delivered through a [`PendingResult`](super::engine::PendingResult).
//!
//! None of these are retried. Every call resolves with at most one of them.

use http::StatusCode;
use http::header::{HeaderName, InvalidHeaderValue};

/// Everything that can go wrong between submitting a call and decoding its response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The HTTP engine failed to connect, send, or read the response.
    #[error("YouTube API transport failure")]
    Transport(#[source] reqwest::Error),

    /// A progress check saw the client's cancellation flag and aborted the transfer.
    #[error("YouTube API request aborted by cancellation")]
    Cancelled,

    /// A GET response body was not valid gzip.
    #[error("decompress YouTube API response body")]
    Decompression(#[source] std::io::Error),

    /// The API answered with a status that is not a success for the verb used.
    ///
    /// `message` is taken from the body's `error` field and may be empty.
    #[error("YouTube API request failed with status {status}: {message}")]
    Api { status: StatusCode, message: String },

    /// The response was a success but the decoder could not interpret it.
    #[error("decode YouTube API response")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The API root and path did not form a valid URL.
    #[error("invalid YouTube API URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// A configured value (user agent, access token, content type) cannot be sent as a header.
    #[error("invalid value for the {name} header of a YouTube API request")]
    InvalidHeader {
        name: HeaderName,
        #[source]
        source: InvalidHeaderValue,
    },

    /// The client was dropped before the call completed.
    #[error("YouTube client shut down before the request completed")]
    Abandoned,
}

impl Error {
    pub(crate) fn decode(report: eyre::Report) -> Self {
        Self::Decode(report.into())
    }
}
