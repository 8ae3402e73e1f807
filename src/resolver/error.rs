//! Resolution failures.
//!
//! Every variant renders to the exact message that ends up stored as the
//! post's fetched content, so an editor sees what went wrong next to the URL.

use thiserror::Error;

/// Why a source URL could not be turned into display content
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Error: Could not extract Gist ID from URL. Please check the Gist URL format.")]
    GistId,

    #[error("Error: Could not extract YouTube video ID from URL. Please check the YouTube URL format.")]
    VideoId,

    #[error("Error fetching content from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Error processing content from {url}: {detail}")]
    Processing { url: String, detail: String },
}

/// Transport-level failure of a page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} for url ({url})")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_message_names_url_and_status() {
        let err = ResolveError::Fetch {
            url: "https://example.com/missing".to_string(),
            source: FetchError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: "https://example.com/missing".to_string(),
            },
        };

        assert_eq!(
            err.to_string(),
            "Error fetching content from https://example.com/missing: \
             HTTP 404 Not Found for url (https://example.com/missing)"
        );
    }

    #[test]
    fn test_processing_error_message() {
        let err = ResolveError::Processing {
            url: "https://example.com".to_string(),
            detail: "bad selector".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error processing content from https://example.com: bad selector"
        );
    }
}
