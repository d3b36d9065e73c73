//! Error types for content generation.

/// Errors that can occur while generating content.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The request had no description.
    #[error("Description is required")]
    EmptyDescription,

    /// No gateway key is configured.
    #[error("content gateway is not configured")]
    NotConfigured,

    /// The HTTP call failed or timed out.
    #[error("gateway request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {body}")]
    Gateway {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The gateway answered but the expected field was absent.
    #[error("gateway response missing {0}")]
    MissingContent(&'static str),

    /// A prompt template failed to render.
    #[error("template render error: {0}")]
    Template(String),
}

impl From<minijinja::Error> for StudioError {
    fn from(e: minijinja::Error) -> Self {
        Self::Template(e.to_string())
    }
}
