use std::io;

/// Terminal failure of a single fetch. Every variant renders to a fixed HTML
/// fragment through [`FetchError::to_html`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("could not connect to {addr}: {reason}")]
    Connect { addr: String, reason: String },

    #[error("server closed the connection without sending anything")]
    EmptyResponse,

    #[error("response is not valid under any candidate encoding")]
    UnknownEncoding,

    #[error("error receiving data: {0}")]
    Transport(#[from] io::Error),

    #[error("redirect response carries no Location header")]
    NoLocation,

    #[error("gave up after {0} redirects")]
    TooManyRedirects(usize),
}

impl FetchError {
    pub fn connect(addr: impl Into<String>, reason: impl ToString) -> Self {
        FetchError::Connect {
            addr: addr.into(),
            reason: reason.to_string(),
        }
    }

    pub fn to_html(&self) -> &'static str {
        match self {
            FetchError::Connect { .. } => "<p>Error: Could not establish connection.</p>",
            FetchError::EmptyResponse => "<p>Error: Empty response from the server.</p>",
            FetchError::UnknownEncoding => "<p>Error: Unknown Encoding</p>",
            FetchError::Transport(_) => "<p>Error receiving data.</p>",
            FetchError::NoLocation => "<p>Error: No new location provided.</p>",
            FetchError::TooManyRedirects(_) => "<p>Error: Too many redirects.</p>",
        }
    }
}
