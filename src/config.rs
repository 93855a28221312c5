use std::time::Duration;

/// Bytes requested from the connection per read.
pub const CHUNK_SIZE: usize = 512;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_REDIRECTS: usize = 20;
pub const HTTPS_PORT: u16 = 443;
pub const HTTP_PORT: u16 = 80;

/// How the connector decides whether to wrap the socket in TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsDispatch {
    /// TLS whenever the resolved port is 443, whatever the scheme says.
    #[default]
    Port,
    /// TLS whenever the scheme is `https`.
    Scheme,
}

/// Fetcher configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upper bound on establishing the TCP connection. `None` blocks forever.
    pub connect_timeout: Option<Duration>,
    /// Upper bound on each socket read and write. `None` blocks forever.
    pub io_timeout: Option<Duration>,
    /// Redirect hops followed before giving up.
    pub max_redirects: usize,
    pub tls_dispatch: TlsDispatch,
    /// Verify the peer certificate chain and hostname. Off unless asked for.
    pub verify_certificates: bool,
    pub chunk_size: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_TIMEOUT),
            io_timeout: Some(DEFAULT_TIMEOUT),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            tls_dispatch: TlsDispatch::default(),
            verify_certificates: false,
            chunk_size: CHUNK_SIZE,
        }
    }
}
