pub mod connection;
pub mod error;
pub mod redirect;
pub mod request;
pub mod response;
pub mod url;

use crate::config::FetchConfig;
use connection::Connection;
use error::FetchError;
use http::StatusCode;
use log::{debug, info, warn};
use redirect::Resolution;
use response::{Charset, Decoded};
use url::ParsedUrl;

/// The final response of a fetch, after every redirect has been followed.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the text was actually read from.
    pub url: String,
    pub status: Option<StatusCode>,
    pub charset: Charset,
    pub redirects: usize,
    /// Status line, headers and body exactly as decoded.
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Fetcher {
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Fetcher {
        Fetcher { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches `url` and returns the response text, or an HTML error fragment.
    pub fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url) {
            Ok(page) => page.text,
            Err(e) => {
                warn!("fetching {} failed: {}", url, e);
                e.to_html().to_string()
            }
        }
    }

    pub fn try_fetch(&self, url: &str) -> Result<Page, FetchError> {
        let mut current = url.to_string();
        for hop in 0..=self.config.max_redirects {
            let decoded = self.fetch_once(&current)?;
            match redirect::resolve(&decoded.text) {
                Resolution::Final => {
                    return Ok(Page {
                        status: redirect::status(&decoded.text),
                        url: current,
                        charset: decoded.charset,
                        redirects: hop,
                        text: decoded.text,
                    })
                }
                Resolution::Redirect(location) => {
                    info!("{} redirected to {}", current, location);
                    current = location;
                }
                Resolution::NoLocation => return Err(FetchError::NoLocation),
            }
        }
        Err(FetchError::TooManyRedirects(self.config.max_redirects))
    }

    /// One connect, request and read cycle. The connection is closed before
    /// this returns, whatever the outcome.
    fn fetch_once(&self, url: &str) -> Result<Decoded, FetchError> {
        let target = ParsedUrl::parse(url);
        debug!("request target for {} is {:?}", url, target.cmd());
        let mut conn = Connection::open(&target, &self.config)?;
        let result = request::write_request(&mut conn, &target.host, target.request_path())
            .map_err(FetchError::from)
            .and_then(|_| response::read_response(&mut conn, self.config.chunk_size));
        conn.close();
        result
    }
}

/// Fetches `url` with the default configuration. Never fails: errors come
/// back as small HTML fragments.
pub fn fetch(url: &str) -> String {
    Fetcher::default().fetch(url)
}
