use crate::config::{HTTPS_PORT, HTTP_PORT};
use log::warn;

/// A URL split into the pieces the fetcher needs. Parsing never fails: a
/// string without an authority simply yields an empty host, which the
/// connector later refuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

impl ParsedUrl {
    pub fn parse(url: &str) -> ParsedUrl {
        let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
        let scheme = scheme.to_ascii_lowercase();
        let (netloc, rest) = if scheme.is_empty() {
            ("", rest)
        } else {
            rest.split_at(rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len()))
        };
        let (rest, fragment) = rest.split_once('#').unwrap_or((rest, ""));
        let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (path, params) = split_params(rest);

        let (host, url_port) = netloc.split_once(':').unwrap_or((netloc, ""));
        let port = if scheme == "https" { HTTPS_PORT } else { HTTP_PORT };
        let port = if url_port.is_empty() {
            port
        } else {
            match url_port.parse::<u16>() {
                Ok(p) if p != 0 => p,
                _ => {
                    warn!("ignoring invalid port {:?} in {}", url_port, url);
                    port
                }
            }
        };

        ParsedUrl {
            scheme,
            host: host.to_string(),
            port,
            path: path.to_string(),
            params: params.to_string(),
            query: query.to_string(),
            fragment: fragment.to_string(),
        }
    }

    /// Path written on the request line.
    pub fn request_path(&self) -> &str {
        if self.path.is_empty() {
            "/"
        } else {
            &self.path
        }
    }

    /// Every component after the authority glued together with no separators.
    /// Only used for diagnostics; the request line carries `request_path`.
    pub fn cmd(&self) -> String {
        format!("{}{}{}{}", self.path, self.params, self.query, self.fragment)
    }

    pub fn is_https(&self) -> bool {
        self.scheme == "https"
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// `;params` are only recognised in the last path segment.
fn split_params(path: &str) -> (&str, &str) {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(i) => {
            let i = last_segment + i;
            (&path[..i], &path[i + 1..])
        }
        None => (path, ""),
    }
}
