use http::{header::LOCATION, StatusCode};

/// What the fetcher should do with a decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Hand the response text to the caller as is.
    Final,
    /// Fetch this location instead.
    Redirect(String),
    /// Redirect status with no usable `Location`.
    NoLocation,
}

/// Only `301 Moved Permanently` and `302 Found` on an HTTP/1.1 status line
/// are followed; everything else, error statuses included, is final.
pub fn resolve(response: &str) -> Resolution {
    if !is_redirect(response) {
        return Resolution::Final;
    }
    match location(response) {
        Some(location) => Resolution::Redirect(location.to_string()),
        None => Resolution::NoLocation,
    }
}

fn is_redirect(response: &str) -> bool {
    [StatusCode::MOVED_PERMANENTLY, StatusCode::FOUND]
        .iter()
        .any(|status| response.starts_with(&status_line(*status)))
}

fn status_line(status: StatusCode) -> String {
    format!("HTTP/1.1 {} {}", status.as_str(), status.canonical_reason().unwrap_or(""))
}

/// Value of the first line that starts with `location:` in any case. Scans
/// the whole response, body included.
pub fn location(response: &str) -> Option<&str> {
    let prefix = format!("{}:", LOCATION);
    response
        .split("\r\n")
        .find(|line| {
            line.get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(&prefix))
        })
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

/// Status code on the first line, if it parses.
pub fn status(response: &str) -> Option<StatusCode> {
    let line = response.lines().next()?;
    let (version, rest) = line.split_once(' ')?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    let code = rest.split(' ').next()?;
    StatusCode::from_bytes(code.as_bytes()).ok()
}
