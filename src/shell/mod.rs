pub mod history;
pub mod loader;

pub use history::{Entry, History};
pub use loader::{Loaded, Loader};

pub const HOME_PAGE: &str = "<html><head><title>Browrooms</title></head><body>\
<h1>Browrooms</h1>\
<p>Type a URL, or one of: go URL, back, forward, refresh, home, quit.</p>\
</body></html>";

/// Trims the input and adds `https://` unless it already names http or https.
pub fn normalize_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        None
    } else if input.starts_with("http://") || input.starts_with("https://") {
        Some(input.to_string())
    } else {
        Some(format!("https://{}", input))
    }
}
