pub mod config;
pub mod dom;
pub mod fetch;
pub mod logging;
pub mod shell;

pub use crate::config::{FetchConfig, TlsDispatch};
pub use crate::dom::show::text_only;
pub use crate::fetch::error::FetchError;
pub use crate::fetch::response::Charset;
pub use crate::fetch::{fetch, Fetcher, Page};
