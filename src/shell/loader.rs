use crate::fetch::Fetcher;
use log::{debug, error};
use std::{
    sync::{
        mpsc::{self, Receiver, Sender},
        Arc,
    },
    thread,
};

pub const FAILED_TO_LOAD: &str = "<p>Failed to load content.</p>";

/// A finished fetch. `id` orders results by when they were requested, not
/// by when they arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub id: u64,
    pub url: String,
    pub html: String,
}

/// Runs each fetch on its own thread and posts the result to a channel.
/// In-flight fetches are never cancelled; a slow one may finish after a
/// newer one.
pub struct Loader {
    fetcher: Arc<Fetcher>,
    next_id: u64,
    tx: Sender<Loaded>,
}

impl Loader {
    pub fn new(fetcher: Fetcher) -> (Loader, Receiver<Loaded>) {
        let (tx, rx) = mpsc::channel();
        let loader = Loader {
            fetcher: Arc::new(fetcher),
            next_id: 0,
            tx,
        };
        (loader, rx)
    }

    pub fn load(&mut self, url: &str) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let url = url.to_string();
        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", id))
            .spawn(move || {
                let mut html = fetcher.fetch(&url);
                if html.is_empty() {
                    html = FAILED_TO_LOAD.to_string();
                }
                debug!("load {} of {} finished", id, url);
                // The receiver may be gone if the shell is exiting.
                let _ = tx.send(Loaded { id, url, html });
            });
        if let Err(e) = spawned {
            error!("could not start fetch thread: {}", e);
            let _ = self.tx.send(Loaded {
                id,
                url: String::new(),
                html: FAILED_TO_LOAD.to_string(),
            });
        }
        id
    }
}
