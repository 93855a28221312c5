#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Home,
    Url(String),
}

/// Visited pages plus a cursor. `cursor == None` means the built-in home
/// page is showing and nothing has been visited from it yet.
///
/// Visiting a page overwrites the slot after the cursor rather than
/// discarding the forward entries, so `forward` can still reach pages that
/// were visited before going back.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Entry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Entry {
        self.cursor
            .and_then(|i| self.entries.get(i).cloned())
            .unwrap_or(Entry::Home)
    }

    pub fn visit(&mut self, url: impl Into<String>) {
        let next = self.cursor.map_or(0, |i| i + 1);
        self.put(next, Entry::Url(url.into()));
        self.cursor = Some(next);
    }

    /// Replaces the current slot with the home page.
    pub fn go_home(&mut self) {
        if let Some(i) = self.cursor {
            self.put(i, Entry::Home);
        }
    }

    /// Steps back one entry; stepping back from the first entry lands on the
    /// home page. `None` when already there.
    pub fn back(&mut self) -> Option<Entry> {
        self.cursor = match self.cursor? {
            0 => None,
            i => Some(i - 1),
        };
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<Entry> {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        Some(self.current())
    }

    fn put(&mut self, index: usize, entry: Entry) {
        match self.entries.get_mut(index) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }
}
