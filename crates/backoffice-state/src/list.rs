//! Paginated, searchable list state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use backoffice_core::{Error, ListQuery, Page, PageSource};

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};

/// Where the list is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// What a list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub state: LoadState,
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
    /// The search box contents, which may not be applied yet.
    pub search_term: String,
    pub loading: bool,
    pub error: Option<String>,
}

struct ListState<T> {
    /// The query the next fetch will use.
    query: ListQuery,
    raw_search: String,
    last_issued: Option<ListQuery>,
    /// Sequence number of the most recently issued fetch.
    seq: u64,
    /// A fetch was abandoned by a search edit and nothing replaced it yet.
    superseded: bool,
    load_state: LoadState,
    items: Vec<T>,
    total: u64,
    total_pages: u32,
    error: Option<String>,
}

impl<T: Clone> ListState<T> {
    fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            state: self.load_state,
            items: self.items.clone(),
            total: self.total,
            total_pages: self.total_pages,
            page: self.query.page(),
            search_term: self.raw_search.clone(),
            loading: self.load_state == LoadState::Loading,
            error: self.error.clone(),
        }
    }

    /// Whether the current query has not been sent yet.
    fn is_dirty(&self) -> bool {
        self.last_issued.as_ref() != Some(&self.query)
    }
}

struct Inner<T, S> {
    source: S,
    state: Mutex<ListState<T>>,
    updates: watch::Sender<ListSnapshot<T>>,
    debouncer: Debouncer,
}

/// Drives one paginated list over a [`PageSource`].
///
/// Page changes fetch immediately; search changes reset the page to 1 and
/// fetch after the debounce period. Only the most recently issued fetch may
/// update the list, so a slow response never overwrites a newer one.
///
/// Cloning yields another handle to the same list.
pub struct ListController<T, S> {
    inner: Arc<Inner<T, S>>,
}

impl<T, S> Clone for ListController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> ListController<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: PageSource<T> + 'static,
{
    /// A controller with the default debounce and page size.
    pub fn new(source: S) -> Self {
        Self::with_settings(source, DEFAULT_DEBOUNCE, ListQuery::first().page_size_hint())
    }

    pub fn with_settings(source: S, debounce: Duration, page_size_hint: u32) -> Self {
        let state = ListState {
            query: ListQuery::first().with_page_size_hint(page_size_hint),
            raw_search: String::new(),
            last_issued: None,
            seq: 0,
            superseded: false,
            load_state: LoadState::Idle,
            items: Vec::new(),
            total: 0,
            total_pages: 0,
            error: None,
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(state),
                updates,
                debouncer: Debouncer::new(debounce),
            }),
        }
    }

    /// Fetch the current page.
    pub fn load(&self) -> JoinHandle<()> {
        Inner::issue(&self.inner, &mut self.inner.lock())
    }

    /// Move to page `page`.
    ///
    /// Values below 1 become 1; once the page count is known, values past
    /// the end become the last page, and an empty result only has page 1.
    /// Fetches only if that changes the query.
    pub fn set_page(&self, page: u32) -> Option<JoinHandle<()>> {
        let mut state = self.inner.lock();
        state.query.set_page(page);
        let total_pages = state.total_pages;
        if state.load_state == LoadState::Loaded && total_pages == 0 {
            state.query.set_page(1);
        } else {
            state.query.clamp_to(total_pages);
        }

        if state.is_dirty() {
            Some(Inner::issue(&self.inner, &mut state))
        } else {
            self.inner.publish(&state);
            None
        }
    }

    /// Record a new search term.
    ///
    /// The page goes back to 1 right away; the term itself is applied, and
    /// fetched, once typing has paused for the debounce period. A fetch
    /// still in flight is abandoned and the list stays loading until then.
    pub fn set_search(&self, term: impl Into<String>) {
        let term = term.into();
        {
            let mut state = self.inner.lock();
            state.raw_search = term.clone();
            state.query.set_page(1);
            if state.load_state == LoadState::Loading {
                state.seq += 1;
                state.superseded = true;
                debug!(seq = state.seq, "Search edit abandons pending fetch");
            }
            self.inner.publish(&state);
        }

        let weak: Weak<Inner<T, S>> = Arc::downgrade(&self.inner);
        self.inner.debouncer.schedule(move || {
            if let Some(inner) = weak.upgrade() {
                Inner::apply_search(&inner, term);
            }
        });
    }

    /// Re-issue the last query verbatim. Does nothing before the first fetch.
    pub fn retry(&self) -> Option<JoinHandle<()>> {
        let mut state = self.inner.lock();
        let last = state.last_issued.clone()?;
        state.query = last;
        Some(Inner::issue(&self.inner, &mut state))
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        self.inner.lock().snapshot()
    }

    /// A receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.inner.updates.subscribe()
    }
}

impl<T, S> Inner<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: PageSource<T> + 'static,
{
    fn lock(&self) -> MutexGuard<'_, ListState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &ListState<T>) {
        self.updates.send_replace(state.snapshot());
    }

    /// Start a fetch for the current query; the caller holds the lock.
    fn issue(this: &Arc<Self>, state: &mut ListState<T>) -> JoinHandle<()> {
        state.seq += 1;
        state.superseded = false;
        state.last_issued = Some(state.query.clone());
        state.load_state = LoadState::Loading;
        this.publish(state);

        let seq = state.seq;
        let query = state.query.clone();
        debug!(seq, page = query.page(), search = query.search_term(), "Fetching page");

        let inner = Arc::clone(this);
        tokio::spawn(async move {
            let result = inner.source.fetch(&query).await;
            Inner::complete(&inner, seq, &query, result);
        })
    }

    fn apply_search(this: &Arc<Self>, term: String) {
        let mut state = this.lock();
        state.query = state.query.clone().with_search(term);
        if state.is_dirty() || state.superseded {
            let _ = Inner::issue(this, &mut state);
        }
    }

    fn complete(this: &Arc<Self>, seq: u64, query: &ListQuery, result: Result<Page<T>, Error>) {
        let mut state = this.lock();
        if seq != state.seq {
            debug!(seq, latest = state.seq, "Discarding stale page");
            return;
        }

        match result {
            Ok(page) => {
                if page.total_pages > 0 && query.page() > page.total_pages {
                    debug!(
                        requested = query.page(),
                        total_pages = page.total_pages,
                        "Page out of range, clamping"
                    );
                    state.total = page.total;
                    state.total_pages = page.total_pages;
                    state.query.clamp_to(page.total_pages);
                    if state.is_dirty() {
                        let _ = Inner::issue(this, &mut state);
                        return;
                    }
                }

                state.items = page.items;
                state.total = page.total;
                state.total_pages = page.total_pages;
                state.load_state = LoadState::Loaded;
                state.error = None;
            }
            Err(e) => {
                warn!(error = %e, page = query.page(), "List fetch failed");
                state.items.clear();
                state.total = 0;
                state.total_pages = 0;
                state.load_state = LoadState::Failed;
                state.error = Some(e.to_string());
            }
        }
        this.publish(&state);
    }
}
