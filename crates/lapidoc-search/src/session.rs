//! The query controller.
//!
//! [`SearchSession`] owns everything between the search input and the engine: the
//! debounced query, the last result list, dropdown visibility, the navigation overlay and
//! the active document. Hosts forward input events and poll it with the current time; it
//! answers with state changes and the occasional [`Effect`] for the host to carry out.

use std::time::{Duration, Instant};

use lapidoc_corpus::Corpus;
use tracing::debug;

use crate::{
    Debouncer, SearchOptions, SearchResult,
    engine::search_with,
    keys::{KeyPress, Shortcut, shortcut_for},
};

/// Side effects the host performs on the session's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Move input focus to the search box.
    FocusSearch,
    /// Scroll the document view back to the top.
    ScrollToTop,
    /// Close the navigation overlay.
    DismissOverlay,
}

/// Interactive search state for one viewer.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Engine options.
    options: SearchOptions,
    /// Pending query timer.
    debouncer: Debouncer,
    /// Raw text of the search input.
    query: String,
    /// Results of the last completed search.
    results: Vec<SearchResult>,
    /// Whether the result dropdown is shown.
    visible: bool,
    /// Id of the document being viewed, if any.
    active: Option<String>,
    /// Whether the navigation overlay is open.
    overlay_open: bool,
    /// Whether the search input has focus.
    focused: bool,
    /// Number of engine runs, for diagnostics.
    search_count: usize,
}

impl SearchSession {
    /// Creates an idle session.
    pub fn new(options: SearchOptions, debounce: Duration) -> Self {
        Self {
            options,
            debouncer: Debouncer::new(debounce),
            query: String::new(),
            results: Vec::new(),
            visible: false,
            active: None,
            overlay_open: false,
            focused: false,
            search_count: 0,
        }
    }

    /// Starts the session on `id`, if the corpus has it.
    pub fn with_active(mut self, corpus: &Corpus, id: &str) -> Self {
        if corpus.contains(id) {
            self.active = Some(id.to_string());
        }
        self
    }

    /// Records new input text and (re)starts the debounce timer.
    ///
    /// An emptied input clears results immediately; the timer still runs so the final
    /// value always resolves through the engine.
    pub fn on_query_changed(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        if text.trim().is_empty() {
            self.results.clear();
            self.visible = false;
        }
        self.debouncer.schedule(text, now);
    }

    /// Drops any pending search without touching current results.
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    /// Runs the pending search if its quiescence period has elapsed. Returns true if the
    /// engine ran.
    pub fn poll(&mut self, corpus: &Corpus, now: Instant) -> bool {
        let Some(fired) = self.debouncer.poll(now) else {
            return false;
        };
        if !self.debouncer.is_current(fired.generation) {
            return false;
        }
        self.results = search_with(corpus, &fired.query, &self.options);
        self.visible = !self.results.is_empty();
        self.search_count += 1;
        true
    }

    /// Time remaining before the pending search is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    /// Handles focus entering the search input. Stale results are re-shown for a
    /// non-empty query that matched something; nothing is recomputed.
    pub fn on_focus(&mut self) {
        self.focused = true;
        if !self.query.trim().is_empty() && !self.results.is_empty() {
            self.visible = true;
        }
    }

    /// Handles a pointer press outside the search region.
    pub fn on_outside_click(&mut self) {
        self.focused = false;
        self.visible = false;
    }

    /// Handles a global key press, returning the effects to perform.
    pub fn on_key(&mut self, press: KeyPress) -> Vec<Effect> {
        match shortcut_for(press) {
            Some(Shortcut::FocusSearch) => {
                self.on_focus();
                vec![Effect::FocusSearch]
            }
            Some(Shortcut::Dismiss) => {
                self.clear_query();
                self.focused = false;
                if self.overlay_open {
                    self.overlay_open = false;
                    vec![Effect::DismissOverlay]
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        }
    }

    /// Chooses the result at `index` in the current list.
    pub fn select(&mut self, corpus: &Corpus, index: usize) -> Vec<Effect> {
        let Some(id) = self.results.get(index).map(|r| r.id.clone()) else {
            return Vec::new();
        };
        self.activate(corpus, &id)
    }

    /// Activates a document by id, as a navigation click or a result choice does.
    ///
    /// Unknown ids are ignored and leave the session untouched.
    pub fn activate(&mut self, corpus: &Corpus, id: &str) -> Vec<Effect> {
        if !corpus.contains(id) {
            debug!(id, "activation ignored for unknown id");
            return Vec::new();
        }
        self.active = Some(id.to_string());
        self.clear_query();
        let mut effects = vec![Effect::ScrollToTop];
        if self.overlay_open {
            self.overlay_open = false;
            effects.push(Effect::DismissOverlay);
        }
        effects
    }

    /// Opens the navigation overlay.
    pub fn open_overlay(&mut self) {
        self.overlay_open = true;
    }

    /// Clears the query and results, hides the dropdown, and drops any pending search.
    fn clear_query(&mut self) {
        self.query.clear();
        self.results.clear();
        self.visible = false;
        self.debouncer.cancel();
    }

    /// Current raw input text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results of the last completed search.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Whether the dropdown is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Id of the active document.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether the navigation overlay is open.
    pub fn is_overlay_open(&self) -> bool {
        self.overlay_open
    }

    /// Whether the search input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether a search is waiting on its timer.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Number of times the engine has run.
    pub fn search_count(&self) -> usize {
        self.search_count
    }

    /// The engine options in use.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SearchOptions::default(), crate::DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use lapidoc_corpus::{Block, Document};

    use super::*;
    use crate::keys::Key;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn corpus() -> Corpus {
        Corpus::new(
            vec![
                Document::new("intro", "Introduction"),
                Document::new("installation", "Installation")
                    .with_block(Block::paragraph("Place the file in your lua folder.")),
            ],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn search_runs_after_quiescence() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("inst", t0);
        assert!(!s.poll(&c, t0 + ms(100)));
        assert!(s.results().is_empty());
        assert!(s.poll(&c, t0 + ms(300)));
        assert_eq!(s.results()[0].id, "installation");
        assert!(s.is_visible());
    }

    #[test]
    fn no_match_stays_hidden() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("zzz", t0);
        assert!(s.poll(&c, t0 + ms(300)));
        assert!(s.results().is_empty());
        assert!(!s.is_visible());
    }

    #[test]
    fn emptied_query_clears_immediately() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("lua", t0);
        s.poll(&c, t0 + ms(300));
        assert!(s.is_visible());

        s.on_query_changed("  ", t0 + ms(400));
        assert!(!s.is_visible());
        assert!(s.results().is_empty());
        assert!(s.is_pending());
        assert!(s.poll(&c, t0 + ms(700)));
        assert!(s.results().is_empty());
    }

    #[test]
    fn refocus_reshows_stale_results() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("intro", t0);
        s.poll(&c, t0 + ms(300));
        s.on_outside_click();
        assert!(!s.is_visible());
        assert_eq!(s.results().len(), 1);

        s.on_focus();
        assert!(s.is_visible());
        assert_eq!(s.search_count(), 1);
    }

    #[test]
    fn focus_after_no_match_stays_hidden() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("zzz", t0);
        s.poll(&c, t0 + ms(300));
        s.on_outside_click();

        s.on_focus();
        assert!(s.is_focused());
        assert!(!s.is_visible());
    }

    #[test]
    fn focus_with_empty_query_stays_hidden() {
        let mut s = SearchSession::default();
        s.on_focus();
        assert!(s.is_focused());
        assert!(!s.is_visible());
    }

    #[test]
    fn escape_clears_and_cancels() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.open_overlay();
        s.on_query_changed("intro", t0);

        let effects = s.on_key(KeyPress::plain(Key::Escape));
        assert_eq!(effects, vec![Effect::DismissOverlay]);
        assert_eq!(s.query(), "");
        assert!(!s.is_pending());
        assert!(!s.is_overlay_open());
        assert!(!s.poll(&c, t0 + ms(1000)));
    }

    #[test]
    fn modifier_k_focuses() {
        let mut s = SearchSession::default();
        assert_eq!(
            s.on_key(KeyPress::with_modifier(Key::Char('k'))),
            vec![Effect::FocusSearch]
        );
        assert!(s.is_focused());
        assert!(s.on_key(KeyPress::plain(Key::Char('k'))).is_empty());
    }

    #[test]
    fn select_activates_and_resets() {
        let c = corpus();
        let t0 = Instant::now();
        let mut s = SearchSession::default();
        s.on_query_changed("installation", t0);
        s.poll(&c, t0 + ms(300));

        let effects = s.select(&c, 0);
        assert_eq!(effects, vec![Effect::ScrollToTop]);
        assert_eq!(s.active(), Some("installation"));
        assert_eq!(s.query(), "");
        assert!(s.results().is_empty());
        assert!(!s.is_visible());
    }

    #[test]
    fn select_out_of_range_is_noop() {
        let c = corpus();
        let mut s = SearchSession::default().with_active(&c, "intro");
        assert!(s.select(&c, 3).is_empty());
        assert_eq!(s.active(), Some("intro"));
    }

    #[test]
    fn unknown_activation_is_ignored() {
        let c = corpus();
        let mut s = SearchSession::default().with_active(&c, "intro");
        s.open_overlay();
        assert!(s.activate(&c, "missing").is_empty());
        assert_eq!(s.active(), Some("intro"));
        assert!(s.is_overlay_open());
    }

    #[test]
    fn activation_closes_overlay() {
        let c = corpus();
        let mut s = SearchSession::default();
        s.open_overlay();
        assert_eq!(
            s.activate(&c, "installation"),
            vec![Effect::ScrollToTop, Effect::DismissOverlay]
        );
        assert!(!s.is_overlay_open());
    }

    #[test]
    fn with_active_ignores_unknown_start_page() {
        let s = SearchSession::default().with_active(&corpus(), "nowhere");
        assert_eq!(s.active(), None);
    }
}
