//! Implementation of `lapidoc browse`.
//!
//! Each stdin line is one input event. Plain text replaces the search input; lines
//! starting with `:` are commands. A typed query runs once the input has been quiet for the
//! debounce period, so a burst of lines only searches the last one.

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use lapidoc_corpus::{Corpus, NavItem, nav};
use lapidoc_highlight::Highlighter;
use lapidoc_search::{Effect, Key, KeyPress, SearchSession};

use crate::cli::{
    args::BrowseCommand,
    context::CommandContext,
    output::{NavState, dim, format_results, render_document, render_nav, render_welcome},
};

/// Help text for `:help`.
const HELP: &str = "\
<text>           set the search input (an empty line clears it)
:open N          open result N
:go ID           activate a page, or toggle a navigation group
:focus           focus the search input
:k               press Cmd/Ctrl+K
:click-outside   click outside the search box
:esc             press Escape
:menu            open the navigation overlay
:nav             show the navigation tree
:q               quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// New search input text.
    Query(String),
    /// Choose a result by 1-based position.
    Open(usize),
    /// Activate a page or toggle a group.
    Go(String),
    /// Focus the search input.
    Focus,
    /// A global key press.
    Key(KeyPress),
    /// Pointer press outside the search region.
    OutsideClick,
    /// Open the navigation overlay.
    Menu,
    /// Show the navigation tree.
    Nav,
    /// Show help.
    Help,
    /// End the session.
    Quit,
    /// A command that could not be parsed.
    Unknown(String),
}

/// Parses one input line. `::` escapes a query that starts with a colon.
fn parse_input(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Query(line.to_string());
    };
    if command.starts_with(':') {
        return Input::Query(command.to_string());
    }

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    match (name, arg) {
        ("open", n) => n
            .parse::<usize>()
            .map_or_else(|_| Input::Unknown(line.to_string()), Input::Open),
        ("go", id) if !id.is_empty() => Input::Go(id.to_string()),
        ("focus", "") => Input::Focus,
        ("k", "") => Input::Key(KeyPress::with_modifier(Key::Char('k'))),
        ("esc", "") => Input::Key(KeyPress::plain(Key::Escape)),
        ("click-outside", "") => Input::OutsideClick,
        ("menu", "") => Input::Menu,
        ("nav", "") => Input::Nav,
        ("help", "") => Input::Help,
        ("q" | "quit", "") => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

/// Whether the session continues after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Keep reading input.
    Continue,
    /// Stop the session.
    Quit,
}

/// Viewer state for one interactive session.
struct Browser<'a, W> {
    /// Documentation being browsed.
    corpus: &'a Corpus,
    /// Search and selection state.
    session: SearchSession,
    /// Sidebar group expansion.
    nav: NavState,
    /// Code highlighter.
    highlighter: Highlighter,
    /// Language for untagged code samples.
    language: String,
    /// Output sink.
    out: W,
}

impl<W: Write> Browser<'_, W> {
    /// Prints the current page, or the welcome state when none is active.
    fn render_active(&mut self) -> io::Result<()> {
        let page = match self.session.active().and_then(|id| self.corpus.get(id)) {
            Some(doc) => render_document(doc, &self.highlighter, &self.language),
            None => render_welcome(),
        };
        write!(self.out, "{page}")
    }

    /// Prints the navigation tree.
    fn render_nav(&mut self) -> io::Result<()> {
        let tree = render_nav(self.corpus.nav(), &self.nav, self.session.active());
        write!(self.out, "{tree}")
    }

    /// Prints the result list if the dropdown is visible.
    fn render_results(&mut self) -> io::Result<()> {
        if self.session.is_visible() {
            write!(self.out, "{}", format_results(self.session.results()))?;
        }
        Ok(())
    }

    /// Runs a due search and prints its outcome.
    fn tick(&mut self, now: Instant) -> io::Result<()> {
        if !self.session.poll(self.corpus, now) || self.session.query().trim().is_empty() {
            return Ok(());
        }
        write!(self.out, "{}", format_results(self.session.results()))
    }

    /// Waits out any pending search and runs it.
    fn flush_pending(&mut self) -> io::Result<()> {
        if let Some(wait) = self.session.time_until_due(Instant::now()) {
            thread::sleep(wait);
            self.tick(Instant::now())?;
        }
        Ok(())
    }

    /// Carries out effects returned by the session.
    fn apply(&mut self, effects: &[Effect]) -> io::Result<()> {
        for effect in effects {
            match effect {
                Effect::ScrollToTop => self.render_active()?,
                Effect::DismissOverlay => writeln!(self.out, "{}", dim("(navigation closed)"))?,
                Effect::FocusSearch => {
                    writeln!(self.out, "{}", dim("(search focused)"))?;
                    self.render_results()?;
                }
            }
        }
        Ok(())
    }

    /// Handles one input line.
    fn handle_line(&mut self, line: &str, now: Instant) -> io::Result<Flow> {
        match parse_input(line) {
            Input::Query(text) => self.session.on_query_changed(&text, now),
            Input::Open(n) => {
                let Some(index) = n.checked_sub(1).filter(|i| *i < self.session.results().len())
                else {
                    writeln!(self.out, "error: no result {n}")?;
                    return Ok(Flow::Continue);
                };
                let effects = self.session.select(self.corpus, index);
                self.apply(&effects)?;
            }
            Input::Go(id) => {
                if find_group(self.corpus.nav(), &id).is_some() {
                    self.nav.toggle(&id);
                    self.render_nav()?;
                } else {
                    let effects = self.session.activate(self.corpus, &id);
                    self.apply(&effects)?;
                }
            }
            Input::Focus => {
                self.session.on_focus();
                self.render_results()?;
            }
            Input::Key(press) => {
                let effects = self.session.on_key(press);
                self.apply(&effects)?;
            }
            Input::OutsideClick => self.session.on_outside_click(),
            Input::Menu => {
                self.session.open_overlay();
                self.render_nav()?;
            }
            Input::Nav => self.render_nav()?,
            Input::Help => writeln!(self.out, "{HELP}")?,
            Input::Quit => return Ok(Flow::Quit),
            Input::Unknown(text) => {
                writeln!(self.out, "error: unknown command: {text} (try :help)")?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Finds a navigation group by id.
fn find_group<'a>(items: &'a [NavItem], id: &str) -> Option<&'a NavItem> {
    let mut found = None;
    nav::walk(items, &mut |_, item| {
        if found.is_none() && item.is_group() && item.id == id {
            found = Some(item);
        }
    });
    found
}

/// Reads stdin on a background thread, one message per line.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Renders the start page, then runs the input loop until `:q` or end of input.
fn event_loop<W: Write>(browser: &mut Browser<'_, W>, lines: &Receiver<String>) -> io::Result<()> {
    browser.render_active()?;
    browser.out.flush()?;
    loop {
        let line = match browser.session.time_until_due(Instant::now()) {
            Some(wait) if wait.is_zero() => {
                browser.tick(Instant::now())?;
                continue;
            }
            Some(wait) => match lines.recv_timeout(wait) {
                Ok(line) => Some(line),
                Err(RecvTimeoutError::Timeout) => {
                    browser.tick(Instant::now())?;
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => None,
            },
            None => lines.recv().ok(),
        };

        let Some(line) = line else {
            browser.flush_pending()?;
            return browser.out.flush();
        };
        if browser.handle_line(&line, Instant::now())? == Flow::Quit {
            return browser.out.flush();
        }
        browser.out.flush()?;
    }
}

/// Starts an interactive session on stdin and stdout.
pub fn run(ctx: &mut CommandContext, cmd: &BrowseCommand) -> ExitCode {
    let debounce = cmd
        .debounce_ms
        .map_or_else(|| ctx.config.debounce(), Duration::from_millis);
    let options = ctx.config.search_options();
    let start = cmd
        .start
        .clone()
        .unwrap_or_else(|| ctx.config.display.start_page.clone());
    let highlighter = ctx.highlighter();
    let language = ctx.config.display.default_language.clone();

    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let mut browser = Browser {
        corpus,
        session: SearchSession::new(options, debounce).with_active(corpus, &start),
        nav: NavState::default(),
        highlighter,
        language,
        out: io::stdout().lock(),
    };

    let lines = spawn_stdin_reader();
    match event_loop(&mut browser, &lines) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to write output: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use lapidoc_search::SearchOptions;

    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn browser(corpus: &Corpus) -> Browser<'_, Vec<u8>> {
        Browser {
            corpus,
            session: SearchSession::new(SearchOptions::default(), DELAY),
            nav: NavState::default(),
            highlighter: Highlighter::new(),
            language: "lua".into(),
            out: Vec::new(),
        }
    }

    fn take_output(browser: &mut Browser<'_, Vec<u8>>) -> String {
        String::from_utf8(mem::take(&mut browser.out)).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_input("install"), Input::Query("install".into()));
        assert_eq!(parse_input(""), Input::Query(String::new()));
        assert_eq!(parse_input("::colon"), Input::Query(":colon".into()));
        assert_eq!(parse_input(":open 2"), Input::Open(2));
        assert_eq!(parse_input(":go utils"), Input::Go("utils".into()));
        assert_eq!(
            parse_input(":k"),
            Input::Key(KeyPress::with_modifier(Key::Char('k')))
        );
        assert_eq!(parse_input(":esc"), Input::Key(KeyPress::plain(Key::Escape)));
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":open x"), Input::Unknown(":open x".into()));
        assert_eq!(parse_input(":go"), Input::Unknown(":go".into()));
        assert_eq!(parse_input(":bogus"), Input::Unknown(":bogus".into()));
    }

    #[test]
    fn burst_of_queries_searches_once() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        let t0 = Instant::now();
        b.handle_line("i", t0).unwrap();
        b.handle_line("in", t0 + Duration::from_millis(100)).unwrap();
        b.handle_line("install", t0 + Duration::from_millis(200)).unwrap();

        b.tick(t0 + Duration::from_millis(400)).unwrap();
        assert_eq!(b.session.search_count(), 0);

        b.tick(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(b.session.search_count(), 1);
        let out = take_output(&mut b);
        assert!(out.contains("Installation"));
        assert!(out.contains("score 10"));
    }

    #[test]
    fn open_renders_page_and_clears_query() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        let t0 = Instant::now();
        b.handle_line("install", t0).unwrap();
        b.tick(t0 + DELAY).unwrap();
        take_output(&mut b);

        b.handle_line(":open 1", t0 + DELAY).unwrap();
        assert_eq!(b.session.active(), Some("installation"));
        assert_eq!(b.session.query(), "");
        assert!(take_output(&mut b).contains("Join Discord →"));
    }

    #[test]
    fn open_out_of_range() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        b.handle_line(":open 1", Instant::now()).unwrap();
        assert!(take_output(&mut b).contains("no result 1"));
        b.handle_line(":open 0", Instant::now()).unwrap();
        assert!(take_output(&mut b).contains("no result 0"));
    }

    #[test]
    fn go_toggles_groups_and_ignores_unknown_ids() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        b.handle_line(":go modules", Instant::now()).unwrap();
        assert!(!b.nav.is_expanded("modules"));
        assert!(!take_output(&mut b).contains("File System"));

        b.handle_line(":go nowhere", Instant::now()).unwrap();
        assert!(take_output(&mut b).is_empty());
        assert_eq!(b.session.active(), None);

        b.handle_line(":go utils", Instant::now()).unwrap();
        assert_eq!(b.session.active(), Some("utils"));
    }

    #[test]
    fn menu_then_activate_closes_overlay() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        b.handle_line(":menu", Instant::now()).unwrap();
        assert!(b.session.is_overlay_open());
        take_output(&mut b);

        b.handle_line(":go intro", Instant::now()).unwrap();
        assert!(!b.session.is_overlay_open());
        assert!(take_output(&mut b).contains("(navigation closed)"));
    }

    #[test]
    fn focus_reshows_stale_results() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        let t0 = Instant::now();
        b.handle_line("install", t0).unwrap();
        b.tick(t0 + DELAY).unwrap();
        b.handle_line(":click-outside", t0 + DELAY).unwrap();
        assert!(!b.session.is_visible());
        take_output(&mut b);

        b.handle_line(":k", t0 + DELAY).unwrap();
        assert!(b.session.is_visible());
        let out = take_output(&mut b);
        assert!(out.contains("(search focused)"));
        assert!(out.contains("Installation"));
        assert_eq!(b.session.search_count(), 1);
    }

    #[test]
    fn focus_after_no_match_prints_nothing() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        let t0 = Instant::now();
        b.handle_line("zzz", t0).unwrap();
        b.tick(t0 + DELAY).unwrap();
        assert!(take_output(&mut b).contains("No results found."));

        b.handle_line(":focus", t0 + DELAY).unwrap();
        assert!(!b.session.is_visible());
        assert!(take_output(&mut b).is_empty());
    }

    #[test]
    fn quit_stops_the_session() {
        let corpus = Corpus::bundled();
        let mut b = browser(&corpus);
        assert_eq!(b.handle_line(":q", Instant::now()).unwrap(), Flow::Quit);
        assert_eq!(
            b.handle_line("text", Instant::now()).unwrap(),
            Flow::Continue
        );
    }

    #[test]
    fn find_group_only_matches_groups() {
        let corpus = Corpus::bundled();
        assert!(find_group(corpus.nav(), "modules").is_some());
        assert!(find_group(corpus.nav(), "utils").is_none());
    }
}
