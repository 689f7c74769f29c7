//! In-memory stand-in for the store directory page.
//!
//! Models the parts of the page the scraper touches: a country `<select>`
//! with placeholder options, a store list whose rendered length grows with
//! each scroll step, an optional custom scrollbar, and store items made of an
//! `<h3>` name and `<p>` detail fragments. Failure switches cover navigation,
//! a missing selector, broken lists, broken items, a failing scrollbar probe
//! and a failing scroll step. [`LogCapture`] records formatted log lines.

#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing_subscriber::fmt::MakeWriter;

use storedir_scraper::{BrowserError, BrowserSession, Locator, PageElement, ScrapeSettings};

pub const PLACEHOLDERS: &[&str] = &["Ülke", "Seçiniz"];

/// Settings with every pause set to zero.
pub fn fast_settings() -> ScrapeSettings {
    ScrapeSettings {
        directory_url: "https://stores.test/directory".to_owned(),
        element_wait: Duration::ZERO,
        country_settle: Duration::ZERO,
        item_settle: Duration::ZERO,
        scroll_pause: Duration::ZERO,
        ..ScrapeSettings::default()
    }
}

#[derive(Debug, Clone)]
pub struct FakeItem {
    name: Option<String>,
    paragraphs: Vec<String>,
    broken: bool,
}

impl FakeItem {
    pub fn store(name: &str, paragraphs: &[&str]) -> Self {
        Self {
            name: Some(name.to_owned()),
            paragraphs: paragraphs.iter().map(|p| (*p).to_owned()).collect(),
            broken: false,
        }
    }

    pub fn nameless(paragraphs: &[&str]) -> Self {
        Self {
            name: None,
            ..Self::store("", paragraphs)
        }
    }

    /// An item whose paragraphs cannot be read.
    pub fn broken(name: &str) -> Self {
        Self {
            broken: true,
            ..Self::store(name, &[])
        }
    }

    /// `count` plain stores named `{prefix} 1` .. `{prefix} {count}`.
    pub fn numbered(prefix: &str, count: usize) -> Vec<Self> {
        (1..=count)
            .map(|n| {
                let address = format!("{n} Main Street");
                Self::store(&format!("{prefix} {n}"), &[address.as_str()])
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct FakeCountry {
    items: Vec<FakeItem>,
    /// Rendered item count after 0, 1, 2, .. scroll steps; the last entry repeats.
    growth: Vec<usize>,
    scrollbar: bool,
    broken_list: bool,
    unselectable: bool,
}

impl FakeCountry {
    /// A list rendered in full up front, without a scrollbar.
    pub fn with_items(items: Vec<FakeItem>) -> Self {
        Self {
            growth: vec![items.len()],
            items,
            scrollbar: false,
            broken_list: false,
            unselectable: false,
        }
    }

    /// A scrollable list rendering `growth[n]` items after `n` scroll steps.
    pub fn growing(items: Vec<FakeItem>, growth: &[usize]) -> Self {
        Self {
            growth: growth.to_vec(),
            scrollbar: true,
            ..Self::with_items(items)
        }
    }

    pub fn empty() -> Self {
        Self::with_items(Vec::new())
    }

    /// A country whose store list cannot be queried.
    pub fn broken() -> Self {
        Self {
            broken_list: true,
            ..Self::with_items(FakeItem::numbered("Ghost", 2))
        }
    }

    /// A country whose option refuses to be clicked.
    pub fn unselectable() -> Self {
        Self {
            unselectable: true,
            ..Self::with_items(FakeItem::numbered("Hidden", 1))
        }
    }

    pub fn without_scrollbar(mut self) -> Self {
        self.scrollbar = false;
        self
    }

    fn rendered(&self, scrolls: usize) -> usize {
        let step = scrolls.min(self.growth.len().saturating_sub(1));
        self.growth
            .get(step)
            .copied()
            .unwrap_or(0)
            .min(self.items.len())
    }
}

#[derive(Debug, Default)]
struct PageState {
    countries: Vec<(String, FakeCountry)>,
    selected: Option<usize>,
    scrolls: usize,
    has_select: bool,
    fail_navigation: bool,
    fail_scrollbar_probe: bool,
    fail_scroll: bool,
    visited: Vec<String>,
    scroll_steps: usize,
    into_view_calls: usize,
    quit_calls: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Select,
    Option(String),
    Item { country: usize, index: usize },
    Text(String),
    Marker,
}

#[derive(Clone)]
pub struct FakePage {
    state: Arc<Mutex<PageState>>,
}

impl FakePage {
    pub fn new(countries: Vec<(&str, FakeCountry)>) -> Self {
        let state = PageState {
            countries: countries
                .into_iter()
                .map(|(name, country)| (name.to_owned(), country))
                .collect(),
            has_select: true,
            ..PageState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn without_select(self) -> Self {
        self.state.lock().unwrap().has_select = false;
        self
    }

    pub fn failing_navigation(self) -> Self {
        self.state.lock().unwrap().fail_navigation = true;
        self
    }

    pub fn failing_scrollbar_probe(self) -> Self {
        self.state.lock().unwrap().fail_scrollbar_probe = true;
        self
    }

    pub fn failing_scroll(self) -> Self {
        self.state.lock().unwrap().fail_scroll = true;
        self
    }

    pub fn scroll_steps(&self) -> usize {
        self.state.lock().unwrap().scroll_steps
    }

    pub fn into_view_calls(&self) -> usize {
        self.state.lock().unwrap().into_view_calls
    }

    pub fn quit_calls(&self) -> usize {
        self.state.lock().unwrap().quit_calls
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.lock().unwrap().visited.clone()
    }

    fn element(&self, node: Node) -> FakeElement {
        FakeElement {
            state: Arc::clone(&self.state),
            node,
        }
    }
}

pub struct FakeElement {
    state: Arc<Mutex<PageState>>,
    node: Node,
}

impl FakeElement {
    /// Position of the store item in its country's list.
    pub fn item_index(&self) -> Option<usize> {
        match self.node {
            Node::Item { index, .. } => Some(index),
            _ => None,
        }
    }

    fn child(&self, node: Node) -> FakeElement {
        FakeElement {
            state: Arc::clone(&self.state),
            node,
        }
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn text(&self) -> Result<String, BrowserError> {
        Ok(match &self.node {
            Node::Option(text) | Node::Text(text) => text.clone(),
            _ => String::new(),
        })
    }

    async fn find_all(&self, locator: Locator<'_>) -> Result<Vec<Self>, BrowserError> {
        let state = self.state.lock().unwrap();
        let nodes = match (&self.node, locator) {
            (Node::Select, Locator::Tag("option")) => PLACEHOLDERS
                .iter()
                .map(|p| (*p).to_owned())
                .chain(state.countries.iter().map(|(name, _)| name.clone()))
                .map(Node::Option)
                .collect(),
            (Node::Item { country, index }, Locator::Tag(tag)) => {
                let item = &state.countries[*country].1.items[*index];
                match tag {
                    "h3" => item.name.iter().cloned().map(Node::Text).collect(),
                    "p" if item.broken => {
                        return Err(BrowserError::Stale(format!("item {index} detached")));
                    }
                    "p" => item.paragraphs.iter().cloned().map(Node::Text).collect(),
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        };
        Ok(nodes.into_iter().map(|node| self.child(node)).collect())
    }

    async fn click(&self) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        let Node::Option(text) = &self.node else {
            return Ok(());
        };
        let position = state.countries.iter().position(|(name, _)| name == text);
        if let Some(index) = position {
            if state.countries[index].1.unselectable {
                return Err(BrowserError::Stale(format!("option {text} detached")));
            }
        }
        state.selected = position;
        state.scrolls = 0;
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FakePage {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_navigation {
            return Err(BrowserError::Timeout {
                locator: url.to_owned(),
                timeout_secs: 0,
            });
        }
        state.visited.push(url.to_owned());
        Ok(())
    }

    async fn find_elements(&self, locator: Locator<'_>) -> Result<Vec<FakeElement>, BrowserError> {
        let state = self.state.lock().unwrap();
        let Some(selected) = state.selected else {
            return Ok(Vec::new());
        };
        let country = &state.countries[selected].1;
        let nodes = match locator {
            Locator::Css("#ListArea li") => {
                if country.broken_list {
                    return Err(BrowserError::Stale("store list detached".to_owned()));
                }
                (0..country.rendered(state.scrolls))
                    .map(|index| Node::Item {
                        country: selected,
                        index,
                    })
                    .collect()
            }
            Locator::ClassName("jspPane" | "jspDrag") => {
                if state.fail_scrollbar_probe {
                    return Err(BrowserError::Stale("scrollbar detached".to_owned()));
                }
                if country.scrollbar {
                    vec![Node::Marker]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        };
        Ok(nodes.into_iter().map(|node| self.element(node)).collect())
    }

    async fn execute_script(
        &self,
        script: &str,
        _args: &[&FakeElement],
    ) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if script.contains("scrollTop") {
            if state.fail_scroll {
                return Err(BrowserError::Stale("list container detached".to_owned()));
            }
            state.scrolls += 1;
            state.scroll_steps += 1;
        } else if script.contains("scrollIntoView") {
            state.into_view_calls += 1;
        }
        Ok(())
    }

    async fn wait_until_present(
        &self,
        locator: Locator<'_>,
        timeout: Duration,
    ) -> Result<FakeElement, BrowserError> {
        let has_select = self.state.lock().unwrap().has_select;
        match locator {
            Locator::Id("DDLCountry") if has_select => Ok(self.element(Node::Select)),
            _ => Err(BrowserError::Timeout {
                locator: locator.to_string(),
                timeout_secs: timeout.as_secs(),
            }),
        }
    }

    async fn quit(&self) -> Result<(), BrowserError> {
        self.state.lock().unwrap().quit_calls += 1;
        Ok(())
    }
}

/// Collects the output of a plain-text fmt subscriber installed for the
/// current thread.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Routes events on this thread into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.buffer.lock().unwrap())
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Lines containing `message`.
    pub fn lines_with(&self, message: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(message))
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
