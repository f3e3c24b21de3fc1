//! A filterable single-choice select.
//!
//! [`FilterSelect`] is built from three surfaces: a one-line **proxy**
//! showing the committed value, the filter **input**, and the option
//! **list** shown in a dropdown below. Key and mouse input is turned into
//! [`RawEvent`]s, classified into [`Signal`]s by [`signal::normalize`], and
//! fed to three consumers:
//!
//! - the debounced filter text ([`FilterText`]), which decides which options
//!   are shown and highlighted,
//! - the dropdown state machine ([`Visibility`]),
//! - the commit handler, which emits [`Message::Selected`] exactly once per
//!   confirmed choice.
//!
//! Timing (debounce, blur grace, proxy hand-off) is expressed as deferred
//! commands carrying a generation token, so stale timers are ignored rather
//! than cancelled and the whole widget runs under a virtual clock in tests.
//!
//! # Example
//!
//! ```ignore
//! use sago_widgets::filter_select::{FilterSelect, SelectOption};
//!
//! let picker = FilterSelect::new(vec![
//!     SelectOption::new("Ben", "BP"),
//!     SelectOption::new("Sue", "SB"),
//! ])
//! .with_placeholder("Pick a person")
//! .with_title(" Person ");
//! ```

pub mod config;
pub mod filter_text;
pub mod highlight;
mod input;
pub mod keys;
pub mod option_filter;
pub mod signal;
pub mod visibility;

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use sago_core::{Command, Component};
use unicode_width::UnicodeWidthChar;

pub use config::{FilterSelectConfig, FilterSelectStyle};
pub use filter_text::FilterText;
pub use highlight::HighlightSpan;
pub use keys::{Binding, FilterSelectKeys, KeyCombination};
pub use option_filter::{FilteredOption, SelectOption};
pub use signal::{RawEvent, RawKind, Signal, Surface};
pub use visibility::{BlurCheck, Visibility, VisibilityState};

use input::InputBuffer;

/// The outcome of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
    pub text: String,
    pub id: String,
}

/// Messages for the filter select.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key press routed to the widget by its host.
    KeyPress(KeyEvent),
    /// A mouse event. Only left-button presses are used.
    Mouse(MouseEvent),
    /// Bracketed paste into the focused surface.
    Paste(String),
    /// Move focus to a surface, or out of the widget with `None`.
    MoveFocus(Option<Surface>),
    /// A raw surface event, bypassing the key and mouse adapter. Focus and
    /// blur events also move the widget's focus.
    Raw(RawEvent),
    /// Debounce window of a keystroke generation ended.
    FilterSettled(u64),
    /// Blur grace window ended.
    BlurGraceElapsed(BlurCheck),
    /// Proxy focus delay ended.
    ProxyFocusElapsed,
    /// An option was committed. Emitted by the widget; a no-op when fed back.
    Selected(SelectionResult),
}

#[derive(Debug, Clone)]
struct Committed {
    text: String,
    /// Filter text at commit time; the proxy keeps highlighting against it.
    filter: String,
}

/// Screen areas drawn in the last render, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct HitAreas {
    anchor: Rect,
    /// The anchor shows the input rather than the proxy.
    editing: bool,
    list: Rect,
    list_offset: usize,
}

/// A select whose options are narrowed by typing.
pub struct FilterSelect {
    options: Vec<SelectOption>,
    input: InputBuffer,
    filter: FilterText,
    visibility: Visibility,
    focus: Option<Surface>,
    /// Index into the current filter pass, set by list navigation.
    pointer: Option<usize>,
    committed: Option<Committed>,
    config: FilterSelectConfig,
    keys: FilterSelectKeys,
    style: FilterSelectStyle,
    placeholder: String,
    title: String,
    hit: Cell<HitAreas>,
}

impl FilterSelect {
    /// Create a closed, unfocused select over `options`.
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            input: InputBuffer::new(),
            filter: FilterText::new(),
            visibility: Visibility::new(),
            focus: None,
            pointer: None,
            committed: None,
            config: FilterSelectConfig::default(),
            keys: FilterSelectKeys::default(),
            style: FilterSelectStyle::default(),
            placeholder: String::new(),
            title: String::new(),
            hit: Cell::new(HitAreas::default()),
        }
    }

    pub fn with_config(mut self, config: FilterSelectConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_keys(mut self, keys: FilterSelectKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_style(mut self, style: FilterSelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Text shown in the proxy until something is committed.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Title drawn in the border.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the option set and reset all interaction state.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.reset();
    }

    /// Return to the freshly created state: empty filter, closed, unfocused,
    /// nothing committed. Timers already in flight become stale.
    pub fn reset(&mut self) {
        self.input.clear();
        self.filter.reset();
        self.visibility = Visibility::new();
        self.focus = None;
        self.pointer = None;
        self.committed = None;
        tracing::debug!(options = self.options.len(), "filter select reset");
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Look an option up by id. With duplicate ids the last one wins.
    pub fn option_by_id(&self, id: &str) -> Option<&SelectOption> {
        option_filter::find_by_id(&self.options, id)
    }

    pub fn config(&self) -> &FilterSelectConfig {
        &self.config
    }

    pub fn keys(&self) -> &FilterSelectKeys {
        &self.keys
    }

    /// The filter text currently applied to the list.
    pub fn filter_text(&self) -> &str {
        self.filter.current()
    }

    /// What the filter input displays, which may be ahead of
    /// [`filter_text`](Self::filter_text) while a debounce is pending.
    pub fn input_value(&self) -> String {
        self.input.value()
    }

    /// Replace the input text as if the user had typed it.
    pub fn set_input_value(&mut self, value: &str) -> Command<Message> {
        self.input.set_value(value);
        self.dispatch(Signal::Keystroke(self.input.value()))
    }

    /// The options passing the current filter, in their original order.
    pub fn filtered(&self) -> Vec<FilteredOption<'_>> {
        option_filter::filter_options(&self.options, self.filter.current())
    }

    /// Highlight splits for every filtered option.
    pub fn highlights(&self) -> Vec<HighlightSpan<'_>> {
        let filter = self.filter.current();
        self.filtered()
            .into_iter()
            .map(|entry| highlight::format(filter, &entry.option.text))
            .collect()
    }

    /// The option Enter would commit right now: the one under the list
    /// pointer, or the default choice.
    pub fn pointed(&self) -> Option<&SelectOption> {
        let filtered = self.filtered();
        pointed_index(self.pointer, &filtered).map(|i| filtered[i].option)
    }

    /// Position of [`pointed`](Self::pointed) within [`filtered`](Self::filtered).
    pub fn pointed_index(&self) -> Option<usize> {
        pointed_index(self.pointer, &self.filtered())
    }

    /// Text of the last committed option.
    pub fn committed_text(&self) -> Option<&str> {
        self.committed.as_ref().map(|c| c.text.as_str())
    }

    /// The committed text split against the filter that was active when it
    /// was committed.
    pub fn committed_highlight(&self) -> Option<HighlightSpan<'_>> {
        self.committed
            .as_ref()
            .map(|c| highlight::format(&c.filter, &c.text))
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn is_open(&self) -> bool {
        self.visibility.is_open()
    }

    /// The surface holding focus, if any.
    pub fn focused_surface(&self) -> Option<Surface> {
        self.focus
    }

    /// Focus the filter input.
    pub fn focus(&mut self) -> Command<Message> {
        self.move_focus(Some(Surface::Input))
    }

    /// Drop focus from whichever surface holds it.
    pub fn blur(&mut self) -> Command<Message> {
        self.move_focus(None)
    }

    fn move_focus(&mut self, target: Option<Surface>) -> Command<Message> {
        let previous = self.focus;
        if previous == target {
            return Command::none();
        }
        tracing::trace!(?previous, ?target, "focus moved");
        self.focus = target;
        let blur = previous.map(|s| self.handle_raw(RawEvent::blur(s)));
        let focus = target.map(|s| self.handle_raw(RawEvent::focus(s)));
        Command::batch(blur.into_iter().chain(focus))
    }

    fn handle_raw(&mut self, event: RawEvent) -> Command<Message> {
        let value = self.input.value();
        match signal::normalize(&event, &self.keys, &value) {
            Some(signal) => {
                tracing::trace!(?event, ?signal, "signal");
                self.dispatch(signal)
            }
            None => Command::none(),
        }
    }

    fn dispatch(&mut self, signal: Signal) -> Command<Message> {
        if signal == Signal::Confirm && !self.is_open() {
            tracing::debug!(focus = ?self.focus, "confirm ignored while closed");
            return Command::none();
        }

        let check = self
            .visibility
            .apply(&signal)
            .map(|check| Command::after(self.config.blur_grace, Message::BlurGraceElapsed(check)));

        let effect = match signal {
            Signal::Keystroke(text) => {
                let generation = self.filter.push(text);
                Command::after(self.config.debounce, Message::FilterSettled(generation))
            }
            Signal::FocusListRequested => self.move_focus(Some(Surface::List)),
            Signal::FocusIn(Surface::Proxy) | Signal::ProxyActivated => {
                Command::after(self.config.proxy_focus_delay, Message::ProxyFocusElapsed)
            }
            Signal::Confirm => {
                let committed = self.commit();
                self.leave_closed_list();
                match committed {
                    Some(result) => Command::message(Message::Selected(result)),
                    None => Command::none(),
                }
            }
            Signal::Dismiss => {
                self.leave_closed_list();
                Command::none()
            }
            Signal::FocusIn(_) | Signal::FocusOut(_) => Command::none(),
        };

        Command::batch(check.into_iter().chain([effect]))
    }

    /// Once the dropdown has closed, a focused list has nothing to show.
    /// Focus goes back to the input without reopening.
    fn leave_closed_list(&mut self) {
        if self.focus != Some(Surface::List) || self.is_open() {
            return;
        }
        self.focus = Some(Surface::Input);
        self.visibility.apply(&Signal::FocusOut(Surface::List));
        tracing::trace!("focus returned to input");
    }

    /// Track focus reported by a raw event. The signal itself is dispatched
    /// by the caller, so no synthetic blur/focus pair is produced here.
    fn sync_raw_focus(&mut self, event: &RawEvent) {
        match event.kind {
            RawKind::Focus => self.focus = Some(event.surface),
            RawKind::Blur if self.focus == Some(event.surface) => self.focus = None,
            _ => {}
        }
    }

    fn commit(&mut self) -> Option<SelectionResult> {
        let Some(option) = self.pointed() else {
            tracing::debug!(filter = self.filter.current(), "confirm with no matching option");
            return None;
        };
        let result = SelectionResult {
            text: option.text.clone(),
            id: option.id.clone(),
        };
        self.committed = Some(Committed {
            text: result.text.clone(),
            filter: self.filter.current().to_owned(),
        });
        tracing::debug!(id = %result.id, text = %result.text, "option committed");
        Some(result)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let Some(surface) = self.focus else {
            return Command::none();
        };
        match surface {
            Surface::Proxy if self.keys.next_surface.matches(&key) => {
                self.move_focus(Some(Surface::Input))
            }
            Surface::Proxy if self.keys.prev_surface.matches(&key) => self.move_focus(None),
            Surface::Input if self.keys.next_surface.matches(&key) => {
                self.move_focus(Some(Surface::List))
            }
            Surface::Input if self.keys.prev_surface.matches(&key) => self.move_focus(None),
            Surface::List if self.keys.next_surface.matches(&key) => self.move_focus(None),
            Surface::List if self.keys.prev_surface.matches(&key) => {
                self.move_focus(Some(Surface::Input))
            }
            Surface::Input => {
                self.input.handle_key(&key);
                self.handle_raw(RawEvent::key_up(Surface::Input, key))
            }
            Surface::List => {
                self.move_pointer(key.code);
                self.handle_raw(RawEvent::key_up(Surface::List, key))
            }
            Surface::Proxy => self.handle_raw(RawEvent::key_up(Surface::Proxy, key)),
        }
    }

    fn move_pointer(&mut self, code: KeyCode) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        let current = self.pointed_index().unwrap_or(0);
        let page = self.config.max_visible.max(1);
        let next = match code {
            KeyCode::Up => current.saturating_sub(1),
            KeyCode::Down => (current + 1).min(len - 1),
            KeyCode::PageUp => current.saturating_sub(page),
            KeyCode::PageDown => (current + page).min(len - 1),
            KeyCode::Home => 0,
            KeyCode::End => len - 1,
            _ => return,
        };
        self.pointer = Some(next);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Command<Message> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::none();
        }
        let pos = Position::new(mouse.column, mouse.row);
        let hit = self.hit.get();

        if self.is_open() && hit.list.contains(pos) {
            let row = hit.list_offset + usize::from(pos.y - hit.list.y);
            if row >= self.filtered().len() {
                return self.move_focus(Some(Surface::List));
            }
            self.pointer = Some(row);
            let focus = self.move_focus(Some(Surface::List));
            let click = self.handle_raw(RawEvent::click(Surface::List));
            return Command::batch([focus, click]);
        }

        if hit.anchor.contains(pos) {
            let surface = if hit.editing {
                Surface::Input
            } else {
                Surface::Proxy
            };
            let focus = self.move_focus(Some(surface));
            let click = self.handle_raw(RawEvent::click(surface));
            return Command::batch([focus, click]);
        }

        self.move_focus(None)
    }

    fn handle_paste(&mut self, text: &str) -> Command<Message> {
        if self.focus != Some(Surface::Input) {
            return Command::none();
        }
        self.input.insert_str(text);
        self.handle_raw(RawEvent::new(Surface::Input, RawKind::Paste))
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let chars = self.input.chars();
        let cursor = self.input.cursor();
        let width = usize::from(area.width.saturating_sub(2)).max(1);
        let start = cursor.saturating_sub(width - 1);
        let end = chars.len().min(start + width);

        let before: String = chars[start..cursor].iter().collect();
        let under = chars.get(cursor).map_or_else(|| " ".to_string(), |c| c.to_string());
        let after: String = chars.get(cursor + 1..end).unwrap_or_default().iter().collect();

        let mut spans = vec![
            Span::styled("› ", self.style.placeholder),
            Span::styled(before, self.style.input),
        ];
        if self.focus == Some(Surface::Input) {
            spans.push(Span::styled(under, self.style.cursor));
        } else {
            spans.push(Span::styled(under, self.style.input));
        }
        spans.push(Span::styled(after, self.style.input));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_proxy(&self, frame: &mut Frame, area: Rect) {
        let line = match self.committed_highlight() {
            Some(span) => span.to_line(self.style.proxy, self.style.highlight),
            None => Line::styled(self.placeholder.as_str(), self.style.placeholder),
        };
        let line = truncate_line(line, usize::from(area.width));
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Draw the dropdown below `anchor`. Returns the row area and scroll
    /// offset, or an empty area when there is no room.
    fn render_list(&self, frame: &mut Frame, anchor: Rect) -> (Rect, usize) {
        let filtered = self.filtered();
        let rows = filtered.len().clamp(1, self.config.max_visible.max(1));
        let y = anchor.y.saturating_add(anchor.height);
        let room = frame.area().bottom().saturating_sub(y);
        let height = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(room);
        let area = Rect::new(anchor.x, y, anchor.width, height);
        if area.height < 3 || area.width < 4 {
            return (Rect::default(), 0);
        }

        frame.render_widget(Clear, area);
        let block = Block::new()
            .borders(Borders::ALL)
            .border_style(self.style.border_focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if filtered.is_empty() {
            let line = Line::styled("  no matches", self.style.placeholder);
            frame.render_widget(Paragraph::new(line), inner);
            return (inner, 0);
        }

        let pointed = pointed_index(self.pointer, &filtered);
        let visible = usize::from(inner.height);
        let offset = scroll_offset(pointed.unwrap_or(0), visible);
        let filter = self.filter.current();

        for (row, entry) in filtered.iter().enumerate().skip(offset).take(visible) {
            let is_pointed = pointed == Some(row);
            let (base, prefix) = if is_pointed {
                (self.style.pointed_item, "▸ ")
            } else {
                (self.style.item, "  ")
            };
            let mut line = highlight::format(filter, &entry.option.text)
                .to_line(base, self.style.highlight);
            line.spans.insert(0, Span::styled(prefix, base));
            let row_area = Rect {
                y: inner.y + (row - offset) as u16,
                height: 1,
                ..inner
            };
            let line = truncate_line(line, usize::from(inner.width));
            frame.render_widget(Paragraph::new(line), row_area);
        }
        (inner, offset)
    }
}

impl Component for FilterSelect {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => self.handle_key(key),
            Message::Mouse(mouse) => self.handle_mouse(mouse),
            Message::Paste(text) => self.handle_paste(&text),
            Message::MoveFocus(target) => self.move_focus(target),
            Message::Raw(event) => {
                self.sync_raw_focus(&event);
                self.handle_raw(event)
            }
            Message::FilterSettled(generation) => {
                if let Some(text) = self.filter.settle(generation) {
                    tracing::debug!(filter = text, "filter applied");
                    self.pointer = None;
                }
                Command::none()
            }
            Message::BlurGraceElapsed(check) => {
                self.visibility.resolve_blur(check);
                Command::none()
            }
            Message::ProxyFocusElapsed => {
                if self.focus == Some(Surface::Proxy) {
                    self.move_focus(Some(Surface::Input))
                } else {
                    tracing::trace!(focus = ?self.focus, "proxy hand-off dropped");
                    Command::none()
                }
            }
            Message::Selected(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let editing = self.focus == Some(Surface::Input) || self.is_open();

        let inner = if area.height >= 3 {
            let border = if self.focus.is_some() {
                self.style.border_focused
            } else {
                self.style.border
            };
            let block = Block::new()
                .borders(Borders::ALL)
                .border_style(border)
                .title(self.title.as_str());
            let inner = block.inner(area);
            frame.render_widget(block, area);
            inner
        } else {
            area
        };

        if editing {
            self.render_input(frame, inner);
        } else {
            self.render_proxy(frame, inner);
        }

        let mut hit = HitAreas {
            anchor: area,
            editing,
            ..HitAreas::default()
        };
        if self.is_open() {
            (hit.list, hit.list_offset) = self.render_list(frame, area);
        }
        self.hit.set(hit);
    }

    fn focused(&self) -> bool {
        self.focus.is_some()
    }
}

fn pointed_index(pointer: Option<usize>, filtered: &[FilteredOption<'_>]) -> Option<usize> {
    match pointer {
        Some(i) if i < filtered.len() => Some(i),
        _ => filtered.iter().position(|entry| entry.is_default),
    }
}

/// First visible row so that `pointed` stays inside a window of `visible`.
fn scroll_offset(pointed: usize, visible: usize) -> usize {
    pointed.saturating_sub(visible.saturating_sub(1))
}

/// Cut `line` to `max_width` columns, ending in `…` when shortened.
fn truncate_line(line: Line<'_>, max_width: usize) -> Line<'_> {
    if line.width() <= max_width {
        return line;
    }
    let budget = max_width.saturating_sub(1);
    let mut used = 0;
    let mut spans = Vec::new();
    for span in line.spans {
        let mut kept = String::new();
        let mut complete = true;
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                complete = false;
                break;
            }
            used += w;
            kept.push(c);
        }
        if !kept.is_empty() {
            spans.push(Span::styled(kept, span.style));
        }
        if !complete {
            break;
        }
    }
    spans.push(Span::raw("…"));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use sago_core::testing::{ComponentHarness, TestProgram};
    use sago_core::Model;
    use std::time::Duration;

    fn people() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Ben", "BP"),
            SelectOption::new("Benny", "BO"),
            SelectOption::new("Sue", "SB"),
        ]
    }

    fn harness() -> ComponentHarness<FilterSelect> {
        ComponentHarness::new(FilterSelect::new(people()).with_placeholder("Pick one"))
    }

    fn key(code: KeyCode) -> Message {
        Message::KeyPress(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn click(column: u16, row: u16) -> Message {
        Message::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_text(h: &mut ComponentHarness<FilterSelect>, text: &str) {
        for c in text.chars() {
            h.send(key(KeyCode::Char(c)));
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn selections(h: &ComponentHarness<FilterSelect>) -> Vec<SelectionResult> {
        h.emitted()
            .iter()
            .filter_map(|m| match m {
                Message::Selected(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    fn texts(select: &FilterSelect) -> Vec<&str> {
        select
            .filtered()
            .into_iter()
            .map(|f| f.option.text.as_str())
            .collect()
    }

    fn focused_input() -> ComponentHarness<FilterSelect> {
        let mut h = harness();
        h.send(Message::MoveFocus(Some(Surface::Input)));
        assert!(h.component().is_open());
        h
    }

    #[test]
    fn starts_closed_with_everything_listed() {
        let h = harness();
        let select = h.component();
        assert_eq!(select.visibility(), VisibilityState::Closed);
        assert!(!select.focused());
        assert_eq!(texts(select), ["Ben", "Benny", "Sue"]);
        assert_eq!(select.pointed().map(|o| o.id.as_str()), Some("BP"));
        assert!(select.highlights().iter().all(|s| !s.has_match()));
    }

    #[test]
    fn typing_filters_after_debounce() {
        let mut h = focused_input();
        type_text(&mut h, "Ben");
        assert_eq!(h.component().input_value(), "Ben");
        assert_eq!(h.component().filter_text(), "");

        h.advance(ms(100));
        let select = h.component();
        assert_eq!(select.filter_text(), "Ben");
        assert_eq!(texts(select), ["Ben", "Benny"]);
        let spans = select.highlights();
        assert_eq!((spans[1].pre, spans[1].matched, spans[1].post), ("", "Ben", "ny"));
    }

    #[test]
    fn burst_of_keys_applies_once() {
        let mut h = focused_input();
        let mut seen = vec![h.component().filter_text().to_string()];
        for c in "Sue".chars() {
            h.send(key(KeyCode::Char(c)));
            h.advance(ms(40));
            seen.push(h.component().filter_text().to_string());
        }
        for _ in 0..5 {
            h.advance(ms(20));
            seen.push(h.component().filter_text().to_string());
        }
        seen.dedup();
        assert_eq!(seen, ["", "Sue"]);
    }

    #[test]
    fn interior_match_is_highlighted_case_insensitively() {
        let mut h = focused_input();
        type_text(&mut h, "ENN");
        h.advance(ms(100));
        let select = h.component();
        assert_eq!(texts(select), ["Benny"]);
        let span = select.highlights()[0];
        assert_eq!((span.pre, span.matched, span.post), ("B", "enn", "y"));
    }

    #[test]
    fn enter_commits_the_default_choice() {
        let mut h = focused_input();
        type_text(&mut h, "ben");
        h.advance(ms(100));
        h.send(key(KeyCode::Enter));

        assert_eq!(
            selections(&h),
            [SelectionResult {
                text: "Ben".into(),
                id: "BP".into()
            }]
        );
        let select = h.component();
        assert!(!select.is_open());
        assert_eq!(select.committed_text(), Some("Ben"));
        let span = select.committed_highlight().unwrap();
        assert_eq!((span.pre, span.matched, span.post), ("", "Ben", ""));
    }

    #[test]
    fn confirm_with_no_match_emits_nothing() {
        let mut h = focused_input();
        type_text(&mut h, "zz");
        h.advance(ms(100));
        assert!(h.component().filtered().is_empty());
        h.send(key(KeyCode::Enter));
        assert!(selections(&h).is_empty());
        assert!(h.component().committed_text().is_none());
    }

    #[test]
    fn down_moves_into_list_and_dropdown_survives_the_blur() {
        let mut h = focused_input();
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().focused_surface(), Some(Surface::List));
        h.advance(ms(50));
        assert!(h.component().is_open());

        h.send(key(KeyCode::Down));
        assert_eq!(h.component().pointed().map(|o| o.id.as_str()), Some("BO"));
        h.send(key(KeyCode::Enter));
        assert_eq!(selections(&h).len(), 1);
        assert_eq!(selections(&h)[0].id, "BO");
        assert!(!h.component().is_open());
    }

    #[test]
    fn list_commit_returns_focus_to_input() {
        let mut h = focused_input();
        h.send(key(KeyCode::Down));
        h.advance(ms(50));
        h.send(key(KeyCode::Enter));
        assert_eq!(selections(&h).len(), 1);
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
        assert!(!h.component().is_open());

        h.send(key(KeyCode::Enter));
        h.send(key(KeyCode::Enter));
        assert_eq!(selections(&h).len(), 1, "no commit while closed");

        type_text(&mut h, "s");
        assert_eq!(h.component().input_value(), "s");
        assert!(!h.component().is_open());

        h.send(key(KeyCode::Down));
        h.advance(ms(10));
        assert!(h.component().is_open());
        assert_eq!(h.component().focused_surface(), Some(Surface::List));
    }

    #[test]
    fn escape_from_list_returns_focus_to_input() {
        let mut h = focused_input();
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Esc));
        assert!(!h.component().is_open());
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
        h.advance(ms(50));
        assert!(!h.component().is_open());
        assert!(selections(&h).is_empty());
    }

    #[test]
    fn list_pointer_stops_at_the_ends() {
        let mut h = focused_input();
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::Up));
        assert_eq!(h.component().pointed_index(), Some(0));
        h.send(key(KeyCode::End));
        h.send(key(KeyCode::Down));
        assert_eq!(h.component().pointed_index(), Some(2));
    }

    #[test]
    fn blur_with_nothing_focused_closes_after_grace() {
        let mut h = focused_input();
        h.send(Message::MoveFocus(None));
        assert!(h.component().is_open(), "decision is deferred");
        h.advance(ms(9));
        assert!(h.component().is_open());
        h.advance(ms(1));
        assert!(!h.component().is_open());
    }

    #[test]
    fn injected_blur_then_list_focus_stays_open() {
        let mut h = focused_input();
        h.send(Message::Raw(RawEvent::blur(Surface::Input)));
        h.advance(ms(5));
        h.send(Message::Raw(RawEvent::focus(Surface::List)));
        h.advance(ms(10));
        assert!(h.component().is_open());
    }

    #[test]
    fn keys_follow_injected_list_focus() {
        let mut h = focused_input();
        h.send(Message::Raw(RawEvent::blur(Surface::Input)));
        h.send(Message::Raw(RawEvent::focus(Surface::List)));
        assert_eq!(h.component().focused_surface(), Some(Surface::List));

        h.send(key(KeyCode::Down));
        assert_eq!(h.component().pointed().map(|o| o.id.as_str()), Some("BO"));
        h.advance(ms(10));
        assert!(h.component().is_open());
    }

    #[test]
    fn injected_proxy_focus_hands_off_to_input() {
        let mut h = harness();
        h.send(Message::Raw(RawEvent::focus(Surface::Proxy)));
        assert_eq!(h.component().focused_surface(), Some(Surface::Proxy));
        assert!(h.component().is_open());

        h.advance(ms(20));
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
        h.advance(ms(50));
        assert!(h.component().is_open());
    }

    #[test]
    fn injected_blur_of_another_surface_keeps_focus() {
        let mut h = focused_input();
        h.send(Message::Raw(RawEvent::blur(Surface::List)));
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
    }

    #[test]
    fn clicking_a_row_commits_it_once() {
        let mut h = focused_input();
        h.render(30, 12, Rect::new(0, 0, 30, 3));
        // Anchor rows 0..3, dropdown border at row 3, first option at row 4.
        h.send(click(4, 5));

        assert_eq!(
            selections(&h),
            [SelectionResult {
                text: "Benny".into(),
                id: "BO".into()
            }]
        );
        assert!(!h.component().is_open());
        h.advance(ms(50));
        assert!(!h.component().is_open(), "the pending blur check was cancelled");
        assert_eq!(selections(&h).len(), 1);
    }

    #[test]
    fn clicking_outside_blurs() {
        let mut h = focused_input();
        h.render(30, 12, Rect::new(0, 0, 30, 3));
        h.send(click(20, 11));
        assert!(!h.component().focused());
        h.advance(ms(10));
        assert!(!h.component().is_open());
    }

    #[test]
    fn proxy_forwards_focus_to_input() {
        let mut h = harness();
        h.send(Message::MoveFocus(Some(Surface::Proxy)));
        assert!(h.component().is_open());
        h.advance(ms(19));
        assert_eq!(h.component().focused_surface(), Some(Surface::Proxy));
        h.advance(ms(1));
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
        h.advance(ms(50));
        assert!(h.component().is_open());
    }

    #[test]
    fn proxy_hand_off_is_dropped_once_focus_left() {
        let mut h = harness();
        h.send(Message::MoveFocus(Some(Surface::Proxy)));
        h.send(Message::MoveFocus(None));
        h.advance(ms(50));
        assert_eq!(h.component().focused_surface(), None);
        assert!(!h.component().is_open());
    }

    #[test]
    fn clicking_the_proxy_opens_and_focuses_input() {
        let mut h = harness();
        h.render(30, 12, Rect::new(0, 0, 30, 3));
        h.send(click(5, 1));
        assert!(h.component().is_open());
        h.advance(ms(20));
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
    }

    #[test]
    fn escape_dismisses_without_committing() {
        let mut h = focused_input();
        h.send(key(KeyCode::Esc));
        assert!(!h.component().is_open());
        assert!(selections(&h).is_empty());
    }

    #[test]
    fn committed_highlight_keeps_its_filter() {
        let mut h = focused_input();
        type_text(&mut h, "nn");
        h.advance(ms(100));
        h.send(key(KeyCode::Enter));

        h.send(key(KeyCode::Backspace));
        h.send(key(KeyCode::Backspace));
        type_text(&mut h, "Sue");
        h.advance(ms(100));

        let span = h.component().committed_highlight().unwrap();
        assert_eq!((span.pre, span.matched, span.post), ("Be", "nn", "y"));
    }

    #[test]
    fn filter_change_resets_the_pointer() {
        let mut h = focused_input();
        h.send(key(KeyCode::Down));
        h.send(key(KeyCode::End));
        assert_eq!(h.component().pointed().map(|o| o.id.as_str()), Some("SB"));

        h.send(key(KeyCode::BackTab));
        assert_eq!(h.component().focused_surface(), Some(Surface::Input));
        type_text(&mut h, "b");
        h.advance(ms(100));
        assert_eq!(h.component().pointed().map(|o| o.id.as_str()), Some("BP"));
    }

    #[test]
    fn paste_is_a_keystroke() {
        let mut h = focused_input();
        h.send(Message::Paste("sue".into()));
        h.advance(ms(100));
        assert_eq!(texts(h.component()), ["Sue"]);
    }

    #[test]
    fn set_input_value_goes_through_debounce() {
        let mut h = harness();
        let cmd = h.component_mut().set_input_value("Benny");
        assert!(cmd.into_deferred().is_some());
        assert_eq!(h.component().input_value(), "Benny");
    }

    #[test]
    fn reset_returns_to_defaults() {
        let mut h = focused_input();
        type_text(&mut h, "Sue");
        h.advance(ms(100));
        h.send(key(KeyCode::Enter));

        h.component_mut().reset();
        let select = h.component();
        assert_eq!(select.filter_text(), "");
        assert_eq!(select.input_value(), "");
        assert!(!select.is_open());
        assert!(!select.focused());
        assert!(select.committed_text().is_none());
    }

    #[test]
    fn stale_debounce_after_reset_is_ignored() {
        let mut h = focused_input();
        type_text(&mut h, "Sue");
        h.component_mut().reset();
        h.advance(ms(100));
        assert_eq!(h.component().filter_text(), "");
    }

    #[test]
    fn duplicate_ids_resolve_to_the_last() {
        let select = FilterSelect::new(vec![
            SelectOption::new("Tony", "TB"),
            SelectOption::new("Tina", "TB"),
        ]);
        assert_eq!(select.option_by_id("TB").map(|o| o.text.as_str()), Some("Tina"));
        assert!(select.option_by_id("nope").is_none());
    }

    #[test]
    fn selected_fed_back_is_a_noop() {
        let mut select = FilterSelect::new(people());
        let cmd = select.update(Message::Selected(SelectionResult {
            text: "Ben".into(),
            id: "BP".into(),
        }));
        assert!(cmd.is_none());
    }

    #[test]
    fn renders_placeholder_when_closed() {
        let h = harness();
        let screen = h.render_string(30, 3);
        assert!(screen.contains("Pick one"));
    }

    #[test]
    fn renders_dropdown_with_pointer() {
        let mut h = focused_input();
        type_text(&mut h, "Ben");
        h.advance(ms(100));
        let buf = h.render(30, 10, Rect::new(0, 0, 30, 3));
        let row = |y: u16| -> String { (0..30).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(1).contains("› Ben"));
        assert!(row(4).contains("▸ Ben"));
        assert!(row(5).contains("  Benny"));
        assert!(!row(6).contains("Sue"));
    }

    #[test]
    fn renders_committed_value_in_proxy() {
        let mut h = focused_input();
        type_text(&mut h, "Sue");
        h.advance(ms(100));
        h.send(key(KeyCode::Enter));
        h.send(Message::MoveFocus(None));
        h.advance(ms(10));
        let screen = h.render_string(30, 3);
        assert!(screen.contains("Sue"));
        assert!(!screen.contains("Pick one"));
    }

    #[test]
    fn dropdown_height_saturates_with_huge_option_sets() {
        let options = (0..70_000)
            .map(|i| SelectOption::new(format!("option {i}"), i.to_string()))
            .collect();
        let config = FilterSelectConfig {
            max_visible: usize::MAX,
            ..FilterSelectConfig::default()
        };
        let mut h = ComponentHarness::new(FilterSelect::new(options).with_config(config));
        h.send(Message::MoveFocus(Some(Surface::Input)));
        let buf = h.render(30, 12, Rect::new(0, 0, 30, 3));
        let row = |y: u16| -> String { (0..30).map(|x| buf[(x, y)].symbol()).collect() };
        assert!(row(4).contains("▸ option 0"));
        assert!(row(10).contains("option 6"));
    }

    #[test]
    fn long_rows_are_truncated_with_ellipsis() {
        let line = Line::from("Tim is the greatest coder of all time");
        let cut = truncate_line(line, 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.to_string().ends_with('…'));
    }

    #[test]
    fn scroll_keeps_pointer_visible() {
        assert_eq!(scroll_offset(0, 3), 0);
        assert_eq!(scroll_offset(2, 3), 0);
        assert_eq!(scroll_offset(5, 3), 3);
    }

    struct Host {
        picker: FilterSelect,
        picked: Vec<SelectionResult>,
    }

    enum HostMsg {
        Picker(Message),
    }

    impl Model for Host {
        type Message = HostMsg;
        type Flags = ();

        fn init(_: ()) -> (Self, Command<HostMsg>) {
            let mut picker = FilterSelect::new(people());
            let focus = picker.focus().map(HostMsg::Picker);
            (
                Host {
                    picker,
                    picked: Vec::new(),
                },
                focus,
            )
        }

        fn update(&mut self, msg: HostMsg) -> Command<HostMsg> {
            match msg {
                HostMsg::Picker(Message::Selected(result)) => {
                    self.picked.push(result);
                    Command::none()
                }
                HostMsg::Picker(m) => self.picker.update(m).map(HostMsg::Picker),
            }
        }

        fn view(&self, frame: &mut Frame) {
            self.picker.view(frame, frame.area());
        }
    }

    #[test]
    fn host_receives_one_selection_through_mapped_commands() {
        let mut app = TestProgram::<Host>::new(());
        assert_eq!(app.model().picker.focused_surface(), Some(Surface::Input));
        for c in "sue".chars() {
            app.send(HostMsg::Picker(key(KeyCode::Char(c))));
        }
        assert_eq!(app.pending_timers(), 3);
        app.advance(ms(100));
        app.send(HostMsg::Picker(key(KeyCode::Enter)));
        app.advance(ms(100));
        assert_eq!(
            app.model().picked,
            [SelectionResult {
                text: "Sue".into(),
                id: "SB".into()
            }]
        );
    }
}
