//! # Filter Select Example
//!
//! A person picker: focus lands on the proxy, which hands off to the filter
//! input. Type to narrow the list, Down to move into it, Enter or a click
//! to commit. The last committed choice is shown below the picker and
//! printed on exit.
//!
//! Logs go to `filter_select.log`; set `RUST_LOG=debug` to watch the
//! filter and dropdown state changes.
//!
//! Run with: `cargo run --example filter_select`

use sago::crossterm::event::{KeyCode, KeyModifiers};
use sago::ratatui::layout::{Constraint, Layout};
use sago::ratatui::style::{Color, Modifier, Style};
use sago::ratatui::text::{Line, Span};
use sago::ratatui::widgets::Paragraph;
use sago::ratatui::Frame;
use sago::widgets::filter_select::{
    self, FilterSelect, SelectOption, SelectionResult, Surface,
};
use sago::{Command, Component, Model, ProgramOptions, TerminalEvent};

const PEOPLE: &[(&str, &str)] = &[
    (
        "Tim is the greatest coder in the history of codingTim is the greatest coder in the \
         history of codingTim is the greatest coder in the history of codingTim is the \
         greatest coder in the history of coding",
        "TP",
    ),
    ("Ben", "BP"),
    ("Katie", "KP"),
    ("John", "JP"),
    ("Sue", "SP"),
    ("Sarah", "SR"),
    ("Claire", "CB"),
    ("Drew", "AM"),
    ("Molly", "MP"),
    ("Lucy", "LP"),
    ("Jess", "JP2"),
    ("George", "GP"),
    ("Daisy", "DM"),
    ("Benny", "BP2"),
];

struct PickerApp {
    picker: FilterSelect,
    last: Option<SelectionResult>,
}

#[derive(Debug)]
enum Msg {
    Picker(filter_select::Message),
    Quit,
}

impl Model for PickerApp {
    type Message = Msg;
    type Flags = ();

    fn init(_: ()) -> (Self, Command<Msg>) {
        let options = PEOPLE
            .iter()
            .map(|(text, id)| SelectOption::new(*text, *id))
            .collect();
        let mut picker = FilterSelect::new(options)
            .with_placeholder("Choose a person...")
            .with_title(" Person ");
        let cmd = picker
            .update(filter_select::Message::MoveFocus(Some(Surface::Proxy)))
            .map(Msg::Picker);
        (PickerApp { picker, last: None }, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Picker(filter_select::Message::Selected(result)) => {
                tracing::info!(id = %result.id, "picked");
                self.last = Some(result.clone());
                let ack = self.picker.update(filter_select::Message::Selected(result));
                let blur = self.picker.blur();
                Command::batch([ack, blur]).map(Msg::Picker)
            }
            Msg::Picker(m) => self.picker.update(m).map(Msg::Picker),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let [title_area, picker_area, _dropdown_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = Paragraph::new(Line::from(Span::styled(
            "People Picker",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(title, title_area);

        if let Some(ref result) = self.last {
            let status = Paragraph::new(Line::from(vec![
                Span::raw("Selected: "),
                Span::styled(
                    result.text.as_str(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", result.id),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            frame.render_widget(status, status_area);
        }

        let key_style = Style::default().fg(Color::DarkGray);
        let mut help: Vec<Span> = Vec::new();
        for binding in self.picker.keys().short_help() {
            help.push(Span::styled(binding.key_label(), key_style));
            help.push(Span::raw(format!(" {}  ", binding.description)));
        }
        help.push(Span::styled("Ctrl+C", key_style));
        help.push(Span::raw(" quit"));
        frame.render_widget(Paragraph::new(Line::from(help)), help_area);

        // Last, so the open dropdown draws over the status line.
        self.picker.view(frame, picker_area);
    }

    fn event(&self, event: TerminalEvent) -> Option<Msg> {
        match event {
            TerminalEvent::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Msg::Quit)
            }
            TerminalEvent::Key(_) if !self.picker.focused() => Some(Msg::Picker(
                filter_select::Message::MoveFocus(Some(Surface::Proxy)),
            )),
            TerminalEvent::Key(key) => Some(Msg::Picker(filter_select::Message::KeyPress(key))),
            TerminalEvent::Mouse(mouse) => Some(Msg::Picker(filter_select::Message::Mouse(mouse))),
            TerminalEvent::Paste(text) => Some(Msg::Picker(filter_select::Message::Paste(text))),
            _ => None,
        }
    }
}

#[sago::tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        mouse_capture: true,
        title: Some("filter select".into()),
        log_file: Some("filter_select.log".into()),
        ..ProgramOptions::default()
    };
    let app = sago::run_with::<PickerApp>((), options).await?;
    if let Some(result) = app.last {
        println!("{} ({})", result.text, result.id);
    }
    Ok(())
}
