use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lupyd_markdown_engine::{Document, ElementType, MarkupParser, PatternCatalog};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::io::{Stdout, Write, stdout};

use crate::{settings::Settings, terminal_presenter::preview_lines};

/// Editor state: the buffer being typed and its latest parse.
struct App {
    buffer: String,
    catalog: PatternCatalog,
    settings: Settings,
    parsed: Result<Document, String>,
}

impl App {
    fn new(settings: Settings, initial: String) -> Self {
        let catalog = settings.catalog();
        let mut app = Self {
            buffer: initial,
            catalog,
            settings,
            parsed: Ok(Document::default()),
        };
        app.reparse();
        app
    }

    fn reparse(&mut self) {
        self.parsed = MarkupParser::new(&self.catalog)
            .with_options(self.settings.options)
            .parse(&self.buffer, ElementType::NORMAL)
            .map_err(|e| e.to_string());
    }

    /// Applies a key press; returns false once the editor should close.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Enter => self.insert('\n'),
            KeyCode::Tab => self.insert('\t'),
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    self.reparse();
                }
            }
            _ => {}
        }
        true
    }

    fn insert(&mut self, c: char) {
        if self.buffer.len() + c.len_utf8() > self.settings.max_input_bytes {
            log::warn!(
                "buffer is at the {} byte limit, ignoring input",
                self.settings.max_input_bytes
            );
            return;
        }
        self.buffer.push(c);
        self.reparse();
    }
}

/// Puts the terminal back when dropped, however `run` exits.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::warn!("failed to leave raw mode: {e}");
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, Show) {
            log::warn!("failed to restore the screen: {e}");
        }
    }
}

pub fn run(settings: Settings, initial: String) -> Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard { out: stdout() };

    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;

    let mut app = App::new(settings, initial);
    run_app(&mut terminal, &mut app)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    let editor = Paragraph::new(app.buffer.as_str())
        .block(Block::default().borders(Borders::ALL).title("Input"))
        .wrap(Wrap { trim: false });
    f.render_widget(editor, rows[0]);

    match &app.parsed {
        Ok(doc) => {
            let preview = Paragraph::new(preview_lines(doc))
                .block(Block::default().borders(Borders::ALL).title("Preview"))
                .wrap(Wrap { trim: false });
            f.render_widget(preview, panels[0]);

            let items: Vec<ListItem> = doc
                .iter()
                .map(|span| ListItem::new(Line::from(span.to_string())))
                .collect();
            let spans = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Spans ({})", doc.len())),
            );
            f.render_widget(spans, panels[1]);
        }
        Err(err) => {
            let error = Paragraph::new(err.as_str())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title("Parse error"));
            f.render_widget(error, rows[1]);
        }
    }

    let help = Line::from(vec![
        Span::raw("Esc: Quit | "),
        Span::raw("Enter: Newline | "),
        Span::raw(format!("{} bytes", app.buffer.len())),
    ]);
    f.render_widget(Paragraph::new(help), rows[2]);
}
