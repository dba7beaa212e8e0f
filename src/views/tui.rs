use std::io;
use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Layout, Constraint, Direction},
    style::{Style, Color, Modifier},
    Terminal, Frame,
    text::Line,
    prelude::Span,
};
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    event::{DisableMouseCapture, EnableMouseCapture},
};

use crate::models::{OrderMode, Post};
use crate::views::widgets::StatefulList;

pub const PREVIEW_CHARS: usize = 120;

/// What the status bar shows under the feed.
pub struct StatusLine<'a> {
    pub query: &'a str,
    pub order: OrderMode,
    pub typing: bool,
    pub message: Option<&'a str>,
}

impl StatusLine<'_> {
    pub fn text(&self) -> String {
        let cursor = if self.typing { "_" } else { "" };
        let mut text = format!("filter: {}{}  order: {}", self.query, cursor, self.order);
        if let Some(message) = self.message {
            text.push_str("  | ");
            text.push_str(message);
        }
        text
    }
}

pub fn setup_terminal() -> io::Result<Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

/// Lines for one post in the feed.
pub fn post_lines(post: &Post) -> Vec<Line<'static>> {
    let header = Line::from(vec![Span::styled(
        format!("{} posted {}", post.author_name(), post.created_display()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )]);
    let title = Line::from(Span::styled(
        post.title_or_empty().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![header, title];
    if let Some(media) = &post.media {
        lines.push(Line::from(Span::styled(
            format!("[image] {}", media.url),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(post.body_preview(PREVIEW_CHARS)));
    lines.push(Line::from(""));
    lines
}

pub fn render_ui<B: ratatui::backend::Backend>(
    f: &mut Frame<B>,
    stateful_list: &mut StatefulList<Post>,
    title: &str,
    status: &str,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let items: Vec<ListItem> = if stateful_list.items.is_empty() {
        vec![ListItem::new("No posts found!")]
    } else {
        stateful_list
            .items
            .iter()
            .map(|post| ListItem::new(post_lines(post)))
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Gray)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        );

    f.render_stateful_widget(list, chunks[0], &mut stateful_list.state);

    let bar = Paragraph::new(status.to_string())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(bar, chunks[1]);
}
