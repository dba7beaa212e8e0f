use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Terminal;

use crate::error::PostameError;
use crate::models::{filter_and_sort, OrderMode, Post, Session, SocialClient};
use crate::views::tui::{self, StatusLine};
use crate::views::StatefulList;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Refresh,
    Delete(u64),
}

/// Feed view state. Owns the last fetched collection; the visible list is
/// always recomputed from it.
pub struct FeedState {
    posts: Vec<Post>,
    pub query: String,
    pub order: OrderMode,
    pub typing: bool,
    pub message: Option<String>,
    user: Option<String>,
    pub list: StatefulList<Post>,
}

impl FeedState {
    pub fn new(query: String, order: OrderMode, user: Option<String>) -> Self {
        Self {
            posts: vec![],
            query,
            order,
            typing: false,
            message: None,
            user,
            list: StatefulList::with_items(vec![]),
        }
    }

    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        let view = filter_and_sort(&self.posts, &self.query, self.order);
        self.list.replace_items(view);
    }

    pub fn visible(&self) -> &[Post] {
        &self.list.items
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        if self.typing {
            match code {
                KeyCode::Enter | KeyCode::Esc => self.typing = false,
                KeyCode::Backspace => {
                    self.query.pop();
                    self.refresh_view();
                }
                KeyCode::Char(c) => {
                    self.query.push(c);
                    self.refresh_view();
                }
                _ => {}
            }
            return Action::None;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => self.list.next(),
            KeyCode::Up | KeyCode::Char('k') => self.list.previous(),
            KeyCode::Char('g') => self.list.first(),
            KeyCode::Char('G') => self.list.last(),
            KeyCode::Char('/') => self.typing = true,
            KeyCode::Char('o') => {
                self.order = self.order.cycle();
                self.refresh_view();
            }
            KeyCode::Char('r') => return Action::Refresh,
            KeyCode::Char('d') => return self.delete_selected(),
            _ => {}
        }
        Action::None
    }

    fn delete_selected(&mut self) -> Action {
        let Some(post) = self.list.selected() else {
            return Action::None;
        };
        let owned = match (&self.user, &post.author) {
            (Some(user), Some(author)) => *user == author.name,
            _ => false,
        };
        if owned {
            Action::Delete(post.id)
        } else {
            self.message = Some("You can only delete your own posts.".to_string());
            Action::None
        }
    }

    pub fn remove_post(&mut self, id: u64) {
        self.posts.retain(|post| post.id != id);
        self.refresh_view();
    }

    fn status(&self) -> StatusLine<'_> {
        StatusLine {
            query: &self.query,
            order: self.order,
            typing: self.typing,
            message: self.message.as_deref(),
        }
    }
}

pub async fn start_app(
    client: SocialClient,
    session: Session,
    query: String,
    order: OrderMode,
) -> Result<(), PostameError> {
    let mut state = FeedState::new(query, order, Some(session.profile.name.clone()));
    let posts = client.list_posts().await?;
    state.set_posts(posts);

    let mut terminal = tui::setup_terminal().map_err(|e| PostameError::Terminal(e.to_string()))?;

    let res = run_app(&mut terminal, &mut state, &client).await;

    tui::restore_terminal(&mut terminal).map_err(|e| PostameError::Terminal(e.to_string()))?;

    res
}

pub async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut FeedState,
    client: &SocialClient,
) -> Result<(), PostameError> {
    loop {
        draw(terminal, state, "Feed")?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.handle_key(key.code) {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Refresh => {
                draw(terminal, state, "Refreshing...")?;
                match client.list_posts().await {
                    Ok(posts) => {
                        state.message = None;
                        state.set_posts(posts);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "refresh failed");
                        state.message = Some(e.user_message());
                    }
                }
            }
            Action::Delete(id) => match client.delete_post(id).await {
                Ok(()) => {
                    state.message = Some(format!("Deleted post #{}", id));
                    state.remove_post(id);
                }
                Err(e) => state.message = Some(e.user_message()),
            },
        }
    }
}

fn draw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    state: &mut FeedState,
    title: &str,
) -> Result<(), PostameError> {
    let status = state.status().text();
    terminal
        .draw(|f| tui::render_ui(f, &mut state.list, title, &status))
        .map_err(|e: io::Error| PostameError::Terminal(e.to_string()))?;
    Ok(())
}
