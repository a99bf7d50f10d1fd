pub mod layout;
mod about;
mod manage;
mod play;

pub use about::draw_about;
pub use layout::{calculate_app_chunks, calculate_manage_chunks, calculate_play_chunks};
pub use manage::draw_manage;
pub use play::draw_play;

use crate::app::App;
use crate::models::Tab;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

/// Renders the whole screen for the current state.
pub fn draw(f: &mut Frame, app: &App) {
    let layout = calculate_app_chunks(f.area());

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("F{} {}", i + 1, tab.title())))
        .collect();
    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quiz Application"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    f.render_widget(tabs, layout.tabs_area);

    match app.tab {
        Tab::Play => draw_play(f, layout.body_area, app),
        Tab::Manage => draw_manage(f, layout.body_area, app),
        Tab::About => draw_about(f, layout.body_area),
    }

    if app.confirm_quit {
        let message = if app.session.is_running() {
            "A quiz is still running. Quit?"
        } else {
            "Quit the application?"
        };
        draw_confirmation(f, layout.body_area, "Quit", message, "No");
    }

    let status = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.text.clone(),
            Style::default().fg(if notice.is_error {
                Color::Red
            } else {
                Color::Green
            }),
        )),
        None => Line::from(Span::styled(
            "Ctrl+C Exit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status), layout.status_area);
}

/// Yes/no popup centered over `area`.
pub(crate) fn draw_confirmation(f: &mut Frame, area: Rect, title: &str, message: &str, decline: &str) {
    let popup = centered(area, 44, 5);
    f.render_widget(Clear, popup);

    let spans = vec![
        Span::styled(
            "y",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(" Yes  "),
        Span::styled(
            "n",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::from(format!(" {}", decline)),
    ];

    let text = vec![Line::from(message.to_string()), Line::from(""), Line::from(spans)];
    let confirm = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(confirm, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}
