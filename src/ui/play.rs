use crate::app::{App, BankStatus};
use crate::session::{OptionMark, QuizSession};
use crate::ui::draw_confirmation;
use crate::ui::layout::calculate_play_chunks;
use crate::utils::key_hint;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const OPTION_KEYS: [&str; 4] = ["1", "2", "3", "4"];

pub fn draw_play(f: &mut Frame, area: Rect, app: &App) {
    if let Some(results) = app.session.results() {
        draw_results(f, area, &results.to_string());
    } else if app.session.is_running() {
        draw_question(f, area, &app.session);
        if app.confirm_abandon {
            draw_confirmation(f, area, "Quit Quiz", "Abandon this quiz?", "No (Continue Quiz)");
        }
    } else {
        draw_start(f, area, app);
    }
}

fn draw_start(f: &mut Frame, area: Rect, app: &App) {
    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Are you ready?",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));

    match &app.bank_status {
        _ if app.can_start() => {
            text.push_line(Line::from(format!("{} questions", app.bank.len())));
            text.push_line(Line::from(""));
            text.push_line(Line::from(Vec::from(key_hint("Enter", " Start Quiz"))));
        }
        BankStatus::Loading => {
            text.push_line(Line::from(Span::styled(
                "Loading questions...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        BankStatus::Failed(error) => {
            text.push_line(Line::from(Span::styled(
                format!("Could not load questions: {}", error),
                Style::default().fg(Color::Red),
            )));
            text.push_line(Line::from("Press r in Manage Questions to retry"));
        }
        BankStatus::Loaded => {
            text.push_line(Line::from(Span::styled(
                "Add Questions First",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let start = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(start, area);
}

fn draw_question(f: &mut Frame, area: Rect, session: &QuizSession) {
    let Some(question) = session.current_question() else {
        return;
    };
    let layout = calculate_play_chunks(area);
    let index = session.question_index().unwrap_or(0);

    let timer_style = if session.reveal_answer() {
        Style::default().fg(Color::DarkGray)
    } else if session.time_remaining() <= 3 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Question {} of {}", index + 1, session.total()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from("    "),
        Span::styled(format!("Time Left: {}s", session.time_remaining()), timer_style),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let question_text = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_text, layout.question_area);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match session.mark_for(option) {
                OptionMark::Plain => Style::default(),
                OptionMark::Correct => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                OptionMark::Incorrect => Style::default().fg(Color::Red),
            };
            let marker = if session.selected_option() == Some(option.id) {
                ">"
            } else {
                " "
            };
            let key = OPTION_KEYS.get(i).copied().unwrap_or(" ");
            ListItem::new(format!("{} [{}] {}", marker, key, option.text)).style(style)
        })
        .collect();
    let options = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
    f.render_widget(options, layout.options_area);

    let mut spans = Vec::new();
    if !session.reveal_answer() {
        spans.extend(key_hint("1-4", " Answer  "));
    }
    spans.extend(key_hint("Esc", " Quit Quiz  "));
    spans.extend(key_hint("F1-F3", " Switch Tab"));
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_results(f: &mut Frame, area: Rect, summary: &str) {
    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Quiz Results",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        summary.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    text.push_line(Line::from(Vec::from(key_hint("Enter", " Restart Quiz"))));

    let results = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(results, area);
}
