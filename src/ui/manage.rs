use crate::app::{App, BankStatus};
use crate::editor::{Draft, DraftField, DraftOrigin};
use crate::ui::layout::calculate_manage_chunks;
use crate::utils::{key_hint, truncate_string};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw_manage(f: &mut Frame, area: Rect, app: &App) {
    let layout = calculate_manage_chunks(area);

    match app.editor.draft() {
        Some(draft) => draw_form(f, layout.form_area, draft),
        None => {
            let hint = Paragraph::new(Line::from(Vec::from(key_hint("a", " Add New Question"))))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Question Form"));
            f.render_widget(hint, layout.form_area);
        }
    }

    draw_question_list(f, layout.list_area, app);

    let mut spans = Vec::new();
    if app.editor.is_editing() {
        spans.extend(key_hint("Tab/↑↓", " Field  "));
        spans.extend(key_hint("Enter", " Mark Correct  "));
        spans.extend(key_hint("Ctrl+S", " Save  "));
        spans.extend(key_hint("Esc", " Cancel"));
    } else {
        spans.extend(key_hint("↑/↓", " Navigate  "));
        spans.extend(key_hint("a", " Add  "));
        spans.extend(key_hint("e", " Edit  "));
        spans.extend(key_hint("d", " Delete  "));
        spans.extend(key_hint("r", " Reload"));
    }
    let help = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

fn draw_form(f: &mut Frame, area: Rect, draft: &Draft) {
    let mut title = match draft.origin {
        DraftOrigin::New => "Add New Question",
        DraftOrigin::Existing(_) => "Edit Quiz",
    }
    .to_string();
    if draft.submitted {
        title.push_str(" (saving...)");
    }
    let focused = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut text = Text::default();
    let question_style = if draft.focus == DraftField::Text {
        focused
    } else {
        Style::default()
    };
    text.push_line(Line::from(vec![
        Span::styled("Question: ", question_style),
        Span::from(placeholder(&draft.text, "Quiz Question")),
    ]));

    for (i, option) in draft.options.iter().enumerate() {
        let style = if draft.focus == DraftField::Option(i) {
            focused
        } else {
            Style::default()
        };
        let radio = if option.is_correct { "(•)" } else { "( )" };
        text.push_line(Line::from(vec![
            Span::styled(format!("{} Option {}: ", radio, i + 1), style),
            Span::from(placeholder(&option.text, "")),
        ]));
    }

    let form = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(form, area);
}

fn draw_question_list(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = if app.bank.is_empty() {
        let message = match &app.bank_status {
            BankStatus::Loading => "Loading...",
            BankStatus::Failed(_) => "Could not reach the question store",
            BankStatus::Loaded => "No questions yet",
        };
        vec![ListItem::new(message).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        app.bank
            .iter()
            .enumerate()
            .map(|(i, question)| {
                let flag = if question.validate().is_err() { "! " } else { "" };
                let label = truncate_string(&format!("{}{}", flag, question.text), width);
                let style = if i == app.selected_question && !app.editor.is_editing() {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if !flag.is_empty() {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                ListItem::new(label).style(style)
            })
            .collect()
    };

    let title = if app.pending_requests() > 0 {
        "All Questions (syncing...)"
    } else {
        "All Questions"
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn placeholder<'a>(value: &'a str, empty: &'a str) -> &'a str {
    if value.is_empty() { empty } else { value }
}
