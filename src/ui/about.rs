use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TEAM: [&str; 5] = [
    "Avula Sri Sai Koushik | AP22110011645",
    "Ch Hima Varshini | AP22110011571",
    "B Ganesh Naik | AP22110011598",
    "M Pramod | AP22110011271",
    "K Durga Prasad | AP22110011460",
];

pub fn draw_about(f: &mut Frame, area: Rect) {
    let mut text = Text::default();
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        "Meet the team behind the Quiz Application:",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    text.push_line(Line::from(""));
    for member in TEAM {
        text.push_line(Line::from(member));
    }
    text.push_line(Line::from(""));
    text.push_line(Line::from(Span::styled(
        concat!("quiz-terminal v", env!("CARGO_PKG_VERSION")),
        Style::default().fg(Color::DarkGray),
    )));

    let about = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("About Us"));
    f.render_widget(about, area);
}
