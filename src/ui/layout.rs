use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub tabs_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
}

pub struct PlayLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    pub help_area: Rect,
}

pub struct ManageLayout {
    pub form_area: Rect,
    pub list_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_app_chunks(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    AppLayout {
        tabs_area: chunks[0],
        body_area: chunks[1],
        status_area: chunks[2],
    }
}

pub fn calculate_play_chunks(area: Rect) -> PlayLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(area);

    PlayLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        options_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_manage_chunks(area: Rect) -> ManageLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    ManageLayout {
        form_area: chunks[0],
        list_area: chunks[1],
        help_area: chunks[2],
    }
}
