use ratatui::style::{Color, Modifier, Style};

// Centralized colors for the terminal host.

pub fn accent() -> Color {
    Color::Rgb(255, 165, 0)
}

pub fn title() -> Style {
    Style::default().fg(accent()).add_modifier(Modifier::BOLD)
}

pub fn top_window() -> Style {
    Style::default().fg(Color::Black).bg(accent())
}

pub fn base_window() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn continuation() -> Style {
    Style::default().fg(Color::Yellow)
}

pub fn anomaly() -> Style {
    Style::default().fg(Color::LightRed)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn status_bar() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

pub fn stalled() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
