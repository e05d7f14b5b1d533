//! Rendering for the terminal host.
//!
//! The host snapshots everything it wants on screen into a [`DemoView`]
//! each tick; [`render`] only reads that snapshot, so drawing never touches
//! the navigation stack.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::theme;
use crate::window::{Continuation, WindowHandle, WindowId};

/// One row of the stack pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRow {
    pub id: WindowId,
    pub title: String,
    pub is_base: bool,
    pub next: Option<String>,
}

impl StackRow {
    pub fn from_handle(handle: &WindowHandle) -> Self {
        Self {
            id: handle.id(),
            title: handle.title_or_default(),
            is_base: handle.is_base(),
            next: continuation_label(handle.continuation()),
        }
    }
}

pub fn continuation_label(continuation: &Continuation) -> Option<String> {
    match continuation {
        Continuation::None => None,
        Continuation::CloseThen(target) => Some(format!("then close {target}")),
        Continuation::OpenThen(pending) => Some(format!("then open {}", pending.handle.id())),
    }
}

#[derive(Debug, Clone, Default)]
pub struct DemoView {
    pub platform: String,
    /// Bottom to top.
    pub rows: Vec<StackRow>,
    pub cascade: Option<String>,
    pub stalled: bool,
    pub parked_closes: usize,
    pub anomalies: Vec<String>,
    pub log: Vec<String>,
    pub show_log: bool,
    /// `(keys, description)` rows; `Some` while the help overlay is open.
    pub help: Option<Vec<(String, String)>>,
    pub help_text: String,
    pub status: String,
}

pub fn render(frame: &mut Frame<'_>, view: &DemoView) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let [main, status] = split_vertical(area, Constraint::Length(1));
    let main = if view.show_log {
        let log_height = (main.height / 3).max(3);
        let [top, log] = split_vertical(main, Constraint::Length(log_height));
        render_log(frame, log, &view.log);
        top
    } else {
        main
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main);
    render_stack(frame, columns[0], view);
    let [screen, anomalies] = split_vertical(columns[1], Constraint::Length(7));
    render_top_screen(frame, screen, view);
    render_anomalies(frame, anomalies, &view.anomalies);
    render_status(frame, status, view);
    if let Some(entries) = &view.help {
        render_help(frame, area, entries, &view.help_text);
    }
}

fn split_vertical(area: Rect, bottom: Constraint) -> [Rect; 2] {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), bottom])
        .split(area);
    [parts[0], parts[1]]
}

fn render_stack(frame: &mut Frame<'_>, area: Rect, view: &DemoView) {
    let top = view.rows.len().saturating_sub(1);
    let items: Vec<ListItem> = view
        .rows
        .iter()
        .enumerate()
        .rev()
        .map(|(index, row)| {
            let style = if index == top {
                theme::top_window()
            } else if row.is_base {
                theme::base_window()
            } else {
                ratatui::style::Style::default()
            };
            let mut spans = vec![Span::styled(
                format!("{index:>2} {} {}", row.id, row.title),
                style,
            )];
            if row.is_base {
                spans.push(Span::styled(" [base]", theme::muted()));
            }
            if let Some(next) = &row.next {
                spans.push(Span::styled(format!("  {next}"), theme::continuation()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let title = format!(" Stack ({}) {} ", view.rows.len(), view.platform);
    let block = Block::default()
        .title(Span::styled(title, theme::title()))
        .borders(Borders::ALL);
    frame.render_widget(List::new(items).block(block), area);
}

fn render_top_screen(frame: &mut Frame<'_>, area: Rect, view: &DemoView) {
    let mut lines = Vec::new();
    match view.rows.last() {
        Some(row) => {
            lines.push(Line::from(Span::styled(row.title.clone(), theme::title())));
            lines.push(Line::from(Span::styled(row.id.to_string(), theme::muted())));
        }
        None => lines.push(Line::from("No screens open. Press o to open the base screen.")),
    }
    lines.push(Line::default());
    if let Some(cascade) = &view.cascade {
        let style = if view.stalled {
            theme::stalled()
        } else {
            theme::continuation()
        };
        let suffix = if view.stalled { " (stalled)" } else { "" };
        lines.push(Line::from(Span::styled(
            format!("cascade: {cascade}{suffix}"),
            style,
        )));
    }
    if view.parked_closes > 0 {
        lines.push(Line::from(format!(
            "{} close notification(s) parked, press c to deliver",
            view.parked_closes
        )));
    }
    let block = Block::default().title(" Top screen ").borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_anomalies(frame: &mut Frame<'_>, area: Rect, anomalies: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = anomalies.len().saturating_sub(visible);
    let lines: Vec<Line> = anomalies
        .iter()
        .skip(skip)
        .map(|a| Line::from(Span::styled(a.clone(), theme::anomaly())))
        .collect();
    let block = Block::default()
        .title(format!(" Anomalies ({}) ", anomalies.len()))
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(frame: &mut Frame<'_>, area: Rect, log: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log.iter().skip(skip).map(|l| Line::from(l.as_str())).collect();
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, view: &DemoView) {
    let text = format!(" {}  |  ? help  Ctrl+Q quit", view.status);
    frame.render_widget(Paragraph::new(text).style(theme::status_bar()), area);
}

fn render_help(frame: &mut Frame<'_>, area: Rect, entries: &[(String, String)], text: &str) {
    let rect = centered(area, 70, 80);
    let mut lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::default());
    for (keys, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("{keys:<16}"), theme::title()),
            Span::raw(description.clone()),
        ]));
    }
    let block = Block::default().title(" Help ").borders(Borders::ALL);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = area.width.saturating_mul(percent_x) / 100;
    let height = area.height.saturating_mul(percent_y) / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::OpenOptions;
    use crate::window::PendingOpen;
    use indoc::indoc;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(view: &DemoView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn row(raw: u64, title: &str, is_base: bool) -> StackRow {
        StackRow {
            id: WindowId::new(raw),
            title: title.to_string(),
            is_base,
            next: None,
        }
    }

    #[test]
    fn continuation_labels() {
        assert_eq!(continuation_label(&Continuation::None), None);
        assert_eq!(
            continuation_label(&Continuation::CloseThen(WindowId::new(2))).as_deref(),
            Some("then close window#2")
        );
        let pending = PendingOpen::new(WindowHandle::new(WindowId::new(9)), OpenOptions::new());
        assert_eq!(
            continuation_label(&Continuation::OpenThen(Box::new(pending))).as_deref(),
            Some("then open window#9")
        );
    }

    #[test]
    fn renders_stack_and_anomalies() {
        let view = DemoView {
            platform: "direct".to_string(),
            rows: vec![row(0, "Home", true), row(1, "Detail", false)],
            cascade: Some("back 1".to_string()),
            stalled: true,
            anomalies: vec!["window#4 closed but window#1 is on top".to_string()],
            status: "ready".to_string(),
            ..DemoView::default()
        };
        let text = screen_text(&view);
        assert!(text.contains("Stack (2) direct"));
        assert!(text.contains("[base]"));
        assert!(text.contains("Detail"));
        assert!(text.contains("(stalled)"));
        assert!(text.contains("Anomalies (1)"));
    }

    #[test]
    fn help_overlay_lists_bindings() {
        let view = DemoView {
            help: Some(vec![("Ctrl+Q".to_string(), "Quit".to_string())]),
            help_text: indoc! {"
                # Navigation stack demo

                Screens close one per step.
            "}
            .to_string(),
            ..DemoView::default()
        };
        let text = screen_text(&view);
        assert!(text.contains("# Navigation stack demo"));
        assert!(text.contains("Screens close one per step."));
        assert!(text.contains("Ctrl+Q"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        let view = DemoView {
            show_log: true,
            help: Some(Vec::new()),
            ..DemoView::default()
        };
        terminal.draw(|frame| render(frame, &view)).unwrap();
    }
}
