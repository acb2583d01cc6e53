use crate::app::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const HELP_LINES: &[(&str, &str)] = &[
    ("j / k, arrows", "move cursor"),
    ("g / G", "jump to top / bottom"),
    ("a or i", "add task"),
    ("e or Enter", "edit task (text and due date)"),
    ("space or x", "toggle completed"),
    ("d", "delete task (asks first)"),
    ("C", "clear all completed tasks"),
    ("f or Tab", "cycle filter"),
    ("1 / 2 / 3", "filter: all / active / completed"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (keys, action) in HELP_LINES {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {keys:<16}"),
                Style::default().fg(state.theme.due_date),
            ),
            Span::raw(*action),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(
        "  Dates like 25/12/2025 6:30 PM in a task are picked up",
    ));
    lines.push(Line::from(
        "  automatically and remind you when the time comes.",
    ));

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
