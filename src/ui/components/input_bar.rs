use crate::app::mode::Mode;
use crate::app::AppState;
use crate::utils::unicode::width_before;
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    let (title, buffer, cursor) = match state.mode {
        Mode::Insert => (
            " New task (try: Buy milk 25/12/2025 6:30 PM) ",
            state.input_buffer.as_str(),
            Some(state.input_cursor),
        ),
        Mode::Edit => (
            " Edit task ",
            state.edit_buffer.as_str(),
            Some(state.edit_cursor),
        ),
        _ => (" Press a to add a task ", "", None),
    };

    let input = Paragraph::new(buffer)
        .style(Style::default().fg(state.theme.foreground))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    if let Some(cursor) = cursor {
        let x = area.x + 1 + width_before(buffer, cursor) as u16;
        let y = area.y + 1;
        f.set_cursor_position(Position::new(x.min(area.x + area.width.saturating_sub(2)), y));
    }
}
