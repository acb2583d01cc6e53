pub mod help;
pub mod input_bar;
pub mod status_bar;
pub mod task_list;

use crate::app::AppState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub fn render(f: &mut Frame, state: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    task_list::render(f, state, chunks[0]);
    input_bar::render(f, state, chunks[1]);
    status_bar::render(f, state, chunks[2]);

    if state.show_help {
        help::render(f, state, f.area());
    }
}
