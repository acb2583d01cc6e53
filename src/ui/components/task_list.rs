use crate::app::AppState;
use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

pub fn render(f: &mut Frame, state: &mut AppState, area: Rect) {
    let now = Local::now().naive_local();

    let items: Vec<ListItem> = state
        .visible_tasks()
        .iter()
        .map(|task| {
            let checkbox = if task.completed { "[x] " } else { "[ ] " };

            let text_style = if task.completed {
                Style::default()
                    .fg(state.theme.completed)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(state.theme.foreground)
            };

            let mut spans = vec![
                Span::styled(checkbox, Style::default().fg(state.theme.foreground)),
                Span::styled(task.text.clone(), text_style),
            ];

            if let Some(date) = &task.user_date {
                let overdue = !task.completed
                    && task.due_instant().map(|due| due < now).unwrap_or(false);
                let date_style = if overdue {
                    Style::default().fg(state.theme.overdue)
                } else {
                    Style::default().fg(state.theme.due_date)
                };
                spans.push(Span::raw("  "));
                spans.push(Span::styled(format!("⏰ {date}"), date_style));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Tasks ({}) ", state.filter);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    if state.visible_tasks().is_empty() {
        state.list_state.select(None);
    } else {
        state.list_state.select(Some(state.cursor_position));
    }

    f.render_stateful_widget(list, area, &mut state.list_state);
}
