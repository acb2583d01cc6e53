use crate::app::mode::Mode;
use crate::app::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, state: &AppState, area: Rect) {
    if state.mode == Mode::ConfirmDelete {
        render_prompt(f, state, area, " Delete this task? (Y/n) ");
        return;
    }
    if state.mode == Mode::ConfirmClear {
        render_prompt(f, state, area, " Clear all completed tasks? (Y/n) ");
        return;
    }

    // A live toast takes over the whole bar until it expires.
    if let Some((message, time)) = &state.status_message
        && time.elapsed().as_secs() <= state.toast_duration_secs
    {
        render_toast(f, state, message, area);
        return;
    }

    let mode_text = format!("{}", state.mode);
    let active = state.tasks.iter().filter(|t| !t.completed).count();
    let left_content = format!(
        " {} | {} | {} task{}, {} active",
        mode_text,
        state.filter,
        state.tasks.len(),
        if state.tasks.len() == 1 { "" } else { "s" },
        active
    );
    let nav_hint = "a add  e edit  space done  d del  f filter  ? help  q quit";
    let version_text = format!("v{VERSION}");

    let padding = area.width.saturating_sub(
        left_content.len() as u16 + nav_hint.len() as u16 + version_text.len() as u16 + 4,
    );

    let style = Style::default()
        .fg(state.theme.status_bar_fg)
        .bg(state.theme.status_bar_bg);

    let status_line = format!(
        "{} {} {:>padding$} {} ",
        left_content,
        nav_hint,
        "",
        version_text,
        padding = padding as usize
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}

fn render_prompt(f: &mut Frame, _state: &AppState, area: Rect, prompt: &str) {
    let style = Style::default()
        .fg(ratatui::style::Color::White)
        .bg(ratatui::style::Color::Rgb(180, 100, 0))
        .add_modifier(Modifier::BOLD);

    let padding = area.width.saturating_sub(prompt.len() as u16);
    let status_line = format!("{}{:padding$}", prompt, "", padding = padding as usize);

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}

fn render_toast(f: &mut Frame, state: &AppState, message: &str, area: Rect) {
    let display_message = format!(" {message} ");

    let style = Style::default()
        .fg(state.theme.toast_fg)
        .bg(state.theme.toast_bg)
        .add_modifier(Modifier::BOLD);

    let padding = area.width.saturating_sub(display_message.len() as u16);
    let status_line = format!(
        "{}{:padding$}",
        display_message,
        "",
        padding = padding as usize
    );

    let status = Paragraph::new(Line::from(vec![Span::styled(status_line, style)]));
    f.render_widget(status, area);
}
