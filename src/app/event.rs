use super::mode::Mode;
use super::state::AppState;
use crate::task::Filter;
use crate::utils::unicode::{next_char_boundary, prev_char_boundary};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> Result<()> {
    if state.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                state.show_help = false;
            }
            _ => {}
        }
        return Ok(());
    }

    match state.mode {
        Mode::Navigate => handle_navigate_mode(key, state),
        Mode::Insert => handle_insert_mode(key, state),
        Mode::Edit => handle_edit_mode(key, state),
        Mode::ConfirmDelete => handle_confirm_delete_mode(key, state),
        Mode::ConfirmClear => handle_confirm_clear_mode(key, state),
    }
    Ok(())
}

fn handle_navigate_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Char('?') => state.show_help = true,
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor_down(),
        KeyCode::Char('g') => state.move_cursor_top(),
        KeyCode::Char('G') => state.move_cursor_bottom(),
        KeyCode::Char('a') | KeyCode::Char('i') => {
            state.input_buffer.clear();
            state.input_cursor = 0;
            state.mode = Mode::Insert;
        }
        KeyCode::Char('e') | KeyCode::Enter => state.start_edit(),
        KeyCode::Char(' ') | KeyCode::Char('x') => state.toggle_selected(),
        KeyCode::Char('d') => {
            if state.selected_task().is_some() {
                state.mode = Mode::ConfirmDelete;
            }
        }
        KeyCode::Char('C') => {
            if state.tasks.iter().any(|t| t.completed) {
                state.mode = Mode::ConfirmClear;
            }
        }
        KeyCode::Tab | KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('1') => state.set_filter(Filter::All),
        KeyCode::Char('2') => state.set_filter(Filter::Active),
        KeyCode::Char('3') => state.set_filter(Filter::Completed),
        _ => {}
    }
}

fn handle_insert_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            state.input_buffer.clear();
            state.input_cursor = 0;
            state.mode = Mode::Navigate;
        }
        KeyCode::Enter => state.submit_input(),
        KeyCode::Char(c) => {
            state.input_buffer.insert(state.input_cursor, c);
            state.input_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if state.input_cursor > 0 {
                let prev = prev_char_boundary(&state.input_buffer, state.input_cursor);
                state.input_buffer.drain(prev..state.input_cursor);
                state.input_cursor = prev;
            }
        }
        KeyCode::Left => {
            state.input_cursor = prev_char_boundary(&state.input_buffer, state.input_cursor);
        }
        KeyCode::Right => {
            state.input_cursor = next_char_boundary(&state.input_buffer, state.input_cursor);
        }
        KeyCode::Home => state.input_cursor = 0,
        KeyCode::End => state.input_cursor = state.input_buffer.len(),
        _ => {}
    }
}

fn handle_edit_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Esc => state.cancel_edit(),
        KeyCode::Enter => state.commit_edit(),
        KeyCode::Char(c) => {
            state.edit_buffer.insert(state.edit_cursor, c);
            state.edit_cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if state.edit_cursor > 0 {
                let prev = prev_char_boundary(&state.edit_buffer, state.edit_cursor);
                state.edit_buffer.drain(prev..state.edit_cursor);
                state.edit_cursor = prev;
            }
        }
        KeyCode::Left => {
            state.edit_cursor = prev_char_boundary(&state.edit_buffer, state.edit_cursor);
        }
        KeyCode::Right => {
            state.edit_cursor = next_char_boundary(&state.edit_buffer, state.edit_cursor);
        }
        KeyCode::Home => state.edit_cursor = 0,
        KeyCode::End => state.edit_cursor = state.edit_buffer.len(),
        _ => {}
    }
}

fn handle_confirm_delete_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.delete_selected();
            state.mode = Mode::Navigate;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn handle_confirm_clear_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            state.clear_completed_tasks();
            state.mode = Mode::Navigate;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage;
    use crate::task::Task;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use rusqlite::Connection;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_state(texts: &[&str]) -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        storage::init_database(&conn).unwrap();
        for text in texts {
            storage::insert_task(&conn, &Task::new(text.to_string(), None)).unwrap();
        }
        let config = Config {
            desktop_notifications: false,
            sound: false,
            ..Config::default()
        };
        AppState::new(conn, &config, None).unwrap()
    }

    #[test]
    fn test_q_quits() {
        let mut state = test_state(&[]);
        handle_key_event(key(KeyCode::Char('q')), &mut state).unwrap();
        assert!(state.should_quit);
    }

    #[test]
    fn test_navigation_keys_move_cursor() {
        let mut state = test_state(&["a", "b", "c"]);
        handle_key_event(key(KeyCode::Char('j')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Char('j')), &mut state).unwrap();
        assert_eq!(state.cursor_position, 2);
        handle_key_event(key(KeyCode::Char('k')), &mut state).unwrap();
        assert_eq!(state.cursor_position, 1);
        handle_key_event(key(KeyCode::Char('g')), &mut state).unwrap();
        assert_eq!(state.cursor_position, 0);
        handle_key_event(key(KeyCode::Char('G')), &mut state).unwrap();
        assert_eq!(state.cursor_position, 2);
    }

    #[test]
    fn test_cursor_stops_at_list_end() {
        let mut state = test_state(&["only"]);
        handle_key_event(key(KeyCode::Char('j')), &mut state).unwrap();
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_insert_mode_typing_and_submit() {
        let mut state = test_state(&[]);
        handle_key_event(key(KeyCode::Char('a')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Insert);

        for c in "hi 1/2/2025".chars() {
            handle_key_event(key(KeyCode::Char(c)), &mut state).unwrap();
        }
        handle_key_event(key(KeyCode::Enter), &mut state).unwrap();

        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].text, "hi");
        assert_eq!(state.tasks[0].user_date.as_deref(), Some("1/2/2025"));
    }

    #[test]
    fn test_insert_mode_esc_discards() {
        let mut state = test_state(&[]);
        handle_key_event(key(KeyCode::Char('a')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Char('x')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Esc), &mut state).unwrap();

        assert_eq!(state.mode, Mode::Navigate);
        assert!(state.tasks.is_empty());
        assert!(state.input_buffer.is_empty());
    }

    #[test]
    fn test_backspace_respects_char_boundaries() {
        let mut state = test_state(&[]);
        handle_key_event(key(KeyCode::Char('a')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Char('é')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Backspace), &mut state).unwrap();
        assert_eq!(state.input_buffer, "");
        assert_eq!(state.input_cursor, 0);
    }

    #[test]
    fn test_space_toggles_completion() {
        let mut state = test_state(&["a"]);
        handle_key_event(key(KeyCode::Char(' ')), &mut state).unwrap();
        assert!(state.tasks[0].completed);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut state = test_state(&["a"]);
        handle_key_event(key(KeyCode::Char('d')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::ConfirmDelete);

        handle_key_event(key(KeyCode::Char('n')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Navigate);
        assert_eq!(state.tasks.len(), 1);

        handle_key_event(key(KeyCode::Char('d')), &mut state).unwrap();
        handle_key_event(key(KeyCode::Char('y')), &mut state).unwrap();
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_confirm_clear_completed() {
        let mut state = test_state(&["a", "b"]);
        handle_key_event(key(KeyCode::Char(' ')), &mut state).unwrap();

        handle_key_event(key(KeyCode::Char('C')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::ConfirmClear);
        handle_key_event(key(KeyCode::Enter), &mut state).unwrap();

        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_clear_with_nothing_completed_is_noop() {
        let mut state = test_state(&["a"]);
        handle_key_event(key(KeyCode::Char('C')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Navigate);
    }

    #[test]
    fn test_filter_keys() {
        let mut state = test_state(&["a"]);
        handle_key_event(key(KeyCode::Char('2')), &mut state).unwrap();
        assert_eq!(state.filter, Filter::Active);
        handle_key_event(key(KeyCode::Char('3')), &mut state).unwrap();
        assert_eq!(state.filter, Filter::Completed);
        handle_key_event(key(KeyCode::Char('1')), &mut state).unwrap();
        assert_eq!(state.filter, Filter::All);
        handle_key_event(key(KeyCode::Tab), &mut state).unwrap();
        assert_eq!(state.filter, Filter::Active);
    }

    #[test]
    fn test_help_overlay_swallows_keys() {
        let mut state = test_state(&["a"]);
        handle_key_event(key(KeyCode::Char('?')), &mut state).unwrap();
        assert!(state.show_help);

        handle_key_event(key(KeyCode::Char('d')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Navigate);

        handle_key_event(key(KeyCode::Esc), &mut state).unwrap();
        assert!(!state.show_help);
    }

    #[test]
    fn test_edit_flow() {
        let mut state = test_state(&["typo"]);
        handle_key_event(key(KeyCode::Char('e')), &mut state).unwrap();
        assert_eq!(state.mode, Mode::Edit);
        assert_eq!(state.edit_buffer, "typo");

        for _ in 0..4 {
            handle_key_event(key(KeyCode::Backspace), &mut state).unwrap();
        }
        for c in "fixed".chars() {
            handle_key_event(key(KeyCode::Char(c)), &mut state).unwrap();
        }
        handle_key_event(key(KeyCode::Enter), &mut state).unwrap();

        assert_eq!(state.tasks[0].text, "fixed");
    }
}
