use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert => handle_insert(app, key),
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.store.tasks().len();
            if len > 0 && app.cursor < len - 1 {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            app.cursor = 0;
        }
        KeyCode::Char('G') => {
            app.cursor = app.store.tasks().len().saturating_sub(1);
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.cursor_task_id()
                && app.store.toggle(id)
            {
                app.commit();
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.cursor_task_id()
                && app.store.remove(id)
            {
                app.clamp_cursor();
                app.commit();
            }
        }
        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.mode = Mode::Insert;
            app.input.clear();
            app.input_cursor = 0;
        }
        _ => {}
    }
}

fn handle_insert(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
            app.input.clear();
            app.input_cursor = 0;
        }
        KeyCode::Enter => {
            // Whitespace-only input is rejected and the buffer kept,
            // so the user can edit rather than retype.
            if app.store.add(&app.input).is_some() {
                app.input.clear();
                app.input_cursor = 0;
                app.cursor = app.store.tasks().len() - 1;
                app.commit();
            }
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_char_boundary(&app.input, app.input_cursor) {
                app.input.remove(prev);
                app.input_cursor = prev;
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_char_boundary(&app.input, app.input_cursor) {
                app.input_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_char_boundary(&app.input, app.input_cursor) {
                app.input_cursor = next;
            }
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.input.len();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.input.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

/// Byte offset of the char boundary before `pos`, if any
fn prev_char_boundary(s: &str, pos: usize) -> Option<usize> {
    s[..pos].char_indices().next_back().map(|(i, _)| i)
}

/// Byte offset of the char boundary after `pos`, if any
fn next_char_boundary(s: &str, pos: usize) -> Option<usize> {
    s[pos..].chars().next().map(|c| pos + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::store::TaskListStore;

    fn app() -> App {
        App::new(TaskListStore::new(Box::new(MemoryStorage::new())))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c)));
        }
    }

    fn add_task(app: &mut App, text: &str) {
        handle_key(app, key(KeyCode::Char('a')));
        type_str(app, text);
        handle_key(app, key(KeyCode::Enter));
        handle_key(app, key(KeyCode::Esc));
    }

    #[test]
    fn typed_submit_adds_a_task_and_clears_the_buffer() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Insert);
        type_str(&mut app, "Buy milk");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].text, "Buy milk");
        assert_eq!(app.input, "");
        // still in insert mode, ready for the next task
        assert_eq!(app.mode, Mode::Insert);
    }

    #[test]
    fn whitespace_submit_is_rejected_and_keeps_the_buffer() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "   ");
        handle_key(&mut app, key(KeyCode::Enter));

        assert!(app.store.tasks().is_empty());
        assert_eq!(app.input, "   ");
        assert_eq!(app.mode, Mode::Insert);
    }

    #[test]
    fn esc_cancels_insert_and_clears_the_buffer() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('i')));
        type_str(&mut app, "half a tho");
        handle_key(&mut app, key(KeyCode::Esc));

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.input, "");
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn insert_edits_respect_char_boundaries() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_str(&mut app, "héllo");
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Left));
        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "hllo");
        type_str(&mut app, "e");
        assert_eq!(app.input, "hello");
    }

    #[test]
    fn space_toggles_the_task_under_the_cursor() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        app.cursor = 0;
        handle_key(&mut app, key(KeyCode::Char(' ')));

        assert!(app.store.tasks()[0].completed);
        assert!(!app.store.tasks()[1].completed);
        assert_eq!(app.store.open_count(), 1);
    }

    #[test]
    fn delete_removes_the_task_and_clamps_the_cursor() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        app.cursor = 1;
        handle_key(&mut app, key(KeyCode::Char('d')));

        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].text, "A");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn delete_on_empty_list_is_a_no_op() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert!(app.store.tasks().is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn navigation_stays_inside_the_list() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        app.cursor = 0;
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn submit_moves_the_cursor_to_the_new_task() {
        let mut app = app();
        add_task(&mut app, "A");
        add_task(&mut app, "B");
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn q_quits_from_navigate_only() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('i')));
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.input, "q");
        handle_key(&mut app, key(KeyCode::Esc));
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn mutations_persist_through_commit() {
        let mut app = app();
        add_task(&mut app, "A");
        assert!(app.save_error.is_none());
        // the saved value should survive a load
        app.store.load();
        assert_eq!(app.store.tasks().len(), 1);
        assert_eq!(app.store.tasks()[0].text, "A");
    }
}
