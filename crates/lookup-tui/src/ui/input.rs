//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use lookup_core::models::SelectionMode;

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    // Handle fetch error popup
    if matches!(app.state, AppState::ShowingError) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.dismiss_error(),
            KeyCode::Char('u') => {
                app.dismiss_error();
                app.start_load();
            }
            _ => {}
        }
        return Ok(false);
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
        }
        KeyCode::Char('1') => app.set_mode(SelectionMode::Participant),
        KeyCode::Char('2') => app.set_mode(SelectionMode::Summary),
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = app.focus.toggle();
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next(1),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(1),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Enter => app.choose_highlighted(),
        KeyCode::Char('r') => app.submit(),
        KeyCode::Char('c') => {
            app.form.clear();
            app.status_message = None;
        }
        KeyCode::Char('u') => app.start_load(),
        KeyCode::Esc => {
            app.status_message = None;
        }
        _ => {}
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::app::{Focus, LoadResult};
    use lookup_core::api::{DataSource, ParticipantProvider};
    use lookup_core::models::ParticipantRecord;

    fn loaded_app() -> App {
        let provider = ParticipantProvider::new(
            DataSource::File(PathBuf::from("/nonexistent/participants.json")),
            Vec::new(),
        );
        let mut app = App::new(provider);
        app.process_load_result(LoadResult::Participants(vec![
            ParticipantRecord::new("Alice").with_level("Competency1", "A").with_score("Competency2", 85.0),
            ParticipantRecord::new("Bob").with_level("Competency1", "B").with_score("Competency2", 90.0),
        ]));
        app
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::from(code)).expect("input handling should not fail")
    }

    #[test]
    fn test_keyboard_summary_flow() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.competency(), Some("Competency2"));
        assert_eq!(app.focus, Focus::Secondary);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));

        let output = app.form.output().expect("output should be set");
        assert_eq!(output.text, "The highest score for Competency2 is 90");
    }

    #[test]
    fn test_keyboard_participant_flow() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));

        let output = app.form.output().expect("output should be set");
        assert_eq!(output.text, "Bob scored B on Competency1");
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Secondary);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Competencies);
    }

    #[test]
    fn test_clear_keeps_mode() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.form.mode(), SelectionMode::Summary);
        assert_eq!(app.form.competency(), None);
    }

    #[test]
    fn test_help_overlay() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.state, AppState::ShowingHelp);

        // Keys other than close are swallowed
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.form.mode(), SelectionMode::Participant);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Normal);
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = loaded_app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!press(&mut app, KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(press(&mut app, KeyCode::Char('y')));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_error_popup_dismissed() {
        let mut app = loaded_app();
        app.process_load_result(LoadResult::Error("Problem fetching the data: refused".to_string()));
        assert_eq!(app.state, AppState::ShowingError);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::ShowingError);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Normal);
    }
}
