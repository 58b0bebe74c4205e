//! Tests for app key handling

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::config::{Config, EnterPolicy, SelectionDefault};
use crate::session::LineKind;
use crate::test_utils::test_helpers::{key, key_with_mods, local_app, type_text};

fn last_line(app: &crate::app::App) -> (LineKind, String) {
    let line = app.session().lines().last().expect("at least one line");
    (line.kind, line.content.clone())
}

#[test]
fn test_typing_updates_controller_and_suggestions() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "c");

    assert_eq!(app.input_text(), "c");
    assert_eq!(app.controller().suggestions(), ["cd", "cat", "clear", "cp"]);
    assert_eq!(app.controller().ghost_text(), "d");
}

#[test]
fn test_backspace_widens_suggestions_again() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "ca");
    assert_eq!(app.controller().suggestions(), ["cat"]);

    app.handle_key_event(key(KeyCode::Backspace));

    assert_eq!(app.input_text(), "c");
    assert_eq!(app.controller().suggestions().len(), 4);
}

#[test]
fn test_tab_accepts_and_moves_caret_to_end() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "wh");

    app.handle_key_event(key(KeyCode::Tab));

    assert_eq!(app.input_text(), "whoami");
    assert_eq!(app.cursor_col(), 6);
    assert!(app.controller().suggestions().is_empty());
}

#[test]
fn test_tab_without_suggestion_keeps_text() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "xyz");

    app.handle_key_event(key(KeyCode::Tab));

    assert_eq!(app.input_text(), "xyz");
}

#[test]
fn test_uppercase_input_accepts_catalogue_case() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "WHO");

    assert_eq!(app.controller().ghost_text(), "ami");
    app.handle_key_event(key(KeyCode::Tab));
    assert_eq!(app.input_text(), "whoami");
}

mod arrows {
    use super::*;

    #[test]
    fn test_right_mid_line_moves_caret_only() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "ca");
        app.handle_key_event(key(KeyCode::Left));
        assert_eq!(app.cursor_col(), 1);

        app.handle_key_event(key(KeyCode::Right));

        assert_eq!(app.input_text(), "ca");
        assert_eq!(app.cursor_col(), 2);
    }

    #[test]
    fn test_right_at_end_accepts_ghost() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "ca");

        app.handle_key_event(key(KeyCode::Right));

        assert_eq!(app.input_text(), "cat");
    }

    #[test]
    fn test_down_navigates_dropdown() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "c");

        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Down));

        assert_eq!(app.controller().selected_index(), Some(1));
        assert_eq!(app.controller().ghost_text(), "at");
        assert_eq!(app.input_text(), "c");
    }

    #[test]
    fn test_up_without_dropdown_recalls_history() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "whoami");
        app.handle_key_event(key(KeyCode::Esc));
        app.handle_key_event(key(KeyCode::Enter));
        type_text(&mut app, "echo hi");
        app.handle_key_event(key(KeyCode::Enter));

        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.input_text(), "echo hi");
        assert!(app.controller().suggestions().is_empty());

        app.handle_key_event(key(KeyCode::Up));
        assert_eq!(app.input_text(), "whoami");
        assert!(app.controller().suggestions().is_empty());

        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.input_text(), "");
    }
}

mod enter {
    use super::*;

    #[test]
    fn test_enter_submits_to_session() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "echo hello");

        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.input_text(), "");
        assert_eq!(app.cursor_col(), 0);
        assert_eq!(last_line(&app), (LineKind::Output, "hello".to_string()));
    }

    #[test]
    fn test_enter_on_empty_prompt_adds_nothing() {
        let mut app = local_app(&Config::default());
        let before = app.session().lines().len();

        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.session().lines().len(), before);
    }

    #[test]
    fn test_enter_accepts_navigated_selection_by_default() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "c");
        app.handle_key_event(key(KeyCode::Down));
        app.handle_key_event(key(KeyCode::Down));
        let before = app.session().lines().len();

        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.input_text(), "cat");
        assert_eq!(app.session().lines().len(), before);
    }

    #[test]
    fn test_accept_and_submit_policy() {
        let mut config = Config::default();
        config.suggest.enter = EnterPolicy::AcceptAndSubmit;
        let mut app = local_app(&config);
        type_text(&mut app, "who");
        app.handle_key_event(key(KeyCode::Down));

        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.input_text(), "");
        assert_eq!(last_line(&app), (LineKind::Output, "developer".to_string()));
    }

    #[test]
    fn test_first_selection_without_navigation_submits_raw() {
        let mut config = Config::default();
        config.suggest.selection = SelectionDefault::First;
        let mut app = local_app(&config);
        type_text(&mut app, "pw");

        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(last_line(&app), (LineKind::Error, "pw: command not found".to_string()));
    }

    #[test]
    fn test_ctrl_m_behaves_like_enter() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "whoami");
        app.handle_key_event(key(KeyCode::Esc));

        app.handle_key_event(key_with_mods(KeyCode::Char('m'), KeyModifiers::CONTROL));

        assert_eq!(last_line(&app), (LineKind::Output, "developer".to_string()));
    }
}

#[test]
fn test_escape_hides_dropdown_keeps_text() {
    let mut app = local_app(&Config::default());
    type_text(&mut app, "c");

    app.handle_key_event(key(KeyCode::Esc));

    assert_eq!(app.input_text(), "c");
    assert!(app.controller().suggestions().is_empty());
    assert_eq!(app.controller().ghost_text(), "");
}

#[test]
fn test_accept_separator_appends_space() {
    let mut config = Config::default();
    config.suggest.accept_separator = true;
    let mut app = local_app(&config);
    type_text(&mut app, "ech");

    app.handle_key_event(key(KeyCode::Tab));

    assert_eq!(app.input_text(), "echo ");
    assert_eq!(app.cursor_col(), 5);
}

mod global {
    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = local_app(&Config::default());
        assert!(!app.should_quit());

        app.handle_key_event(key_with_mods(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_l_clears_screen_not_input() {
        let mut app = local_app(&Config::default());
        type_text(&mut app, "ls");

        app.handle_key_event(key_with_mods(KeyCode::Char('l'), KeyModifiers::CONTROL));

        assert!(app.session().lines().is_empty());
        assert_eq!(app.input_text(), "ls");
    }
}
