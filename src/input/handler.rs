use crossterm::event::{Event, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::console::{CaretMotion, Direction};

use super::Action;

pub fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => app.session.insert_str(&text),
        Event::Resize(_, _) => {
            // Resize is handled by the renderer
        }
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = app.keymap.lookup(&key) {
        run_action(app, action);
        return;
    }

    // Anything unbound that types a character goes into the entry
    if let crossterm::event::KeyCode::Char(c) = key.code {
        if !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            app.session.insert_char(c);
        }
    }
}

fn run_action(app: &mut App, action: Action) {
    match action {
        Action::Submit => {
            app.session.activate();
            // New output is at the bottom
            app.scroll = 0;
        }
        Action::Complete => app.session.complete(),

        Action::HistoryUp => app.session.move_history(Direction::Up),
        Action::HistoryDown => app.session.move_history(Direction::Down),

        Action::MoveLeft => app.session.move_caret(CaretMotion::Left),
        Action::MoveRight => app.session.move_caret(CaretMotion::Right),
        Action::MoveToLineStart => app.session.move_caret(CaretMotion::Home),
        Action::MoveToLineEnd => app.session.move_caret(CaretMotion::End),

        Action::DeleteBackward => app.session.delete_backward(),
        Action::DeleteForward => app.session.delete_forward(),

        Action::ClearTranscript => app.clear_transcript(),
        Action::ScrollUp => app.scroll_up(),
        Action::ScrollDown => app.scroll_down(),

        Action::PickObject => app.pick_next_object(),
        Action::Quit => app.quit(),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::config::Settings;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        handle_event(app, Event::Key(KeyEvent::new(code, modifiers)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    fn app() -> App {
        App::new(&Settings::default()).unwrap()
    }

    #[test]
    fn typing_and_enter_evaluates() {
        let mut app = app();
        type_text(&mut app, "6 * 7");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.transcript.lines(), vec!["» 6 * 7", "42"]);
        assert_eq!(app.session.entry().text(), "");
    }

    #[test]
    fn shifted_characters_are_inserted() {
        let mut app = app();
        press(&mut app, KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(app.session.entry().text(), "X");
    }

    #[test]
    fn control_characters_are_not_inserted() {
        let mut app = app();
        press(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
        assert_eq!(app.session.entry().text(), "");
    }

    #[test]
    fn editing_keys_reach_the_entry() {
        let mut app = app();
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Left, KeyModifiers::NONE);
        press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(app.session.entry().text(), "ac");
        assert_eq!(app.session.entry().caret(), 1);

        press(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(app.session.entry().text(), "c");
    }

    #[test]
    fn history_keys_recall_submissions() {
        let mut app = app();
        type_text(&mut app, "1");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        type_text(&mut app, "2");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        press(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.session.entry().text(), "2");
        press(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.session.entry().text(), "1");
        press(&mut app, KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.bell.take_pending(), 1);
    }

    #[test]
    fn tab_completes_a_single_candidate_in_the_entry() {
        let mut app = app();
        type_text(&mut app, "lark::con");
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);

        assert_eq!(app.session.entry().text(), "lark::console");
        assert!(app.completion.text().is_none());
    }

    #[test]
    fn tab_lists_candidates_and_types_their_common_prefix() {
        let mut app = app();
        type_text(&mut app, "lark::console::o");
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);

        assert_eq!(app.session.entry().text(), "lark::console::object");
        assert_eq!(
            app.completion.text().as_deref(),
            Some("object, object_type")
        );
    }

    #[test]
    fn paste_inserts_text() {
        let mut app = app();
        handle_event(&mut app, Event::Paste("let x = 1;".into()));
        assert_eq!(app.session.entry().text(), "let x = 1;");
    }

    #[test]
    fn ctrl_l_clears_and_ctrl_c_quits() {
        let mut app = app();
        type_text(&mut app, "1");
        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('l'), KeyModifiers::CONTROL);
        assert!(app.transcript.lines().is_empty());

        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.running);
    }

    #[test]
    fn ctrl_o_picks_an_object() {
        let mut app = app();
        press(&mut app, KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(app.session.object().unwrap().type_name(), "Settings");
    }
}
