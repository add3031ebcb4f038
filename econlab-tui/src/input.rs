//! Keyboard input dispatch — global keys, then view-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, View};

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(view) = View::from_index(c as usize - '1' as usize) {
                app.set_view(view);
            }
            return;
        }
        KeyCode::Char('?') => {
            app.set_view(View::Help);
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.set_view(app.view.prev());
            } else {
                app.set_view(app.view.next());
            }
            return;
        }
        KeyCode::BackTab => {
            app.set_view(app.view.prev());
            return;
        }
        KeyCode::Char('p') => {
            app.cycle_period(true);
            return;
        }
        KeyCode::Char('P') => {
            app.cycle_period(false);
            return;
        }
        KeyCode::Char('f') => {
            app.toggle_forecast();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('x') => {
            app.export();
            return;
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(isize::MIN),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_app;
    use crossterm::event::KeyEventState;
    use econlab_core::analytics::TimePeriod;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn number_keys_switch_views() {
        let (_tmp, mut app) = sample_app();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.view, View::Correlation);
        handle_key(&mut app, press(KeyCode::Char('5')));
        assert_eq!(app.view, View::Help);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.view, View::Main);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.view, View::Help);
    }

    #[test]
    fn release_events_are_ignored() {
        let (_tmp, mut app) = sample_app();
        let release = KeyEvent {
            code: KeyCode::Char('2'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert_eq!(app.view, View::Main);
    }

    #[test]
    fn period_and_forecast_keys() {
        let (_tmp, mut app) = sample_app();
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert_eq!(app.period, TimePeriod::Last24Months);
        handle_key(&mut app, press(KeyCode::Char('P')));
        handle_key(&mut app, press(KeyCode::Char('P')));
        assert_eq!(app.period, TimePeriod::Last6Months);
        handle_key(&mut app, press(KeyCode::Char('f')));
        assert!(!app.show_forecast);
    }

    #[test]
    fn navigation_keys_move_cursor() {
        let (_tmp, mut app) = sample_app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.main_cursor, 2);
        handle_key(&mut app, press(KeyCode::Char('k')));
        assert_eq!(app.main_cursor, 1);
        handle_key(&mut app, press(KeyCode::Home));
        assert_eq!(app.main_cursor, 0);
    }

    #[test]
    fn quit_keys() {
        let (_tmp, mut app) = sample_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);

        let (_tmp, mut app) = sample_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
