//! Event Handling
//!
//! Keyboard and event handling for mdex.

use crate::app::{App, Mode};
use anyhow::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Handle events, returns true if app should quit
pub async fn handle_events(app: &mut App) -> Result<bool> {
    if poll(Duration::from_millis(100))? {
        if let Event::Key(key) = read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(false);
            }
            return handle_key_event(app, key.code, key.modifiers).await;
        }
    }
    Ok(false)
}

pub async fn handle_key_event(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Result<bool> {
    // Global quit shortcut
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, code, modifiers).await,
        Mode::Edit => handle_edit_mode(app, code, modifiers).await,
        Mode::Confirm => handle_confirm_mode(app, code).await,
        Mode::Warning | Mode::Help => handle_overlay_mode(app, code),
        Mode::Describe => handle_describe_mode(app, code),
        Mode::Notifications => handle_notifications_mode(app, code),
    }
}

async fn handle_normal_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    // Handle filter input first
    if app.filter_active {
        match code {
            KeyCode::Esc => {
                app.clear_filter();
            },
            KeyCode::Enter => {
                app.filter_active = false;
            },
            KeyCode::Backspace => {
                app.filter_text.pop();
                app.apply_filter();
            },
            KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                app.filter_text.push(c);
                app.apply_filter();
            },
            _ => {},
        }
        return Ok(false);
    }

    match code {
        KeyCode::Char('q') => return Ok(true),

        // Navigation - vim style + accessible alternatives
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Home | KeyCode::Char('g') => app.go_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.go_to_bottom(),
        KeyCode::PageDown => app.page_down(10),
        KeyCode::PageUp => app.page_up(10),
        KeyCode::Char('f') if modifiers.contains(KeyModifiers::CONTROL) => app.page_down(10),
        KeyCode::Char('b') if modifiers.contains(KeyModifiers::CONTROL) => app.page_up(10),

        // CRUD
        KeyCode::Char('n') => app.open_new(),
        KeyCode::Enter | KeyCode::Char('e') => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('R') => app.refresh().await,

        KeyCode::Char('v') => app.enter_describe_mode(),
        KeyCode::Char('/') => {
            app.filter_active = true;
        },
        KeyCode::Esc if !app.filter_text.is_empty() => app.clear_filter(),
        KeyCode::Esc => app.notification_manager.dismiss_toast(),
        KeyCode::Char('N') => app.enter_notifications_mode(),
        KeyCode::Char('?') => app.enter_help_mode(),

        _ => {},
    }

    Ok(false)
}

async fn handle_edit_mode(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
    match code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.save().await,
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.previous_field(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char('g') if modifiers.contains(KeyModifiers::CONTROL) => app.generate_data(),
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => app.clear_field(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.input_char(c),
        _ => {},
    }
    Ok(false)
}

async fn handle_confirm_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete().await,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            app.cancel_delete();
        },
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
            if let Some(ref mut pending) = app.pending_delete {
                pending.selected_yes = !pending.selected_yes;
            }
        },
        KeyCode::Enter => {
            let yes = app
                .pending_delete
                .as_ref()
                .map(|p| p.selected_yes)
                .unwrap_or(false);
            if yes {
                app.confirm_delete().await;
            } else {
                app.cancel_delete();
            }
        },
        _ => {},
    }
    Ok(false)
}

fn handle_overlay_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    if matches!(
        code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
    ) {
        app.close_overlay();
    }
    Ok(false)
}

fn handle_describe_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => {
            app.mode = Mode::Normal;
        },
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Home | KeyCode::Char('g') => app.describe_scroll = 0,
        _ => {},
    }
    Ok(false)
}

fn handle_notifications_mode(app: &mut App, code: KeyCode) -> Result<bool> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('N') => {
            app.mode = Mode::Normal;
        },
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Char('c') => {
            app.notification_manager.clear();
            app.notifications_selected = 0;
        },
        _ => {},
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::controller::CrudController;
    use crate::store::MemoryKeySwitchService;
    use std::sync::Arc;

    async fn app() -> App {
        let store = Arc::new(MemoryKeySwitchService::with_samples(3));
        let mut app = App::new(CrudController::new(store), Config::default(), false);
        app.initialize().await;
        app
    }

    async fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_event(app, code, KeyModifiers::NONE).await.unwrap()
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app().await;
        assert!(press(&mut app, KeyCode::Char('q')).await);
        assert!(
            handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_typing_in_edit_mode_does_not_quit() {
        let mut app = app().await;
        press(&mut app, KeyCode::Char('n')).await;
        assert_eq!(app.mode, Mode::Edit);

        assert!(!press(&mut app, KeyCode::Char('q')).await);
        assert_eq!(app.controller.selection().unwrap().name, "q");

        press(&mut app, KeyCode::Esc).await;
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.controller.selection().is_none());
    }

    #[tokio::test]
    async fn test_generate_then_save_with_keys() {
        let mut app = app().await;
        press(&mut app, KeyCode::Char('n')).await;
        handle_key_event(&mut app, KeyCode::Char('g'), KeyModifiers::CONTROL)
            .await
            .unwrap();
        press(&mut app, KeyCode::Enter).await;

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.filtered_items.len(), 4);
    }

    #[tokio::test]
    async fn test_confirm_defaults_to_no() {
        let mut app = app().await;
        press(&mut app, KeyCode::Char('d')).await;
        assert_eq!(app.mode, Mode::Confirm);

        press(&mut app, KeyCode::Enter).await;
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.filtered_items.len(), 3);

        press(&mut app, KeyCode::Char('d')).await;
        press(&mut app, KeyCode::Char('y')).await;
        assert_eq!(app.filtered_items.len(), 2);
    }

    #[tokio::test]
    async fn test_esc_dismisses_toast_but_keeps_history() {
        let mut app = app().await;
        press(&mut app, KeyCode::Char('n')).await;
        press(&mut app, KeyCode::Enter).await;
        assert!(app.notification_manager.current_toast().is_some());

        press(&mut app, KeyCode::Esc).await;
        assert!(app.notification_manager.current_toast().is_none());
        assert!(app.notification_manager.has_notifications());
    }

    #[tokio::test]
    async fn test_filter_typing() {
        let mut app = app().await;
        press(&mut app, KeyCode::Char('/')).await;
        assert!(app.filter_active);
        for c in "zzzz-no-match".chars() {
            press(&mut app, KeyCode::Char(c)).await;
        }
        assert!(app.filtered_items.is_empty());

        press(&mut app, KeyCode::Esc).await;
        assert!(!app.filter_active);
        assert_eq!(app.filtered_items.len(), 3);
    }
}
