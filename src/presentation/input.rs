use crate::application::{App, AppMode, Focus, SplitField, TextField};
use crate::infrastructure::BalanceReport;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => match app.focus {
                Focus::List => Self::handle_list(app, key, modifiers),
                Focus::AddForm => Self::handle_add_form(app, key, modifiers),
                Focus::SplitForm => Self::handle_split_form(app, key),
            },
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ExportReport => Self::handle_filename_input_mode(app, key),
        }
    }

    fn handle_list(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('e') {
            app.start_export();
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_cursor_selection(),
            KeyCode::Char('a') => app.toggle_add_form(),
            KeyCode::Tab => app.cycle_focus(),
            KeyCode::F(1) | KeyCode::Char('?') => app.open_help(),
            // 'q' is handled by the main loop
            _ => {}
        }
    }

    fn handle_add_form(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // Alt/Ctrl reach the friend list without leaving the form
        if modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
            match key {
                KeyCode::Up => app.move_cursor_up(),
                KeyCode::Down => app.move_cursor_down(),
                KeyCode::Enter => app.toggle_cursor_selection(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Enter => app.submit_add_form(),
            KeyCode::Esc => app.cancel_add_form(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.add_form.next_field();
            }
            key => {
                let field = app.add_form.focused_mut();
                Self::edit_text(field, key);
            }
        }
    }

    fn handle_split_form(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.submit_split_form(),
            KeyCode::Esc => app.leave_split_form(),
            KeyCode::Tab | KeyCode::Down => app.split_form.next_field(),
            KeyCode::Left | KeyCode::Right if app.split_form.focus == SplitField::Payer => {
                app.split_form.toggle_payer();
            }
            KeyCode::Char(c) => app.split_form.insert(c),
            KeyCode::Backspace => app.split_form.edit(TextField::backspace),
            KeyCode::Delete => app.split_form.edit(TextField::delete),
            KeyCode::Left => app.split_form.edit(TextField::move_left),
            KeyCode::Right => app.split_form.edit(TextField::move_right),
            KeyCode::Home => app.split_form.edit(TextField::home),
            KeyCode::End => app.split_form.edit(TextField::end),
            _ => {}
        }
    }

    fn edit_text(field: &mut TextField, key: KeyCode) {
        match key {
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.home(),
            KeyCode::End => field.end(),
            KeyCode::Char(c) => field.insert(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_filename_input_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                let filename = app.get_export_filename();
                let result = BalanceReport::export_to_csv(&app.state().registry, &filename);
                app.set_export_result(result);
            }
            KeyCode::Esc => app.cancel_export(),
            KeyCode::Backspace => {
                app.filename_input.pop();
            }
            KeyCode::Char(c) => app.filename_input.push(c),
            _ => {}
        }
    }
}
