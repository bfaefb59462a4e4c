use crossterm::event::{KeyCode, KeyEvent};

use crate::app::form::FormField;
use crate::app::{App, CurrentScreen, InputMode};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.dismiss_notice(),
                KeyCode::Char('q') if matches!(self.current_screen, CurrentScreen::List) => self.exit = true,
                _ => {}
            }
            return;
        }

        match self.current_screen {
            CurrentScreen::List => self.handle_list_key(key.code),
            CurrentScreen::Form => self.handle_form_key(key.code),
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        if self.list.pending_delete().is_some() {
            match code {
                KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Esc => self.cancel_delete(),
                _ => {}
            }
            return;
        }

        if self.input_mode == InputMode::Search {
            match code {
                KeyCode::Char(c) => self.list.push_search_char(c),
                KeyCode::Backspace => self.list.pop_search_char(),
                KeyCode::Enter => self.input_mode = InputMode::Normal,
                KeyCode::Esc => {
                    self.list.clear_search();
                    self.input_mode = InputMode::Normal;
                }
                _ => {}
            }
            self.clamp_selection();
            return;
        }

        match code {
            KeyCode::Char('q') => self.exit = true,
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Down | KeyCode::Char('j') => self.next_movie(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_movie(),
            KeyCode::Char('g') => {
                self.list.cycle_genre();
                self.clamp_selection();
            }
            KeyCode::Char('s') => self.list.toggle_sort_by(),
            KeyCode::Char('o') => self.list.toggle_sort_order(),
            KeyCode::Char('r') if !self.loading_movies => self.reload(),
            KeyCode::Char('a') if !self.is_busy() => self.open_add_form(),
            KeyCode::Char('e') if !self.is_busy() => self.open_edit_form(),
            KeyCode::Char('d') if !self.is_busy() => self.request_delete(),
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        if self.submitting || self.form.is_busy() {
            return;
        }

        match code {
            KeyCode::Esc => self.close_form(),
            KeyCode::Tab => {
                self.leave_field();
                self.form.focus_next();
            }
            KeyCode::BackTab => {
                self.leave_field();
                self.form.focus_previous();
            }
            KeyCode::Enter if self.form.focus == FormField::Image => {
                self.select_image();
                if self.notice.is_none() {
                    self.form.focus = FormField::Submit;
                }
            }
            KeyCode::Enter => self.submit_form(),
            KeyCode::Left | KeyCode::Right => {
                let forward = code == KeyCode::Right;
                match self.form.focus {
                    FormField::Genre => self.form.cycle_genre(forward),
                    FormField::Rating => self.form.cycle_rating(forward),
                    _ => {}
                }
            }
            KeyCode::Backspace if self.form.focus == FormField::Rating => self.form.set_rating(None),
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) if self.form.focus == FormField::Rating => {
                if let Some(digit) = c.to_digit(10) {
                    self.form.set_rating(Some(digit as i32));
                }
            }
            KeyCode::Char(c) if self.form.focus.is_text() => self.form.push_char(c),
            _ => {}
        }
    }

    /// Picks up a typed image path when focus moves away from it.
    fn leave_field(&mut self) {
        if self.form.focus == FormField::Image
            && self.form.image.is_none()
            && !self.form.image_path.trim().is_empty()
        {
            self.select_image();
        }
    }
}
