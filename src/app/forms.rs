//! Editable form state - text fields with a cursor, focus, and the form's submission

use crate::models::User;
use crate::validation::{Field, ProfileForm, SignInForm, SignUpForm};
use crate::workflow::Submission;

/// A single editable text field
#[derive(Clone, Debug)]
pub struct TextField {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    /// Byte offset of the cursor in `value`
    pub cursor: usize,
    pub secret: bool,
    pub read_only: bool,
}

impl TextField {
    fn new(field: Field, label: &'static str) -> Self {
        TextField {
            field,
            label,
            value: String::new(),
            cursor: 0,
            secret: false,
            read_only: false,
        }
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    fn with_value(mut self, value: &str) -> Self {
        self.set(value);
        self
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    /// Value as displayed: secrets are masked
    pub fn display(&self) -> String {
        if self.secret {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Cursor column in displayed characters
    pub fn display_cursor(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.value[..self.cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    pub fn insert(&mut self, c: char) {
        if self.read_only {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.read_only || self.cursor == 0 {
            return;
        }
        let prev = self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        self.value.remove(prev);
        self.cursor = prev;
    }
}

/// Fields of one screen plus its submission state
#[derive(Clone, Debug)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focused: usize,
    pub submission: Submission,
}

impl Form {
    fn new(fields: Vec<TextField>) -> Self {
        Form {
            fields,
            focused: 0,
            submission: Submission::default(),
        }
    }

    pub fn sign_in() -> Self {
        Form::new(vec![
            TextField::new(Field::Email, "E-mail"),
            TextField::new(Field::Password, "Password").secret(),
        ])
    }

    pub fn sign_up() -> Self {
        Form::new(vec![
            TextField::new(Field::Name, "Name"),
            TextField::new(Field::Email, "E-mail"),
            TextField::new(Field::Password, "Password").secret(),
            TextField::new(Field::PasswordConfirm, "Confirm password").secret(),
        ])
    }

    /// Profile form pre-filled from the signed-in user; e-mail cannot be edited
    pub fn profile(user: Option<&User>) -> Self {
        let (name, email) = user
            .map(|u| (u.name.as_str(), u.email.as_str()))
            .unwrap_or(("", ""));
        Form::new(vec![
            TextField::new(Field::Name, "Name").with_value(name),
            TextField::new(Field::Email, "E-mail").with_value(email).read_only(),
            TextField::new(Field::OldPassword, "Current password").secret(),
            TextField::new(Field::Password, "New password").secret(),
            TextField::new(Field::PasswordConfirm, "Confirm new password").secret(),
        ])
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: &str) {
        if let Some(f) = self.fields.iter_mut().find(|f| f.field == field) {
            f.set(value);
        }
    }

    pub fn focused_field(&self) -> Option<&TextField> {
        self.fields.get(self.focused)
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextField> {
        self.fields.get_mut(self.focused)
    }

    /// Focus the next editable field, wrapping around
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(self.fields.len().saturating_sub(1));
    }

    fn step_focus(&mut self, step: usize) {
        let len = self.fields.len();
        for _ in 0..len {
            self.focused = (self.focused + step) % len;
            if !self.fields[self.focused].read_only {
                break;
            }
        }
    }

    pub fn clear_secrets(&mut self) {
        for field in self.fields.iter_mut().filter(|f| f.secret) {
            field.set("");
        }
    }

    pub fn to_sign_in(&self) -> SignInForm {
        SignInForm {
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::Password).to_string(),
        }
    }

    pub fn to_sign_up(&self) -> SignUpForm {
        SignUpForm {
            name: self.value(Field::Name).to_string(),
            email: self.value(Field::Email).to_string(),
            password: self.value(Field::Password).to_string(),
            password_confirm: self.value(Field::PasswordConfirm).to_string(),
        }
    }

    pub fn to_profile(&self) -> ProfileForm {
        ProfileForm {
            name: self.value(Field::Name).to_string(),
            email: self.value(Field::Email).to_string(),
            old_password: self.value(Field::OldPassword).to_string(),
            password: self.value(Field::Password).to_string(),
            confirm_password: self.value(Field::PasswordConfirm).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte_text() {
        let mut field = TextField::new(Field::Name, "Name");
        for c in "braço".chars() {
            field.insert(c);
        }
        assert_eq!(field.display_cursor(), 5);

        field.move_left();
        field.backspace();
        assert_eq!(field.value, "brao");
        assert_eq!(field.display_cursor(), 3);

        field.move_right();
        field.move_right();
        assert_eq!(field.cursor, field.value.len());
    }

    #[test]
    fn test_secret_fields_are_masked() {
        let mut form = Form::sign_in();
        form.set(Field::Password, "secret1");
        assert_eq!(form.fields[1].display(), "*******");
        assert_eq!(form.to_sign_in().password, "secret1");
    }

    #[test]
    fn test_profile_focus_skips_email() {
        let user = User {
            id: "1".to_string(),
            name: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            avatar: None,
            role: None,
        };
        let mut form = Form::profile(Some(&user));
        assert_eq!(form.value(Field::Email), "ana@gym.com");

        form.focus_next();
        assert_eq!(form.focused_field().map(|f| f.field), Some(Field::OldPassword));
        form.focus_prev();
        assert_eq!(form.focused_field().map(|f| f.field), Some(Field::Name));

        form.fields[1].insert('x');
        assert_eq!(form.value(Field::Email), "ana@gym.com");
    }
}
