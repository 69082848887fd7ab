//! Form rules
//!
//! Each form validates into the request payload it submits, or into the set of
//! per-field messages shown inline. Only the first failing rule of a field is kept.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::constants::MIN_PASSWORD_LEN;
use crate::models::{CreateUserRequest, SignInRequest, UpdateProfileRequest};

/// Form field identifiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    OldPassword,
    Password,
    PasswordConfirm,
}

/// Inline validation messages keyed by field
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the field already failed an earlier rule
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Empty input means "not provided"
fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn check_required(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Passwords are taken verbatim: whitespace counts
fn check_present(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.is_empty() {
        errors.add(field, message);
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    check_required(errors, Field::Email, email, "Enter your e-mail");
    if !is_valid_email(email.trim()) {
        errors.add(Field::Email, "Invalid e-mail");
    }
}

fn check_password_length(errors: &mut FieldErrors, field: Field, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            field,
            format!("The password must have at least {} characters", MIN_PASSWORD_LEN),
        );
    }
}

/// Sign-in form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        check_present(&mut errors, Field::Password, &self.password, "Enter your password");
        check_password_length(&mut errors, Field::Password, &self.password);

        errors.into_result(SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Account creation form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<CreateUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, Field::Name, &self.name, "Enter your name");
        check_email(&mut errors, &self.email);
        check_present(&mut errors, Field::Password, &self.password, "Enter a password");
        check_password_length(&mut errors, Field::Password, &self.password);
        check_present(
            &mut errors,
            Field::PasswordConfirm,
            &self.password_confirm,
            "Confirm the password",
        );
        if self.password_confirm != self.password {
            errors.add(Field::PasswordConfirm, "The passwords do not match");
        }

        errors.into_result(CreateUserRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Profile form. The password block is optional: leaving `password` empty keeps
/// the current password and skips the confirmation rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub old_password: String,
    pub password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    pub fn validate(&self) -> Result<UpdateProfileRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, Field::Name, &self.name, "Enter your name");
        check_email(&mut errors, &self.email);

        let password = optional(&self.password);
        let (old_password, confirm_password) = match &password {
            Some(new) => {
                check_password_length(&mut errors, Field::Password, new);
                check_present(
                    &mut errors,
                    Field::PasswordConfirm,
                    &self.confirm_password,
                    "Confirm the new password",
                );
                if &self.confirm_password != new {
                    errors.add(Field::PasswordConfirm, "The password confirmation does not match");
                }
                (optional(&self.old_password), optional(&self.confirm_password))
            }
            None => (None, None),
        };

        errors.into_result(UpdateProfileRequest {
            name: self.name.trim().to_string(),
            old_password,
            password,
            confirm_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(password: &str, confirm: &str) -> ProfileForm {
        ProfileForm {
            name: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            old_password: "oldpass".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_short_passwords_block_sign_in() {
        for password in ["", "a", "abc", "12345"] {
            let form = SignInForm {
                email: "a@b.com".to_string(),
                password: password.to_string(),
            };
            let errors = form.validate().unwrap_err();
            assert!(errors.get(Field::Password).is_some(), "accepted {:?}", password);
        }
    }

    #[test]
    fn test_sign_in_accepts_six_chars() {
        let form = SignInForm {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };
        let req = form.validate().unwrap();
        assert_eq!(req.email, "a@b.com");
    }

    #[test]
    fn test_invalid_email_shape() {
        for email in ["", "ana", "ana@", "ana@gym", "a b@c.com"] {
            let form = SignInForm {
                email: email.to_string(),
                password: "secret1".to_string(),
            };
            let errors = form.validate().unwrap_err();
            assert!(errors.get(Field::Email).is_some(), "accepted {:?}", email);
            assert!(errors.get(Field::Password).is_none());
        }
    }

    #[test]
    fn test_required_message_wins_over_shape() {
        let form = SignInForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Enter your e-mail"));
        assert_eq!(errors.get(Field::Password), Some("Enter your password"));
    }

    #[test]
    fn test_sign_up_confirmation_must_match() {
        let form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret2".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::PasswordConfirm), Some("The passwords do not match"));
    }

    #[test]
    fn test_sign_up_password_minimum_length() {
        let form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            password: "12345".to_string(),
            password_confirm: "12345".to_string(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(Field::Password),
            Some("The password must have at least 6 characters")
        );
        assert!(errors.get(Field::PasswordConfirm).is_none());
    }

    #[test]
    fn test_whitespace_password_is_kept_verbatim() {
        let form = SignInForm {
            email: "a@b.com".to_string(),
            password: "       ".to_string(),
        };
        let req = form.validate().unwrap();
        assert_eq!(req.password, "       ");

        let form = SignUpForm {
            name: "Ana".to_string(),
            email: "ana@gym.com".to_string(),
            password: " pass  ".to_string(),
            password_confirm: " pass  ".to_string(),
        };
        assert_eq!(form.validate().unwrap().password, " pass  ");
    }

    #[test]
    fn test_sign_up_valid() {
        let form = SignUpForm {
            name: " Ana ".to_string(),
            email: "ana@gym.com".to_string(),
            password: "secret1".to_string(),
            password_confirm: "secret1".to_string(),
        };
        let req = form.validate().unwrap();
        assert_eq!(req.name, "Ana");
        assert_eq!(req.password, "secret1");
    }

    #[test]
    fn test_profile_without_password_skips_confirmation() {
        for confirm in ["", "whatever"] {
            let req = profile("", confirm).validate().unwrap();
            assert_eq!(req.password, None);
            assert_eq!(req.confirm_password, None);
            assert_eq!(req.old_password, None);
        }
    }

    #[test]
    fn test_profile_new_password_requires_exact_confirmation() {
        for confirm in ["", "secret", "secret12", "Secret1"] {
            let errors = profile("secret1", confirm).validate().unwrap_err();
            assert!(errors.get(Field::PasswordConfirm).is_some(), "accepted {:?}", confirm);
        }

        let req = profile("secret1", "secret1").validate().unwrap();
        assert_eq!(req.password.as_deref(), Some("secret1"));
        assert_eq!(req.confirm_password.as_deref(), Some("secret1"));
        assert_eq!(req.old_password.as_deref(), Some("oldpass"));
    }

    #[test]
    fn test_profile_new_password_minimum_length() {
        let errors = profile("abc", "abc").validate().unwrap_err();
        assert!(errors.get(Field::Password).is_some());
    }

    #[test]
    fn test_profile_requires_name() {
        let mut form = profile("", "");
        form.name = "   ".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(Field::Name), Some("Enter your name"));
    }
}
