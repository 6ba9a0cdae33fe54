//! Sign-up / sign-in use-case service.
//!
//! # Responsibility
//! - Validate auth form input before any repository access.
//! - Delegate registration, authentication and logout to `AuthRepository`.
//!
//! # Invariants
//! - A form that fails validation never reaches storage.
//! - Field errors are reported all at once, in form order.

use crate::model::user::User;
use crate::repo::kv_repo::RepoError;
use crate::repo::user_repo::AuthRepository;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

const MIN_PASSWORD_CHARS: usize = 6;

/// Which auth flow a form is submitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignUp,
    SignIn,
}

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

impl AuthField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

/// One user-facing validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: AuthField,
    pub message: &'static str,
}

/// Raw auth form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl AuthForm {
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn sign_up(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ..Self::sign_in(email, password)
        }
    }

    /// Returns every field error for `mode`; empty when the form is valid.
    ///
    /// Rules: name required on sign-up; email required and shaped like
    /// `x@y.z`; password required and at least 6 characters.
    pub fn validate(&self, mode: AuthMode) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if mode == AuthMode::SignUp && self.name.trim().is_empty() {
            errors.push(FieldError {
                field: AuthField::Name,
                message: "Name is required",
            });
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError {
                field: AuthField::Email,
                message: "Email is required",
            });
        } else if !EMAIL_RE.is_match(self.email.as_str()) {
            errors.push(FieldError {
                field: AuthField::Email,
                message: "Email is invalid",
            });
        }

        if self.password.is_empty() {
            errors.push(FieldError {
                field: AuthField::Password,
                message: "Password is required",
            });
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.push(FieldError {
                field: AuthField::Password,
                message: "Password must be at least 6 characters",
            });
        }

        errors
    }

    fn to_user(&self) -> User {
        User {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        }
    }
}

/// Service error for auth use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthServiceError {
    /// Form input failed validation; nothing was stored.
    InvalidForm(Vec<FieldError>),
    /// Repository rejected the operation.
    Repo(RepoError),
}

impl Display for AuthServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidForm(errors) => {
                let messages = errors
                    .iter()
                    .map(|error| error.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "{messages}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidForm(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for AuthServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Auth service facade over repository implementations.
pub struct AuthService<R: AuthRepository> {
    repo: R,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers the form's user and signs it in.
    pub fn sign_up(&self, form: &AuthForm) -> Result<User, AuthServiceError> {
        ensure_valid(form, AuthMode::SignUp)?;
        let user = form.to_user();
        self.repo.register_user(&user)?;
        Ok(user)
    }

    /// Authenticates the form's credentials and starts a session.
    pub fn sign_in(&self, form: &AuthForm) -> Result<User, AuthServiceError> {
        ensure_valid(form, AuthMode::SignIn)?;
        Ok(self
            .repo
            .authenticate(form.email.as_str(), form.password.as_str())?)
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.repo.current_session()
    }

    /// Ends the session and clears tasks and notes.
    pub fn sign_out(&self) -> bool {
        self.repo.end_session()
    }
}

fn ensure_valid(form: &AuthForm, mode: AuthMode) -> Result<(), AuthServiceError> {
    let errors = form.validate(mode);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AuthServiceError::InvalidForm(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::{AuthField, AuthForm, AuthMode};

    fn fields(form: &AuthForm, mode: AuthMode) -> Vec<AuthField> {
        form.validate(mode).iter().map(|error| error.field).collect()
    }

    #[test]
    fn valid_sign_up_form_has_no_errors() {
        let form = AuthForm::sign_up("Ada", "ada@example.com", "secret1");
        assert!(form.validate(AuthMode::SignUp).is_empty());
    }

    #[test]
    fn sign_in_does_not_require_name() {
        let form = AuthForm::sign_in("ada@example.com", "secret1");
        assert!(form.validate(AuthMode::SignIn).is_empty());
        assert_eq!(fields(&form, AuthMode::SignUp), vec![AuthField::Name]);
    }

    #[test]
    fn rejects_malformed_email_and_short_password() {
        let form = AuthForm::sign_in("ada.example.com", "12345");
        let errors = form.validate(AuthMode::SignIn);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "Email is invalid");
        assert_eq!(errors[1].message, "Password must be at least 6 characters");
    }

    #[test]
    fn reports_missing_fields() {
        let form = AuthForm::default();
        let errors = form.validate(AuthMode::SignUp);
        let messages: Vec<&str> = errors.iter().map(|error| error.message).collect();
        assert_eq!(
            messages,
            vec!["Name is required", "Email is required", "Password is required"]
        );
    }
}
