//! Account flow errors.

use evershop_core::EmailError;
use thiserror::Error;

/// Errors from the account, profile and address book flows.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Sign-in requires both credentials.
    #[error("email and password are required")]
    MissingCredentials,

    /// Registration requires every field.
    #[error("all fields are required")]
    MissingFields,

    /// Password below the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Email failed validation.
    #[error("please enter a valid email address")]
    InvalidEmail(#[from] EmailError),

    /// First or last name too short after trimming.
    #[error("first name and last name must be at least {min} characters")]
    NameTooShort { min: usize },

    /// Simulated network failure.
    #[error("network error, please check your connection")]
    Network,

    /// The email is already registered.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Profile saves need both names.
    #[error("first name and last name are required")]
    MissingName,

    /// Profile saves need an email.
    #[error("email is required")]
    MissingEmail,

    /// Simulated profile save failure.
    #[error("failed to update profile, please try again")]
    ProfileSaveFailed,

    /// No user is signed in.
    #[error("not signed in")]
    NotAuthenticated,

    /// The address book is full.
    #[error("you can only save up to {max} addresses")]
    AddressLimit { max: usize },

    /// Required address fields are missing.
    #[error("please fill in all required address fields")]
    IncompleteAddress,

    /// No address at the given position.
    #[error("no address at index {index}")]
    AddressNotFound { index: usize },
}
