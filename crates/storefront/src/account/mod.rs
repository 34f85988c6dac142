//! Account, profile and address book flows.
//!
//! The auth backend is simulated: credentials are validated locally, the
//! usual round trip elapses, and failures are injected at fixed rates.
//! A successful sign-in yields a canned identity carrying the given
//! email. The signed-in user persists across sessions; the address book
//! is session state and resets with the signed-in user.

mod error;

pub use error::AccountError;

use std::sync::Arc;
use std::time::Duration;

use evershop_core::{Email, UserId};

use crate::ids;
use crate::models::{Address, User};
use crate::sim::{self, FailureInjector};
use crate::storage::{self, StateStore, keys};

/// Minimum password length for sign-in and registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum trimmed length of a registered name.
pub const MIN_NAME_LENGTH: usize = 2;

/// Most addresses the book can hold.
pub const MAX_ADDRESSES: usize = 5;

/// Profile saves run at this multiple of the base latency.
const PROFILE_SAVE_LATENCY_FACTOR: f64 = 1.5;

/// Sections of the account dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Profile,
    Orders,
    Wishlist,
    Settings,
}

impl DashboardTab {
    /// Parses a query-string style value, for example `"orders"`.
    #[must_use]
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "profile" => Some(Self::Profile),
            "orders" => Some(Self::Orders),
            "wishlist" => Some(Self::Wishlist),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

impl std::fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Profile => "profile",
            Self::Orders => "orders",
            Self::Wishlist => "wishlist",
            Self::Settings => "settings",
        };
        f.write_str(label)
    }
}

fn avatar_url(email: &Email) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={email}")
}

fn address_is_complete(address: &Address) -> bool {
    !address.first_name.trim().is_empty()
        && !address.last_name.trim().is_empty()
        && !address.address1.trim().is_empty()
        && !address.city.trim().is_empty()
        && !address.state.trim().is_empty()
        && !address.zip_code.trim().is_empty()
}

/// The signed-in user, their profile, and the session address book.
pub struct AccountStore {
    user: Option<User>,
    addresses: Vec<Address>,
    active_tab: DashboardTab,
    loading: bool,
    storage: Arc<dyn StateStore>,
    latency: Duration,
    injector: Box<dyn FailureInjector>,
}

impl AccountStore {
    /// Loads the persisted user, if any. The address book always starts
    /// empty.
    #[must_use]
    pub fn load(
        storage: Arc<dyn StateStore>,
        latency: Duration,
        injector: Box<dyn FailureInjector>,
    ) -> Self {
        let user = storage::load_value(storage.as_ref(), keys::USER);
        Self {
            user,
            addresses: Vec::new(),
            active_tab: DashboardTab::default(),
            loading: false,
            storage,
            latency,
            injector,
        }
    }

    /// Signs in with email and password.
    ///
    /// Validation order: both credentials present, password length,
    /// email shape. The backend round trip then runs at the base latency
    /// and fails at the network rate. Success stores and persists the
    /// signed-in user and resets the address book.
    ///
    /// # Errors
    ///
    /// [`AccountError::MissingCredentials`],
    /// [`AccountError::PasswordTooShort`], [`AccountError::InvalidEmail`]
    /// or [`AccountError::Network`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AccountError> {
        self.loading = true;
        let result = self.run_login(email, password).await;
        self.loading = false;
        result
    }

    async fn run_login(&mut self, email: &str, password: &str) -> Result<User, AccountError> {
        if email.is_empty() || password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let email: Email = email.parse()?;

        sim::simulate_latency(self.latency).await;
        if self.injector.roll(sim::NETWORK_FAILURE_RATE) {
            return Err(AccountError::Network);
        }

        let avatar = avatar_url(&email);
        let user = User {
            id: UserId::new(ids::entity_id()),
            email,
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            avatar: Some(avatar),
        };
        self.install_user(user.clone());
        tracing::info!(user_id = %user.id, "signed in");
        Ok(user)
    }

    /// Registers a new account and signs it in.
    ///
    /// Validation order: every field present, password length, email
    /// shape, trimmed name lengths. After the round trip the flow fails
    /// at the network rate, then at the email-taken rate. Names are
    /// stored trimmed.
    ///
    /// # Errors
    ///
    /// [`AccountError::MissingFields`],
    /// [`AccountError::PasswordTooShort`],
    /// [`AccountError::InvalidEmail`], [`AccountError::NameTooShort`],
    /// [`AccountError::Network`] or [`AccountError::EmailTaken`].
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AccountError> {
        self.loading = true;
        let result = self
            .run_register(email, password, first_name, last_name)
            .await;
        self.loading = false;
        result
    }

    async fn run_register(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<User, AccountError> {
        if email.is_empty() || password.is_empty() || first_name.is_empty() || last_name.is_empty()
        {
            return Err(AccountError::MissingFields);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AccountError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let email: Email = email.parse()?;
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        if first_name.chars().count() < MIN_NAME_LENGTH
            || last_name.chars().count() < MIN_NAME_LENGTH
        {
            return Err(AccountError::NameTooShort {
                min: MIN_NAME_LENGTH,
            });
        }

        sim::simulate_latency(self.latency).await;
        if self.injector.roll(sim::NETWORK_FAILURE_RATE) {
            return Err(AccountError::Network);
        }
        if self.injector.roll(sim::EMAIL_TAKEN_RATE) {
            return Err(AccountError::EmailTaken);
        }

        let avatar = avatar_url(&email);
        let user = User {
            id: UserId::new(ids::entity_id()),
            email,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            avatar: Some(avatar),
        };
        self.install_user(user.clone());
        tracing::info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    /// Signs out, clearing the persisted user and the address book.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "signed out");
        }
        self.addresses.clear();
        self.storage.remove(keys::USER);
    }

    /// Saves profile edits for the signed-in user.
    ///
    /// Names must trim non-empty and the email must be present and
    /// valid; the values are stored as entered. The save runs at 1.5
    /// times the base latency and fails at the profile-save rate.
    ///
    /// # Errors
    ///
    /// [`AccountError::NotAuthenticated`], [`AccountError::MissingName`],
    /// [`AccountError::MissingEmail`], [`AccountError::InvalidEmail`] or
    /// [`AccountError::ProfileSaveFailed`].
    pub async fn update_profile(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<User, AccountError> {
        self.loading = true;
        let result = self.run_update_profile(first_name, last_name, email).await;
        self.loading = false;
        result
    }

    async fn run_update_profile(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<User, AccountError> {
        if self.user.is_none() {
            return Err(AccountError::NotAuthenticated);
        }
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(AccountError::MissingName);
        }
        if email.is_empty() {
            return Err(AccountError::MissingEmail);
        }
        let email: Email = email.parse()?;

        sim::simulate_latency(self.latency.mul_f64(PROFILE_SAVE_LATENCY_FACTOR)).await;
        if self.injector.roll(sim::PROFILE_SAVE_FAILURE_RATE) {
            return Err(AccountError::ProfileSaveFailed);
        }

        let Some(user) = self.user.as_mut() else {
            return Err(AccountError::NotAuthenticated);
        };
        user.first_name = first_name.to_owned();
        user.last_name = last_name.to_owned();
        user.email = email;
        let updated = user.clone();
        self.persist_user();
        tracing::info!(user_id = %updated.id, "profile updated");
        Ok(updated)
    }

    /// Adds an address to the book.
    ///
    /// The cap is enforced before field validation, so a full book
    /// reports the limit even for an invalid entry. Required fields must
    /// trim non-empty.
    ///
    /// # Errors
    ///
    /// [`AccountError::AddressLimit`] or
    /// [`AccountError::IncompleteAddress`].
    pub fn add_address(&mut self, address: Address) -> Result<(), AccountError> {
        if self.addresses.len() >= MAX_ADDRESSES {
            return Err(AccountError::AddressLimit { max: MAX_ADDRESSES });
        }
        if !address_is_complete(&address) {
            return Err(AccountError::IncompleteAddress);
        }
        self.addresses.push(address);
        Ok(())
    }

    /// Replaces the address at `index`.
    ///
    /// # Errors
    ///
    /// [`AccountError::AddressNotFound`] for a bad index,
    /// [`AccountError::IncompleteAddress`] when required fields are
    /// missing.
    pub fn update_address(&mut self, index: usize, address: Address) -> Result<(), AccountError> {
        let Some(slot) = self.addresses.get_mut(index) else {
            return Err(AccountError::AddressNotFound { index });
        };
        if !address_is_complete(&address) {
            return Err(AccountError::IncompleteAddress);
        }
        *slot = address;
        Ok(())
    }

    /// Removes the address at `index`; `false` when out of range.
    pub fn remove_address(&mut self, index: usize) -> bool {
        if index < self.addresses.len() {
            self.addresses.remove(index);
            true
        } else {
            false
        }
    }

    /// Saved addresses in insertion order.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether an auth or profile call is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The open dashboard section.
    #[must_use]
    pub fn active_tab(&self) -> DashboardTab {
        self.active_tab
    }

    /// Switches the open dashboard section.
    pub fn set_active_tab(&mut self, tab: DashboardTab) {
        self.active_tab = tab;
    }

    fn install_user(&mut self, user: User) {
        self.user = Some(user);
        self.addresses.clear();
        self.persist_user();
    }

    fn persist_user(&self) {
        match &self.user {
            Some(user) => {
                if let Err(error) = storage::persist_value(self.storage.as_ref(), keys::USER, user)
                {
                    tracing::error!(%error, "failed to persist user");
                }
            }
            None => self.storage.remove(keys::USER),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
