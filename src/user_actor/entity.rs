use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{normalize_email, User, UserCreate};
use crate::error::LogisticsError;

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    const KIND: &'static str = "User";

    fn id(&self) -> &String {
        &self.id
    }

    /// One account per email, compared case-insensitively.
    fn unique_key(&self) -> Option<String> {
        Some(normalize_email(&self.email))
    }

    /// Creates a new User from creation parameters.
    ///
    /// The name must be non-blank and the email must at least look like one;
    /// password strength is checked before hashing, upstream of this.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, LogisticsError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(LogisticsError::Validation("Name is required".to_string()));
        }
        let email = normalize_email(&params.email);
        if !email.contains('@') {
            return Err(LogisticsError::Validation(format!(
                "Invalid email address: {}",
                params.email
            )));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            email,
            phone: params.phone.filter(|p| !p.trim().is_empty()),
            role: params.role,
            password_hash: params.password_hash,
            created_at: Utc::now(),
        })
    }

    /// Accounts are immutable once registered.
    fn on_update(&mut self, _patch: ()) -> Result<(), LogisticsError> {
        Err(LogisticsError::Conflict("Accounts cannot be edited".to_string()))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), LogisticsError> {
        Ok(())
    }
}
