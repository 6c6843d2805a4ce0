use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{normalize_email, User, UserCreate};
use crate::error::LogisticsResult;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, user);

impl UserClient {
    /// Stores a new account. A taken email is a `Conflict`.
    #[instrument(skip(self, params), fields(email = %params.email, role = %params.role))]
    pub async fn register(&self, params: UserCreate) -> LogisticsResult<User> {
        debug!("Sending request");
        self.inner.create(params).await
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> LogisticsResult<Option<User>> {
        debug!("Sending request");
        self.inner.find_by_key(normalize_email(email)).await
    }
}
