use async_trait::async_trait;

use crate::domain::auth::models::UserId;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserProfile;

/// Read access to user records.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve a user's profile, `None` if the user does not exist.
    ///
    /// # Errors
    /// * `Database` - the query failed
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;
}
