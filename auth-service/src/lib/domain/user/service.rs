use std::sync::Arc;

use crate::domain::auth::models::UserId;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;

/// Domain service for user profile reads.
pub struct UserService<R>
where
    R: UserRepository,
{
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Fetch a user's profile by id.
    ///
    /// # Errors
    /// * `NotFound` - no user with this id
    /// * `Database` - the lookup failed
    pub async fn get_profile(&self, id: &UserId) -> Result<UserProfile, UserError> {
        self.repository
            .find_profile(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;

    mock! {
        TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;
        }
    }

    #[tokio::test]
    async fn test_get_profile_success() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_profile().times(1).returning(|_| {
            Ok(Some(UserProfile {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
            }))
        });

        let service = UserService::new(Arc::new(repository));
        let profile = service.get_profile(&UserId::new()).await.unwrap();
        assert_eq!(profile.first_name, "John");
        assert_eq!(profile.last_name, "Doe");
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_profile()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));
        let result = service.get_profile(&UserId::new()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
