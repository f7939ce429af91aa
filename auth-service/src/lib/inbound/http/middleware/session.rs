use anyhow::anyhow;
use async_trait::async_trait;
use axum::extract::Request;

use super::AuthFailure;
use super::CredentialVerifier;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::SessionStore;
use crate::domain::auth::ports::SESSION_USER_ID_KEY;
use crate::inbound::http::cookie::session_token_from_headers;
use crate::inbound::http::router::AppState;

/// Session-cookie strategy: the cookie carries an opaque token and the
/// session store holds the user id.
pub struct SessionAuth;

#[async_trait]
impl CredentialVerifier for SessionAuth {
    const STRATEGY: &'static str = "session";

    type Credential = SessionToken;

    fn extract(request: &Request) -> Result<Self::Credential, AuthFailure> {
        session_token_from_headers(request.headers()).ok_or(AuthFailure::Missing)
    }

    async fn verify(state: &AppState, token: Self::Credential) -> Result<UserId, AuthFailure> {
        resolve_session_user(state.session_store.as_ref(), &token).await
    }
}

/// Look up the session's user id and parse it.
///
/// Only this service ever writes the `user_id` key, so a stored value that
/// is not a UUID means the session is corrupted. The repair is to destroy
/// it (attempted once; a failing destroy is only logged) and answer with a
/// server error rather than a routine rejection.
pub(crate) async fn resolve_session_user<S>(
    store: &S,
    token: &SessionToken,
) -> Result<UserId, AuthFailure>
where
    S: SessionStore + ?Sized,
{
    let value = store
        .read(token, SESSION_USER_ID_KEY)
        .await
        .map_err(|e| AuthFailure::Internal(e.into()))?
        .ok_or(AuthFailure::Missing)?;

    match UserId::from_string(&value) {
        Ok(user_id) => Ok(user_id),
        Err(e) => {
            if let Err(destroy_err) = store.destroy(token).await {
                tracing::error!(error = %destroy_err, "failed to destroy corrupted session");
            }
            Err(AuthFailure::Internal(anyhow!(
                "session user id is not a valid UUID: {e}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::errors::SessionStoreError;

    mock! {
        TestSessionStore {}

        #[async_trait]
        impl SessionStore for TestSessionStore {
            async fn read(
                &self,
                token: &SessionToken,
                key: &str,
            ) -> Result<Option<String>, SessionStoreError>;
            async fn write(
                &self,
                token: &SessionToken,
                key: &str,
                value: &str,
            ) -> Result<(), SessionStoreError>;
            async fn destroy(&self, token: &SessionToken) -> Result<(), SessionStoreError>;
        }
    }

    fn token() -> SessionToken {
        SessionToken::from("deadbeef".to_string())
    }

    #[tokio::test]
    async fn test_resolves_stored_user_id() {
        let mut store = MockTestSessionStore::new();
        let user_id = UserId::new();

        let stored = user_id.to_string();
        store
            .expect_read()
            .with(eq(token()), eq(SESSION_USER_ID_KEY))
            .times(1)
            .returning(move |_, _| Ok(Some(stored.clone())));

        let resolved = resolve_session_user(&store, &token()).await.unwrap();
        assert_eq!(resolved, user_id);
    }

    #[tokio::test]
    async fn test_absent_session_is_missing_credential() {
        let mut store = MockTestSessionStore::new();
        store.expect_read().times(1).returning(|_, _| Ok(None));

        let result = resolve_session_user(&store, &token()).await;
        assert!(matches!(result, Err(AuthFailure::Missing)));
    }

    #[tokio::test]
    async fn test_corrupted_session_is_destroyed_exactly_once() {
        let mut store = MockTestSessionStore::new();

        store
            .expect_read()
            .times(1)
            .returning(|_, _| Ok(Some("not-a-uuid".to_string())));
        store
            .expect_destroy()
            .with(eq(token()))
            .times(1)
            .returning(|_| Ok(()));

        let result = resolve_session_user(&store, &token()).await;
        assert!(matches!(result, Err(AuthFailure::Internal(_))));
    }

    #[tokio::test]
    async fn test_corrupted_session_still_rejected_when_destroy_fails() {
        let mut store = MockTestSessionStore::new();

        store
            .expect_read()
            .times(1)
            .returning(|_, _| Ok(Some("not-a-uuid".to_string())));
        store
            .expect_destroy()
            .times(1)
            .returning(|_| Err(SessionStoreError::Backend("connection reset".to_string())));

        let result = resolve_session_user(&store, &token()).await;
        assert!(matches!(result, Err(AuthFailure::Internal(_))));
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut store = MockTestSessionStore::new();
        store
            .expect_read()
            .times(1)
            .returning(|_, _| Err(SessionStoreError::Backend("connection reset".to_string())));

        let result = resolve_session_user(&store, &token()).await;
        assert!(matches!(result, Err(AuthFailure::Internal(_))));
    }
}
