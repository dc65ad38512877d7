//! Auth service
//!
//! Login, registration, logout and the current user's profile.

use std::sync::Arc;

use crate::api::{ApiClient, Transport};
use crate::error::{AkibaError, AkibaResult};
use crate::models::{LoginRequest, User, UserCreate};
use crate::session::Session;

/// Service for authentication
pub struct AuthService<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AuthService<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    /// Log in and store the session
    ///
    /// The token is exchanged first, then used to fetch the profile. The
    /// session is stored only when both steps succeed.
    pub async fn login(&self, username: &str, password: &str) -> AkibaResult<User> {
        let credentials = LoginRequest::new(username, password);
        credentials
            .validate()
            .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let token = self.client.login(&credentials).await?;
        let user = self.client.whoami_with_token(&token.access_token).await?;

        // Anything cached belonged to whoever was logged in before
        self.client.clear_cache()?;
        self.client
            .session()
            .set(Session::new(user.clone(), token.access_token))?;

        tracing::info!(user = %user.email, "logged in");
        Ok(user)
    }

    /// Create an account on the server. Does not log in.
    pub async fn register(&self, user: &UserCreate) -> AkibaResult<User> {
        user.validate()
            .map_err(|e| AkibaError::Validation(e.to_string()))?;

        let created = self.client.register(user).await?;
        tracing::info!(user = %created.email, "registered");
        Ok(created)
    }

    /// Clear the session and every cached query
    pub fn logout(&self) -> AkibaResult<()> {
        self.client.session().clear()?;
        self.client.clear_cache()
    }

    /// The stored session, without touching the network
    pub fn current_session(&self) -> AkibaResult<Option<Session>> {
        self.client.session().current()
    }

    /// Fresh profile from the API
    pub async fn whoami(&self) -> AkibaResult<Arc<User>> {
        self.client.whoami().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use crate::api::Method;
    use crate::storage::SessionStore;
    use serde_json::json;

    fn create_test_client() -> ApiClient<FakeTransport> {
        ApiClient::new(FakeTransport::new(), Arc::new(SessionStore::in_memory()))
    }

    fn registration() -> UserCreate {
        UserCreate {
            first_name: "Amani".into(),
            last_name: "Otieno".into(),
            email: "amani@example.com".into(),
            password: "s3cret".into(),
            phone_number: "+254700000000".into(),
        }
    }

    #[tokio::test]
    async fn test_login_stores_session_and_next_call_is_authorized() {
        let client = create_test_client();
        let fake = client.transport();
        fake.respond(
            Method::Post,
            "/auth/login",
            200,
            json!({"access_token": "jwt-1", "token_type": "bearer"}),
        );
        fake.respond(Method::Get, "/auth/whoami", 200, user_json());
        fake.respond(Method::Get, "/accounts/", 200, json!([]));

        let service = AuthService::new(&client);
        let user = service.login("amani@example.com", "s3cret").await.unwrap();
        assert_eq!(user.first_name, "Amani");

        let session = service.current_session().unwrap().unwrap();
        assert_eq!(session.token(), "jwt-1");

        client.list_accounts().await.unwrap();
        assert_eq!(
            fake.last().unwrap().authorization.as_deref(),
            Some("Bearer jwt-1")
        );
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let client = create_test_client();
        client.transport().respond(
            Method::Post,
            "/auth/login",
            400,
            json!({"detail": "Incorrect email or password"}),
        );

        let service = AuthService::new(&client);
        let err = service.login("amani@example.com", "wrong").await.unwrap_err();

        assert_eq!(err.user_message(), "Incorrect email or password");
        assert!(service.current_session().unwrap().is_none());
        assert_eq!(client.transport().count(Method::Get, "/auth/whoami"), 0);
    }

    #[tokio::test]
    async fn test_empty_credentials_rejected_locally() {
        let client = create_test_client();
        let service = AuthService::new(&client);

        let err = service.login("", "pw").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let client = create_test_client();
        client
            .transport()
            .respond(Method::Post, "/auth/register", 201, user_json());

        let service = AuthService::new(&client);
        let user = service.register(&registration()).await.unwrap();

        assert_eq!(user.email, "amani@example.com");
        assert!(service.current_session().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_requires_every_field() {
        let client = create_test_client();
        let service = AuthService::new(&client);

        let mut form = registration();
        form.phone_number = "  ".into();
        let err = service.register(&form).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_blocks_authorized_calls() {
        let client = create_test_client();
        client
            .session()
            .set(Session::new(crate::session::tests::sample_user(), "t"))
            .unwrap();

        let service = AuthService::new(&client);
        service.logout().unwrap();

        let err = client.list_accounts().await.unwrap_err();
        assert!(matches!(err, AkibaError::NotAuthenticated));
        assert_eq!(client.transport().request_count(), 0);
    }
}
