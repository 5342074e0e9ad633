//! Login and registration exchanges.
//!
//! The exchange happens here; adopting the resulting credential is the
//! Session Store's job. A failed exchange never touches the session.

use std::sync::Arc;

use taskflow_shared::dto::{AuthResponse, UserResponse};

use crate::domain::{Credential, LoginForm, RegisterForm, User};
use crate::error::{ClientError, RequestError};
use crate::ports::{ApiClient, RequestBody, decode};
use crate::services::SessionStore;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";

pub struct AuthService {
    api: Arc<dyn ApiClient>,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn ApiClient>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Exchange email/password for a credential and sign in.
    pub async fn login(&self, form: &LoginForm) -> Result<(), ClientError> {
        let request = form.validate()?;

        let response: AuthResponse = decode(
            self.api
                .post(LOGIN_PATH, RequestBody::Form(request.into_form()))
                .await?,
        )?;

        if !response.token_type.eq_ignore_ascii_case("bearer") {
            tracing::warn!(token_type = %response.token_type, "Unexpected token type");
        }

        let credential = Credential::new(response.access_token)?;
        self.session.login(credential).await?;
        tracing::info!("Logged in");
        Ok(())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, form: &RegisterForm) -> Result<User, ClientError> {
        let request = form.validate()?;
        let body = serde_json::to_value(&request)
            .map_err(|e| RequestError::decode(e.to_string()))?;

        let created: UserResponse =
            decode(self.api.post(REGISTER_PATH, RequestBody::Json(body)).await?)?;
        tracing::info!(user_id = created.id, "Account registered");

        Ok(User {
            id: created.id,
            email: created.email,
        })
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.session.logout().await?;
        Ok(())
    }
}
