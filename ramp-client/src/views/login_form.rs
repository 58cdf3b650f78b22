use std::fmt;

use shared::client::LoginRequest;

use crate::client::RampClient;
use crate::session::AuthenticatedUser;
use crate::{ClientError, ClientResult};

/// Login form. The only view usable without a session.
pub struct LoginForm {
    client: RampClient,
    pub email: String,
    password: String,
    error: Option<String>,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn new(client: RampClient) -> Self {
        Self {
            client,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit stays disabled while an auth operation runs
    pub fn can_submit(&self) -> bool {
        !self.client.session().is_loading()
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
    }

    /// Log in with the entered credentials. The password is consumed.
    pub async fn submit(&mut self) -> ClientResult<AuthenticatedUser> {
        if self.client.session().is_loading() {
            return Err(ClientError::AuthInProgress);
        }
        self.error = None;

        let credentials = LoginRequest::new(self.email.trim(), std::mem::take(&mut self.password));
        let result = self.client.auth().login(credentials).await;
        if let Err(e) = &result {
            self.error = Some(e.user_message());
        }
        result
    }
}
