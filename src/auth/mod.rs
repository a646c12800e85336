//! Firebase Auth admin client.
//!
//! Talks to the Identity Toolkit admin API with an OAuth2 access token minted
//! from the service account. Only the user-creation call is implemented,
//! since that is all account provisioning needs.

use anyhow::Context;

use crate::{error::FirebaseError, ServiceAccount};

use self::{
    credential::ApiAuthTokenManager,
    error::AuthApiError,
    models::{CreateUserResponse, NewUser},
};

mod credential;
mod error;
pub mod models;

pub struct FirebaseAuthClient {
    client: reqwest::Client,
    token_manager: ApiAuthTokenManager,
    api_url: String,
}

impl FirebaseAuthClient {
    pub fn new(service_account: ServiceAccount) -> Result<Self, FirebaseError> {
        let client = reqwest::Client::builder()
            .https_only(true)
            .build()
            .context("Failed to create HTTP client")?;

        let api_url = format!(
            "https://identitytoolkit.googleapis.com/v1/projects/{}",
            service_account.project_id
        );

        Ok(Self {
            client,
            token_manager: ApiAuthTokenManager::new(service_account),
            api_url,
        })
    }

    fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}/{}", self.api_url, path.as_ref())
    }

    /// Creates a user in Firebase Auth and returns the uid that Auth assigned
    /// to it.
    ///
    /// The email and phone number must not belong to an existing user;
    /// otherwise Auth rejects the call and this returns
    /// [`FirebaseError::EmailAlreadyExists`] or
    /// [`FirebaseError::PhoneNumberAlreadyExists`].
    pub async fn create_user(&self, new_user: &NewUser) -> Result<String, FirebaseError> {
        let access_token = self.token_manager.get_access_token().await?;

        let res = self
            .client
            .post(self.url("accounts"))
            .bearer_auth(access_token)
            .json(new_user)
            .send()
            .await
            .context("Failed to send create user request")?;

        if res.status().is_success() {
            let created: CreateUserResponse =
                res.json().await.context("Failed to read response JSON")?;

            tracing::debug!(uid = %created.user_id, "created Firebase Auth user");

            Ok(created.user_id)
        } else {
            Err(res
                .json::<AuthApiError>()
                .await
                .context("Failed to read response JSON")?
                .into())
        }
    }
}
