//! Consumer-facing access to the user directory.

use crate::{
    endpoint::{Endpoint, GetUserParams, ListUsersParams},
    models::{self, User, UserDetails},
    Client, Result,
};
use async_trait::async_trait;

/// The user directory operations, returning raw JSON bodies.
///
/// Callers decode with [`models::decode`] or use the `_decoded` helpers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self, params: ListUsersParams) -> Result<Vec<u8>>;

    async fn get_user(&self, params: GetUserParams) -> Result<Vec<u8>>;

    async fn list_users_decoded(&self, params: ListUsersParams) -> Result<Vec<User>> {
        let body = self.list_users(params).await?;
        models::decode(&body)
    }

    async fn get_user_decoded(&self, params: GetUserParams) -> Result<UserDetails> {
        let body = self.get_user(params).await?;
        models::decode(&body)
    }
}

/// [`UserRepository`] backed by a [`Client`].
#[derive(Clone)]
pub struct UserRepositoryImpl {
    client: Client,
}

impl UserRepositoryImpl {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn list_users(&self, params: ListUsersParams) -> Result<Vec<u8>> {
        self.client.call(&Endpoint::ListUsers(params)).await
    }

    async fn get_user(&self, params: GetUserParams) -> Result<Vec<u8>> {
        self.client.call(&Endpoint::GetUser(params)).await
    }
}
