use super::{ApiClient, ApiError};
use crate::models::{LoginRequest, ProfileUpdate, RegisterRequest, User};

/// 用户接口:
///   POST /api/users
///   POST /api/users/login
///   PUT  /api/users/{id}
impl ApiClient {
    pub fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self.http().post(self.url("/api/users")).json(request).send()?;
        Self::check(response)?;
        Ok(())
    }

    pub fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let response = self
            .http()
            .post(self.url("/api/users/login"))
            .json(request)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }

    pub fn update_profile(&self, id: u64, update: &ProfileUpdate) -> Result<User, ApiError> {
        let response = self
            .http()
            .put(self.url(&format!("/api/users/{}", id)))
            .json(update)
            .send()?;
        Ok(Self::check(response)?.json()?)
    }
}
