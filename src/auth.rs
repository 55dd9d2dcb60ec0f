// src/auth.rs
//! Login and registration against the external credential service. The
//! session token itself is server business; the client only keeps the
//! returned user id and the chosen role.

use serde::Serialize;
use tracing::info;

use crate::api::MarketplaceApi;
use crate::errors::ClientError;
use crate::session::{Identity, Role};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Exchange credentials for an [`Identity`]. The caller persists it through
/// the session store; business logic never reads ambient storage.
pub async fn login(
    api: &impl MarketplaceApi,
    credentials: &Credentials,
) -> Result<Identity, ClientError> {
    let actor_id = api.login(credentials).await?;
    info!("Logged in as {} ({})", actor_id, credentials.role);

    Ok(Identity {
        actor_id,
        role: credentials.role,
    })
}

pub async fn register(
    api: &impl MarketplaceApi,
    credentials: &Credentials,
) -> Result<(), ClientError> {
    api.register(credentials).await?;
    info!("Registered {} as {}", credentials.email, credentials.role);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockApi;

    fn credentials(role: Role) -> Credentials {
        Credentials {
            email: "asha@example.com".to_string(),
            password: "secret".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_login_builds_identity_from_response() {
        let api = MockApi::default();
        *api.login_result.lock().unwrap() = Some(Ok("c42".to_string()));

        let identity = login(&api, &credentials(Role::Candidate)).await.unwrap();
        assert_eq!(identity.actor_id, "c42");
        assert_eq!(identity.role, Role::Candidate);
    }

    #[tokio::test]
    async fn test_login_surfaces_server_reason() {
        let api = MockApi::default();
        *api.login_result.lock().unwrap() =
            Some(Err(ClientError::Validation("Invalid credentials".into())));

        let err = login(&api, &credentials(Role::Candidate)).await.unwrap_err();
        assert_eq!(err, ClientError::Validation("Invalid credentials".into()));
    }

    #[test]
    fn test_credentials_wire_format() {
        let wire = serde_json::to_value(credentials(Role::Organization)).unwrap();
        assert_eq!(wire["email"], "asha@example.com");
        assert_eq!(wire["role"], "organization");
    }
}
