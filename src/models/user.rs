//! User identity and auth payloads exchanged with the API.

use super::ids::{MissingId, WireId};
use serde::{Deserialize, Serialize};

/// Authenticated user's profile, as returned by `/api/users/*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireIdentity")]
pub struct Identity {
    /// User ID (string or numeric on the wire, `_id` or `id`)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (not every endpoint echoes it)
    pub email: Option<String>,
    /// Whether the user may create events
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Deserialize)]
struct WireIdentity {
    #[serde(flatten)]
    id: WireId,
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "isAdmin", default)]
    is_admin: bool,
}

impl TryFrom<WireIdentity> for Identity {
    type Error = MissingId;

    fn try_from(wire: WireIdentity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: wire.id.resolve()?,
            name: wire.name,
            email: wire.email,
            is_admin: wire.is_admin,
        })
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Registration request body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

/// Response of the make-admin endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct MakeAdminResponse {
    pub user: Identity,
    #[serde(default)]
    pub message: String,
}
