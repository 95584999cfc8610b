use crate::error::IdentityError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    Accountant,
    User,
    Auditor,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Manager,
        UserRole::Accountant,
        UserRole::User,
        UserRole::Auditor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Accountant => "accountant",
            UserRole::User => "user",
            UserRole::Auditor => "auditor",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| IdentityError::UnknownRole(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            other => Err(IdentityError::UnknownStatus(other.to_string())),
        }
    }
}

/// Directory account
///
/// The password is accepted on input and kept for the seed export, but it is
/// never serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = "usr-001")]
    pub id: String,
    #[schema(example = "Juan Pérez")]
    pub name: String,
    #[schema(example = "juan.perez@usalesiana.edu.bo")]
    pub email: String,
    #[serde(default, skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub role: UserRole,
    #[schema(example = "Ingeniería de Sistemas")]
    pub department: String,
    #[schema(example = "La Paz")]
    pub sede: String,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: UserRole,
    pub department: String,
    pub sede: String,
    #[serde(default)]
    pub status: UserStatus,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
    pub sede: Option<String>,
    pub status: Option<UserStatus>,
}

/// Users table filter; empty sets leave a facet open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the name or e-mail
    pub q: Option<String>,
    pub roles: HashSet<UserRole>,
    pub sedes: HashSet<String>,
    pub statuses: HashSet<UserStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let q = q.to_lowercase();
            if !user.name.to_lowercase().contains(&q) && !user.email.to_lowercase().contains(&q) {
                return false;
            }
        }
        (self.roles.is_empty() || self.roles.contains(&user.role))
            && (self.sedes.is_empty() || self.sedes.contains(&user.sede))
            && (self.statuses.is_empty() || self.statuses.contains(&user.status))
    }
}

/// Split a `.`- or `,`-separated facet list, skipping blanks
pub fn facet_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(['.', ',']).map(str::trim).filter(|s| !s.is_empty())
}

pub fn parse_roles(raw: &str) -> Result<HashSet<UserRole>, IdentityError> {
    facet_values(raw).map(UserRole::from_str).collect()
}

pub fn parse_statuses(raw: &str) -> Result<HashSet<UserStatus>, IdentityError> {
    facet_values(raw).map(UserStatus::from_str).collect()
}
