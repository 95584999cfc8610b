use crate::{error::*, models::*, repository::*};
use logger_redacted::redacted_info;
use std::sync::Arc;
use tracing::info;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

const REFERENCE_USERS: [(&str, &str, &str, &str, UserRole, &str, &str, UserStatus); 10] = [
    ("usr-001", "Juan Pérez", "juan.perez@usalesiana.edu.bo", "user123", UserRole::User, "Ingeniería de Sistemas", "La Paz", UserStatus::Active),
    ("usr-002", "Maria Garcia", "maria.garcia@usalesiana.edu.bo", "manager123", UserRole::Manager, "Administración de Empresas", "Cochabamba", UserStatus::Active),
    ("usr-003", "Carlos Rodriguez", "carlos.rodriguez@usalesiana.edu.bo", "accountant123", UserRole::Accountant, "Contaduría Pública", "La Paz", UserStatus::Active),
    ("usr-004", "Ana López", "ana.lopez@usalesiana.edu.bo", "user123", UserRole::User, "Recursos Humanos", "Santa Cruz", UserStatus::Active),
    ("usr-005", "Luis Martinez", "luis.martinez@usalesiana.edu.bo", "user123", UserRole::User, "Psicología", "Cochabamba", UserStatus::Inactive),
    ("usr-006", "Sofia Hernandez", "sofia.hernandez@usalesiana.edu.bo", "auditor123", UserRole::Auditor, "Auditoría Interna", "La Paz", UserStatus::Active),
    ("usr-007", "Javier Gomez", "javier.gomez@usalesiana.edu.bo", "manager123", UserRole::Manager, "Ingeniería de Sistemas", "La Paz", UserStatus::Active),
    ("usr-008", "Laura Diaz", "laura.diaz@usalesiana.edu.bo", "accountant123", UserRole::Accountant, "Contaduría Pública", "La Paz", UserStatus::Inactive),
    ("usr-009", "Beymar Rodriguez", "beymar.rodriguez.59254@usalesiana.edu.bo", "admin2025", UserRole::Admin, "Ingeniería de Sistemas", "La Paz", UserStatus::Active),
    ("usr-010", "Admin Dos", "admin2@usalesiana.edu.bo", "admin2", UserRole::Admin, "Administración de Empresas", "Cochabamba", UserStatus::Active),
];

/// The ten seeded university accounts
pub fn reference_users() -> Vec<User> {
    REFERENCE_USERS
        .iter()
        .map(|&(id, name, email, password, role, department, sede, status)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            department: department.to_string(),
            sede: sede.to_string(),
            status,
        })
        .collect()
}

/// Account administration on top of a [`UserRepository`]
#[derive(Clone)]
pub struct UserDirectory {
    user_repo: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }

    /// In-memory directory holding [`reference_users`]
    pub fn with_reference_users() -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new(reference_users())))
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let users = self.user_repo.list_users().await?;
        Ok(users.into_iter().filter(|u| filter.matches(u)).collect())
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| IdentityError::UserNotFound(id.to_string()))
    }

    /// Look a user up by id, falling back to a case-sensitive name match
    pub async fn resolve(&self, key: &str) -> Result<Option<User>> {
        if let Some(user) = self.user_repo.find_by_id(key).await? {
            return Ok(Some(user));
        }
        let users = self.user_repo.list_users().await?;
        Ok(users.into_iter().find(|u| u.name == key))
    }

    pub async fn create(&self, mut request: CreateUserRequest) -> Result<User> {
        request.name = request.name.trim().to_string();
        request.email = request.email.trim().to_string();
        validate_name(&request.name)?;
        validate_email(&request.email)?;

        if self.user_repo.find_by_email(&request.email).await?.is_some() {
            return Err(IdentityError::EmailAlreadyInUse);
        }

        let user = self.user_repo.create_user(request).await?;
        redacted_info!("User {} created with email {}", user.id, user.email);
        Ok(user)
    }

    pub async fn update(&self, id: &str, patch: UpdateUserRequest) -> Result<User> {
        let mut user = self.get(id).await?;

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            validate_name(&name)?;
            user.name = name;
        }
        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            validate_email(&email)?;
            user.email = email;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(department) = patch.department {
            user.department = department;
        }
        if let Some(sede) = patch.sede {
            user.sede = sede;
        }
        if let Some(status) = patch.status {
            user.status = status;
        }

        let user = self.user_repo.update_user(&user).await?;
        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.user_repo.delete_user(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Err(IdentityError::Validation(format!(
            "name must be between {MIN_NAME_LEN} and {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.contains('@') => Ok(()),
        _ => Err(IdentityError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: UserRole::Accountant,
            department: "Derecho".to_string(),
            sede: "Santa Cruz".to_string(),
            status: UserStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_reference_users() {
        let directory = UserDirectory::with_reference_users();
        let all = directory.list(&UserFilter::default()).await.unwrap();
        assert_eq!(all.len(), 10);

        let inactive = directory
            .list(&UserFilter {
                statuses: [UserStatus::Inactive].into_iter().collect(),
                ..UserFilter::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = inactive.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["usr-005", "usr-008"]);
    }

    #[tokio::test]
    async fn test_create_continues_sequence() {
        let directory = UserDirectory::with_reference_users();
        let user = directory
            .create(request("  Rosa Quispe ", "rosa.quispe@usalesiana.edu.bo"))
            .await
            .unwrap();
        assert_eq!(user.id, "usr-011");
        assert_eq!(user.name, "Rosa Quispe");
        assert_eq!(directory.get("usr-011").await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_and_bad_input() {
        let directory = UserDirectory::with_reference_users();
        assert_eq!(
            directory
                .create(request("Otra Ana", "ANA.LOPEZ@usalesiana.edu.bo"))
                .await,
            Err(IdentityError::EmailAlreadyInUse)
        );
        assert_eq!(
            directory.create(request("Rosa", "rosa-at-usb")).await,
            Err(IdentityError::InvalidEmail)
        );
        assert!(matches!(
            directory.create(request("R", "r@usalesiana.edu.bo")).await,
            Err(IdentityError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_patch() {
        let directory = UserDirectory::with_reference_users();
        let updated = directory
            .update(
                "usr-005",
                UpdateUserRequest {
                    status: Some(UserStatus::Active),
                    role: Some(UserRole::Manager),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, UserStatus::Active);
        assert_eq!(updated.role, UserRole::Manager);
        assert_eq!(updated.name, "Luis Martinez");

        let taken = UpdateUserRequest {
            email: Some("juan.perez@usalesiana.edu.bo".to_string()),
            ..UpdateUserRequest::default()
        };
        assert_eq!(
            directory.update("usr-005", taken).await,
            Err(IdentityError::EmailAlreadyInUse)
        );
        assert_eq!(
            directory.update("usr-999", UpdateUserRequest::default()).await,
            Err(IdentityError::UserNotFound("usr-999".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delete_and_resolve() {
        let directory = UserDirectory::with_reference_users();
        assert_eq!(
            directory.resolve("Sofia Hernandez").await.unwrap().unwrap().id,
            "usr-006"
        );
        directory.delete("usr-006").await.unwrap();
        assert!(directory.resolve("usr-006").await.unwrap().is_none());
        assert_eq!(
            directory.delete("usr-006").await,
            Err(IdentityError::UserNotFound("usr-006".to_string()))
        );
    }
}
