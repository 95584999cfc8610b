use crate::{error::*, models::*};
use async_trait::async_trait;
use parking_lot::RwLock;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Store a new account under the next `usr-NNN` id
    async fn create_user(&self, request: CreateUserRequest) -> Result<User>;
    async fn update_user(&self, user: &User) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct Store {
    users: Vec<User>,
    next_id: u32,
}

/// In-memory implementation used by the server and tests
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| u.id.strip_prefix("usr-"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            store: RwLock::new(Store { users, next_id }),
        }
    }
}

pub fn user_id(n: u32) -> String {
    format!("usr-{n:03}")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.read().users.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        Ok(self.store.read().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .store
            .read()
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let mut store = self.store.write();
        if store.users.iter().any(|u| u.email.eq_ignore_ascii_case(&request.email)) {
            return Err(IdentityError::EmailAlreadyInUse);
        }
        let user = User {
            id: user_id(store.next_id),
            name: request.name,
            email: request.email,
            password: request.password,
            role: request.role,
            department: request.department,
            sede: request.sede,
            status: request.status,
        };
        store.next_id += 1;
        store.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut store = self.store.write();
        if store
            .users
            .iter()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(IdentityError::EmailAlreadyInUse);
        }
        let slot = store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| IdentityError::UserNotFound(user.id.clone()))?;
        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut store = self.store.write();
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        if store.users.len() == before {
            return Err(IdentityError::UserNotFound(id.to_string()));
        }
        Ok(())
    }
}
