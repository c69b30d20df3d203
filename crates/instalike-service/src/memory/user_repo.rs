//! In-memory user repository

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use instalike_core::traits::{RepoResult, RepositoryError, UserRepository};
use instalike_core::{Email, Entity, Nickname, Snowflake, SnowflakeGenerator, User};

/// Users keyed by id
pub struct InMemoryUserRepository {
    users: DashMap<Snowflake, User>,
    generator: Arc<SnowflakeGenerator>,
}

impl InMemoryUserRepository {
    pub fn new(generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            users: DashMap::new(),
            generator,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Reject a nickname or email already held by a different user
    fn check_unique(&self, user: &User) -> RepoResult<()> {
        for entry in &self.users {
            let other = entry.value();
            if other.id() == user.id() {
                continue;
            }
            if other.nickname() == user.nickname() {
                return Err(RepositoryError::Duplicate {
                    field: "nickname",
                    value: user.nickname().to_string(),
                });
            }
            if other.email() == user.email() {
                return Err(RepositoryError::Duplicate {
                    field: "email",
                    value: user.email().to_string(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_nickname(&self, nickname: &Nickname) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().nickname() == nickname)
            .map(|entry| entry.value().clone()))
    }

    async fn nickname_exists(&self, nickname: &Nickname) -> RepoResult<bool> {
        Ok(self
            .users
            .iter()
            .any(|entry| entry.value().nickname() == nickname))
    }

    async fn email_exists(&self, email: &Email) -> RepoResult<bool> {
        Ok(self.users.iter().any(|entry| entry.value().email() == email))
    }

    async fn save(&self, user: &mut User) -> RepoResult<Snowflake> {
        if user.is_transient() {
            self.check_unique(user)?;
            user.assign_id(self.generator.generate());
        } else {
            if !self.users.contains_key(&user.id()) {
                return Err(RepositoryError::Missing {
                    entity: "User",
                    id: user.id(),
                });
            }
            self.check_unique(user)?;
        }

        let id = user.id();
        self.users.insert(id, user.clone());
        tracing::debug!(user_id = %id, "User saved");
        Ok(id)
    }
}
