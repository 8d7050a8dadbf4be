use std::sync::Arc;

use crate::{TableConfig, User};

/// The fetched result set plus the configuration it was fetched under.
///
/// Replaced wholesale on every successful fetch; users are shared behind an
/// `Arc` so snapshots are cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStore {
    users: Arc<[User]>,
    config: TableConfig,
}

/// What `UserStore::read` hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    pub users: Arc<[User]>,
    pub config: TableConfig,
}

impl UserStore {
    /// Overwrite users and configuration together. Never rejects input.
    pub fn replace(&mut self, users: Vec<User>, config: TableConfig) {
        *self = Self {
            users: users.into(),
            config,
        };
    }

    pub fn read(&self) -> StoreSnapshot {
        StoreSnapshot {
            users: Arc::clone(&self.users),
            config: self.config,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortKey;

    #[test]
    fn replace_overwrites_users_and_config() {
        let mut store = UserStore::default();
        assert!(store.is_empty());

        let config = TableConfig {
            page: 2,
            rows_per_page: 1,
            total_pages: 2,
            sort: SortKey::UsernameDesc,
        };
        let users = vec![
            User {
                username: "a".to_owned(),
                ..User::default()
            },
            User {
                username: "b".to_owned(),
                ..User::default()
            },
        ];
        store.replace(users.clone(), config);

        let snapshot = store.read();
        assert_eq!(&*snapshot.users, users.as_slice());
        assert_eq!(snapshot.config, config);

        store.replace(Vec::new(), TableConfig::default());
        assert!(store.is_empty());
        // earlier snapshots are unaffected
        assert_eq!(snapshot.users.len(), 2);
    }
}
