//! 会话状态机
//!
//! `Unauthenticated` (初始) -> `Loading` -> `Authenticated(User)`，
//! 登出或当前用户重新获取失败时回到 `Unauthenticated`。

use crate::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Loading,
    Authenticated(User),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|u| u.is_admin)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

impl From<Option<User>> for SessionState {
    fn from(user: Option<User>) -> Self {
        user.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: "1".into(),
            email: "a@b.c".into(),
            full_name: "A".into(),
            is_active: true,
            is_admin,
            created_at: String::new(),
            updated_at: String::new(),
            last_login: None,
        }
    }

    #[test]
    fn test_default_is_unauthenticated() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert!(!state.is_loading());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_admin_flag_follows_user() {
        assert!(SessionState::Authenticated(user(true)).is_admin());
        assert!(!SessionState::Authenticated(user(false)).is_admin());
        assert!(!SessionState::Loading.is_admin());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(SessionState::from(None), SessionState::Unauthenticated);
        assert!(SessionState::from(Some(user(false))).is_authenticated());
    }
}
