use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Listener, Listeners, SubscriptionId, load_or, persist};
use crate::domain::{Post, User};
use crate::ports::StatePersistence;

const STORE: &str = "user-store";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub current_user: Option<User>,
}

/// Session store - holds the single logged-in nickname, if any.
pub struct SessionStore {
    state: SessionState,
    persistence: Arc<dyn StatePersistence<SessionState>>,
    listeners: Listeners<SessionState>,
}

impl SessionStore {
    pub fn open(persistence: Arc<dyn StatePersistence<SessionState>>) -> Self {
        let state = load_or(&persistence, STORE, &SessionState::default());
        Self {
            state,
            persistence,
            listeners: Listeners::new(),
        }
    }

    pub fn current_user(&self) -> Option<&str> {
        self.state.current_user.as_ref().map(|u| u.nickname.as_str())
    }

    /// Log in as `nickname`. Blank nicknames are ignored.
    pub fn login(&mut self, nickname: &str) -> bool {
        let Some(user) = User::from_nickname(nickname) else {
            tracing::debug!("Login ignored, blank nickname");
            return false;
        };

        tracing::info!(nickname = %user.nickname, "Logged in");
        self.state.current_user = Some(user);
        self.commit();
        true
    }

    pub fn logout(&mut self) {
        if self.state.current_user.take().is_some() {
            tracing::info!("Logged out");
            self.commit();
        }
    }

    /// Name stamped on new posts: the nickname, or `anonymous` when logged out.
    pub fn author_label(&self, anonymous: &str) -> String {
        self.current_user().unwrap_or(anonymous).to_string()
    }

    /// Whether the current session may edit or delete `post`.
    pub fn is_author(&self, post: &Post) -> bool {
        self.current_user() == Some(post.author.as_str())
    }

    pub fn subscribe(&mut self, listener: Listener<SessionState>) -> SubscriptionId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn reset(&mut self) {
        self.state = SessionState::default();
        self.commit();
    }

    fn commit(&self) {
        persist(&self.persistence, STORE, &self.state);
        self.listeners.notify(&self.state);
    }
}
