use rookie_core::domain::validate_nickname;
use rookie_shared::dto::SessionResponse;

use super::{Body, Reply};
use crate::error::AppResult;
use crate::state::AppState;

pub fn login(state: &mut AppState, nickname: &str) -> AppResult<Reply> {
    let nickname = validate_nickname(nickname)?;
    state.session.login(&nickname);
    Ok(Reply::message(format!("logged in as {nickname}")))
}

pub fn logout(state: &mut AppState) -> Reply {
    match state.session.current_user().map(str::to_owned) {
        Some(nickname) => {
            state.session.logout();
            Reply::message(format!("{nickname} logged out"))
        }
        None => Reply::message("not logged in"),
    }
}

pub fn whoami(state: &AppState) -> Reply {
    let nickname = state.session.current_user().map(str::to_owned);
    let message = match &nickname {
        Some(name) => format!("logged in as {name}"),
        None => "not logged in".to_string(),
    };
    Reply::body(Body::Session(SessionResponse { nickname })).with_message(message)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rookie_infra::InMemoryStorage;

    use super::*;
    use crate::config::AppConfig;
    use crate::error::AppError;

    fn state() -> AppState {
        AppState::with_storage(Arc::new(InMemoryStorage::new()), &AppConfig::default())
    }

    #[test]
    fn test_login_trims_nickname() {
        let mut state = state();
        let reply = login(&mut state, "  kim ").unwrap();
        assert_eq!(reply.message.as_deref(), Some("logged in as kim"));
        assert_eq!(state.session.current_user(), Some("kim"));
    }

    #[test]
    fn test_blank_login_is_rejected_and_keeps_session() {
        let mut state = state();
        login(&mut state, "kim").unwrap();
        assert!(matches!(login(&mut state, "   "), Err(AppError::BadRequest(_))));
        assert_eq!(state.session.current_user(), Some("kim"));
    }

    #[test]
    fn test_logout_and_whoami() {
        let mut state = state();
        login(&mut state, "kim").unwrap();
        assert_eq!(logout(&mut state).message.as_deref(), Some("kim logged out"));
        assert_eq!(logout(&mut state).message.as_deref(), Some("not logged in"));

        match whoami(&state).body {
            Body::Session(session) => assert_eq!(session.nickname, None),
            other => panic!("unexpected body {other:?}"),
        }
    }
}
