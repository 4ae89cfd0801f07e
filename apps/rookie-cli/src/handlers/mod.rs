//! Command handlers - thin calls into the stores.

mod comments;
mod posts;
mod session;

use serde::Serialize;

use rookie_shared::dto::{
    CommentResponse, HomeResponse, PostDetailResponse, PostSummary, SessionResponse,
};

use crate::cli::{Command, CommentCommand};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// What a handler produced: an optional message and a payload.
#[derive(Debug)]
pub struct Reply {
    pub message: Option<String>,
    pub body: Body,
}

impl Reply {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            body: Body::Empty,
        }
    }

    pub fn body(body: Body) -> Self {
        Self {
            message: None,
            body,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Body {
    Empty,
    Post(Box<PostDetailResponse>),
    Posts(Vec<PostSummary>),
    Home(HomeResponse),
    Comment(CommentResponse),
    Comments(Vec<CommentResponse>),
    Session(SessionResponse),
}

/// Route a parsed command to its handler.
pub fn dispatch(state: &mut AppState, command: Command) -> AppResult<Reply> {
    match command {
        Command::Login { nickname } => session::login(state, &nickname),
        Command::Logout => Ok(session::logout(state)),
        Command::Whoami => Ok(session::whoami(state)),
        Command::Write(args) => posts::write(state, args),
        Command::Edit(args) => posts::edit(state, args),
        Command::Delete { id } => posts::delete(state, id),
        Command::Show { id } => posts::show(state, id),
        Command::Like { id } => posts::like(state, id),
        Command::Bookmark { id } => posts::bookmark(state, id),
        Command::Bookmarks => Ok(posts::bookmarks(state)),
        Command::List(args) => Ok(posts::list(state, args)),
        Command::Home => Ok(posts::home(state)),
        Command::Comment(CommentCommand::Add { post_id, content }) => {
            comments::add(state, post_id, &content)
        }
        Command::Comment(CommentCommand::List { post_id }) => comments::list(state, post_id),
        Command::Comment(CommentCommand::Delete { id }) => comments::delete(state, id),
        Command::Reset { yes } => {
            if !yes {
                return Err(AppError::BadRequest(
                    "reset wipes every post, pass --yes to confirm".to_string(),
                ));
            }
            state.reset();
            Ok(Reply::message("all stores reset"))
        }
    }
}
