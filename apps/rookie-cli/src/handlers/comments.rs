use rookie_core::domain::{CommentId, CommentInput, PostId};
use rookie_shared::dto::CommentResponse;

use super::{Body, Reply};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn add(state: &mut AppState, post_id: PostId, content: &str) -> AppResult<Reply> {
    if state.posts.get(post_id).is_none() {
        return Err(AppError::post_not_found(post_id));
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("comment must not be empty".to_string()));
    }

    let author = state.session.author_label(&state.anonymous_author);
    let comment = state
        .comments
        .add_comment(CommentInput::new(post_id, author, content));

    Ok(Reply::body(Body::Comment(CommentResponse::from(&comment)))
        .with_message(format!("comment {} added to post {post_id}", comment.id)))
}

pub fn list(state: &AppState, post_id: PostId) -> AppResult<Reply> {
    if state.posts.get(post_id).is_none() {
        return Err(AppError::post_not_found(post_id));
    }
    let rows = state
        .comments
        .comments_for(post_id)
        .into_iter()
        .map(CommentResponse::from)
        .collect();
    Ok(Reply::body(Body::Comments(rows)))
}

pub fn delete(state: &mut AppState, id: CommentId) -> AppResult<Reply> {
    if !state.comments.delete_comment(id) {
        return Err(AppError::NotFound(format!("comment {id} does not exist")));
    }
    Ok(Reply::message(format!("comment {id} deleted")))
}
