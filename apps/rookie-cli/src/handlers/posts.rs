//! Post handlers: write, edit, delete, show, like, bookmark and listings.

use rookie_core::DomainError;
use rookie_core::domain::{NewPost, PostId, PostPatch, TagList};
use rookie_core::listing::{HomeSummary, PostFilter};
use rookie_infra::image;
use rookie_shared::dto::{
    AttachmentInfo, CommentResponse, HomeResponse, PostDetailResponse, PostFlags, PostResponse,
    PostSummary,
};

use super::{Body, Reply};
use crate::cli::{EditArgs, ListArgs, WriteArgs};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn write(state: &mut AppState, args: WriteArgs) -> AppResult<Reply> {
    let tags = TagList::from_inputs(&args.tags)?;
    let mut data = NewPost::new(args.title, args.content, args.category).with_tags(tags);
    data.validate()?;

    if let Some(path) = &args.image {
        data = data.with_image(image::data_uri_from_path(path)?);
    }

    let author = state.session.author_label(&state.anonymous_author);
    let post = state.posts.add_post(data, author);

    Ok(Reply::body(detail(state, post.id)?).with_message(format!("post {} created", post.id)))
}

pub fn edit(state: &mut AppState, args: EditArgs) -> AppResult<Reply> {
    let id = args.id;
    authorize(state, id)?;

    let mut patch = PostPatch {
        title: args.title,
        content: args.content,
        category: args.category,
        ..PostPatch::default()
    };
    if args.clear_tags {
        patch.tags = Some(Vec::new());
    } else if !args.tags.is_empty() {
        patch = patch.with_tags(TagList::from_inputs(&args.tags)?);
    }
    if args.clear_image {
        patch.image_url = Some(None);
    } else if let Some(path) = &args.image {
        patch.image_url = Some(Some(image::data_uri_from_path(path)?));
    }

    if patch.is_empty() {
        return Err(AppError::BadRequest("nothing to update".to_string()));
    }
    patch.validate()?;

    state.posts.update_post(id, patch);
    Ok(Reply::body(detail(state, id)?).with_message(format!("post {id} updated")))
}

pub fn delete(state: &mut AppState, id: PostId) -> AppResult<Reply> {
    authorize(state, id)?;
    state.delete_post(id);
    Ok(Reply::message(format!("post {id} deleted")))
}

/// Show a post, counting one view for this session.
pub fn show(state: &mut AppState, id: PostId) -> AppResult<Reply> {
    ensure_exists(state, id)?;
    state.posts.increase_views(id);
    Ok(Reply::body(detail(state, id)?))
}

pub fn like(state: &mut AppState, id: PostId) -> AppResult<Reply> {
    ensure_exists(state, id)?;
    let message = if state.posts.increase_likes(id) {
        format!("liked post {id}")
    } else {
        format!("post {id} is already liked")
    };
    Ok(Reply::body(detail(state, id)?).with_message(message))
}

pub fn bookmark(state: &mut AppState, id: PostId) -> AppResult<Reply> {
    match state.posts.toggle_bookmark(id) {
        None => Err(AppError::post_not_found(id)),
        Some(true) => Ok(Reply::message(format!("post {id} bookmarked"))),
        Some(false) => Ok(Reply::message(format!("bookmark on post {id} removed"))),
    }
}

pub fn bookmarks(state: &AppState) -> Reply {
    let rows = state
        .posts
        .bookmarked_posts()
        .iter()
        .map(PostSummary::from)
        .collect();
    Reply::body(Body::Posts(rows))
}

pub fn list(state: &AppState, args: ListArgs) -> Reply {
    let filter = PostFilter::new()
        .with_category(args.category)
        .with_keyword(args.search.unwrap_or_default())
        .sorted_by(args.sort);

    let rows = state
        .posts
        .list_posts(&filter)
        .iter()
        .map(PostSummary::from)
        .collect();
    Reply::body(Body::Posts(rows))
}

pub fn home(state: &AppState) -> Reply {
    let summary = HomeSummary::from_posts(state.posts.posts());
    Reply::body(Body::Home(HomeResponse::from(&summary)))
}

fn ensure_exists(state: &AppState, id: PostId) -> AppResult<()> {
    state
        .posts
        .get(id)
        .map(|_| ())
        .ok_or_else(|| AppError::post_not_found(id))
}

/// Only the post's author may edit or delete it.
fn authorize(state: &AppState, id: PostId) -> AppResult<()> {
    let post = state.posts.get(id).ok_or_else(|| AppError::post_not_found(id))?;
    if !state.session.is_author(post) {
        return Err(DomainError::Unauthorized.into());
    }
    Ok(())
}

fn detail(state: &AppState, id: PostId) -> AppResult<Body> {
    let post = state.posts.get(id).ok_or_else(|| AppError::post_not_found(id))?;
    let flags = PostFlags {
        liked: state.posts.is_liked(id),
        bookmarked: state.posts.is_bookmarked(id),
        can_edit: state.session.is_author(post),
    };
    let attachment = post
        .image_url
        .as_deref()
        .and_then(image::DataUri::parse)
        .map(|uri| AttachmentInfo {
            mime: uri.mime,
            size: uri.bytes.len(),
        });
    let comments = state
        .comments
        .comments_for(id)
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(Body::Post(Box::new(PostDetailResponse {
        post: PostResponse::new(post, flags).with_attachment(attachment),
        comments,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rookie_core::domain::Category;
    use rookie_core::listing::{CategoryFilter, SortKey};
    use rookie_infra::InMemoryStorage;

    use super::*;
    use crate::config::AppConfig;

    fn state() -> AppState {
        let config = AppConfig {
            seed_welcome_post: false,
            ..AppConfig::default()
        };
        AppState::with_storage(Arc::new(InMemoryStorage::new()), &config)
    }

    fn write_args(title: &str, tags: &[&str]) -> WriteArgs {
        WriteArgs {
            title: title.to_string(),
            content: "content".to_string(),
            category: Category::Study,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            image: None,
        }
    }

    fn edit_args(id: PostId) -> EditArgs {
        EditArgs {
            id,
            title: None,
            content: None,
            category: None,
            tags: Vec::new(),
            clear_tags: false,
            image: None,
            clear_image: false,
        }
    }

    fn post_body(reply: &Reply) -> &PostDetailResponse {
        match &reply.body {
            Body::Post(detail) => detail.as_ref(),
            other => panic!("expected a post body, got {other:?}"),
        }
    }

    #[test]
    fn test_write_stamps_anonymous_author_when_logged_out() {
        let mut state = state();
        let reply = write(&mut state, write_args("hello", &["a"])).unwrap();
        assert_eq!(post_body(&reply).post.author, "anonymous");
        assert!(!post_body(&reply).post.can_edit);
    }

    #[test]
    fn test_write_rejects_duplicate_tags_and_blank_title() {
        let mut state = state();
        assert!(matches!(
            write(&mut state, write_args("t", &["a", "a"])),
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            write(&mut state, write_args("  ", &[])),
            Err(AppError::BadRequest(_))
        ));
        assert!(state.posts.posts().is_empty());
    }

    #[test]
    fn test_show_counts_one_view_per_session() {
        let mut state = state();
        write(&mut state, write_args("t", &[])).unwrap();

        show(&mut state, 1).unwrap();
        let reply = show(&mut state, 1).unwrap();
        assert_eq!(post_body(&reply).post.views, 1);
        assert!(matches!(show(&mut state, 9), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_second_like_reports_already_liked() {
        let mut state = state();
        write(&mut state, write_args("t", &[])).unwrap();

        like(&mut state, 1).unwrap();
        let reply = like(&mut state, 1).unwrap();
        assert_eq!(reply.message.as_deref(), Some("post 1 is already liked"));
        assert_eq!(post_body(&reply).post.likes, 1);
        assert!(post_body(&reply).post.liked);
    }

    #[test]
    fn test_edit_and_delete_require_author() {
        let mut state = state();
        state.session.login("kim");
        write(&mut state, write_args("mine", &[])).unwrap();
        state.session.login("lee");

        let mut args = edit_args(1);
        args.title = Some("stolen".to_string());
        assert!(matches!(edit(&mut state, args), Err(AppError::Forbidden(_))));
        assert!(matches!(delete(&mut state, 1), Err(AppError::Forbidden(_))));

        state.session.login("kim");
        let mut args = edit_args(1);
        args.title = Some("updated".to_string());
        args.clear_tags = true;
        let reply = edit(&mut state, args).unwrap();
        assert_eq!(post_body(&reply).post.title, "updated");

        delete(&mut state, 1).unwrap();
        assert!(state.posts.get(1).is_none());
    }

    #[test]
    fn test_empty_edit_is_rejected() {
        let mut state = state();
        state.session.login("kim");
        write(&mut state, write_args("t", &[])).unwrap();
        assert!(matches!(edit(&mut state, edit_args(1)), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_bookmark_toggle_and_listing() {
        let mut state = state();
        write(&mut state, write_args("first", &[])).unwrap();
        write(&mut state, write_args("second", &[])).unwrap();

        bookmark(&mut state, 1).unwrap();
        match bookmarks(&state).body {
            Body::Posts(rows) => assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]),
            other => panic!("unexpected body {other:?}"),
        }
        bookmark(&mut state, 1).unwrap();
        assert!(!state.posts.is_bookmarked(1));
        assert!(matches!(bookmark(&mut state, 5), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_list_applies_search() {
        let mut state = state();
        write(&mut state, write_args("Rust ownership", &["borrowck"])).unwrap();
        write(&mut state, write_args("CSS grid", &[])).unwrap();

        let reply = list(
            &state,
            ListArgs {
                category: CategoryFilter::All,
                search: Some("BORROW".to_string()),
                sort: SortKey::Latest,
            },
        );
        match reply.body {
            Body::Posts(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].title, "Rust ownership");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_write_with_image_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let mut state = state();
        let mut args = write_args("with image", &[]);
        args.image = Some(path);
        let reply = write(&mut state, args).unwrap();

        assert_eq!(
            post_body(&reply).post.attachment,
            Some(AttachmentInfo {
                mime: "image/png".to_string(),
                size: 4,
            })
        );
        assert_eq!(
            state.posts.get(1).unwrap().image_url.as_deref(),
            Some("data:image/png;base64,iVBORw==")
        );
    }
}
