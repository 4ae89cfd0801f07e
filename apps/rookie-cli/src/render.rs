//! Terminal output for replies and errors.

use std::fmt::Write as _;

use rookie_shared::dto::{CommentResponse, HomeResponse, PostDetailResponse, PostSummary};
use rookie_shared::{ErrorResponse, Response};

use crate::error::AppError;
use crate::handlers::{Body, Reply};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn from_flag(json: bool) -> Self {
        if json { Format::Json } else { Format::Text }
    }
}

/// Render a successful reply for stdout.
pub fn reply(reply: &Reply, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => {
            let envelope = match &reply.message {
                Some(message) => Response::ok_with_message(&reply.body, message.clone()),
                None => Response::ok(&reply.body),
            };
            serde_json::to_string_pretty(&envelope)
        }
        Format::Text => {
            let mut out = String::new();
            if let Some(message) = &reply.message {
                out.push_str(message);
                out.push('\n');
            }
            write_body(&mut out, &reply.body);
            Ok(out)
        }
    }
}

/// Render an error for stderr.
pub fn error(err: &AppError, format: Format) -> String {
    match format {
        Format::Json => {
            let body: ErrorResponse = err.to_response();
            serde_json::to_string_pretty(&body).unwrap_or_else(|_| err.to_string())
        }
        Format::Text => format!("error: {err}"),
    }
}

fn write_body(out: &mut String, body: &Body) {
    match body {
        Body::Empty => {}
        Body::Post(detail) => write_post(out, detail),
        Body::Posts(rows) => write_rows(out, rows),
        Body::Home(home) => write_home(out, home),
        Body::Comment(comment) => write_comment(out, comment),
        Body::Comments(comments) => {
            if comments.is_empty() {
                out.push_str("no comments yet\n");
            }
            for comment in comments {
                write_comment(out, comment);
            }
        }
        Body::Session(session) => {
            if let Some(name) = &session.nickname {
                let _ = writeln!(out, "nickname: {name}");
            }
        }
    }
}

fn write_post(out: &mut String, detail: &PostDetailResponse) {
    let post = &detail.post;
    let _ = writeln!(out, "#{} [{}] {}", post.id, post.category, post.title);
    let _ = writeln!(
        out,
        "by {} | {} | views {} | likes {}{}{}",
        post.author,
        post.created_at,
        post.views,
        post.likes,
        if post.liked { " (liked)" } else { "" },
        if post.bookmarked { " (bookmarked)" } else { "" },
    );
    if !post.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", hashtags(&post.tags));
    }
    match &post.attachment {
        Some(info) => {
            let _ = writeln!(out, "[image attached: {}, {} bytes]", info.mime, info.size);
        }
        None if post.has_image => out.push_str("[image attached]\n"),
        None => {}
    }
    out.push('\n');
    out.push_str(&post.content);
    out.push('\n');

    if !detail.comments.is_empty() {
        let _ = writeln!(out, "\ncomments ({})", detail.comments.len());
        for comment in &detail.comments {
            write_comment(out, comment);
        }
    }
}

fn write_rows(out: &mut String, rows: &[PostSummary]) {
    if rows.is_empty() {
        out.push_str("no posts\n");
        return;
    }
    for row in rows {
        let _ = write!(
            out,
            "#{:<4} [{}] {} - {} ({}, views {}, likes {})",
            row.id, row.category, row.title, row.author, row.created_at, row.views, row.likes
        );
        if !row.tags.is_empty() {
            let _ = write!(out, " {}", hashtags(&row.tags));
        }
        out.push('\n');
    }
}

fn write_home(out: &mut String, home: &HomeResponse) {
    let _ = writeln!(out, "{} posts", home.total_posts);
    for (heading, rows) in [
        ("latest", &home.latest),
        ("study", &home.recent_study),
        ("job", &home.recent_job),
    ] {
        let _ = writeln!(out, "\n== {heading} ==");
        write_rows(out, rows);
    }
    if !home.popular_tags.is_empty() {
        out.push_str("\n== popular tags ==\n");
        for tag in &home.popular_tags {
            let _ = writeln!(out, "#{} ({})", tag.tag, tag.count);
        }
    }
}

fn write_comment(out: &mut String, comment: &CommentResponse) {
    let _ = writeln!(
        out,
        "  [{}] {} ({}): {}",
        comment.id, comment.author, comment.created_at, comment.content
    );
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}
