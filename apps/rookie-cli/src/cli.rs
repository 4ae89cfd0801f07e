//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use rookie_core::domain::{Category, CommentId, PostId};
use rookie_core::listing::{CategoryFilter, SortKey};

#[derive(Debug, Parser)]
#[command(name = "rookie", version, about = "A tiny local blog for study notes and job hunting tips")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the store files (overrides ROOKIE_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the session nickname
    Login { nickname: String },
    /// Clear the session nickname
    Logout,
    /// Show the session nickname
    Whoami,
    /// Write a new post
    Write(WriteArgs),
    /// Edit one of your posts
    Edit(EditArgs),
    /// Delete one of your posts
    Delete { id: PostId },
    /// Show a post and count a view
    Show { id: PostId },
    /// Like a post (once per session)
    Like { id: PostId },
    /// Toggle the bookmark on a post
    Bookmark { id: PostId },
    /// List bookmarked posts
    Bookmarks,
    /// List posts
    List(ListArgs),
    /// Latest posts and popular tags
    Home,
    /// Manage comments
    #[command(subcommand)]
    Comment(CommentCommand),
    /// Restore every store to its initial state
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub content: String,

    #[arg(long, default_value = "study")]
    pub category: Category,

    /// Tag to attach, repeatable
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Image file to attach
    #[arg(long)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: PostId,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub content: Option<String>,

    #[arg(long)]
    pub category: Option<Category>,

    /// Replace the tags, repeatable
    #[arg(long = "tag", conflicts_with = "clear_tags")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub clear_tags: bool,

    /// Replace the attached image
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<PathBuf>,

    #[arg(long)]
    pub clear_image: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value = "all")]
    pub category: CategoryFilter,

    /// Case-insensitive search over title, content and tags
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long, default_value = "latest")]
    pub sort: SortKey,
}

#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// Comment on a post
    Add { post_id: PostId, content: String },
    /// List comments on a post
    List { post_id: PostId },
    /// Delete a comment
    Delete { id: CommentId },
}
