//! CLI Tooling
//!
//! Command-line interface over the comment thread core. Each invocation
//! opens the store, runs one operation against the selected page's thread,
//! and prints the result.

use crate::config::{derive_page_id, ThreadConfig};
use crate::error::ThreadError;
use crate::session::CommentSession;
use crate::store::{SledThreadStore, ThreadStore};
use crate::tree::{CommentForest, CommentNode};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use tracing::info;

/// Replytree CLI - locally persisted comment threads
#[derive(Parser)]
#[command(name = "replytree")]
#[command(about = "Locally persisted, nested comment threads for static pages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Page path the thread belongs to (e.g. /posts/hello.html)
    #[arg(long, default_value = "index")]
    pub page: String,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Database directory (overrides config and platform default)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Site-author name for highlighting (overrides config)
    #[arg(long)]
    pub site_author: Option<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Post a top-level comment
    Post {
        /// Comment body
        content: String,
        /// Display name (omit for Anonymous)
        #[arg(long)]
        name: Option<String>,
        /// Post as Anonymous even if a name is given
        #[arg(long)]
        anonymous: bool,
    },
    /// Reply to an existing comment at any depth
    Reply {
        /// Id of the comment to reply to
        parent: String,
        /// Reply body
        content: String,
        /// Display name (omit for Anonymous)
        #[arg(long)]
        name: Option<String>,
        /// Post as Anonymous even if a name is given
        #[arg(long)]
        anonymous: bool,
    },
    /// Show the page's thread
    Show {
        /// Output format (text, html or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List pages with stored threads
    Pages,
}

/// Resolved configuration plus the opened store.
pub struct CliContext {
    config: ThreadConfig,
    page_id: String,
    store: SledThreadStore,
}

impl CliContext {
    pub fn new(cli: &Cli) -> Result<Self, ThreadError> {
        let mut config = match &cli.config {
            Some(path) => ThreadConfig::load(path)?,
            None => ThreadConfig::default(),
        };
        if let Some(dir) = &cli.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(author) = &cli.site_author {
            config.site_author = author.clone();
        }

        let data_dir = config.resolve_data_dir()?;
        let store = SledThreadStore::open(&data_dir, &config.store_key)?;
        let page_id = derive_page_id(&cli.page);

        Ok(CliContext {
            config,
            page_id,
            store,
        })
    }

    pub fn execute(self, command: &Commands) -> Result<String, ThreadError> {
        match command {
            Commands::Post {
                content,
                name,
                anonymous,
            } => {
                let mut session =
                    CommentSession::open(self.store, &self.page_id, &self.config.site_author)?;
                let form = session.top_form_mut();
                form.name = name.clone().unwrap_or_default();
                form.content = content.clone();
                form.set_anonymous(*anonymous);
                let outcome = session.submit_top_level()?;
                info!(page_id = self.page_id.as_str(), id = outcome.id.as_str(), "Posted comment");
                Ok(post_summary("Posted comment", &outcome.id, outcome.persisted))
            }
            Commands::Reply {
                parent,
                content,
                name,
                anonymous,
            } => {
                let mut session =
                    CommentSession::open(self.store, &self.page_id, &self.config.site_author)?;
                session.toggle_reply_form(parent);
                if let Some(draft) = session.reply_draft_mut(parent) {
                    draft.name = name.clone().unwrap_or_default();
                    draft.content = content.clone();
                    draft.set_anonymous(*anonymous);
                }
                let outcome = session.submit_reply(parent)?;
                info!(page_id = self.page_id.as_str(), id = outcome.id.as_str(), "Posted reply");
                Ok(post_summary("Posted reply", &outcome.id, outcome.persisted))
            }
            Commands::Show { format } => {
                let session =
                    CommentSession::open(self.store, &self.page_id, &self.config.site_author)?;
                match format.as_str() {
                    "html" => Ok(session.render().to_html()),
                    "json" => serde_json::to_string_pretty(session.comments())
                        .map_err(|e| ThreadError::Config(format!("Failed to encode thread: {}", e))),
                    "text" => Ok(format_thread_text(session.comments())),
                    other => Err(ThreadError::Config(format!(
                        "Unknown output format: {}",
                        other
                    ))),
                }
            }
            Commands::Pages => {
                let store = self.store.load_store()?;
                if store.is_empty() {
                    return Ok("No stored threads".to_string());
                }
                Ok(store
                    .keys()
                    .map(|page| page.as_str())
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }
    }
}

fn post_summary(verb: &str, id: &str, persisted: bool) -> String {
    if persisted {
        format!("{} {}", verb, id)
    } else {
        format!("{} {} (warning: not persisted, store write failed)", verb, id)
    }
}

fn format_thread_text(forest: &CommentForest) -> String {
    if forest.is_empty() {
        return crate::render::NO_COMMENTS_PLACEHOLDER.to_string();
    }
    let mut out = String::new();
    for node in forest {
        format_comment_text(node, 0, &mut out);
    }
    out.trim_end().to_string()
}

fn format_comment_text(node: &CommentNode, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let author = if node.is_author {
        node.author.green().bold().to_string()
    } else {
        node.author.bold().to_string()
    };
    let date = node.created_at.format("%b %-d, %Y, %I:%M %p");
    out.push_str(&format!("{}{} ({}) [{}]\n", indent, author, date, node.id));
    for line in node.content.lines() {
        out.push_str(&format!("{}  {}\n", indent, line));
    }
    out.push('\n');
    for child in &node.children {
        format_comment_text(child, depth + 1, out);
    }
}
