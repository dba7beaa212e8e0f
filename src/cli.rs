use clap::{Args, Parser, Subcommand};

use crate::models::OrderMode;

#[derive(Parser, Debug)]
#[command(about = concat!(env!("CARGO_CRATE_NAME"), " - command line client for the PostaME social feed"))]
pub struct Flags {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create an account, then log in with it
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create an API key and store it in the config file
    ApiKey {
        #[arg(long, default_value = "postame")]
        name: String,
    },
    /// Print the feed
    Feed(ViewArgs),
    /// Search posts on the server
    Search { text: String },
    /// Show one post
    Show { id: u64 },
    /// Create a post
    Create(PostArgs),
    /// Replace the content of one of your posts
    Update {
        id: u64,
        #[command(flatten)]
        post: PostArgs,
    },
    /// Delete one of your posts
    Delete { id: u64 },
    /// Show a profile and its posts (yours by default)
    Profile {
        name: Option<String>,
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Browse the feed interactively
    Tui(ViewArgs),
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ViewArgs {
    /// Only posts whose title or body contains this text
    #[arg(long, short, default_value = "")]
    pub query: String,
    #[arg(long, short, value_enum, default_value_t = OrderMode::None)]
    pub order: OrderMode,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct PostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, conflicts_with = "editor")]
    pub body: Option<String>,
    #[arg(long)]
    pub media_url: Option<String>,
    /// Write the body in $EDITOR
    #[arg(long)]
    pub editor: bool,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit on error.
    pub fn from_args() -> Self {
        Self::parse()
    }
}
