use std::cmp::Reverse;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::post::Post;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    None,
    Title,
    Newest,
    Oldest,
}

impl OrderMode {
    /// Next mode in the order the feed view cycles through.
    pub fn cycle(self) -> Self {
        match self {
            OrderMode::None => OrderMode::Title,
            OrderMode::Title => OrderMode::Newest,
            OrderMode::Newest => OrderMode::Oldest,
            OrderMode::Oldest => OrderMode::None,
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderMode::None => "none",
            OrderMode::Title => "title",
            OrderMode::Newest => "newest",
            OrderMode::Oldest => "oldest",
        };
        f.write_str(name)
    }
}

pub fn matches_query(post: &Post, query: &str) -> bool {
    let needle = query.to_lowercase();
    post.title_or_empty().to_lowercase().contains(&needle)
        || post.body_or_empty().to_lowercase().contains(&needle)
}

/// Keep the posts matching `query`, then order them. The sort is stable, so
/// posts that compare equal stay in their input order.
pub fn filter_and_sort(posts: &[Post], query: &str, order: OrderMode) -> Vec<Post> {
    let mut view: Vec<Post> = posts
        .iter()
        .filter(|post| matches_query(post, query))
        .cloned()
        .collect();

    match order {
        OrderMode::None => {}
        OrderMode::Title => view.sort_by_cached_key(|post| post.title_or_empty().to_lowercase()),
        // Unparseable timestamps are `None` and order before every valid one.
        OrderMode::Newest => view.sort_by_cached_key(|post| Reverse(post.created_at())),
        OrderMode::Oldest => view.sort_by_cached_key(Post::created_at),
    }
    view
}
