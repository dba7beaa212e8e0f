use std::env;
use std::fs;
use std::process::Command;

use crate::error::PostameError;
use crate::models::{filter_and_sort, OrderMode, Post, SocialClient};

/// Fetch the whole feed and return the requested view of it.
pub async fn fetch_feed(
    client: &SocialClient,
    query: &str,
    order: OrderMode,
) -> Result<Vec<Post>, PostameError> {
    let posts = client.list_posts().await?;
    tracing::info!(count = posts.len(), "feed fetched");
    Ok(filter_and_sort(&posts, query, order))
}

/// Posts of one profile, filtered and ordered.
pub async fn fetch_profile_posts(
    client: &SocialClient,
    name: &str,
    query: &str,
    order: OrderMode,
) -> Result<Vec<Post>, PostameError> {
    let posts = client.profile_posts(name).await?;
    Ok(filter_and_sort(&posts, query, order))
}

pub fn create_post_via_editor() -> Result<String, PostameError> {
    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    let mut temp_path = env::temp_dir();
    temp_path.push(format!("postame-{}.txt", std::process::id()));

    let status = Command::new(editor).arg(&temp_path).status()?;

    if !status.success() {
        return Err(PostameError::Io(
            "Editor exited with non-zero status".to_string(),
        ));
    }

    let content = match fs::read_to_string(&temp_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    let _ = fs::remove_file(&temp_path);
    Ok(content.trim_end().to_string())
}

/// Plain-text rendering used by the command line output.
pub fn format_post(post: &Post) -> String {
    let mut out = format!(
        "#{} {}\n{} posted {}",
        post.id,
        post.title_or_empty(),
        post.author_name(),
        post.created_display()
    );
    if let Some(media) = &post.media {
        out.push_str(&format!("\n[image] {}", media.url));
    }
    if !post.body_or_empty().is_empty() {
        out.push('\n');
        out.push_str(post.body_or_empty());
    }
    if let Some(count) = post.count {
        out.push_str(&format!(
            "\n{} comments, {} reactions",
            count.comments, count.reactions
        ));
    }
    out
}

pub fn format_posts(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "No posts found!".to_string();
    }
    posts
        .iter()
        .map(format_post)
        .collect::<Vec<_>>()
        .join("\n\n")
}
