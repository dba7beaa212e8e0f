use std::path::PathBuf;

use crate::cli::{Command, PostArgs, ViewArgs};
use crate::controllers::{app_controller, post_controller};
use crate::error::PostameError;
use crate::models::{Config, PostDraft, Session, SessionStore, SocialClient};

/// Everything a command needs from the outside world.
pub struct Context {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub store: SessionStore,
}

/// Run one command and return the text to print.
pub async fn run(command: Command, ctx: &mut Context) -> Result<String, PostameError> {
    let client = SocialClient::new(&ctx.config)?;

    match command {
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            if password != confirm_password {
                return Err(PostameError::Validation(
                    "The passwords have to match!".to_string(),
                ));
            }
            client.register(&name, &email, &password).await?;
            let session = client.login(&email, &password).await?;
            ctx.store.save(&session)?;
            Ok(format!("Registered and logged in as {}", session.profile.name))
        }
        Command::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            ctx.store.save(&session)?;
            Ok(format!("Logged in as {}", session.profile.name))
        }
        Command::Logout => {
            ctx.store.clear()?;
            Ok("Logged out".to_string())
        }
        command => {
            let session = ctx.store.require()?;
            let client = client.with_session(&session);
            run_authenticated(command, ctx, &client, session).await
        }
    }
}

async fn run_authenticated(
    command: Command,
    ctx: &mut Context,
    client: &SocialClient,
    session: Session,
) -> Result<String, PostameError> {
    match command {
        Command::ApiKey { name } => {
            let key = client.create_api_key(&name).await?;
            ctx.config.api_key = Some(key.key.clone());
            match &ctx.config_path {
                Some(path) => ctx.config.save_to(path)?,
                None => ctx.config.save()?,
            }
            Ok(format!("Created API key '{}': {}", key.name, key.key))
        }
        Command::Feed(ViewArgs { query, order }) => {
            let posts = post_controller::fetch_feed(client, &query, order).await?;
            Ok(post_controller::format_posts(&posts))
        }
        Command::Search { text } => {
            if text.is_empty() {
                return Err(PostameError::Validation(
                    "Search text cannot be empty".to_string(),
                ));
            }
            let posts = client.search_posts(&text).await?;
            Ok(post_controller::format_posts(&posts))
        }
        Command::Show { id } => {
            let post = client.get_post(id).await?;
            Ok(post_controller::format_post(&post))
        }
        Command::Create(args) => {
            let draft = draft_from(args)?;
            let post = client.create_post(&draft).await?;
            Ok(format!(
                "Well done! You have created a new post. (#{})",
                post.id
            ))
        }
        Command::Update { id, post } => {
            let draft = draft_from(post)?;
            let updated = client.update_post(id, &draft).await?;
            Ok(format!("Updated post #{}", updated.id))
        }
        Command::Delete { id } => {
            client.delete_post(id).await?;
            Ok(format!("Deleted post #{}", id))
        }
        Command::Profile { name, view } => {
            let name = name.unwrap_or_else(|| session.profile.name.clone());
            let profile = client.profile(&name).await?;
            let posts =
                post_controller::fetch_profile_posts(client, &name, &view.query, view.order)
                    .await?;

            let mut out = profile.name.clone();
            if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
                out.push('\n');
                out.push_str(bio);
            }
            if let Some(count) = profile.count {
                out.push_str(&format!(
                    "\n{} posts, {} followers, {} following",
                    count.posts, count.followers, count.following
                ));
            }
            out.push_str("\n\n");
            out.push_str(&post_controller::format_posts(&posts));
            Ok(out)
        }
        Command::Tui(ViewArgs { query, order }) => {
            app_controller::start_app(client.clone(), session, query, order).await?;
            Ok(String::new())
        }
        Command::Register { .. } | Command::Login { .. } | Command::Logout => Err(
            PostameError::Validation("This command does not need a session".to_string()),
        ),
    }
}

fn draft_from(args: PostArgs) -> Result<PostDraft, PostameError> {
    let body = if args.editor {
        Some(post_controller::create_post_via_editor()?)
    } else {
        args.body
    };
    let draft = PostDraft::new(args.title, body, args.media_url);
    draft.validate()?;
    Ok(draft)
}
