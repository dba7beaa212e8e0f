use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PostameError;

pub const MAX_BODY_CHARS: usize = 280;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl Media {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: Some(String::new()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PostCount {
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub reactions: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub media: Option<Media>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(rename = "_count", default)]
    pub count: Option<PostCount>,
}

impl Post {
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown")
    }

    /// `created` as a point in time, if it parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created)
    }

    pub fn created_display(&self) -> String {
        match self.created_at() {
            Some(at) => at.format("%-d. %B %Y").to_string(),
            None => self.created.clone(),
        }
    }

    /// Body cut to `limit` characters, with an ellipsis when something was dropped.
    pub fn body_preview(&self, limit: usize) -> String {
        let body = self.body_or_empty();
        if body.chars().count() > limit {
            let cut: String = body.chars().take(limit).collect();
            format!("{}...", cut)
        } else {
            body.to_string()
        }
    }
}

/// RFC 3339 first, then a bare `YYYY-MM-DD` at midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Body of a create or update request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: Option<String>, media_url: Option<String>) -> Self {
        Self {
            title: title.into(),
            body,
            tags: vec![],
            media: media_url.filter(|url| !url.is_empty()).map(Media::from_url),
        }
    }

    pub fn validate(&self) -> Result<(), PostameError> {
        if self.title.trim().is_empty() {
            return Err(PostameError::Validation("A post needs a title!".to_string()));
        }
        let len = self.body.as_deref().map(|b| b.chars().count()).unwrap_or(0);
        if len > MAX_BODY_CHARS {
            return Err(PostameError::Validation(format!(
                "The post text is too long ({}/{})",
                len, MAX_BODY_CHARS
            )));
        }
        Ok(())
    }
}
