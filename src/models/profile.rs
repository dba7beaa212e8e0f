use serde::{Deserialize, Serialize};

use crate::models::post::Media;
use crate::models::session::Session;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfileCount {
    #[serde(default)]
    pub posts: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ProfileCount>,
}

/// Every API response wraps its payload in `data`, list endpoints add `meta`.
#[derive(Deserialize, Debug, Clone)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMeta {
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub current_page: u64,
    pub previous_page: Option<u64>,
    pub next_page: Option<u64>,
    pub page_count: u64,
    pub total_count: u64,
}

/// Payload of a successful login.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl LoginData {
    pub fn into_session(self) -> Session {
        Session {
            access_token: self.access_token,
            profile: self.profile,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug, Clone)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ApiKey {
    pub name: String,
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_splits_token_from_profile() {
        let envelope: Envelope<LoginData> = serde_json::from_value(json!({
            "data": {
                "name": "ola",
                "email": "ola@stud.noroff.no",
                "bio": null,
                "avatar": { "url": "https://img.example/a.jpg", "alt": "" },
                "banner": { "url": "https://img.example/b.jpg", "alt": "" },
                "accessToken": "secret"
            },
            "meta": {}
        }))
        .unwrap();
        let session = envelope.data.into_session();
        assert_eq!(session.access_token, "secret");
        assert_eq!(session.profile.name, "ola");
        assert_eq!(session.profile.email.as_deref(), Some("ola@stud.noroff.no"));
    }

    #[test]
    fn reads_profile_counts_and_page_meta() {
        let envelope: Envelope<Profile> = serde_json::from_value(json!({
            "data": {
                "name": "kari",
                "_count": { "posts": 3, "followers": 10, "following": 1 }
            },
            "meta": { "isFirstPage": true, "isLastPage": false, "currentPage": 1,
                      "previousPage": null, "nextPage": 2, "pageCount": 4, "totalCount": 400 }
        }))
        .unwrap();
        assert_eq!(envelope.data.count.unwrap().followers, 10);
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.next_page, Some(2));
        assert!(!meta.is_last_page);
    }
}
