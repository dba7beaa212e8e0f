use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PostameError;
use crate::models::config::Config;
use crate::models::outcome::{classify, HttpOutcome};
use crate::models::post::{Post, PostDraft};
use crate::models::profile::{
    ApiKey, Envelope, LoginData, LoginRequest, Profile, RegisterRequest,
};
use crate::models::session::Session;

const AUTH_REGISTER: &str = "/auth/register";
const AUTH_LOGIN: &str = "/auth/login";
const AUTH_API_KEY: &str = "/auth/create-api-key";
const POSTS: &str = "/social/posts";
const POSTS_PARAMS: &str = "?_author=true";
const PROFILE_POSTS_PARAMS: &str = "?_author=true&_comments=true&_reactions=true";

/// REST client for the social API.
#[derive(Clone)]
pub struct SocialClient {
    client: Client,
    base: String,
    api_key: Option<String>,
    token: Option<String>,
}

impl SocialClient {
    pub fn new(config: &Config) -> Result<Self, PostameError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PostameError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            token: None,
        })
    }

    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.access_token.clone());
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Profile, PostameError> {
        let body = RegisterRequest { name, email, password };
        let request = self.request(Method::POST, AUTH_REGISTER).json(&body);
        self.send_json(request, "Could not register the account!").await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, PostameError> {
        let body = LoginRequest { email, password };
        let request = self.request(Method::POST, AUTH_LOGIN).json(&body);
        let data: LoginData = self
            .send_json(request, "Could not login! Please retry later.")
            .await?;
        Ok(data.into_session())
    }

    pub async fn create_api_key(&self, name: &str) -> Result<ApiKey, PostameError> {
        #[derive(Serialize)]
        struct KeyRequest<'a> {
            name: &'a str,
        }

        let request = self
            .authed(Method::POST, AUTH_API_KEY)
            .json(&KeyRequest { name });
        self.send_json(request, "Could not register for an API key!")
            .await
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, PostameError> {
        let path = format!("{}{}", POSTS, POSTS_PARAMS);
        let request = self.authed(Method::GET, &path);
        self.send_json(request, "Could not show the posts!").await
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, PostameError> {
        let path = format!("{}/{}{}", POSTS, id, POSTS_PARAMS);
        let request = self.authed(Method::GET, &path);
        self.send_json(request, "Could not show the post! Please retry later.")
            .await
    }

    pub async fn search_posts(&self, text: &str) -> Result<Vec<Post>, PostameError> {
        let path = format!(
            "{}/search{}&q={}",
            POSTS,
            POSTS_PARAMS,
            urlencoding::encode(text)
        );
        let request = self.authed(Method::GET, &path);
        self.send_json(request, "Could not show the posts!").await
    }

    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, PostameError> {
        draft.validate()?;
        let request = self.authed(Method::POST, POSTS).json(draft);
        self.send_json(request, "Could not create a post!").await
    }

    pub async fn update_post(&self, id: u64, draft: &PostDraft) -> Result<Post, PostameError> {
        draft.validate()?;
        let path = format!("{}/{}", POSTS, id);
        let request = self.authed(Method::PUT, &path).json(draft);
        self.send_json(request, "Could not update the post! Please retry later.")
            .await
    }

    pub async fn delete_post(&self, id: u64) -> Result<(), PostameError> {
        let path = format!("{}/{}", POSTS, id);
        let request = self.authed(Method::DELETE, &path);
        self.send(request, "Could not delete the post! Please retry later.")
            .await?;
        Ok(())
    }

    pub async fn profile(&self, name: &str) -> Result<Profile, PostameError> {
        let path = format!("/social/profiles/{}", urlencoding::encode(name));
        let request = self.authed(Method::GET, &path);
        self.send_json(request, "Could not show the profile! Please retry later.")
            .await
    }

    pub async fn profile_posts(&self, name: &str) -> Result<Vec<Post>, PostameError> {
        let path = format!(
            "/social/profiles/{}/posts{}",
            urlencoding::encode(name),
            PROFILE_POSTS_PARAMS
        );
        let request = self.authed(Method::GET, &path);
        self.send_json(request, "Could not show the posts!").await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), path, "api request");
        self.client
            .request(method, format!("{}{}", self.base, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.request(method, path);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(key) = &self.api_key {
            builder = builder.header("X-Noroff-API-Key", key);
        }
        builder
    }

    async fn send(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<Response, PostameError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            PostameError::network(context, e)
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let outcome = outcome_from_response(response).await;
        let message = classify(&outcome);
        tracing::warn!(status = outcome.status_code, %message, "api returned an error");
        Err(PostameError::Api {
            status: outcome.status_code,
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<T, PostameError> {
        let response = self.send(request, context).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PostameError::network(context, e))?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, "could not decode response");
            PostameError::Decode { context, source: e }
        })?;
        Ok(envelope.data)
    }
}

/// Read a failed response into an outcome; an empty or non-JSON body becomes `None`.
pub async fn outcome_from_response(response: Response) -> HttpOutcome {
    let status_code = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) if !bytes.is_empty() => serde_json::from_slice(&bytes).ok(),
        _ => None,
    };
    HttpOutcome::new(status_code, body)
}
