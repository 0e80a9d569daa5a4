//! Docker Registry HTTP API v2 implementation

use std::collections::HashSet;

use regex::Regex;
use reqwest::header::{AUTHORIZATION, HeaderValue, LINK, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::RegistryOptions;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// Number of tags requested per page
const PAGE_SIZE: usize = 100;

/// Response from the tags/list endpoint
#[derive(Debug, Deserialize)]
struct TagList {
    /// Null for repositories without tags
    tags: Option<Vec<String>>,
}

/// Response from the token endpoint
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
    access_token: Option<String>,
}

/// Parameters of a `WWW-Authenticate: Bearer ...` challenge
#[derive(Debug, Clone, PartialEq, Eq)]
struct BearerChallenge {
    realm: String,
    service: Option<String>,
    scope: Option<String>,
}

/// Registry implementation for Docker Hub and other v2 registries using
/// anonymous bearer tokens
pub struct DockerHubRegistry {
    client: reqwest::Client,
    base_url: String,
    /// Matches `key="value"` pairs in an authentication challenge
    challenge_param_re: Regex,
    /// Matches the `rel="next"` target of a Link header
    next_link_re: Regex,
}

impl DockerHubRegistry {
    /// Creates a new DockerHubRegistry for the given options
    pub fn new(options: &RegistryOptions) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent("tagcheck")
            .danger_accept_invalid_certs(options.insecure)
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            client,
            base_url: options.domain.trim_end_matches('/').to_string(),
            challenge_param_re: Regex::new(r#"(\w+)="([^"]*)""#)
                .expect("challenge regex is valid"),
            next_link_re: Regex::new(r#"<([^>]+)>\s*;\s*rel="?next"?"#)
                .expect("link regex is valid"),
        })
    }

    async fn send(&self, url: &str, token: Option<&str>) -> Result<Response, RegistryError> {
        let mut request = self.client.get(url);
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RegistryError::InvalidResponse(format!("Invalid token: {}", e)))?;
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request.send().await?)
    }

    /// Sends a request, answering a bearer challenge once if the registry asks for one.
    ///
    /// The token obtained is stored in `token` and reused for later pages.
    async fn get_with_auth(
        &self,
        url: &str,
        token: &mut Option<String>,
    ) -> Result<Response, RegistryError> {
        let response = self.send(url, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || token.is_some() {
            return Ok(response);
        }

        let challenge = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| self.parse_challenge(v))
            .ok_or_else(|| {
                RegistryError::Unauthorized(format!("No bearer challenge returned for {}", url))
            })?;

        let fresh = self.fetch_token(&challenge).await?;
        let response = self.send(url, Some(&fresh)).await?;
        *token = Some(fresh);

        Ok(response)
    }

    async fn fetch_token(&self, challenge: &BearerChallenge) -> Result<String, RegistryError> {
        let params: Vec<(&str, &str)> = [
            ("service", challenge.service.as_deref()),
            ("scope", challenge.scope.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();

        let url = Url::parse_with_params(&challenge.realm, &params).map_err(|e| {
            RegistryError::InvalidResponse(format!("Invalid token realm {}: {}", challenge.realm, e))
        })?;

        debug!("Requesting anonymous token from {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Token endpoint returned status {}", status);
            return Err(RegistryError::Unauthorized(format!(
                "Token request failed: {}",
                status
            )));
        }

        let text = response.text().await?;
        let body: TokenResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Failed to parse token response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        body.token
            .or(body.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RegistryError::InvalidResponse("Token response without token".into()))
    }

    /// Parse `Bearer realm="...",service="...",scope="..."`
    fn parse_challenge(&self, header: &str) -> Option<BearerChallenge> {
        let (scheme, params) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }

        let mut realm = None;
        let mut service = None;
        let mut scope = None;
        for caps in self.challenge_param_re.captures_iter(params) {
            let value = caps[2].to_string();
            match &caps[1] {
                "realm" => realm = Some(value),
                "service" => service = Some(value),
                "scope" => scope = Some(value),
                _ => {}
            }
        }

        Some(BearerChallenge {
            realm: realm?,
            service,
            scope,
        })
    }

    /// Resolve the `rel="next"` target of a Link header against the registry URL
    fn next_page_url(&self, link: &str) -> Option<String> {
        let target = self.next_link_re.captures(link)?.get(1)?.as_str();
        if target.starts_with("http://") || target.starts_with("https://") {
            Some(target.to_string())
        } else {
            Some(format!("{}{}", self.base_url, target))
        }
    }
}

#[async_trait::async_trait]
impl Registry for DockerHubRegistry {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        let mut url = format!(
            "{}/v2/{}/tags/list?n={}",
            self.base_url, repository, PAGE_SIZE
        );
        let mut token = None;
        let mut tags = Vec::new();
        let mut visited = HashSet::new();

        loop {
            debug!("Listing tags from {}", url);
            visited.insert(url.clone());
            let response = self.get_with_auth(&url, &mut token).await?;

            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Err(RegistryError::NotFound(repository.to_string()));
            }

            if status == StatusCode::UNAUTHORIZED {
                return Err(RegistryError::Unauthorized(repository.to_string()));
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                return Err(RegistryError::RateLimited {
                    retry_after_secs: retry_after,
                });
            }

            if !status.is_success() {
                warn!("Registry returned status {}: {}", status, url);
                return Err(RegistryError::InvalidResponse(format!(
                    "Unexpected status: {}",
                    status
                )));
            }

            let next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| self.next_page_url(v));

            let text = response.text().await?;
            let page: TagList = serde_json::from_str(&text).map_err(|e| {
                warn!("Failed to parse tag list response: {}", e);
                RegistryError::InvalidResponse(e.to_string())
            })?;

            tags.extend(page.tags.unwrap_or_default());

            match next {
                Some(next) if visited.contains(&next) => {
                    warn!("Registry pagination loops back to {}", next);
                    return Err(RegistryError::InvalidResponse(format!(
                        "Pagination loops back to {}",
                        next
                    )));
                }
                Some(next) => url = next,
                None => break,
            }
        }

        debug!("Found {} tags for {}", tags.len(), repository);
        Ok(tags)
    }
}
