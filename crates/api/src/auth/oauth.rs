//! OAuth 2.0 authorization-code login with Google and GitHub.
//!
//! The browser completes the provider consent screen and hands the API the
//! resulting `code`. [`fetch_profile`] exchanges it for a provider access
//! token and reads the user's profile; account lookup and creation happen
//! in the auth handler.

use serde::Deserialize;
use sidemate_core::error::CoreError;
use sidemate_core::validation::MAX_NICKNAME_LENGTH;
use sidemate_db::models::user::{PROVIDER_GITHUB, PROVIDER_GOOGLE};

use crate::config::non_empty_var;

const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_USER_URL: &str = "https://api.github.com/user";

/// GitHub rejects API requests without a User-Agent.
const USER_AGENT: &str = "sidemate-api";

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            PROVIDER_GOOGLE => Ok(Self::Google),
            PROVIDER_GITHUB => Ok(Self::Github),
            other => Err(CoreError::Validation(format!(
                "Unsupported OAuth provider '{other}'"
            ))),
        }
    }

    /// Value stored in `users.provider`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => PROVIDER_GOOGLE,
            Self::Github => PROVIDER_GITHUB,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Client credentials registered with one provider.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthClientConfig {
    /// Reads `{PREFIX}_CLIENT_ID`, `{PREFIX}_CLIENT_SECRET` and
    /// `{PREFIX}_REDIRECT_URI`; `None` unless all three are set.
    fn from_env(prefix: &str) -> Option<Self> {
        Some(Self {
            client_id: non_empty_var(&format!("{prefix}_CLIENT_ID"))?,
            client_secret: non_empty_var(&format!("{prefix}_CLIENT_SECRET"))?,
            redirect_uri: non_empty_var(&format!("{prefix}_REDIRECT_URI"))?,
        })
    }
}

/// Configured providers. A provider left `None` answers 400.
#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    pub google: Option<OAuthClientConfig>,
    pub github: Option<OAuthClientConfig>,
}

impl OAuthConfig {
    /// | Env Var prefix | Provider |
    /// |----------------|----------|
    /// | `GOOGLE_`      | Google   |
    /// | `GITHUB_`      | GitHub   |
    pub fn from_env() -> Self {
        Self {
            google: OAuthClientConfig::from_env("GOOGLE"),
            github: OAuthClientConfig::from_env("GITHUB"),
        }
    }

    pub fn client(&self, provider: OAuthProvider) -> Option<&OAuthClientConfig> {
        match provider {
            OAuthProvider::Google => self.google.as_ref(),
            OAuthProvider::Github => self.github.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Profile exchange
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("OAuth request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OAuth provider returned HTTP {0}")]
    HttpStatus(u16),

    #[error("OAuth provider returned no access token")]
    MissingToken,
}

/// Identity returned by a provider.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub provider_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubUser {
    id: i64,
    login: String,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

/// Exchange an authorization `code` and fetch the provider profile.
pub async fn fetch_profile(
    http: &reqwest::Client,
    provider: OAuthProvider,
    client: &OAuthClientConfig,
    code: &str,
) -> Result<OAuthProfile, OAuthError> {
    let token_url = match provider {
        OAuthProvider::Google => GOOGLE_TOKEN_URL,
        OAuthProvider::Github => GITHUB_TOKEN_URL,
    };
    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", client.client_id.as_str()),
        ("client_secret", client.client_secret.as_str()),
        ("redirect_uri", client.redirect_uri.as_str()),
    ];

    let response = http
        .post(token_url)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&form)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(OAuthError::HttpStatus(response.status().as_u16()));
    }
    let access_token = response
        .json::<TokenResponse>()
        .await?
        .access_token
        .ok_or(OAuthError::MissingToken)?;

    match provider {
        OAuthProvider::Google => {
            let user: GoogleUser = get_json(http, GOOGLE_USERINFO_URL, &access_token).await?;
            Ok(OAuthProfile {
                provider_id: user.id,
                email: user.email,
                name: user.name,
                avatar_url: user.picture,
            })
        }
        OAuthProvider::Github => {
            let user: GithubUser = get_json(http, GITHUB_USER_URL, &access_token).await?;
            Ok(OAuthProfile {
                provider_id: user.id.to_string(),
                email: user.email,
                name: user.name.or(Some(user.login)),
                avatar_url: user.avatar_url,
            })
        }
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    access_token: &str,
) -> Result<T, OAuthError> {
    let response = http
        .get(url)
        .bearer_auth(access_token)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(OAuthError::HttpStatus(response.status().as_u16()));
    }
    Ok(response.json::<T>().await?)
}

// ---------------------------------------------------------------------------
// Account naming
// ---------------------------------------------------------------------------

/// Nickname to try on the `attempt`-th try (0-based).
///
/// Attempt 0 is the profile name itself, later attempts append the attempt
/// number. The result is trimmed to fit `MAX_NICKNAME_LENGTH` and falls
/// back to `"user"` for empty or one-character names.
pub fn nickname_candidate(name: Option<&str>, attempt: u32) -> String {
    let mut base: String = name
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join(""))
        .unwrap_or_default();
    if base.chars().count() < 2 {
        base = "user".to_string();
    }
    let suffix = if attempt == 0 {
        String::new()
    } else {
        attempt.to_string()
    };
    let room = MAX_NICKNAME_LENGTH - suffix.len();
    let trimmed: String = base.chars().take(room).collect();
    format!("{trimmed}{suffix}")
}

/// Domain of addresses minted by [`placeholder_email`]; never mailed.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "oauth.sidemate.local";

/// Address stored for provider accounts that expose no email.
pub fn placeholder_email(provider: OAuthProvider, provider_id: &str) -> String {
    format!("{}-{provider_id}@{PLACEHOLDER_EMAIL_DOMAIN}", provider.as_str())
}

pub fn is_placeholder_email(email: &str) -> bool {
    email.ends_with(&format!("@{PLACEHOLDER_EMAIL_DOMAIN}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_round_trips_through_db_value() {
        assert_eq!(OAuthProvider::parse("google").unwrap(), OAuthProvider::Google);
        assert_eq!(OAuthProvider::Github.as_str(), "github");
        assert!(OAuthProvider::parse("kakao").is_err());
    }

    #[test]
    fn unconfigured_provider_has_no_client() {
        let config = OAuthConfig::default();
        assert!(config.client(OAuthProvider::Google).is_none());
    }

    #[test]
    fn nickname_candidates_append_attempt_number() {
        assert_eq!(nickname_candidate(Some("Mina Kim"), 0), "MinaKim");
        assert_eq!(nickname_candidate(Some("Mina Kim"), 2), "MinaKim2");
        assert_eq!(nickname_candidate(None, 0), "user");
        assert_eq!(nickname_candidate(Some("x"), 1), "user1");
    }

    #[test]
    fn long_names_leave_room_for_suffix() {
        let name = "a".repeat(40);
        let candidate = nickname_candidate(Some(&name), 12);
        assert_eq!(candidate.chars().count(), MAX_NICKNAME_LENGTH);
        assert!(candidate.ends_with("12"));
    }

    #[test]
    fn placeholder_email_is_provider_scoped() {
        assert_eq!(
            placeholder_email(OAuthProvider::Github, "99"),
            "github-99@oauth.sidemate.local"
        );
        assert!(is_placeholder_email("github-99@oauth.sidemate.local"));
        assert!(!is_placeholder_email("me@example.com"));
    }
}
