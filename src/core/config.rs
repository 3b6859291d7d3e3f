use std::collections::HashSet;
use std::env;

use url::Url;

use crate::core::models::Location;
use crate::errors::BotError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

/// Process-wide settings shared by both webhook variants.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub api_base_url: Url,
    pub webhook_secret: Option<String>,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns `BotError::Config` if `TELEGRAM_BOT_TOKEN` is missing or the base URL is invalid.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if the token is missing or the base URL is not absolute.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = non_empty(lookup("TELEGRAM_BOT_TOKEN"))
            .ok_or_else(|| BotError::Config("TELEGRAM_BOT_TOKEN is not set".to_string()))?;

        let raw_base = non_empty(lookup("TELEGRAM_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&raw_base)
            .map_err(|e| BotError::Config(format!("TELEGRAM_API_BASE_URL: {e}")))?;
        if api_base_url.cannot_be_a_base() {
            return Err(BotError::Config(format!(
                "TELEGRAM_API_BASE_URL is not a base URL: {raw_base}"
            )));
        }

        Ok(Self {
            bot_token,
            api_base_url,
            webhook_secret: non_empty(lookup("TELEGRAM_WEBHOOK_SECRET")),
        })
    }

    /// Full URL of a Bot API method, e.g. `sendMessage`.
    #[must_use]
    pub fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            self.bot_token,
            method
        )
    }
}

/// Usernames permitted to trigger privileged actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    pub fn new<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(usernames.into_iter().map(Into::into).collect())
    }

    /// Parses a comma-separated list, ignoring blanks. Returns `None` when nothing remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let names: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        if names.is_empty() { None } else { Some(Self(names)) }
    }

    #[must_use]
    pub fn contains(&self, username: Option<&str>) -> bool {
        username.is_some_and(|name| self.0.contains(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Settings for the celebration rotation bot.
#[derive(Debug, Clone)]
pub struct CelebrationConfig {
    pub allowed_users: AllowList,
    pub phrases: Vec<String>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            allowed_users: AllowList::new(["antonhulikau", "okalitova", "maffina95"]),
            phrases: vec![
                "Твой друг: Дрюня\nНа вопрос: Что бы ты приготовил/а Маше на завтрак?\nОтветил(а): Пельмеши"
                    .to_string(),
            ],
        }
    }
}

impl CelebrationConfig {
    /// # Errors
    ///
    /// Returns `BotError::Config` if an override is present but malformed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Compiled defaults with `ALLOWED_USERS` and `CELEBRATION_PHRASES` overrides.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if `CELEBRATION_PHRASES` is not a JSON array of strings.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(users) = lookup("ALLOWED_USERS").as_deref().and_then(AllowList::parse) {
            config.allowed_users = users;
        }
        if let Some(raw) = non_empty(lookup("CELEBRATION_PHRASES")) {
            config.phrases = serde_json::from_str(&raw)
                .map_err(|e| BotError::Config(format!("CELEBRATION_PHRASES: {e}")))?;
        }
        Ok(config)
    }
}

/// Settings for the geofenced hint hunt bot.
#[derive(Debug, Clone)]
pub struct HuntConfig {
    pub allowed_users: AllowList,
    pub supervisor_chat_id: i64,
    pub secret_word: String,
    pub candidates: Vec<Location>,
    pub geofence_radius_m: f64,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            allowed_users: AllowList::new(["antonhulikau", "sonicfelidae"]),
            supervisor_chat_id: 49_208_041,
            secret_word: "afsio".to_string(),
            candidates: vec![
                Location::new(48.158_967, 11.490_981),
                Location::new(48.155_582, 11.493_340),
                Location::new(48.143_296, 11.596_526),
                Location::new(48.173_194, 11.555_078),
                Location::new(48.166_302, 11.568_141),
            ],
            geofence_radius_m: 2000.0,
        }
    }
}

impl HuntConfig {
    /// # Errors
    ///
    /// Returns `BotError::Config` if an override is present but malformed.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Compiled defaults with `ALLOWED_USERS`, `SUPERVISOR_CHAT_ID` and `HUNT_LOCATIONS` overrides.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Config` if the supervisor id is not an integer or the
    /// locations are not a JSON array of `{latitude, longitude}` objects.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(users) = lookup("ALLOWED_USERS").as_deref().and_then(AllowList::parse) {
            config.allowed_users = users;
        }
        if let Some(raw) = non_empty(lookup("SUPERVISOR_CHAT_ID")) {
            config.supervisor_chat_id = raw
                .trim()
                .parse()
                .map_err(|e| BotError::Config(format!("SUPERVISOR_CHAT_ID: {e}")))?;
        }
        if let Some(raw) = non_empty(lookup("HUNT_LOCATIONS")) {
            config.candidates = serde_json::from_str(&raw)
                .map_err(|e| BotError::Config(format!("HUNT_LOCATIONS: {e}")))?;
        }
        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_config_requires_token() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn method_url_embeds_token() {
        let config = AppConfig::from_lookup(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]))
            .unwrap();
        assert_eq!(
            config.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn custom_base_url_with_trailing_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_API_BASE_URL", "http://localhost:8081/"),
        ]))
        .unwrap();
        assert_eq!(
            config.method_url("sendLocation"),
            "http://localhost:8081/bott/sendLocation"
        );
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "t"),
            ("TELEGRAM_API_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn allow_list_parse_trims_and_skips_blanks() {
        let list = AllowList::parse(" alice, ,bob ,").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(Some("alice")));
        assert!(list.contains(Some("bob")));
        assert!(!list.contains(Some("carol")));
        assert!(!list.contains(None));
        assert!(AllowList::parse(" , ").is_none());
    }

    #[test]
    fn hunt_defaults() {
        let config = HuntConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.supervisor_chat_id, 49_208_041);
        assert_eq!(config.candidates.len(), 5);
        assert!(config.allowed_users.contains(Some("sonicfelidae")));
    }

    #[test]
    fn hunt_overrides() {
        let config = HuntConfig::from_lookup(lookup_from(&[
            ("ALLOWED_USERS", "alice"),
            ("SUPERVISOR_CHAT_ID", "77"),
            ("HUNT_LOCATIONS", r#"[{"latitude": 1.5, "longitude": 2.5}]"#),
        ]))
        .unwrap();
        assert_eq!(config.supervisor_chat_id, 77);
        assert_eq!(config.candidates, vec![Location::new(1.5, 2.5)]);
        assert!(!config.allowed_users.contains(Some("antonhulikau")));
    }

    #[test]
    fn hunt_rejects_bad_supervisor_id() {
        let err = HuntConfig::from_lookup(lookup_from(&[("SUPERVISOR_CHAT_ID", "anton")]))
            .unwrap_err();
        assert!(err.to_string().contains("SUPERVISOR_CHAT_ID"));
    }

    #[test]
    fn celebration_phrase_override() {
        let config = CelebrationConfig::from_lookup(lookup_from(&[(
            "CELEBRATION_PHRASES",
            r#"["one", "two"]"#,
        )]))
        .unwrap();
        assert_eq!(config.phrases, vec!["one", "two"]);
        assert!(config.allowed_users.contains(Some("maffina95")));
    }
}
