use std::env;

use reqwest::Url;

use crate::error::ConfigError;
use crate::listings::reddit::{Subreddit, TopListing, REDDIT_BASE_URL, REDDIT_USER_AGENT};

pub const DEFAULT_SUBREDDIT: &str = "ios";

pub const DEFAULT_LIMIT: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: Url,
    pub user_agent: String,
    pub subreddit: Subreddit,
    pub limit: u32,
}

impl Config {
    /// Reads the process environment. Loading `.env` is up to the binary.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = {
            let raw = lookup("REDDIT_BASE_URL").unwrap_or_else(|| REDDIT_BASE_URL.to_string());
            Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl {
                var: "REDDIT_BASE_URL",
                value: raw.clone(),
            })?
        };

        let user_agent = lookup("REDDIT_USER_AGENT").unwrap_or_else(|| REDDIT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Empty("REDDIT_USER_AGENT"));
        }

        let subreddit = lookup("TOPFEED_SUBREDDIT").unwrap_or_else(|| DEFAULT_SUBREDDIT.to_string());
        if subreddit.trim().is_empty() {
            return Err(ConfigError::Empty("TOPFEED_SUBREDDIT"));
        }

        let limit = match lookup("TOPFEED_LIMIT") {
            None => DEFAULT_LIMIT,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidLimit {
                        var: "TOPFEED_LIMIT",
                        value: raw,
                    })
                }
            },
        };

        Ok(Config {
            base_url,
            user_agent,
            subreddit: Subreddit::from(subreddit.trim()),
            limit,
        })
    }

    pub fn listing(&self) -> TopListing {
        TopListing::new(self.subreddit.clone(), self.limit)
    }
}
