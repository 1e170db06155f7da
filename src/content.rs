use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a subreddit listing, as found under `data.children[].data`.
///
/// `saved` never comes from the wire. It is a local bookmark flag and the only
/// field that changes after decoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    #[serde(rename = "author_fullname")]
    pub author: String,
    pub domain: String,
    pub title: String,
    pub ups: i64,
    pub downs: i64,
    #[serde(rename = "num_comments")]
    pub comments: i64,
    pub created_utc: f64,
    #[serde(
        rename = "url_overridden_by_dest",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub media_href: Option<String>,

    #[serde(skip)]
    pub saved: bool,
}

impl Post {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.ups - self.downs
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        let secs = self.created_utc.trunc() as i64;
        let nanos = (self.created_utc.fract() * 1e9) as u32;
        Utc.timestamp_opt(secs, nanos).single()
    }

    pub fn toggle_saved(&mut self) -> bool {
        self.saved = !self.saved;
        self.saved
    }
}
