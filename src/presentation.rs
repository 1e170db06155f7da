use std::fmt::Formatter;

use chrono::{DateTime, Utc};
use log::warn;
use reqwest::Url;

use crate::content::Post;
use crate::listings::reddit::Reddit;
use crate::listings::transport::Transport;

pub const PLACEHOLDER_ICON: &str = "photo";

/// Display projection of the post currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    post: Post,
}

impl PostView {
    /// Shows the first post of a listing, nothing if it is empty.
    pub fn from_listing(posts: Vec<Post>) -> Option<Self> {
        posts.into_iter().next().map(|post| PostView { post })
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn byline(&self) -> String {
        format!("u/{} • {}", self.post.author, self.post.domain)
    }

    pub fn time_passed(&self, now: DateTime<Utc>) -> String {
        let Some(created) = self.post.created() else {
            return "just now".to_string();
        };
        let elapsed = now.signed_duration_since(created);

        if elapsed.num_days() > 0 {
            format!("{}d ago", elapsed.num_days())
        } else if elapsed.num_hours() > 0 {
            format!("{}h ago", elapsed.num_hours())
        } else if elapsed.num_minutes() > 0 {
            format!("{}m ago", elapsed.num_minutes())
        } else {
            "just now".to_string()
        }
    }

    pub fn rating(&self) -> String {
        format!("{} pts", self.post.score())
    }

    pub fn comments(&self) -> String {
        format!("{} comments", self.post.comments)
    }

    pub fn bookmark_icon(&self) -> &'static str {
        if self.post.saved {
            "bookmark.fill"
        } else {
            "bookmark"
        }
    }

    /// Media link with Reddit's HTML escaping undone. `None` shows the placeholder.
    pub fn media_url(&self) -> Option<Url> {
        let href = self.post.media_href.as_ref()?.replace("&amp;", "&");
        Url::parse(&href).ok()
    }

    pub fn toggle_saved(&mut self) -> bool {
        self.post.toggle_saved()
    }

    pub fn share_text(&self) -> String {
        format!("Check out this post: {}", self.post.title)
    }

    /// One download per call; any failure falls back to the placeholder.
    pub async fn load_media<T: Transport>(&self, reddit: &Reddit<T>) -> Option<Vec<u8>> {
        let url = self.media_url()?;
        match reddit.fetch_media(url.clone()).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("couldn't load media {}: {}", url, e);
                None
            }
        }
    }

    pub fn render(&self, now: DateTime<Utc>) -> String {
        let media = self
            .media_url()
            .map(|url| url.to_string())
            .unwrap_or_else(|| format!("[{}]", PLACEHOLDER_ICON));
        format!(
            "{} · {}\n{}\n{}\n{} · {} · [{}]",
            self.byline(),
            self.time_passed(now),
            self.post.title,
            media,
            self.rating(),
            self.comments(),
            self.bookmark_icon(),
        )
    }
}

impl std::fmt::Display for PostView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(Utc::now()))
    }
}
