use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::content::Post;
use crate::error::{ListingError, Result};
use crate::listings::source::ListingSource;
use crate::listings::transport::{HttpTransport, Transport};

pub const REDDIT_BASE_URL: &str = "https://www.reddit.com";

pub const REDDIT_USER_AGENT: &str = "topfeed/0.1.0 (by /u/topfeed)";

/// Reddit client for the public `top.json` listing.
///
/// Holds no state between calls; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct Reddit<T = HttpTransport> {
    transport: T,
    base: Url,
    user_agent: String,
}

impl Reddit<HttpTransport> {
    pub fn new() -> Self {
        Reddit::with_transport(HttpTransport::new())
    }
}

impl Default for Reddit<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> Reddit<T> {
    pub fn with_transport(transport: T) -> Self {
        Reddit {
            transport,
            base: default_base(),
            user_agent: REDDIT_USER_AGENT.to_string(),
        }
    }

    pub fn base_url(mut self, base: Url) -> Self {
        self.base = base;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fetches one page of `r/{subreddit}/top`, in the order Reddit returns it.
    pub async fn fetch_top_posts(
        &self,
        subreddit: &Subreddit,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Vec<Post>> {
        let mut listing = TopListing::new(subreddit.clone(), limit);
        listing.after = after.map(str::to_string);
        self.request_listing(&listing).await
    }

    /// Downloads the media behind a post, e.g. its `url_overridden_by_dest`.
    pub async fn fetch_media(&self, url: Url) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let body = self
            .transport
            .get(url, &self.user_agent)
            .await
            .map_err(ListingError::Transport)?;
        if body.is_empty() {
            return Err(ListingError::EmptyResponse);
        }
        Ok(body)
    }

    async fn request_listing(&self, listing: &TopListing) -> Result<Vec<Post>> {
        let url = listing.endpoint_for(&self.base)?;
        debug!("GET {}", url);

        let body = self
            .transport
            .get(url, &self.user_agent)
            .await
            .map_err(|e| {
                warn!("couldn't reach `r/{}`: {}", listing.subreddit.name(), e);
                ListingError::Transport(e)
            })?;

        let posts = Self::serialize(&body).map_err(|e| {
            warn!("bad listing body for `r/{}`: {}", listing.subreddit.name(), e);
            e
        })?;
        debug!(
            "{} post(s) retrieved for `r/{}`",
            posts.len(),
            listing.subreddit.name()
        );
        Ok(posts)
    }

    fn serialize(body: &[u8]) -> Result<Vec<Post>> {
        if body.is_empty() {
            return Err(ListingError::EmptyResponse);
        }

        let listing: Listing = serde_json::from_slice(body)?;
        let mut posts = listing.into_posts();

        // bookmarks are not persisted, every fetched post starts unsaved
        for post in posts.iter_mut() {
            post.saved = false;
        }
        Ok(posts)
    }
}

#[async_trait]
impl<T: Transport + Clone> ListingSource for Reddit<T> {
    async fn retrieve_posts(&self, listing: &TopListing) -> Result<Vec<Post>> {
        self.request_listing(listing).await
    }
}

fn default_base() -> Url {
    Url::parse(REDDIT_BASE_URL).expect("REDDIT_BASE_URL is a valid url")
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Subreddit(String);

impl Subreddit {
    pub fn from(name: &str) -> Self {
        Subreddit(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A request for one page of a subreddit's top posts.
#[derive(PartialEq, Debug, Clone)]
pub struct TopListing {
    pub subreddit: Subreddit,
    pub limit: u32,
    pub after: Option<String>,
}

impl TopListing {
    pub fn new(subreddit: Subreddit, limit: u32) -> Self {
        TopListing {
            subreddit,
            limit,
            after: None,
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn endpoint_for(&self, base: &Url) -> Result<Url> {
        let name = self.subreddit.name().trim();
        if name.is_empty() {
            return Err(ListingError::InvalidRequest(
                "subreddit name is empty".to_string(),
            ));
        }
        if self.limit == 0 {
            return Err(ListingError::InvalidRequest(
                "limit must be positive".to_string(),
            ));
        }

        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ListingError::InvalidRequest(format!("`{}` cannot be a base url", base)))?
            .pop_if_empty()
            .extend(["r", name, "top.json"]);

        url.set_query(None);
        {
            let mut args = url.query_pairs_mut();
            args.append_pair("limit", &self.limit.to_string());
            if let Some(after) = &self.after {
                args.append_pair("after", after);
            }
        }

        Ok(url)
    }
}

/// Wire envelope of a listing response. Only lives for the duration of a decode.
#[derive(Serialize, Deserialize, Debug)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ListingData {
    pub children: Vec<Child>,
    pub after: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Child {
    pub data: Post,
}

impl Listing {
    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(|child| child.data).collect()
    }
}
