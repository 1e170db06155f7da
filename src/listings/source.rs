use async_trait::async_trait;

use crate::content::Post;
use crate::error::Result;
use crate::listings::reddit::TopListing;

#[async_trait]
pub trait ListingSource: Send + Sync + Clone + 'static {
    async fn retrieve_posts(&self, listing: &TopListing) -> Result<Vec<Post>>;
}
