use std::process::ExitCode;

use dotenvy::dotenv;
use log::{error, info};

use topfeed::config::Config;
use topfeed::courier::Courier;
use topfeed::listings::reddit::Reddit;
use topfeed::presentation::PostView;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    pretty_env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("bad configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("Fetching top posts for `r/{}`...", config.subreddit.name());

    let reddit = Reddit::new()
        .base_url(config.base_url.clone())
        .user_agent(config.user_agent.clone());
    let mut courier = Courier::from(reddit.clone());
    courier.dispatch(config.listing());

    let delivery = courier.next().await;
    let posts = match delivery.result {
        Ok(posts) => posts,
        Err(e) => {
            error!("couldn't load posts: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(view) = PostView::from_listing(posts) else {
        info!("`r/{}` has no top posts", config.subreddit.name());
        return ExitCode::SUCCESS;
    };

    if let Some(media) = view.load_media(&reddit).await {
        info!("Loaded {} bytes of media", media.len());
    }
    println!("{}", view);
    println!("{}", view.share_text());

    ExitCode::SUCCESS
}
