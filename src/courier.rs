use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::{pending, AbortHandle, AbortRegistration, Abortable};
use log::{debug, info, warn};
use tokio::spawn;
use tokio::sync::mpsc::{channel, Receiver, Sender};

use crate::content::Post;
use crate::error::Result;
use crate::listings::reddit::TopListing;
use crate::listings::source::ListingSource;

pub const DELIVERY_BUFFER: usize = 5;

/// The single outcome of a dispatched fetch.
#[derive(Debug)]
pub struct Delivery {
    pub ticket: u64,
    pub listing: TopListing,
    pub result: Result<Vec<Post>>,
    cancelled: Arc<AtomicBool>,
}

/// Handle to an in-flight fetch. Once cancelled, `Courier::next` never yields
/// its result, even if the fetch had already finished.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    id: u64,
    abort: AbortHandle,
    cancelled: Arc<AtomicBool>,
}

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort.abort();
    }
}

/// Runs fetches off the caller's task and hands every result back on one
/// channel, drained by whoever owns the courier.
///
/// Dropping the courier drops the receiving end; fetches still in flight then
/// discard their result instead of delivering it.
pub struct Courier<T> {
    src: T,
    dispatched: u64,
    chan: (Sender<Delivery>, Receiver<Delivery>),
}

impl<T: ListingSource> Courier<T> {
    pub fn from(src: T) -> Self {
        Courier {
            src,
            dispatched: 0,
            chan: channel(DELIVERY_BUFFER),
        }
    }

    pub fn dispatch(&mut self, listing: TopListing) -> FetchTicket {
        self.dispatched += 1;
        let id = self.dispatched;
        let (abort, registration) = AbortHandle::new_pair();
        let cancelled = Arc::new(AtomicBool::new(false));

        info!(
            "Dispatching fetch #{} for `r/{}` (limit {})",
            id,
            listing.subreddit.name(),
            listing.limit
        );
        spawn(Self::deliver(
            self.src.clone(),
            self.chan.0.clone(),
            id,
            listing,
            cancelled.clone(),
            registration,
        ));

        FetchTicket {
            id,
            abort,
            cancelled,
        }
    }

    /// Waits for the next finished, non-cancelled fetch, in completion order.
    ///
    /// The courier keeps its own sender, so the channel never closes: with
    /// nothing in flight this waits indefinitely.
    pub async fn next(&mut self) -> Delivery {
        while let Some(delivery) = self.chan.1.recv().await {
            if delivery.cancelled.load(Ordering::SeqCst) {
                debug!("skipping cancelled fetch #{}", delivery.ticket);
                continue;
            }
            return delivery;
        }
        pending().await
    }

    async fn deliver(
        src: T,
        tx: Sender<Delivery>,
        ticket: u64,
        listing: TopListing,
        cancelled: Arc<AtomicBool>,
        registration: AbortRegistration,
    ) {
        let name = listing.subreddit.name().to_string();
        let fetch_and_send = async move {
            let result = src.retrieve_posts(&listing).await;
            if let Err(e) = &result {
                warn!("fetch #{} for `r/{}` failed: {}", ticket, listing.subreddit.name(), e);
            }

            let delivery = Delivery {
                ticket,
                listing,
                result,
                cancelled,
            };
            if tx.send(delivery).await.is_err() {
                warn!("Consumer gone, dropping result of fetch #{}", ticket);
            }
        };

        if Abortable::new(fetch_and_send, registration).await.is_err() {
            debug!("fetch #{} for `r/{}` cancelled", ticket, name);
        }
    }
}
