//! Runs create requests off the UI thread and hands results back to the event loop.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use tokio::runtime::Handle;

use crate::api::{ProductApi, SubmitError};
use crate::model::NewProduct;

/// Identifies one submission so stale results can be recognised.
pub type Ticket = u64;

/// The result of a finished create request.
#[derive(Debug)]
pub struct Outcome {
    pub ticket: Ticket,
    pub result: Result<(), SubmitError>,
}

/// Spawns create requests on a tokio runtime.
///
/// Results arrive on a channel the synchronous UI loop drains with
/// [`try_next`](Self::try_next). Requests are never cancelled; if nobody is
/// waiting for a ticket any more, the caller simply drops its outcome.
pub struct Submitter {
    api: Arc<dyn ProductApi>,
    runtime: Handle,
    tx: Sender<Outcome>,
    rx: Receiver<Outcome>,
    next_ticket: Ticket,
}

impl Submitter {
    /// Creates a submitter that runs requests through `api` on `runtime`.
    pub fn new(api: Arc<dyn ProductApi>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            api,
            runtime,
            tx,
            rx,
            next_ticket: 1,
        }
    }

    /// Starts one create request and returns its ticket.
    pub fn start(&mut self, product: NewProduct) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let request = self.api.create_product(product);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let result = request.await;
            // The receiver only goes away when the app is shutting down.
            let _ = tx.send(Outcome { ticket, result });
        });
        ticket
    }

    /// Returns the next finished outcome, if any, without blocking.
    pub fn try_next(&self) -> Option<Outcome> {
        self.rx.try_recv().ok()
    }

    /// Blocks up to `timeout` for the next outcome.
    #[cfg(test)]
    pub(crate) fn wait_next(&self, timeout: std::time::Duration) -> Option<Outcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;

    use super::testing::FakeApi;
    use super::*;
    use crate::model::{Category, PLACEHOLDER_IMAGE_URL, RentalRates};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn product() -> NewProduct {
        NewProduct {
            brand: "Ford".into(),
            name: "Transit".into(),
            price: 35000.0,
            description: "Cargo van".into(),
            image: PLACEHOLDER_IMAGE_URL.into(),
            category: Category::Van,
            is_rentable: false,
            rental_price: RentalRates {
                hourly: 0.0,
                daily: 0.0,
            },
        }
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn success_is_delivered_with_ticket() {
        let rt = runtime();
        let api = FakeApi::new(StatusCode::CREATED, "");
        let mut submitter = Submitter::new(api.clone(), rt.handle().clone());

        let ticket = submitter.start(product());
        let outcome = submitter.wait_next(TIMEOUT).unwrap();
        assert_eq!(outcome.ticket, ticket);
        assert!(outcome.result.is_ok());
        assert_eq!(api.sent().len(), 1);
        assert_eq!(api.sent()[0].name, "Transit");
    }

    #[test]
    fn rejection_is_delivered() {
        let rt = runtime();
        let api = FakeApi::new(StatusCode::CONFLICT, r#"{"error":"Duplicate SKU"}"#);
        let mut submitter = Submitter::new(api, rt.handle().clone());

        submitter.start(product());
        let outcome = submitter.wait_next(TIMEOUT).unwrap();
        assert_eq!(outcome.result.unwrap_err().user_message(), "Duplicate SKU");
    }

    #[test]
    fn tickets_increase() {
        let rt = runtime();
        let api = FakeApi::new(StatusCode::OK, "");
        let mut submitter = Submitter::new(api, rt.handle().clone());
        let first = submitter.start(product());
        let second = submitter.start(product());
        assert!(second > first);
    }

    #[test]
    fn try_next_is_empty_before_any_request() {
        let rt = runtime();
        let api = FakeApi::new(StatusCode::OK, "");
        let submitter = Submitter::new(api, rt.handle().clone());
        assert!(submitter.try_next().is_none());
    }
}
