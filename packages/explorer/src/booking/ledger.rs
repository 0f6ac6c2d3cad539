use std::cell::{Cell, RefCell};

use api::{Booking, TravelApi};
use tracing::{debug, warn};

use super::{BookingError, BookingService, CancelOutcome};

/// The user's bookings as last fetched.
///
/// The cache is dropped on every [`open`](Self::open), so stale entries never
/// outlive a re-open. When opens overlap only the latest one issued fills the
/// cache. Cancels remove the entry immediately and put it back
/// only when the service still has the booking (or cannot be asked).
#[derive(Debug)]
pub struct BookingsLedger<A> {
    service: BookingService<A>,
    token: Option<String>,
    generation: u64,
    latest_open: Cell<u64>,
    bookings: RefCell<Vec<Booking>>,
}

impl<A: TravelApi> BookingsLedger<A> {
    pub fn new(service: BookingService<A>, token: Option<String>) -> Self {
        Self {
            service,
            token,
            generation: 0,
            latest_open: Cell::new(0),
            bookings: RefCell::new(Vec::new()),
        }
    }

    /// Tag the ledger with the session generation that opened it.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Invalidate the cache and fetch the list again.
    ///
    /// A result that resolves after a newer `open` was issued is dropped,
    /// errors included.
    pub async fn open(&self) -> Result<(), BookingError> {
        let request = self.latest_open.get() + 1;
        self.latest_open.set(request);
        self.bookings.borrow_mut().clear();

        let result = self.service.list(self.token.as_deref()).await;
        if request != self.latest_open.get() {
            debug!(request, "discarding superseded bookings list");
            return Ok(());
        }
        *self.bookings.borrow_mut() = result?;
        Ok(())
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.borrow().is_empty()
    }

    pub async fn cancel(&self, id: &str) -> Result<CancelOutcome, BookingError> {
        let removed = {
            let mut bookings = self.bookings.borrow_mut();
            bookings
                .iter()
                .position(|b| b.id == id)
                .map(|index| (index, bookings.remove(index)))
        };

        let error = match self.service.cancel(id, self.token.as_deref()).await {
            Ok(outcome) => return Ok(outcome),
            Err(e) => e,
        };

        let still_exists = match &error {
            BookingError::Unauthorized => None,
            _ => match self.service.list(self.token.as_deref()).await {
                Ok(remote) => Some(remote.iter().any(|b| b.id == id)),
                Err(e) => {
                    warn!(id, error = %e, "could not verify failed cancel");
                    None
                }
            },
        };

        if still_exists == Some(false) {
            debug!(id, "cancel failed but booking is gone remotely");
            return Ok(CancelOutcome::AlreadyGone);
        }

        if let Some((index, booking)) = removed {
            let mut bookings = self.bookings.borrow_mut();
            // A re-open while the cancel was in flight may already list it
            if !bookings.iter().any(|b| b.id == booking.id) {
                let index = index.min(bookings.len());
                bookings.insert(index, booking);
            }
        }
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{booking, FakeApi};
    use api::ApiError;
    use std::time::Duration;

    fn ledger(api: &FakeApi) -> BookingsLedger<FakeApi> {
        BookingsLedger::new(BookingService::new(api.clone()), Some("token-a".into()))
    }

    fn ids(ledger: &BookingsLedger<FakeApi>) -> Vec<String> {
        ledger.bookings().into_iter().map(|b| b.id).collect()
    }

    #[tokio::test]
    async fn test_open_refetches_every_time() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = ledger(&api);

        ledger.open().await.unwrap();
        assert_eq!(ids(&ledger), ["1"]);

        api.script().bookings.push(booking("2", "Kyoto"));
        ledger.open().await.unwrap();
        assert_eq!(ids(&ledger), ["1", "2"]);
        assert_eq!(api.calls("list_bookings"), 2);
    }

    #[tokio::test]
    async fn test_list_failure_is_not_papered_over() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = ledger(&api);
        ledger.open().await.unwrap();

        api.script().list_error = Some(ApiError::Timeout);
        let result = ledger.open().await;

        assert!(matches!(result, Err(BookingError::Network(_))));
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_cancel_twice_leaves_booking_absent() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris"), booking("2", "Kyoto")];
        let ledger = ledger(&api);
        ledger.open().await.unwrap();

        assert_eq!(ledger.cancel("1").await, Ok(CancelOutcome::Cancelled));
        assert_eq!(ids(&ledger), ["2"]);

        assert_eq!(ledger.cancel("1").await, Ok(CancelOutcome::AlreadyGone));
        assert_eq!(ids(&ledger), ["2"]);
    }

    #[tokio::test]
    async fn test_failed_cancel_reverts_when_booking_still_exists() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris"), booking("2", "Kyoto")];
        api.script().delete_error = Some(ApiError::Server {
            status: 500,
            message: "boom".into(),
        });
        let ledger = ledger(&api);
        ledger.open().await.unwrap();

        let result = ledger.cancel("1").await;

        assert!(matches!(result, Err(BookingError::Network(_))));
        assert_eq!(ids(&ledger), ["1", "2"]);
    }

    #[tokio::test]
    async fn test_failed_cancel_of_vanished_booking_succeeds() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = ledger(&api);
        ledger.open().await.unwrap();

        // Someone else removed it, then the delete call itself fails
        api.script().bookings.clear();
        api.script().delete_error = Some(ApiError::Timeout);

        assert_eq!(ledger.cancel("1").await, Ok(CancelOutcome::AlreadyGone));
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_unverifiable_cancel_restores_entry() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = ledger(&api);
        ledger.open().await.unwrap();

        api.script().delete_error = Some(ApiError::Timeout);
        api.script().list_error = Some(ApiError::Timeout);

        assert!(ledger.cancel("1").await.is_err());
        assert_eq!(ids(&ledger), ["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_opens_keep_latest() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        api.script().list_delays.push_back(Duration::from_secs(5));
        let ledger = ledger(&api);

        let (first, second) = tokio::join!(ledger.open(), async {
            api.script().bookings.push(booking("2", "Kyoto"));
            ledger.open().await
        });

        assert_eq!(first, Ok(()));
        assert_eq!(second, Ok(()));
        assert_eq!(ids(&ledger), ["1", "2"]);
    }

    #[tokio::test]
    async fn test_cancel_overlapping_open_does_not_duplicate() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = ledger(&api);
        ledger.open().await.unwrap();
        api.script().delete_error = Some(ApiError::Server {
            status: 500,
            message: "boom".into(),
        });

        let (cancelled, opened) = tokio::join!(ledger.cancel("1"), ledger.open());

        assert!(matches!(cancelled, Err(BookingError::Network(_))));
        assert_eq!(opened, Ok(()));
        assert_eq!(ids(&ledger), ["1"]);
    }

    #[tokio::test]
    async fn test_expired_token_restores_entry() {
        let api = FakeApi::new();
        api.script().bookings = vec![booking("1", "Paris")];
        let ledger = BookingsLedger::new(BookingService::new(api.clone()), Some("expired".into()));
        *ledger.bookings.borrow_mut() = vec![booking("1", "Paris")];

        assert_eq!(ledger.cancel("1").await, Err(BookingError::Unauthorized));
        assert_eq!(ids(&ledger), ["1"]);
        assert_eq!(api.calls("list_bookings"), 0);
    }
}
