use std::cell::{Cell, RefCell};
use std::time::Duration;

use api::{Booking, TravelApi};
use tracing::{debug, warn};

use super::{BookingDraft, BookingError, BookingEvent, BookingRequestState, BookingService};
use crate::catalog::Destination;
use crate::time::sleep;

/// One booking form for one destination.
///
/// The token is bound when the modal opens, together with the session
/// generation it belongs to (see [`generation`](Self::generation)). Submissions are serialised: while
/// one is in flight every further `submit` is rejected with
/// [`BookingError::InFlight`] without touching the network.
#[derive(Debug)]
pub struct BookingModal<A> {
    service: BookingService<A>,
    destination: Destination,
    token: Option<String>,
    generation: u64,
    draft: RefCell<BookingDraft>,
    state: RefCell<BookingRequestState>,
    auto_close: Duration,
    closed: Cell<bool>,
}

impl<A: TravelApi> BookingModal<A> {
    pub fn new(
        service: BookingService<A>,
        destination: Destination,
        token: Option<String>,
        auto_close: Duration,
    ) -> Self {
        let draft = BookingDraft::new(destination.name.clone());
        Self {
            service,
            destination,
            token,
            generation: 0,
            draft: RefCell::new(draft),
            state: RefCell::new(BookingRequestState::Idle),
            auto_close,
            closed: Cell::new(false),
        }
    }

    /// Tag the modal with the session generation that opened it.
    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn draft(&self) -> BookingDraft {
        self.draft.borrow().clone()
    }

    pub fn state(&self) -> BookingRequestState {
        self.state.borrow().clone()
    }

    /// Change the draft. Ignored (returns `false`) while submitting or after
    /// confirmation.
    pub fn edit(&self, f: impl FnOnce(&mut BookingDraft)) -> bool {
        if !self.state.borrow().is_editable() {
            return false;
        }
        f(&mut self.draft.borrow_mut());
        true
    }

    pub async fn submit(&self) -> Result<Booking, BookingError> {
        let submitting = {
            let state = self.state.borrow();
            match state.next(BookingEvent::Submit) {
                Some(next) => next,
                None if state.is_confirmed() => return Err(BookingError::AlreadyConfirmed),
                None => {
                    debug!(destination = %self.destination.name, "rejecting duplicate submit");
                    return Err(BookingError::InFlight);
                }
            }
        };

        let draft = self.draft();
        if let Err(e) = draft.validate() {
            self.transition(BookingEvent::Failed(e.clone()));
            return Err(e);
        }

        *self.state.borrow_mut() = submitting;
        let result = self.service.submit(&draft, self.token.as_deref()).await;

        match &result {
            Ok(booking) => self.transition(BookingEvent::Succeeded(booking.clone())),
            Err(e) => {
                warn!(destination = %self.destination.name, error = %e, "booking failed");
                self.transition(BookingEvent::Failed(e.clone()));
            }
        }
        result
    }

    /// After a confirmation, wait out the display delay and close. Returns
    /// whether the modal closed.
    pub async fn auto_close(&self) -> bool {
        if !self.state.borrow().is_confirmed() {
            return false;
        }
        sleep(self.auto_close).await;
        self.close();
        true
    }

    pub fn close(&self) {
        self.closed.set(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    fn transition(&self, event: BookingEvent) {
        let next = self.state.borrow().next(event);
        if let Some(next) = next {
            *self.state.borrow_mut() = next;
        }
    }
}
