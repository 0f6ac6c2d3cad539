use api::Booking;

use super::BookingError;

/// Lifecycle of one booking submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BookingRequestState {
    #[default]
    Idle,
    Submitting,
    /// Terminal; the form closes itself shortly after.
    Confirmed(Booking),
    /// Terminal for this attempt; the draft stays editable and can be resubmitted.
    Failed(BookingError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingEvent {
    Submit,
    Succeeded(Booking),
    Failed(BookingError),
}

impl BookingRequestState {
    /// The state `event` leads to, or `None` if it is not allowed here.
    pub fn next(&self, event: BookingEvent) -> Option<Self> {
        use BookingRequestState::*;

        match (self, event) {
            (Idle | Failed(_), BookingEvent::Submit) => Some(Submitting),
            (Submitting, BookingEvent::Succeeded(booking)) => Some(Confirmed(booking)),
            (Submitting, BookingEvent::Failed(error)) => Some(Failed(error)),
            // Local validation failures never leave the form
            (Idle | Failed(_), BookingEvent::Failed(error)) => Some(Failed(error)),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Whether the draft may be edited.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Idle | Self::Failed(_))
    }

    pub fn error(&self) -> Option<&BookingError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::booking;

    #[test]
    fn test_happy_path() {
        let state = BookingRequestState::default();
        let state = state.next(BookingEvent::Submit).unwrap();
        assert!(state.is_submitting());
        assert!(!state.is_editable());

        let state = state.next(BookingEvent::Succeeded(booking("1", "Paris"))).unwrap();
        assert!(state.is_confirmed());
        assert!(!state.is_editable());
    }

    #[test]
    fn test_failure_allows_retry() {
        let state = BookingRequestState::Submitting
            .next(BookingEvent::Failed(BookingError::Network("down".into())))
            .unwrap();
        assert!(state.is_editable());
        assert_eq!(state.error(), Some(&BookingError::Network("down".into())));

        let state = state.next(BookingEvent::Submit).unwrap();
        assert!(state.is_submitting());
    }

    #[test]
    fn test_rejected_transitions() {
        assert_eq!(BookingRequestState::Submitting.next(BookingEvent::Submit), None);
        let confirmed = BookingRequestState::Confirmed(booking("1", "Paris"));
        assert_eq!(confirmed.next(BookingEvent::Submit), None);
        assert_eq!(
            BookingRequestState::Idle.next(BookingEvent::Succeeded(booking("1", "Paris"))),
            None
        );
    }
}
