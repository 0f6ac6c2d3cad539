//! Scripted in-memory travel service for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use api::{
    ApiError, Booking, BookingRequest, LoginRequest, LoginResponse, RawDestination,
    RegisterRequest, TravelApi,
};

/// What `list_destinations` does when called.
#[derive(Clone, Debug)]
pub(crate) enum DestinationsReply {
    Ok(Vec<RawDestination>),
    Err(ApiError),
    /// Never resolves.
    Hang,
}

#[derive(Debug)]
pub(crate) struct Script {
    pub accounts: HashMap<String, String>,
    pub register: Result<(), ApiError>,
    pub destinations: DestinationsReply,
    pub bookings: Vec<Booking>,
    pub create_error: Option<ApiError>,
    pub list_error: Option<ApiError>,
    pub delete_error: Option<ApiError>,
    /// Consumed one per `list_bookings` call; that call answers late.
    pub list_delays: VecDeque<Duration>,
    pub next_id: u32,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            register: Ok(()),
            destinations: DestinationsReply::Ok(Vec::new()),
            bookings: Vec::new(),
            create_error: None,
            list_error: None,
            delete_error: None,
            list_delays: VecDeque::new(),
            next_id: 1,
        }
    }
}

/// Clones share script and call log, so a test keeps a handle while the
/// component under test owns another.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeApi {
    script: Rc<RefCell<Script>>,
    calls: Rc<RefCell<Vec<(&'static str, Option<String>)>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.script
            .borrow_mut()
            .accounts
            .insert(email.to_string(), password.to_string());
        self
    }

    pub fn with_destinations(self, destinations: Vec<RawDestination>) -> Self {
        self.reply_destinations(DestinationsReply::Ok(destinations));
        self
    }

    pub fn reply_destinations(&self, reply: DestinationsReply) {
        self.script.borrow_mut().destinations = reply;
    }

    pub fn script(&self) -> std::cell::RefMut<'_, Script> {
        self.script.borrow_mut()
    }

    pub fn server_bookings(&self) -> Vec<Booking> {
        self.script.borrow().bookings.clone()
    }

    /// Number of calls made to `endpoint`.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|(e, _)| *e == endpoint).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Tokens presented to `endpoint`, in call order.
    pub fn tokens(&self, endpoint: &str) -> Vec<Option<String>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, token)| token.clone())
            .collect()
    }

    fn record(&self, endpoint: &'static str, token: Option<&str>) {
        self.calls
            .borrow_mut()
            .push((endpoint, token.map(str::to_string)));
    }

    fn check_token(token: &str) -> Result<(), ApiError> {
        if token.starts_with("token-") {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

pub(crate) fn booking(id: &str, destination: &str) -> Booking {
    Booking {
        id: id.to_string(),
        destination: destination.to_string(),
        customer_name: "Ana".to_string(),
        days: 3,
        travel_date: Some("2025-01-01".to_string()),
        travelers: 1,
        special_requests: None,
        created_at: None,
    }
}

impl TravelApi for FakeApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.record("login", None);
        tokio::task::yield_now().await;
        let script = self.script.borrow();
        match script.accounts.get(&request.email) {
            Some(password) if *password == request.password => Ok(LoginResponse {
                access_token: format!("token-{}", request.email),
            }),
            _ => Err(ApiError::Unauthorized),
        }
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
        self.record("register", None);
        self.script.borrow().register.clone()
    }

    async fn list_destinations(
        &self,
        token: Option<&str>,
    ) -> Result<Vec<RawDestination>, ApiError> {
        self.record("list_destinations", token);
        tokio::task::yield_now().await;
        let reply = self.script.borrow().destinations.clone();
        match reply {
            DestinationsReply::Ok(destinations) => Ok(destinations),
            DestinationsReply::Err(e) => Err(e),
            DestinationsReply::Hang => futures::future::pending().await,
        }
    }

    async fn create_booking(
        &self,
        token: &str,
        request: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        self.record("create_booking", Some(token));
        tokio::task::yield_now().await;
        Self::check_token(token)?;
        let mut script = self.script.borrow_mut();
        if let Some(e) = script.create_error.clone() {
            return Err(e);
        }
        let id = script.next_id;
        script.next_id += 1;
        let booking = Booking {
            id: id.to_string(),
            destination: request.destination.clone(),
            customer_name: request.customer_name.clone(),
            days: request.days,
            travel_date: Some(request.travel_date.clone()),
            travelers: request.travelers,
            special_requests: Some(request.special_requests.clone()),
            created_at: Some("2024-12-01T10:00:00".to_string()),
        };
        script.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self, token: &str) -> Result<Vec<Booking>, ApiError> {
        self.record("list_bookings", Some(token));
        // Answer reflects the state at call time, however late it arrives
        let (reply, delay) = {
            let mut script = self.script.borrow_mut();
            let reply = match (Self::check_token(token), &script.list_error) {
                (Err(e), _) => Err(e),
                (Ok(()), Some(e)) => Err(e.clone()),
                (Ok(()), None) => Ok(script.bookings.clone()),
            };
            (reply, script.list_delays.pop_front())
        };
        tokio::task::yield_now().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }

    async fn delete_booking(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.record("delete_booking", Some(token));
        tokio::task::yield_now().await;
        Self::check_token(token)?;
        let mut script = self.script.borrow_mut();
        if let Some(e) = script.delete_error.clone() {
            return Err(e);
        }
        let before = script.bookings.len();
        script.bookings.retain(|b| b.id != id);
        if script.bookings.len() == before {
            Err(ApiError::NotFound)
        } else {
            Ok(())
        }
    }
}
