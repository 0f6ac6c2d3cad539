//! # Application orchestrator
//!
//! [`AppOrchestrator`] wires the components together and owns all transient
//! UI state: the session, the catalog view, the search selection, the map
//! focus and the selected destination. The presentation layer calls its
//! intent methods and reads state back; nothing here renders.
//!
//! ## Supersede rule
//!
//! Each login/logout bumps the session *generation*, and each catalog fetch
//! takes a request number. A fetch captures both (plus the token current at
//! that moment) when it is issued, and its result is dropped unless both are
//! still current when it resolves. So a logout during a fetch, or a newer
//! fetch overtaking an older one, can never resurrect stale data.
//!
//! ## Re-authentication funnel
//!
//! Any `401` seen by the catalog, the bookings list or a booking submission
//! (routed through [`AppOrchestrator::intercept`]) ends the session and raises
//! a single [`reauth_required`](AppOrchestrator::reauth_required) flag. Booking
//! modals and ledgers carry the generation that opened them; a `401` from an
//! earlier generation is returned to the caller but never touches the current
//! session.

use std::cell::{Cell, RefCell};

use api::{HttpApi, TravelApi};
use store::SessionStore;
use tracing::{debug, info, warn};

use crate::auth::{AuthError, AuthSession, Session};
use crate::booking::{BookingError, BookingModal, BookingService, BookingsLedger};
use crate::catalog::{CatalogError, Destination, DestinationCatalog, DestinationList};
use crate::config::ExplorerConfig;
use crate::map::{MapSync, Marker, Viewport};
use crate::preferences::Preferences;
use crate::search::{SearchState, SortKey};

/// What the catalog area should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogView {
    /// Nothing requested yet, or the session just ended.
    #[default]
    Idle,
    Loading,
    Ready(DestinationList),
    /// Hard failure; offer [`AppOrchestrator::retry_catalog`].
    Failed(CatalogError),
}

/// Whether a catalog result made it into the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A logout or a newer fetch happened first; the result was dropped.
    Superseded,
}

pub struct AppOrchestrator<A, S> {
    config: ExplorerConfig,
    auth: AuthSession<A, S>,
    catalog: DestinationCatalog<A>,
    bookings: BookingService<A>,
    preferences: Preferences<S>,
    session: RefCell<Session>,
    generation: Cell<u64>,
    latest_fetch: Cell<u64>,
    view: RefCell<CatalogView>,
    search: RefCell<SearchState>,
    map: RefCell<MapSync>,
    selected: RefCell<Option<Destination>>,
    reauth_required: Cell<bool>,
}

impl<S: SessionStore + Clone> AppOrchestrator<HttpApi, S> {
    /// Orchestrator talking to the service at `config.api.base_url`.
    pub fn connect(store: S, config: ExplorerConfig) -> Self {
        let api = HttpApi::new(&config.api.base_url);
        Self::new(api, store, config)
    }
}

impl<A, S> AppOrchestrator<A, S>
where
    A: TravelApi + Clone,
    S: SessionStore + Clone,
{
    pub fn new(api: A, store: S, config: ExplorerConfig) -> Self {
        Self {
            auth: AuthSession::new(api.clone(), store.clone()),
            catalog: DestinationCatalog::new(api.clone(), config.catalog_timeout()),
            bookings: BookingService::new(api),
            preferences: Preferences::new(store),
            config,
            session: RefCell::new(Session::anonymous()),
            generation: Cell::new(0),
            latest_fetch: Cell::new(0),
            view: RefCell::new(CatalogView::Idle),
            search: RefCell::new(SearchState::default()),
            map: RefCell::new(MapSync::new()),
            selected: RefCell::new(None),
            reauth_required: Cell::new(false),
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    // -- session ---------------------------------------------------------

    /// Restore any persisted session and load the catalog.
    pub async fn start(&self) -> FetchOutcome {
        let session = self.auth.restore();
        debug!(authenticated = session.is_authenticated(), "session restored");
        self.begin_session(session);
        self.refresh_catalog().await
    }

    /// Log in and, on success, reload the catalog with the new token.
    pub async fn login(&self, email: &str, password: &str) -> Result<FetchOutcome, AuthError> {
        let session = self.auth.login(email, password).await?;
        self.begin_session(session);
        Ok(self.refresh_catalog().await)
    }

    /// Create an account. The caller logs in separately afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.auth.register(username, email, password).await
    }

    pub fn logout(&self) {
        self.auth.logout();
        self.end_session();
    }

    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Set after a `401`; cleared by the next successful login.
    pub fn reauth_required(&self) -> bool {
        self.reauth_required.get()
    }

    /// Route a booking result through the re-authentication funnel.
    ///
    /// `issued` is the generation the request was made under, i.e.
    /// [`BookingModal::generation`] or [`BookingsLedger::generation`].
    pub fn intercept<T>(
        &self,
        issued: u64,
        result: Result<T, BookingError>,
    ) -> Result<T, BookingError> {
        if let Err(BookingError::Unauthorized) = &result {
            if issued == self.generation.get() {
                self.require_reauth();
            } else {
                debug!(issued, "ignoring unauthorized result from an ended session");
            }
        }
        result
    }

    fn require_reauth(&self) {
        if self.reauth_required.replace(true) {
            return;
        }
        warn!("travel service refused the session token, asking for login");
        self.auth.logout();
        self.end_session();
    }

    fn begin_session(&self, session: Session) {
        self.generation.set(self.generation.get() + 1);
        *self.session.borrow_mut() = session;
        self.reauth_required.set(false);
    }

    fn end_session(&self) {
        self.generation.set(self.generation.get() + 1);
        *self.session.borrow_mut() = Session::anonymous();
        *self.view.borrow_mut() = CatalogView::Idle;
        *self.selected.borrow_mut() = None;
        self.map.borrow_mut().clear();
    }

    // -- catalog ---------------------------------------------------------

    pub async fn refresh_catalog(&self) -> FetchOutcome {
        let generation = self.generation.get();
        let request = self.latest_fetch.get() + 1;
        self.latest_fetch.set(request);
        let token = self.session.borrow().token().map(str::to_string);

        {
            let mut view = self.view.borrow_mut();
            if !matches!(*view, CatalogView::Ready(_)) {
                *view = CatalogView::Loading;
            }
        }

        let result = self.catalog.fetch(token.as_deref()).await;

        if generation != self.generation.get() || request != self.latest_fetch.get() {
            debug!(request, "discarding superseded catalog result");
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(list) => {
                if let Some(advisory) = list.advisory() {
                    info!(advisory, "catalog in degraded mode");
                }
                *self.view.borrow_mut() = CatalogView::Ready(list);
            }
            Err(CatalogError::Unauthorized) => {
                self.require_reauth();
                *self.view.borrow_mut() = CatalogView::Failed(CatalogError::Unauthorized);
            }
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                *self.view.borrow_mut() = CatalogView::Failed(e);
            }
        }
        FetchOutcome::Applied
    }

    pub async fn retry_catalog(&self) -> FetchOutcome {
        self.refresh_catalog().await
    }

    pub fn catalog_view(&self) -> CatalogView {
        self.view.borrow().clone()
    }

    /// Degraded-mode notice, if any.
    pub fn advisory(&self) -> Option<&'static str> {
        match &*self.view.borrow() {
            CatalogView::Ready(list) => list.advisory(),
            _ => None,
        }
    }

    // -- search ----------------------------------------------------------

    pub fn set_query(&self, query: &str) {
        self.search.borrow_mut().query = query.to_string();
    }

    pub fn set_sort_key(&self, sort_key: SortKey) {
        self.search.borrow_mut().sort_key = sort_key;
    }

    pub fn clear_search(&self) {
        self.search.borrow_mut().query.clear();
    }

    pub fn search(&self) -> SearchState {
        self.search.borrow().clone()
    }

    /// Catalog filtered and sorted by the latest query and sort key.
    pub fn visible_destinations(&self) -> Vec<Destination> {
        match &*self.view.borrow() {
            CatalogView::Ready(list) => self.search.borrow().apply(&list.destinations),
            _ => Vec::new(),
        }
    }

    // -- map -------------------------------------------------------------

    pub fn markers(&self) -> Vec<Marker> {
        self.visible_destinations().iter().map(Marker::from).collect()
    }

    pub fn map_viewport(&self) -> Viewport {
        self.map.borrow().viewport()
    }

    // -- booking ---------------------------------------------------------

    /// Select a destination: focus the map on it and open a booking form
    /// bound to the current token. `None` if the id is not in the catalog.
    pub fn select_destination(&self, id: &str) -> Option<BookingModal<A>> {
        let destination = match &*self.view.borrow() {
            CatalogView::Ready(list) => list.get(id).cloned(),
            _ => None,
        }?;

        self.map.borrow_mut().focus(&destination);
        *self.selected.borrow_mut() = Some(destination.clone());

        let modal = BookingModal::new(
            self.bookings.clone(),
            destination,
            self.session.borrow().token().map(str::to_string),
            self.config.auto_close_delay(),
        );
        Some(modal.with_generation(self.generation.get()))
    }

    pub fn selected(&self) -> Option<Destination> {
        self.selected.borrow().clone()
    }

    /// Deselect and return the map to the world view.
    pub fn close_booking(&self) {
        *self.selected.borrow_mut() = None;
        self.map.borrow_mut().clear();
    }

    /// Fetch the user's bookings fresh.
    pub async fn open_bookings(&self) -> Result<BookingsLedger<A>, BookingError> {
        let ledger = BookingsLedger::new(
            self.bookings.clone(),
            self.session.borrow().token().map(str::to_string),
        )
        .with_generation(self.generation.get());
        let result = ledger.open().await;
        self.intercept(ledger.generation(), result)?;
        Ok(ledger)
    }

    // -- preferences -----------------------------------------------------

    pub fn dark_mode(&self) -> bool {
        self.preferences.dark_mode()
    }

    pub fn toggle_dark_mode(&self) -> bool {
        self.preferences.toggle_dark_mode()
    }
}
