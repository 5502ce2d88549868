//! Paginated collection fetcher.
//!
//! Couples the core [`Pager`] with a gateway scoped to one list endpoint.
//! Page changes are explicit commands; a fetch is issued only when the
//! pager emits one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use tracing::debug;
use vaultdash_core::pagination::{FetchPage, Pager};
use vaultdash_shared::config::StaleResponsePolicy;
use vaultdash_shared::types::PageWindow;

use crate::credentials::CredentialStore;
use crate::gateway::{ApiRequest, RequestError, RequestGateway};
use crate::models::{
    CardTransaction, CardTransactionsPage, Deposit, DepositsPage, FxTransaction,
    FxTransactionsPage,
};
use crate::transport::Transport;

/// One page of a paginated list endpoint.
pub trait CollectionPage: DeserializeOwned + Clone + Send {
    /// Row type.
    type Item: Clone;

    /// Endpoint path without the page query.
    const RESOURCE: &'static str;

    /// Server-reported window.
    fn window(&self) -> PageWindow;

    /// Rows on this page.
    fn items(&self) -> &[Self::Item];
}

impl CollectionPage for DepositsPage {
    type Item = Deposit;
    const RESOURCE: &'static str = "/wallets/my-deposits";

    fn window(&self) -> PageWindow {
        self.window
    }

    fn items(&self) -> &[Deposit] {
        &self.deposits
    }
}

impl CollectionPage for CardTransactionsPage {
    type Item = CardTransaction;
    const RESOURCE: &'static str = "/virtual-cards/my-transactions";

    fn window(&self) -> PageWindow {
        self.window
    }

    fn items(&self) -> &[CardTransaction] {
        &self.card_transactions
    }
}

impl CollectionPage for FxTransactionsPage {
    type Item = FxTransaction;
    const RESOURCE: &'static str = "/fx/my-transactions";

    fn window(&self) -> PageWindow {
        self.window
    }

    fn items(&self) -> &[FxTransaction] {
        &self.fx_transactions
    }
}

/// Wallet deposits list.
pub type DepositsFetcher = CollectionFetcher<DepositsPage>;
/// Card transactions list.
pub type CardTransactionsFetcher = CollectionFetcher<CardTransactionsPage>;
/// FX transactions list.
pub type FxTransactionsFetcher = CollectionFetcher<FxTransactionsPage>;

/// Drives page-indexed retrieval of one list.
///
/// A failed fetch keeps the last good page and window on display.
pub struct CollectionFetcher<P: CollectionPage> {
    gateway: RequestGateway<P>,
    pager: Mutex<Pager>,
    current: Mutex<Option<P>>,
    fetching: AtomicUsize,
}

/// A fetch in progress. When the last pending fetch ends without settling
/// the pager, the pager is settled as a failure so navigation unlocks.
struct PendingFetch<'a> {
    fetching: &'a AtomicUsize,
    pager: &'a Mutex<Pager>,
    settled: bool,
}

impl<'a> PendingFetch<'a> {
    fn begin(fetching: &'a AtomicUsize, pager: &'a Mutex<Pager>) -> Self {
        fetching.fetch_add(1, Ordering::SeqCst);
        Self {
            fetching,
            pager,
            settled: false,
        }
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        let remaining = self
            .fetching
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        if !self.settled && remaining == 0 {
            debug!("no fetch left in flight; releasing pager");
            self.pager
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .settle(None);
        }
    }
}

impl<P: CollectionPage> CollectionFetcher<P> {
    /// Creates a fetcher on page 1 with nothing loaded.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        policy: StaleResponsePolicy,
    ) -> Self {
        Self::from_gateway(RequestGateway::with_policy(transport, credentials, policy))
    }

    /// Creates a fetcher around an existing gateway.
    #[must_use]
    pub fn from_gateway(gateway: RequestGateway<P>) -> Self {
        Self {
            gateway,
            pager: Mutex::new(Pager::new()),
            current: Mutex::new(None),
            fetching: AtomicUsize::new(0),
        }
    }

    fn pager(&self) -> MutexGuard<'_, Pager> {
        self.pager.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self) -> MutexGuard<'_, Option<P>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the current page (initial load or external refresh).
    pub async fn load(&self) {
        let command = self.pager().refresh();
        self.run(command).await;
    }

    /// Moves to `page`. Returns false when no fetch was issued.
    pub async fn go_to(&self, page: u32) -> bool {
        let command = self.pager().go_to(page);
        self.run_opt(command).await
    }

    /// Moves forward one page if "Next" is enabled.
    pub async fn next(&self) -> bool {
        let command = self.pager().next();
        self.run_opt(command).await
    }

    /// Moves back one page if "Previous" is enabled.
    pub async fn previous(&self) -> bool {
        let command = self.pager().previous();
        self.run_opt(command).await
    }

    async fn run_opt(&self, command: Option<FetchPage>) -> bool {
        match command {
            Some(command) => {
                self.run(command).await;
                true
            }
            None => false,
        }
    }

    async fn run(&self, command: FetchPage) {
        let path = command.request().path_for(P::RESOURCE);
        let mut pending = PendingFetch::begin(&self.fetching, &self.pager);
        let settled = self.gateway.dispatch(ApiRequest::get(path)).await;

        if !settled.is_current {
            debug!(page = command.page, resource = P::RESOURCE, "ignoring superseded page");
            return;
        }

        let loaded = match settled.error {
            None => settled.outcome.data,
            Some(_) => None,
        };
        self.pager().settle(loaded.as_ref().map(CollectionPage::window));
        pending.settled = true;
        if let Some(loaded) = loaded {
            *self.current() = Some(loaded);
        }
    }

    /// Current client page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.pager().page()
    }

    /// Last window reported by the server.
    #[must_use]
    pub fn window(&self) -> Option<PageWindow> {
        self.pager().window().copied()
    }

    /// Rows of the last loaded page.
    #[must_use]
    pub fn items(&self) -> Vec<P::Item> {
        self.current()
            .as_ref()
            .map(|page| page.items().to_vec())
            .unwrap_or_default()
    }

    /// True while a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.gateway.is_busy()
    }

    /// "Showing X to Y of Z transactions".
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.pager().summary()
    }

    /// Whether "Previous" is enabled.
    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.pager().can_go_previous()
    }

    /// Whether "Next" is enabled.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.pager().can_go_next()
    }

    /// Error of the last fetch, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<RequestError> {
        self.gateway.last_error()
    }
}
