//! Wiring of every client component around one transport and one
//! credential store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use vaultdash_core::exchange::{ExchangeError, Quote, QuoteForm};
use vaultdash_core::routing::{Navigator, RouteGate, RouteTable};
use vaultdash_shared::{AppConfig, AppResult};

use crate::auth::AuthClient;
use crate::cards::VirtualCardsClient;
use crate::collection::{CardTransactionsFetcher, DepositsFetcher, FxTransactionsFetcher};
use crate::credentials::{CredentialStore, FileCredentialStore};
use crate::exchange::{ExchangeSession, RefreshTrigger};
use crate::session::SessionController;
use crate::transport::{HttpTransport, Transport};
use crate::wallets::WalletsClient;

/// Every view model of the dashboard.
pub struct Dashboard {
    /// Auth state and identity.
    pub session: SessionController,
    /// Login and registration.
    pub auth: AuthClient,
    /// Wallet operations.
    pub wallets: WalletsClient,
    /// Virtual card operations.
    pub cards: VirtualCardsClient,
    /// Quote and execute.
    pub exchange: ExchangeSession,
    /// Wallet deposits list.
    pub deposits: DepositsFetcher,
    /// Card transactions list.
    pub card_transactions: CardTransactionsFetcher,
    /// FX transactions list.
    pub fx_transactions: FxTransactionsFetcher,
    routes: RouteTable,
}

impl Dashboard {
    /// Builds every component on the given transport and credential store.
    #[must_use]
    pub fn new(
        config: &AppConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let policy = config.gateway.stale_responses;
        let t = || Arc::clone(&transport);
        let c = || Arc::clone(&credentials);

        Self {
            session: SessionController::new(
                t(),
                c(),
                Arc::clone(&navigator),
                &config.session,
                policy,
            ),
            auth: AuthClient::new(
                t(),
                c(),
                Arc::clone(&navigator),
                &config.session,
                policy,
            ),
            wallets: WalletsClient::new(t(), c(), navigator, policy),
            cards: VirtualCardsClient::new(t(), c(), policy),
            exchange: ExchangeSession::new(t(), c(), policy),
            deposits: DepositsFetcher::new(t(), c(), policy),
            card_transactions: CardTransactionsFetcher::new(t(), c(), policy),
            fx_transactions: FxTransactionsFetcher::new(t(), c(), policy),
            routes: RouteTable::from_config(&config.session),
        }
    }

    /// Builds the dashboard on the HTTP transport and the file credential
    /// store named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect(config: &AppConfig, navigator: Arc<dyn Navigator>) -> AppResult<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config.api)?);
        let credentials = Arc::new(FileCredentialStore::new(PathBuf::from(
            &config.session.credential_path,
        )));
        Ok(Self::new(config, transport, credentials, navigator))
    }

    /// A fresh route gate over the configured route table.
    #[must_use]
    pub fn route_gate(&self) -> RouteGate {
        RouteGate::new(self.routes.clone())
    }

    /// Generates a quote against the last fetched wallets.
    pub async fn generate_quote(&self, form: &QuoteForm) -> Result<Quote, ExchangeError> {
        let wallets = self.wallets.cached();
        self.exchange.generate_quote(form, &wallets).await
    }

    /// Executes the held quote and refreshes balances on success.
    pub async fn execute_quote(&self) -> Result<String, ExchangeError> {
        self.exchange.execute_quote(self).await
    }
}

#[async_trait]
impl RefreshTrigger for Dashboard {
    async fn refresh_wallets(&self) {
        if let Err(err) = self.wallets.list().await {
            warn!(error = %err, "wallet refresh failed");
        }
    }

    async fn refresh_fx_transactions(&self) {
        self.fx_transactions.load().await;
    }
}
