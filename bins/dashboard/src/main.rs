//! Vaultdash command-line dashboard
//!
//! Resolves the stored session, signs in from the environment when needed,
//! and prints an overview of wallets, cards, and recent activity.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vaultdash_client::Dashboard;
use vaultdash_client::auth::LoginInput;
use vaultdash_core::routing::{GateState, Navigator};
use vaultdash_shared::AppConfig;

/// Navigator for a terminal session: every navigation is logged.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn replace(&self, path: &str) {
        info!(path, "navigate");
    }

    fn reload(&self, path: &str) {
        info!(path, "reload");
    }

    fn open_external(&self, url: &str) {
        info!(url, "open this link in a browser to continue");
    }
}

fn login_from_env() -> Option<LoginInput> {
    let email = std::env::var("VAULTDASH_EMAIL").ok()?;
    let password = std::env::var("VAULTDASH_PASSWORD").ok()?;
    Some(LoginInput { email, password })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaultdash=info,vaultdash_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    info!(base_url = %config.api.base_url, "Using API");

    let dashboard = Dashboard::connect(&config, Arc::new(TerminalNavigator))?;
    let mut gate = dashboard.route_gate();

    let mut state = dashboard
        .session
        .navigate(&mut gate, &config.session.landing_path)
        .await;

    if state != GateState::Authenticated {
        let Some(input) = login_from_env() else {
            warn!("Not signed in; set VAULTDASH_EMAIL and VAULTDASH_PASSWORD");
            return Ok(());
        };
        match dashboard.auth.login(&input, &dashboard.session).await {
            Ok(message) => info!("{message}"),
            Err(err) => {
                warn!(error = %err, "Sign-in failed");
                return Ok(());
            }
        }
        state = dashboard.session.check(&mut gate, &config.session.landing_path);
    }
    info!(%state, "Route gate settled");

    if let Some(user) = dashboard.session.user() {
        info!(user_id = %user.id, "Welcome, {}", user.full_name());
    }

    for wallet in dashboard.wallets.list().await? {
        info!(currency = %wallet.currency, balance = %wallet.balance, "Wallet");
    }

    match dashboard.cards.list().await {
        Ok(cards) => {
            for card in cards {
                info!(
                    card_id = %card.card_id,
                    masked_pan = %card.masked_pan,
                    frozen = card.is_frozen(),
                    "Virtual card"
                );
            }
        }
        Err(err) => warn!(error = %err, "Could not load virtual cards"),
    }

    tokio::join!(
        dashboard.deposits.load(),
        dashboard.card_transactions.load(),
        dashboard.fx_transactions.load(),
    );

    let lists = [
        ("Deposits", dashboard.deposits.summary()),
        ("Card transactions", dashboard.card_transactions.summary()),
        ("FX transactions", dashboard.fx_transactions.summary()),
    ];
    for (name, summary) in lists {
        match summary {
            Some(summary) => info!(list = name, "{summary}"),
            None => warn!(list = name, "Could not load list"),
        }
    }

    for fx in dashboard.fx_transactions.items() {
        if let Some(rate) = fx.rate_label() {
            info!(reference = %fx.reference, "{rate}");
        }
    }

    Ok(())
}
