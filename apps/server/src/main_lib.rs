use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use paperfolio_core::holdings::{HoldingsService, HoldingsServiceTrait};
use paperfolio_core::ledger::{LedgerService, LedgerServiceTrait};
use paperfolio_core::portfolio::{PortfolioService, PortfolioServiceTrait};
use paperfolio_core::trading::{TradingService, TradingServiceTrait};
use paperfolio_core::users::{PasswordHasherTrait, UserService, UserServiceTrait};
use paperfolio_market_data::{QuoteProvider, YahooChartProvider};
use paperfolio_storage_sqlite::holdings::HoldingsRepository;
use paperfolio_storage_sqlite::ledger::LedgerRepository;
use paperfolio_storage_sqlite::trading::TradingRepository;
use paperfolio_storage_sqlite::users::UserRepository;
use paperfolio_storage_sqlite::{db, DbPool};

use crate::auth::{Argon2Hasher, AuthManager};
use crate::config::Config;

/// Shared application state handed to every handler.
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub trading_service: Arc<dyn TradingServiceTrait>,
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub quote_provider: Arc<dyn QuoteProvider>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("PF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Builds the application state against the live Yahoo chart provider,
/// or against `PF_QUOTE_BASE_URL` when set.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let quote_provider: Arc<dyn QuoteProvider> = match &config.quote_base_url {
        Some(base_url) => Arc::new(YahooChartProvider::with_base_url(base_url.clone())),
        None => Arc::new(YahooChartProvider::new()),
    };
    build_state_with_provider(config, quote_provider).await
}

/// Builds the application state with an injected quote provider. Tests
/// use this to run the full stack against a deterministic stub.
pub async fn build_state_with_provider(
    config: &Config,
    quote_provider: Arc<dyn QuoteProvider>,
) -> anyhow::Result<Arc<AppState>> {
    let pool = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let writer = db::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(pool.clone()));
    let holdings_repository = Arc::new(HoldingsRepository::new(pool.clone()));
    let trading_repository = Arc::new(TradingRepository::new(writer));

    let hasher: Arc<dyn PasswordHasherTrait> = Arc::new(Argon2Hasher);
    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(
        user_repository.clone(),
        hasher,
        config.starting_cash,
    ));
    let ledger_service: Arc<dyn LedgerServiceTrait> =
        Arc::new(LedgerService::new(ledger_repository.clone()));
    let holdings_service: Arc<dyn HoldingsServiceTrait> = Arc::new(HoldingsService::new(
        holdings_repository,
        ledger_repository,
    ));
    let trading_service: Arc<dyn TradingServiceTrait> = Arc::new(TradingService::new(
        trading_repository,
        quote_provider.clone(),
    ));
    let portfolio_service: Arc<dyn PortfolioServiceTrait> = Arc::new(PortfolioService::new(
        user_repository,
        holdings_service.clone(),
        quote_provider.clone(),
    ));

    let auth = Arc::new(AuthManager::new(&config.auth));

    Ok(Arc::new(AppState {
        user_service,
        trading_service,
        portfolio_service,
        holdings_service,
        ledger_service,
        quote_provider,
        auth,
        pool,
    }))
}
