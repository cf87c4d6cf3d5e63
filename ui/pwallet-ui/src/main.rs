use anyhow::Context;
use pwallet::account::Account;
use pwallet::config::AppConfig;
use pwallet::state::AppContext;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pwallet=info,pwallet_chain=info")),
        )
        .init();

    let config = AppConfig::load().context("loading config")?;
    let account = match Account::from_env(&config.private_key_env) {
        Ok(account) => {
            tracing::info!(address = %account.address, "account loaded");
            Some(account)
        }
        Err(e) => {
            tracing::warn!(error = %e, "starting without an account");
            None
        }
    };

    let context = AppContext::from_config(config, account).context("building clients")?;
    tracing::info!(chain = %context.chain.name, rpc = %context.chain.rpc_url, "launching");

    dioxus::LaunchBuilder::new()
        .with_context(context)
        .launch(pwallet::App);
    Ok(())
}
