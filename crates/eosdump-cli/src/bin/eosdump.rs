//! `eosdump`: log into Epic, bind the EOS SDK at runtime, and dump the
//! title's achievements, stats, catalog, entitlements, and leaderboards to
//! JSON.
//!
//! Exit status: 0 on success (including per-category failures, which are
//! logged and skipped), -1 on missing required configuration or a fatal
//! binding/login failure.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eosdump_cli::config::DumperParams;
use eosdump_cli::epic_web::{self, EpicWebClient, OAuthSession};
use eosdump_cli::error::CliError;
use eosdump_cli::{extract, logging, store};
use eosdump_cli::icons::IconFetcher;
use eosdump_sdk::ffi::{LoginCredentialType, PF_DISABLE_OVERLAY};
use eosdump_sdk::{PlatformConfig, Sdk, TickPump, WaitPolicy};

#[derive(Debug, Parser)]
#[command(name = "eosdump")]
#[command(about = "Dump EOS title data to JSON")]
struct Cli {
    /// Download achievement icons.
    #[arg(short, long)]
    icons: bool,

    /// Output directory; defaults to "dumper" beside the executable.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Title-storage files to download after the data categories.
    #[arg(long = "title-storage", value_name = "FILE")]
    title_storage: Vec<String>,

    /// Give up on a stuck SDK operation after this many seconds instead of
    /// waiting forever.
    #[arg(long, value_name = "SECONDS")]
    deadline: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(error = %err, "fatal");
        eprintln!("eosdump: {err}");
        std::process::exit(-1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let root = match cli.output {
        Some(path) => path,
        None => default_root()?,
    };
    std::fs::create_dir_all(&root).map_err(|source| CliError::Io {
        path: root.clone(),
        source,
    })?;
    logging::init(&root.join("dumper.log"))?;

    let policy = match cli.deadline {
        Some(seconds) => WaitPolicy::deadline(Duration::from_secs(seconds)),
        None => WaitPolicy::no_timeout(),
    };

    let mut params = DumperParams::load(&root.join("dumper_params.json"))?;

    // Epic web login: cached session first, interactive fallback.
    let mut web = EpicWebClient::new()?;
    let oauth_path = root.join("dumper_oauth.json");
    let mut logged_in = false;
    match store::load_json(&oauth_path) {
        Ok(value) => match serde_json::from_value::<OAuthSession>(value) {
            Ok(session) => match web.resume(session) {
                Ok(()) => logged_in = true,
                Err(err) => tracing::warn!(error = %err, "cached session rejected"),
            },
            Err(err) => tracing::warn!(error = %err, "cached session unreadable"),
        },
        Err(err) => tracing::warn!(error = %err, "no cached session"),
    }
    if !logged_in {
        let code = prompt_authorization_code()?;
        web.login_with_authorization_code(code.trim())?;
    }
    if let Some(session) = web.session() {
        match serde_json::to_value(session) {
            Ok(value) => {
                if let Err(err) = store::save_json(&oauth_path, &value) {
                    tracing::warn!(error = %err, "failed to cache session");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize session"),
        }
    }

    // Prefer a game refresh token scoped to the deployment; fall back to an
    // exchange code.
    let exchange_code = web.app_exchange_code()?;
    let (credential_type, credential) = {
        let deployment_id = params.deployment_id.clone().unwrap_or_default();
        let audience = params.audience.clone().unwrap_or_default();
        let secret_key = params.secret_key.clone().unwrap_or_default();
        match web.game_refresh_token(&exchange_code, &deployment_id, &audience, &secret_key) {
            Ok(token) if !token.is_empty() => (LoginCredentialType::RefreshToken, token),
            Ok(_) | Err(_) => {
                tracing::warn!("no game refresh token, falling back to an exchange code");
                let code = web.app_exchange_code()?;
                (LoginCredentialType::ExchangeCode, code)
            }
        }
    };

    // A refresh token names the deployment it was minted for; let it
    // override the parameter file.
    if credential_type == LoginCredentialType::RefreshToken {
        if let Some(claims) = epic_web::decode_jwt_payload(&credential) {
            params.merge_jwt_claims(&claims);
        }
    }
    let params = params.finalize()?;

    // Bind and start the SDK.
    let sdk = Sdk::load()?;
    sdk.initialize(&params.product_name, &params.product_version)?;

    let platform = sdk.create_platform(&PlatformConfig {
        product_id: params.product_id.clone(),
        sandbox_id: params.sandbox_id.clone(),
        deployment_id: params.deployment_id.clone(),
        client_id: params.audience.clone(),
        client_secret: params.secret_key.clone(),
        encryption_key: params.encryption_key.clone(),
        cache_directory: cache_directory()?,
        flags: PF_DISABLE_OVERLAY,
    })?;
    if let Err(err) = platform.set_override_locale_code(&params.locale) {
        tracing::warn!(error = %err, "failed to override locale");
    }

    let mut pump = TickPump::start(platform.tick_handle())?;

    platform.auth().login(&credential, credential_type, &policy)?;
    let token = platform.auth().copy_user_auth_token()?;
    platform.connect().login(&token.access_token, &policy)?;

    tracing::info!(
        account = %sdk.epic_account_id_to_string(platform.auth().logged_in_account(0)),
        user = %sdk.product_user_id_to_string(platform.connect().logged_in_user(0)),
        "logged in"
    );

    // Each category is best-effort: log and move on.
    let icons = IconFetcher::new(cli.icons)?;
    if let Err(err) = extract::achievements::dump(&platform, &root, &icons, &policy) {
        tracing::error!(error = %err, "achievements extraction failed");
    }
    if let Err(err) = extract::stats::dump(&platform, &root, &policy) {
        tracing::error!(error = %err, "stats extraction failed");
    }
    if let Err(err) = extract::catalog::dump(&platform, &root, &policy) {
        tracing::error!(error = %err, "catalog extraction failed");
    }
    if let Err(err) = extract::entitlements::dump(&platform, &root, &policy) {
        tracing::error!(error = %err, "entitlements extraction failed");
    }
    if let Err(err) = extract::leaderboards::dump(&platform, &root, &policy) {
        tracing::error!(error = %err, "leaderboards extraction failed");
    }
    if let Err(err) = extract::title_storage::dump(&platform, &root, &cli.title_storage, &policy) {
        tracing::error!(error = %err, "title storage extraction failed");
    }

    pump.stop();
    sdk.shutdown();
    Ok(())
}

fn default_root() -> Result<PathBuf, CliError> {
    Ok(exe_dir()?.join("dumper"))
}

/// The SDK cache lives beside the executable, like a shipped game's.
fn cache_directory() -> Result<PathBuf, CliError> {
    exe_dir()
}

fn exe_dir() -> Result<PathBuf, CliError> {
    let exe = std::env::current_exe().map_err(|source| CliError::Io {
        path: PathBuf::from("eosdump"),
        source,
    })?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn prompt_authorization_code() -> Result<String, CliError> {
    let stdin_err = |source| CliError::Io {
        path: PathBuf::from("<stdin>"),
        source,
    };

    print!(
        "EGL authorization code (get it at: {}): ",
        epic_web::AUTHORIZATION_CODE_URL
    );
    std::io::stdout().flush().map_err(stdin_err)?;

    let mut code = String::new();
    std::io::stdin().read_line(&mut code).map_err(stdin_err)?;
    Ok(code)
}
