//! Coupon client entry point: claim a coupon or administer the roster.

use std::ffi::OsString;
use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use client::config::ApiSettings;
use client::domain::{
    ClaimState, ClaimWorkflow, DomainError, LoginCredentials, RosterWorkflow, SessionGate,
    SessionState,
};
use client::outbound::http::HttpCouponApi;

/// `coupon-client` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "client",
    about = "Client for the coupon distribution service",
    version
)]
struct CliArgs {
    /// Base URL of the coupon service. Falls back to `COUPON_BASE_URL`.
    #[arg(long = "api-url", value_name = "url")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Claim one coupon from the public pool.
    Claim,
    /// Administer the coupon roster (requires admin credentials).
    Admin {
        /// Admin username.
        #[arg(long)]
        username: String,
        /// Admin password.
        #[arg(long)]
        password: String,
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
enum AdminAction {
    /// List the roster with status labels and claim counts.
    List,
    /// Create a new coupon with the given code.
    Add {
        /// Code for the new coupon.
        code: String,
    },
    /// Flip a coupon's active status.
    Toggle {
        /// Identifier of the coupon to toggle.
        id: String,
    },
}

fn main() -> io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| io::Error::other(format!("create Tokio runtime: {err}")))?;
    runtime.block_on(run())
}

async fn run() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let mut settings =
        ApiSettings::load_from_iter([OsString::from("client")]).map_err(io::Error::other)?;
    if let Some(api_url) = args.api_url {
        settings.base_url = Some(api_url);
    }

    let base_url = settings.base_url().map_err(io::Error::other)?;
    let api = Arc::new(
        HttpCouponApi::new(base_url, settings.request_timeout()).map_err(io::Error::other)?,
    );

    match args.command {
        Command::Claim => run_claim(api).await,
        Command::Admin {
            username,
            password,
            action,
        } => run_admin(api, &username, &password, action).await,
    }
}

async fn run_claim(api: Arc<HttpCouponApi>) -> io::Result<()> {
    let workflow = ClaimWorkflow::new(api);
    workflow.claim().await;
    match workflow.state() {
        ClaimState::Succeeded(result) => {
            info!(code = %result.code(), "coupon claimed; use it at checkout");
            Ok(())
        }
        ClaimState::Failed(failure) => {
            report_error(&failure);
            Err(io::Error::other(failure.to_string()))
        }
        ClaimState::Idle | ClaimState::Pending => Err(io::Error::other("claim did not resolve")),
    }
}

async fn run_admin(
    api: Arc<HttpCouponApi>,
    username: &str,
    password: &str,
    action: AdminAction,
) -> io::Result<()> {
    let gate = SessionGate::new(Arc::clone(&api));
    gate.login(&LoginCredentials::new(username, password)).await;
    match gate.state() {
        SessionState::Authenticated => {}
        SessionState::Failed(failure) => {
            report_error(&failure);
            return Err(io::Error::other(failure.to_string()));
        }
        SessionState::Idle | SessionState::Pending => {
            return Err(io::Error::other("login did not resolve"));
        }
    }

    let roster = RosterWorkflow::new(api);
    match action {
        AdminAction::List => {
            roster.refresh().await;
            let snapshot = roster.snapshot();
            if let Some(failure) = snapshot.load_error() {
                report_error(failure);
                return Err(io::Error::other(failure.to_string()));
            }
            if snapshot.coupons().is_empty() {
                info!("no coupons available; create the first one to start the promotion");
            }
            for coupon in snapshot.coupons() {
                info!(
                    id = %coupon.id(),
                    code = %coupon.code(),
                    status = coupon.status_label(),
                    claims = coupon.claim_count(),
                    "coupon"
                );
            }
            Ok(())
        }
        AdminAction::Add { code } => {
            roster.add_coupon(&code).await;
            if roster.snapshot().success_notice().is_none()
                && roster.snapshot().failure_notice().is_none()
            {
                warn!("nothing submitted; the coupon code was blank");
            }
            report_notices(&roster)
        }
        AdminAction::Toggle { id } => {
            roster.refresh().await;
            let snapshot = roster.snapshot();
            let Some(coupon) = snapshot.coupons().iter().find(|coupon| coupon.id() == id) else {
                return Err(io::Error::other(format!("no coupon with id {id}")));
            };
            roster
                .toggle_status(&id, coupon.is_active(), coupon.code())
                .await;
            report_notices(&roster)
        }
    }
}

fn report_notices(roster: &RosterWorkflow<HttpCouponApi>) -> io::Result<()> {
    let snapshot = roster.snapshot();
    if let Some(notice) = snapshot.failure_notice() {
        report_error(notice.error());
        return Err(io::Error::other(notice.error().to_string()));
    }
    if let Some(notice) = snapshot.success_notice() {
        info!("{}", notice.message());
    }
    Ok(())
}

fn report_error(failure: &DomainError) {
    error!(
        kind = ?failure.kind(),
        detail = failure.detail().unwrap_or_default(),
        retry_hint = failure.retry_hint().unwrap_or_default(),
        "{}: {}",
        failure.title(),
        failure.message()
    );
}
