//! UCS pod vNIC reconfiguration CLI
//!
//! Logs into a UCS Manager, converges every blade of the managed pod to a
//! named network profile (when one is selected), and prints the resulting
//! configuration. Without `-n`, only the current configuration is printed.

mod enumerate;
mod error;
mod profiles;
mod reconciler;
mod report;

use clap::Parser;
use error::AppError;
use profiles::NetworkProfile;
use reconciler::Reconciler;
use std::error::Error as _;
use tracing::{info, warn};
use ucsm_client::{UcsApi, UcsSession};

#[derive(Parser)]
#[command(name = "reconfig-net")]
#[command(about = "Reconfigure UCS pod blade vNICs to a named network profile", long_about = None)]
struct Cli {
    /// UCS Manager address
    #[arg(short, long)]
    ip: String,

    /// Account username for UCS Manager login
    #[arg(short, long)]
    username: String,

    /// Account password; prompted without echo when omitted
    #[arg(short, long)]
    password: Option<String>,

    /// Network profile to apply (FUEL or FOREMAN, case-insensitive);
    /// without it only the current configuration is printed
    #[arg(short, long)]
    network: Option<String>,
}

/// Authenticated phase: reconcile (if a profile was selected), then report
async fn run(
    session: &dyn UcsApi,
    profile: Option<&'static NetworkProfile>,
) -> Result<(), AppError> {
    if let Some(profile) = profile {
        println!("\nRECONFIGURING VNICs...");
        let reconciler = Reconciler::new(session);
        for server in enumerate::pod_servers(session).await? {
            reconciler.reconcile(&server, profile).await?;
        }
    }

    let config = report::render_network_config(session).await?;
    print!("{config}");
    Ok(())
}

/// Print an error and its source chain to stderr
fn report_error(err: &AppError) {
    eprintln!("Error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Resolve the profile before opening a session so a typo'd name never
    // logs in.
    let profile = match &cli.network {
        Some(name) => match profiles::lookup(name) {
            Ok(profile) => Some(profile),
            Err(err) => {
                report_error(&err);
                return;
            }
        },
        None => None,
    };

    let password = match cli.password {
        Some(password) => password,
        None => match rpassword::prompt_password("UCSM Password: ") {
            Ok(password) => password,
            Err(err) => {
                eprintln!("Error: failed to read password: {err}");
                return;
            }
        },
    };

    let session = match UcsSession::login(&cli.ip, &cli.username, &password).await {
        Ok(session) => session,
        Err(err) => {
            report_error(&AppError::LoginFailed(err));
            return;
        }
    };
    info!("Logged in to UCS Manager at {}", session.base_url());

    let result = run(&session, profile).await;

    // The session is closed on every path, error paths included.
    if let Err(err) = session.logout().await {
        warn!("Logout failed: {err}");
    }

    if let Err(err) = result {
        report_error(&err);
    }
}
