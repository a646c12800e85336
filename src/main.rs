use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fireseed::auth::FirebaseAuthClient;
use fireseed::error::FirebaseError;
use fireseed::firestore::client::{FirestoreClient, FirestoreClientOptions};
use fireseed::provision::{AccountRequest, Provisioner, Report};
use fireseed::ServiceAccount;

/// Seeds a Firebase project with test accounts: one Auth user plus one
/// Firestore profile document per entry in the accounts file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the Firebase service account key file.
    #[arg(long, default_value = "./serviceAccountKey.json")]
    service_account: PathBuf,

    /// Path to the JSON file listing the accounts to provision.
    #[arg(long, default_value = "./accounts.json")]
    accounts: PathBuf,

    /// Firestore endpoint override, e.g. a local emulator at
    /// `https://127.0.0.1:8081`.
    #[arg(long)]
    firestore_host: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Exit codes: 0 when every account ended up provisioned, 1 when any
    // record failed, 2 when the run could not even start (bad credentials,
    // missing accounts file, unreachable backend).
    match run(Args::parse()).await {
        Ok(report) => {
            println!("\n{report}");
            if report.fully_provisioned() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<Report, FirebaseError> {
    let service_account = ServiceAccount::from_file(&args.service_account)?;
    let accounts = AccountRequest::list_from_file(&args.accounts)?;

    let auth_client = FirebaseAuthClient::new(service_account.clone())?;

    let firestore_options = match args.firestore_host {
        Some(host_url) => FirestoreClientOptions::default().host_url(host_url),
        None => FirestoreClientOptions::default(),
    };
    let firestore_client = FirestoreClient::initialise(service_account, firestore_options).await?;

    let mut provisioner = Provisioner::new(auth_client, firestore_client);
    Ok(provisioner.run(&accounts).await)
}
