//! scrutin daemon: entry point for the election client.

use anyhow::Context;
use clap::Parser;
use scrutin_console::{AdminConsole, ClientConfig, VoterConsole};
use scrutin_controller::{PhaseController, Session};
use scrutin_identity::{
    run_face_auth, FaceAuthConfig, FaceAuthOutcome, FrameSource, IdentityClient, IdentityError,
};
use scrutin_ledger::MemoryLedger;
use scrutin_types::candidate::CandidateRegistration;
use scrutin_types::voter::VoterRegistration;
use scrutin_types::{Role, WalletAddress};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "scrutin-daemon", about = "scrutin election client daemon")]
struct Cli {
    /// Base URL of the identity verification service.
    #[arg(long, env = "SCRUTIN_IDENTITY_URL")]
    identity_url: Option<String>,

    /// Admin wallet address for the dev ledger.
    #[arg(long, env = "SCRUTIN_ADMIN_ADDRESS")]
    admin_address: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "SCRUTIN_LOG_LEVEL")]
    log_level: String,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a scripted election lifecycle against a dev ledger.
    Demo,
    /// Parse a registration CSV and report accepted and skipped rows.
    Ingest {
        #[command(subcommand)]
        kind: IngestKind,
    },
    /// Authenticate an address by face against the identity service.
    AuthFace {
        /// Wallet address to authenticate.
        #[arg(long)]
        address: String,
        /// JPEG files used as camera frames, one per attempt (cycled).
        #[arg(long, required = true)]
        frames: Vec<PathBuf>,
    },
}

#[derive(clap::Subcommand)]
enum IngestKind {
    /// Voter CSV: address,firstName,lastName,idCardNumber,age
    Voters { file: PathBuf },
    /// Candidate CSV: firstName,lastName,address,certificationCode,politicalParty,age
    Candidates { file: PathBuf },
}

/// Frame source backed by pre-captured JPEG files, cycled per attempt.
struct FileFrameSource {
    frames: Vec<PathBuf>,
    next: usize,
}

impl FileFrameSource {
    fn new(frames: Vec<PathBuf>) -> Self {
        Self { frames, next: 0 }
    }
}

impl FrameSource for FileFrameSource {
    fn capture_frame(&mut self) -> Result<Vec<u8>, IdentityError> {
        let path = &self.frames[self.next % self.frames.len()];
        self.next += 1;
        std::fs::read(path)
            .map_err(|e| IdentityError::CameraUnavailable(format!("{}: {e}", path.display())))
    }

    fn release(&mut self) {
        tracing::debug!("frame source released");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = if let Some(ref config_path) = cli.config {
        let path = config_path.to_string_lossy();
        ClientConfig::from_toml_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?
    } else {
        ClientConfig::default()
    };
    if let Some(url) = cli.identity_url {
        config.identity_url = url;
    }
    if let Some(addr) = cli.admin_address {
        config.admin_address = addr;
    }
    config.log_level = cli.log_level;

    scrutin_utils::init_tracing_with_level(&config.log_level);

    match cli.command {
        Command::Demo => run_demo(&config),
        Command::Ingest { kind } => run_ingest(kind),
        Command::AuthFace { address, frames } => run_auth_face(&config, &address, frames).await,
    }
}

/// Scripted lifecycle against a dev ledger: start, register, vote, tally.
fn run_demo(config: &ClientConfig) -> anyhow::Result<()> {
    let admin_address = WalletAddress::parse(&config.admin_address)?;
    let ledger = MemoryLedger::with_options(
        admin_address.clone(),
        config.min_voting_age,
        config.bulk_policy,
    );
    let controller = Arc::new(PhaseController::new(Arc::new(ledger)));

    let admin = match Session::from_role(Role::Admin, admin_address, controller.clone()) {
        Session::Admin(s) => AdminConsole::new(s),
        Session::Voter(_) => unreachable!("admin role builds an admin session"),
    };

    admin.start_election()?;
    let voter_address = WalletAddress::parse("0x00000000000000000000000000000000000000aa")?;
    admin.register_voter(VoterRegistration {
        address: voter_address.clone(),
        first_name: "Alice".into(),
        last_name: "Martin".into(),
        id_card_number: "ID0001".into(),
        age: 34,
    })?;
    admin.advance_phase()?;
    admin.register_candidate(CandidateRegistration {
        first_name: "Denis".into(),
        last_name: "Roche".into(),
        address: WalletAddress::parse("0x00000000000000000000000000000000000000bb")?,
        certification_code: "CERT01".into(),
        political_party: "Unity".into(),
        age: 51,
    })?;
    admin.advance_phase()?;

    let voter = match Session::from_role(Role::Voter, voter_address, controller) {
        Session::Voter(s) => VoterConsole::new(s),
        Session::Admin(_) => unreachable!("voter role builds a voter session"),
    };
    println!("{}", voter.render_board()?);
    voter.vote(1)?;

    admin.advance_phase()?;
    println!("{}", admin.render_overview()?);
    println!("{}", admin.render_candidate_table()?);
    Ok(())
}

fn run_ingest(kind: IngestKind) -> anyhow::Result<()> {
    match kind {
        IngestKind::Voters { file } => {
            let ingested = scrutin_ingest::read_voters_file(&file)?;
            println!("accepted rows: {}", ingested.batch.len());
            for row in &ingested.skipped {
                println!("skipped line {}: {}", row.line, row.reason);
            }
        }
        IngestKind::Candidates { file } => {
            let ingested = scrutin_ingest::read_candidates_file(&file)?;
            println!("accepted rows: {}", ingested.batch.len());
            for row in &ingested.skipped {
                println!("skipped line {}: {}", row.line, row.reason);
            }
        }
    }
    Ok(())
}

async fn run_auth_face(
    config: &ClientConfig,
    address: &str,
    frames: Vec<PathBuf>,
) -> anyhow::Result<()> {
    let address = WalletAddress::parse(address)?;
    let client = IdentityClient::with_timeout(
        config.identity_url.as_str(),
        Duration::from_secs(config.request_timeout_secs),
    );
    let face_config = FaceAuthConfig {
        interval: Duration::from_secs(config.face_auth_interval_secs),
        max_failures: config.face_auth_max_failures,
    };

    // Ctrl-C cancels the loop; the camera is released on every exit path.
    let (cancel_tx, cancel_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received SIGINT, cancelling authentication");
            let _ = cancel_tx.send(());
        }
    });

    let source = FileFrameSource::new(frames);
    match run_face_auth(&client, &address, source, face_config, cancel_rx).await {
        FaceAuthOutcome::Authenticated(role) => {
            println!("authenticated as {role}");
            Ok(())
        }
        FaceAuthOutcome::RetriesExhausted { attempts } => {
            anyhow::bail!("authentication failed after {attempts} attempts")
        }
        FaceAuthOutcome::Cancelled => {
            println!("authentication cancelled");
            Ok(())
        }
    }
}
