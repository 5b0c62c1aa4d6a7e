use crate::demo::run_demo;
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::identity::token::TokenKeys;
use jobboard::identity::{Actor, Role};

#[derive(Parser, Debug)]
#[command(
    name = "Job Board API",
    about = "Run the job board application service and its operator helpers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Sign a bearer token for local testing
    Token(TokenArgs),
    /// Walk through apply, triage and inbox against in-memory stores
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct TokenArgs {
    /// User id placed in the `sub` claim
    #[arg(long)]
    pub(crate) user: String,
    /// candidate, employer or admin
    #[arg(long, value_parser = parse_role)]
    pub(crate) role: Role,
    /// Optional display name claim
    #[arg(long)]
    pub(crate) name: Option<String>,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role '{raw}'"))
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Token(args) => issue_token(args),
        Command::Demo => run_demo(),
    }
}

fn issue_token(args: TokenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let keys = TokenKeys::new(&config.auth);
    let token = keys.issue(&Actor::new(args.user, args.role), args.name)?;
    println!("{token}");
    Ok(())
}
