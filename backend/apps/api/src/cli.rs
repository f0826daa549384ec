//! Command line

use std::sync::Arc;

use accounts::PgAccountsRepository;
use accounts::application::{CreateStaffInput, CreateStaffUseCase};
use clap::{Args, Parser, Subcommand};

use crate::config::ServerConfig;
use crate::server;

#[derive(Parser, Debug)]
#[command(name = "api", about = "Job board HTTP service", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Create an administrator account
    CreateStaff(CreateStaffArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Keep everything in memory; nothing survives a restart
    #[arg(long)]
    pub(crate) in_memory: bool,
    /// Override `BIND_ADDR`
    #[arg(long)]
    pub(crate) bind: Option<std::net::SocketAddr>,
}

#[derive(Args, Debug)]
struct CreateStaffArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Staff without superuser rights: the admin listing shows only
    /// their own offers
    #[arg(long)]
    staff_only: bool,
}

pub(crate) async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));
    let config = ServerConfig::from_env()?;

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::CreateStaff(args) => create_staff(args, config).await,
    }
}

async fn create_staff(args: CreateStaffArgs, config: ServerConfig) -> anyhow::Result<()> {
    let pool = server::connect(&config).await?;
    let repo = Arc::new(PgAccountsRepository::new(pool));

    let use_case = CreateStaffUseCase::new(repo, Arc::new(config.accounts));
    let input = CreateStaffInput {
        username: args.username,
        email: args.email,
        password: args.password,
        superuser: !args.staff_only,
    };

    match use_case.execute(input).await {
        Ok(account) => {
            tracing::info!(
                account_id = %account.account_id,
                superuser = account.is_superuser,
                "Staff account created"
            );
            Ok(())
        }
        Err(e) => match e.field_errors() {
            Some(fields) => {
                for (field, messages) in fields.iter() {
                    for message in messages {
                        tracing::error!(field, error = %message, "Invalid staff account");
                    }
                }
                anyhow::bail!("staff account not created")
            }
            None => Err(e.into()),
        },
    }
}
