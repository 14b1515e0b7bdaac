//! CLI entry point.
//!
//! `serve` hands the configuration to the web adapter; every other command
//! goes through `CliContext`.

use clap::Parser;
use insightplace_cli::handlers::users::CreateUserArgs;
use insightplace_cli::{Cli, CliError, Commands, bootstrap, handlers};
use insightplace_core::PortalConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter())),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(CliError::exit_code_for(&e));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Commands::HashPassword { password } = &cli.command {
        return handlers::password::execute(password);
    }

    let mut config = PortalConfig::from_env().map_err(CliError::from)?;
    cli.apply_overrides(&mut config);

    if let Commands::Serve { .. } = cli.command {
        return handlers::serve::execute(&config).await;
    }

    let ctx = bootstrap(&config).await?;
    match cli.command {
        Commands::Seed { .. } => handlers::seed::execute(&ctx).await,
        Commands::CreateCompany { name, description } => {
            handlers::companies::execute_create(&ctx, &name, description).await
        }
        Commands::CreateUser {
            email,
            full_name,
            company,
            password,
            admin,
            send_welcome,
        } => {
            handlers::users::execute_create(
                &ctx,
                CreateUserArgs {
                    email,
                    full_name,
                    company,
                    password,
                    admin,
                    send_welcome,
                },
            )
            .await
        }
        Commands::ListCompanies => handlers::companies::execute_list(&ctx).await,
        Commands::ListUsers { company } => {
            handlers::users::execute_list(&ctx, company.as_deref()).await
        }
        Commands::Serve { .. } | Commands::HashPassword { .. } => Ok(()),
    }
}
