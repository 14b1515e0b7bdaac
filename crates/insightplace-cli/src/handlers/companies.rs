//! Company command handlers.

use anyhow::Result;
use insightplace_core::{ClientInfo, Company, NewCompany};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_companies;

/// Audit entries written by the CLI carry this in place of an IP address.
pub const CLI_CLIENT: &str = "cli";

pub fn cli_client() -> ClientInfo {
    ClientInfo::new(CLI_CLIENT.to_string(), None)
}

pub async fn create(ctx: &CliContext, name: &str, description: Option<String>) -> Result<Company> {
    let admin = ctx.operator().await?;
    Ok(ctx
        .core()
        .admin()
        .create_company(&admin, NewCompany::new(name, description), &cli_client())
        .await
        .map_err(CliError::from)?)
}

pub async fn execute_create(
    ctx: &CliContext,
    name: &str,
    description: Option<String>,
) -> Result<()> {
    let company = create(ctx, name, description).await?;
    println!("Created company {} ({})", company.name, company.id);
    Ok(())
}

pub async fn execute_list(ctx: &CliContext) -> Result<()> {
    let admin = ctx.operator().await?;
    let companies = ctx
        .core()
        .admin()
        .list_companies(&admin)
        .await
        .map_err(CliError::from)?;
    if companies.is_empty() {
        println!("No companies found.");
        return Ok(());
    }
    println!("Found {} compan(ies):\n", companies.len());
    print_companies(&companies);
    Ok(())
}
