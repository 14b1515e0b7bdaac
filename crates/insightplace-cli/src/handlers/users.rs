//! User command handlers.

use anyhow::Result;
use insightplace_core::{NewUser, UserResponse, UserRole};

use super::companies::cli_client;
use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_users;

/// Arguments of `create-user`.
#[derive(Debug, Clone)]
pub struct CreateUserArgs {
    pub email: String,
    pub full_name: String,
    pub company: String,
    pub password: String,
    pub admin: bool,
    pub send_welcome: bool,
}

pub async fn create(ctx: &CliContext, args: CreateUserArgs) -> Result<UserResponse> {
    let admin = ctx.operator().await?;
    let company = ctx.resolve_company(&args.company).await?;
    let new = NewUser {
        email: args.email,
        full_name: args.full_name,
        company_id: company.id,
        role: if args.admin {
            UserRole::Admin
        } else {
            UserRole::Client
        },
        active: true,
        password: args.password,
        send_welcome_email: args.send_welcome,
    };
    Ok(ctx
        .core()
        .admin()
        .create_user(&admin, new, &cli_client())
        .await
        .map_err(CliError::from)?)
}

pub async fn execute_create(ctx: &CliContext, args: CreateUserArgs) -> Result<()> {
    let user = create(ctx, args).await?;
    println!("Created {} account {} ({})", user.role, user.email, user.id);
    Ok(())
}

pub async fn execute_list(ctx: &CliContext, company: Option<&str>) -> Result<()> {
    let admin = ctx.operator().await?;
    let company_id = match company {
        Some(key) => Some(ctx.resolve_company(key).await?.id),
        None => None,
    };
    let users = ctx
        .core()
        .admin()
        .list_users(&admin, company_id.as_deref())
        .await
        .map_err(CliError::from)?;
    if users.is_empty() {
        println!("No users found.");
        return Ok(());
    }
    println!("Found {} user(s):\n", users.len());
    print_users(&users);
    Ok(())
}
