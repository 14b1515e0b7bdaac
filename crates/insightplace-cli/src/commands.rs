//! Available subcommands.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the admin account, and optionally demo data, if missing
    Seed {
        /// Also create the demo client company and user
        #[arg(long)]
        demo: bool,
    },

    /// Register a client company
    CreateCompany {
        /// Company name (must be unique)
        name: String,
        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Create a portal account
    CreateUser {
        /// Login email
        email: String,
        /// Display name
        #[arg(long = "name")]
        full_name: String,
        /// Company name or id
        #[arg(long)]
        company: String,
        /// Initial password
        #[arg(long, env = "INSIGHTPLACE_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// Grant admin access
        #[arg(long)]
        admin: bool,
        /// Email the credentials to the new user
        #[arg(long)]
        send_welcome: bool,
    },

    /// List companies
    ListCompanies,

    /// List accounts
    ListUsers {
        /// Only accounts of this company (name or id)
        #[arg(long)]
        company: Option<String>,
    },

    /// Print the bcrypt hash of a password
    HashPassword {
        password: String,
    },
}
