//! Command handlers.
//!
//! Each handler is a thin `execute` function: it calls into `PortalCore`
//! through `CliContext` and formats the result for the terminal.

pub mod companies;
pub mod password;
pub mod seed;
pub mod serve;
pub mod users;
