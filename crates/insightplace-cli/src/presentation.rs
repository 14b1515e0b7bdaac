//! Table formatting for terminal output.

use insightplace_core::{Company, UserResponse};

/// Truncate to `max_len` characters, ending with "..." when cut.
///
/// ```rust
/// use insightplace_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Acme", 10), "Acme");
/// assert_eq!(truncate_string("InsightPlace Admin", 8), "Insig...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

pub fn company_row(company: &Company) -> String {
    format!(
        "{:<36} {:<28} {:<8} {}",
        company.id,
        truncate_string(&company.name, 27),
        if company.active { "active" } else { "inactive" },
        company.created_at.format("%Y-%m-%d %H:%M"),
    )
}

pub fn print_companies(companies: &[Company]) {
    println!("{:<36} {:<28} {:<8} Created", "ID", "Name", "Status");
    print_separator(90);
    for company in companies {
        println!("{}", company_row(company));
    }
}

pub fn user_row(user: &UserResponse) -> String {
    let last_login = user
        .last_login
        .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string());
    format!(
        "{:<32} {:<24} {:<7} {:<8} {}",
        truncate_string(&user.email, 31),
        truncate_string(&user.full_name, 23),
        user.role.as_str(),
        if user.active { "active" } else { "inactive" },
        last_login,
    )
}

pub fn print_users(users: &[UserResponse]) {
    println!(
        "{:<32} {:<24} {:<7} {:<8} Last login",
        "Email", "Name", "Role", "Status"
    );
    print_separator(90);
    for user in users {
        println!("{}", user_row(user));
    }
}
