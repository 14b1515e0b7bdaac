//! Seed command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    let summary = ctx.seed().await?;
    if summary.companies_created == 0 && summary.users_created == 0 {
        println!("Nothing to do: seed data already present.");
    } else {
        println!(
            "Seeded {} compan(ies) and {} user(s).",
            summary.companies_created, summary.users_created
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::harness;

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let h = harness(true).await;
        let first = h.ctx.seed().await.unwrap();
        assert_eq!(first.companies_created, 2);
        assert_eq!(first.users_created, 2);

        execute(&h.ctx).await.unwrap();
        let again = h.ctx.seed().await.unwrap();
        assert_eq!(again.companies_created, 0);
        assert_eq!(again.users_created, 0);
    }
}
