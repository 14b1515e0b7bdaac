//! Idempotent bootstrap data: the admin tenant and, optionally, a demo client.

use secrecy::ExposeSecret;

use crate::config::SeedSettings;
use crate::domain::{Company, NewCompany, User, UserRole};
use crate::ports::{CoreError, Repos};
use crate::security::PasswordHasher;

pub const ADMIN_COMPANY_NAME: &str = "InsightPlace Admin";
const ADMIN_COMPANY_DESCRIPTION: &str = "Administrative company for InsightPlace";
const ADMIN_FULL_NAME: &str = "Admin User";

pub const DEMO_COMPANY_NAME: &str = "Demo Client";
pub const DEMO_USER_EMAIL: &str = "demo@insightplace.com";
const DEMO_USER_PASSWORD: &str = "demo123";

/// What a seeding run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub companies_created: usize,
    pub users_created: usize,
}

#[derive(Clone)]
pub struct Seeder {
    repos: Repos,
    hasher: PasswordHasher,
}

impl Seeder {
    pub const fn new(repos: Repos, hasher: PasswordHasher) -> Self {
        Self { repos, hasher }
    }

    /// Ensure the admin company and admin account exist, plus demo data if enabled.
    pub async fn run(&self, settings: &SeedSettings) -> Result<SeedSummary, CoreError> {
        let mut summary = SeedSummary::default();

        let admin_company = self
            .ensure_company(ADMIN_COMPANY_NAME, ADMIN_COMPANY_DESCRIPTION, &mut summary)
            .await?;
        self.ensure_user(
            &settings.admin_email,
            ADMIN_FULL_NAME,
            settings.admin_password.expose_secret(),
            &admin_company,
            UserRole::Admin,
            &mut summary,
        )
        .await?;

        if settings.demo_data {
            let demo = self
                .ensure_company(DEMO_COMPANY_NAME, "Demo client company", &mut summary)
                .await?;
            self.ensure_user(
                DEMO_USER_EMAIL,
                "Demo Client",
                DEMO_USER_PASSWORD,
                &demo,
                UserRole::Client,
                &mut summary,
            )
            .await?;
        }

        Ok(summary)
    }

    async fn ensure_company(
        &self,
        name: &str,
        description: &str,
        summary: &mut SeedSummary,
    ) -> Result<Company, CoreError> {
        if let Some(existing) = self.repos.companies.get_by_name(name).await? {
            return Ok(existing);
        }
        let company = NewCompany::new(name, Some(description.to_string())).into_company();
        self.repos.companies.insert(&company).await?;
        summary.companies_created += 1;
        tracing::info!(company = %company.name, "Created company");
        Ok(company)
    }

    async fn ensure_user(
        &self,
        email: &str,
        full_name: &str,
        password: &str,
        company: &Company,
        role: UserRole,
        summary: &mut SeedSummary,
    ) -> Result<(), CoreError> {
        if self.repos.users.get_by_email(email).await?.is_some() {
            return Ok(());
        }
        let now = chrono::Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
            company_id: company.id.clone(),
            role,
            active: true,
            hashed_password: self.hasher.hash_async(password.to_string()).await?,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.repos.users.insert(&user).await?;
        summary.users_created += 1;
        tracing::info!(email, role = %role, company = %company.name, "Created user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::Harness;
    use secrecy::SecretString;

    fn settings(demo: bool) -> SeedSettings {
        SeedSettings {
            admin_email: "root@insightplace.com".into(),
            admin_password: SecretString::from("s3cret".to_string()),
            demo_data: demo,
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let h = Harness::new();
        let first = h.core.seeder().run(&settings(false)).await.unwrap();
        assert_eq!(
            first,
            SeedSummary {
                companies_created: 1,
                users_created: 1
            }
        );
        let second = h.core.seeder().run(&settings(false)).await.unwrap();
        assert_eq!(second, SeedSummary::default());

        let admin = h
            .repos
            .users
            .get_by_email("root@insightplace.com")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin());
        assert!(h.hasher.verify("s3cret", &admin.hashed_password));
    }

    #[tokio::test]
    async fn demo_data_is_optional() {
        let h = Harness::new();
        let summary = h.core.seeder().run(&settings(true)).await.unwrap();
        assert_eq!(summary.companies_created, 2);
        assert_eq!(summary.users_created, 2);

        let demo = h.repos.users.get_by_email(DEMO_USER_EMAIL).await.unwrap().unwrap();
        assert_eq!(demo.role, UserRole::Client);
    }

    #[tokio::test]
    async fn seeded_admin_can_log_in() {
        let h = Harness::new();
        h.core.seeder().run(&settings(false)).await.unwrap();
        let outcome = h
            .core
            .auth()
            .login(
                "root@insightplace.com",
                "s3cret",
                &crate::domain::ClientInfo::default(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.company.name, ADMIN_COMPANY_NAME);
    }
}
