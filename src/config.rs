// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{
        AuditRepository, CategoryRepository, DistributionRepository, RegistryRepository,
        ResourceRepository, UserRepository,
    },
    services::{
        auth_service::AuthService, ledger_service::LedgerService, report_service::ReportService,
    },
    store::{DocumentStore, PgStore},
};

// The shared state: the document store plus the service graph built over it.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub ledger_service: LedgerService,
    pub report_service: ReportService,
    pub registry_repo: RegistryRepository,
    pub audit_repo: AuditRepository,
    pub user_repo: UserRepository,
}

impl AppState {
    /// Production wiring: a Postgres-backed store from the environment.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("database connection established");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("failed to run database migrations")?;

        Ok(Self::with_store(Arc::new(PgStore::new(db_pool)), jwt_secret))
    }

    /// Builds the dependency graph over any store implementation. The test
    /// suite passes a `MemoryStore` here.
    pub fn with_store(store: Arc<dyn DocumentStore>, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(store.clone());
        let resource_repo = ResourceRepository::new(store.clone());
        let distribution_repo = DistributionRepository::new(store.clone());
        let category_repo = CategoryRepository::new(store.clone());
        let registry_repo = RegistryRepository::new(store.clone());
        let audit_repo = AuditRepository::new(store.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let ledger_service =
            LedgerService::new(resource_repo, distribution_repo.clone(), category_repo);
        let report_service = ReportService::new(distribution_repo);

        Self {
            store,
            jwt_secret,
            auth_service,
            ledger_service,
            report_service,
            registry_repo,
            audit_repo,
            user_repo,
        }
    }
}
