//! Test utilities with lazy testcontainers support
//!
//! The PostgreSQL container is started on first use and shared across
//! tests; each test creates its own rows under fresh UUIDs instead of
//! truncating shared state.

pub mod containers {
    use testcontainers::{runners::AsyncRunner, ContainerAsync};
    use testcontainers_modules::postgres::Postgres;
    use tokio::sync::OnceCell;

    static POSTGRES: OnceCell<ContainerAsync<Postgres>> = OnceCell::const_new();

    async fn get_postgres() -> &'static ContainerAsync<Postgres> {
        POSTGRES
            .get_or_init(|| async {
                Postgres::default()
                    .with_user("algotutor")
                    .with_password("algotutor_test")
                    .with_db_name("algotutor_test")
                    .start()
                    .await
                    .expect("Failed to start PostgreSQL container")
            })
            .await
    }

    /// Get PostgreSQL connection URL from the container
    pub async fn postgres_url() -> String {
        let container = get_postgres().await;
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        format!("postgres://algotutor:algotutor_test@{host}:{port}/algotutor_test")
    }
}

pub mod db {
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::models::{Problem, User};

    /// Fresh migrated pool against the shared test container.
    /// Pools are per-test because each `#[tokio::test]` has its own runtime.
    pub async fn test_pool() -> PgPool {
        let url = super::containers::postgres_url().await;
        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Insert a user with a unique name
    pub async fn create_user(pool: &PgPool) -> User {
        let suffix = Uuid::new_v4().simple().to_string();
        crate::db::repositories::UserRepository::create(
            pool,
            &format!("user-{}", &suffix[..12]),
            &format!("{}@example.com", &suffix[..12]),
            "not-a-real-hash",
        )
        .await
        .expect("Failed to create test user")
    }

    /// Insert a minimal EASY problem
    pub async fn create_problem(pool: &PgPool) -> Problem {
        crate::db::repositories::ProblemRepository::create(
            pool,
            "Two Sum",
            "Find two numbers that add to a target.",
            "EASY",
            &["array".to_string()],
            &serde_json::json!({}),
        )
        .await
        .expect("Failed to create test problem")
    }
}
