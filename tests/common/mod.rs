//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::MigrationHarness;

use pushkind_catalog::bootstrap::MIGRATIONS;
use pushkind_catalog::domain::category::NewCategory;
use pushkind_catalog::domain::product::NewProduct;
use pushkind_catalog::domain::tag::NewTag;
use pushkind_catalog::repository::{CategoryWriter, DieselRepository, TagWriter};
use pushkind_common::db::{DbPool, establish_connection_pool};

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

/// Creates tags with the given names and returns their ids.
pub fn seed_tags(repo: &DieselRepository, names: &[&str]) -> Vec<i32> {
    names
        .iter()
        .map(|name| repo.create_tag(&NewTag::new(*name)).expect("create tag").id)
        .collect()
}

/// Creates a category and returns its id.
pub fn seed_category(repo: &DieselRepository, name: &str) -> i32 {
    repo.create_category(&NewCategory::new(name))
        .expect("create category")
        .id
}

/// Minimal product payload.
pub fn new_product(name: &str, price_cents: i64) -> NewProduct {
    NewProduct::new(name, price_cents, 5)
}
