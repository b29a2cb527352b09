//! SQLite adapter for SampleItemRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::{NewSampleItem, SampleItem};
use crate::domain::ports::SampleItemRepository;

/// SQLite-backed sample item store.
#[derive(Clone)]
pub struct SqliteSampleItemRepository {
    pool: SqlitePool,
}

impl SqliteSampleItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SampleItemRow {
    id: i64,
    name: String,
    description: String,
    price: i64,
    category: String,
}

impl From<SampleItemRow> for SampleItem {
    fn from(row: SampleItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
        }
    }
}

#[async_trait]
impl SampleItemRepository for SqliteSampleItemRepository {
    async fn find_all(&self) -> DomainResult<Vec<SampleItem>> {
        let rows: Vec<SampleItemRow> = sqlx::query_as("SELECT * FROM sample_data ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(SampleItem::from).collect())
    }

    async fn find_by_category(&self, category: &str) -> DomainResult<Vec<SampleItem>> {
        let rows: Vec<SampleItemRow> =
            sqlx::query_as("SELECT * FROM sample_data WHERE category = ? ORDER BY id")
                .bind(category)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(SampleItem::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<SampleItem>> {
        let row: Option<SampleItemRow> = sqlx::query_as("SELECT * FROM sample_data WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(SampleItem::from))
    }

    async fn count(&self) -> DomainResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sample_data")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0).unsigned_abs())
    }

    async fn insert(&self, item: &NewSampleItem) -> DomainResult<SampleItem> {
        let result = sqlx::query(
            "INSERT INTO sample_data (name, description, price, category) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.category)
        .execute(&self.pool)
        .await?;

        Ok(SampleItem {
            id: result.last_insert_rowid(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: item.category.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_test_repo() -> SqliteSampleItemRepository {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteSampleItemRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let repo = setup_test_repo().await;
        let inserted = repo
            .insert(&NewSampleItem::new("Product A", "High-quality product A", 100, "Electronics"))
            .await
            .unwrap();

        let found = repo.find_by_id(inserted.id).await.unwrap();
        assert_eq!(found, Some(inserted));
    }

    #[tokio::test]
    async fn test_find_by_id_absent() {
        let repo = setup_test_repo().await;
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_category() {
        let repo = setup_test_repo().await;
        repo.insert(&NewSampleItem::new("Product A", "a", 100, "Electronics")).await.unwrap();
        repo.insert(&NewSampleItem::new("Service X", "x", 150, "Services")).await.unwrap();
        repo.insert(&NewSampleItem::new("Product B", "b", 200, "Electronics")).await.unwrap();

        let electronics = repo.find_by_category("Electronics").await.unwrap();
        assert_eq!(electronics.len(), 2);
        assert!(electronics.iter().all(|i| i.category == "Electronics"));

        assert!(repo.find_by_category("Toys").await.unwrap().is_empty());
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
