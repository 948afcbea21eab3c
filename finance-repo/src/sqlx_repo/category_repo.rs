use crate::category_repo::{Category, CategoryRepo, NewCategory};
use crate::error::{EntityKind, RepoError};
use crate::sqlx_repo::SQLxRepo;
use crate::validation::Validate;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::query_as;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct CategoryEntry {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<CategoryEntry> for Category {
    fn from(value: CategoryEntry) -> Self {
        Category {
            id: value.id,
            name: value.name,
            description: value.description,
        }
    }
}

#[async_trait]
impl CategoryRepo for SQLxRepo {
    #[instrument(skip(self, new_category))]
    async fn create_category(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        new_category.validate()?;
        let category_entry: CategoryEntry =
            query_as("INSERT INTO categories(name, description) VALUES ($1, $2) RETURNING *")
                .bind(&new_category.name)
                .bind(&new_category.description)
                .fetch_one(&self.pool)
                .await
                .context("Unable to insert category")?;
        Ok(category_entry.into())
    }

    #[instrument(skip(self))]
    async fn get_category(&self, category_id: i32) -> Result<Category, RepoError> {
        let category_entry: Option<CategoryEntry> =
            query_as("SELECT * FROM categories WHERE id = $1")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get category {}", category_id))?;
        category_entry
            .map(|c| c.into())
            .ok_or(RepoError::NotFound(EntityKind::Category, category_id))
    }

    #[instrument(skip(self))]
    async fn get_all_categories(&self) -> Result<Vec<Category>, RepoError> {
        let category_entries: Vec<CategoryEntry> =
            query_as(r#"SELECT * FROM categories ORDER BY name COLLATE "C", id"#)
                .fetch_all(&self.pool)
                .await
                .context("Unable to get categories")?;
        Ok(category_entries.into_iter().map(|c| c.into()).collect())
    }

    #[instrument(skip(self, updated_category))]
    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, RepoError> {
        updated_category.validate()?;
        let category_entry: Option<CategoryEntry> = query_as(
            "UPDATE categories SET name = $1, description = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&updated_category.name)
        .bind(&updated_category.description)
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update category {}", category_id))?;
        category_entry
            .map(|c| c.into())
            .ok_or(RepoError::NotFound(EntityKind::Category, category_id))
    }

    #[instrument(skip(self))]
    async fn delete_category(&self, category_id: i32) -> Result<Category, RepoError> {
        // transactions.category_id is cleared by ON DELETE SET NULL
        let category_entry: Option<CategoryEntry> =
            query_as("DELETE FROM categories WHERE id = $1 RETURNING *")
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to delete category {}", category_id))?;
        category_entry
            .map(|c| c.into())
            .ok_or(RepoError::NotFound(EntityKind::Category, category_id))
    }
}
