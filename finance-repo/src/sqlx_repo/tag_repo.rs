use crate::error::{EntityKind, RepoError};
use crate::sqlx_repo::SQLxRepo;
use crate::tag_repo::{NewTag, Tag, TagRepo};
use crate::validation::Validate;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::query_as;
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct TagEntry {
    id: i32,
    name: String,
    keyword: Option<String>,
    description: Option<String>,
}

impl From<TagEntry> for Tag {
    fn from(value: TagEntry) -> Self {
        Tag {
            id: value.id,
            name: value.name,
            keyword: value.keyword,
            description: value.description,
        }
    }
}

#[async_trait]
impl TagRepo for SQLxRepo {
    #[instrument(skip(self, new_tag))]
    async fn create_tag(&self, new_tag: NewTag) -> Result<Tag, RepoError> {
        new_tag.validate()?;
        let tag_entry: TagEntry = query_as(
            "INSERT INTO tags(name, keyword, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&new_tag.name)
        .bind(&new_tag.keyword)
        .bind(&new_tag.description)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert tag")?;
        Ok(tag_entry.into())
    }

    #[instrument(skip(self))]
    async fn get_tag(&self, tag_id: i32) -> Result<Tag, RepoError> {
        let tag_entry: Option<TagEntry> = query_as("SELECT * FROM tags WHERE id = $1")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to get tag {}", tag_id))?;
        tag_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Tag, tag_id))
    }

    #[instrument(skip(self))]
    async fn get_all_tags(&self) -> Result<Vec<Tag>, RepoError> {
        let tag_entries: Vec<TagEntry> =
            query_as(r#"SELECT * FROM tags ORDER BY name COLLATE "C", id"#)
                .fetch_all(&self.pool)
                .await
                .context("Unable to get tags")?;
        Ok(tag_entries.into_iter().map(|t| t.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let tag_entry: Option<TagEntry> =
            query_as("SELECT * FROM tags WHERE name = $1 ORDER BY id LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Unable to get tag named {}", name))?;
        Ok(tag_entry.map(|t| t.into()))
    }

    #[instrument(skip(self))]
    async fn find_tag_by_keyword(&self, text: &str) -> Result<Option<Tag>, RepoError> {
        // matched in Rust so case folding does not depend on the database locale
        let tag_entries: Vec<TagEntry> =
            query_as("SELECT * FROM tags WHERE keyword IS NOT NULL AND keyword <> '' ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get tag keywords")?;
        let tag = tag_entries
            .into_iter()
            .map(Tag::from)
            .find(|t| t.matches(text));
        Ok(tag)
    }

    #[instrument(skip(self, updated_tag))]
    async fn update_tag(&self, tag_id: i32, updated_tag: NewTag) -> Result<Tag, RepoError> {
        updated_tag.validate()?;
        let tag_entry: Option<TagEntry> = query_as(
            "UPDATE tags SET name = $1, keyword = $2, description = $3 WHERE id = $4 RETURNING *",
        )
        .bind(&updated_tag.name)
        .bind(&updated_tag.keyword)
        .bind(&updated_tag.description)
        .bind(tag_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to update tag {}", tag_id))?;
        tag_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Tag, tag_id))
    }

    #[instrument(skip(self))]
    async fn delete_tag(&self, tag_id: i32) -> Result<Tag, RepoError> {
        let tag_entry: Option<TagEntry> = query_as("DELETE FROM tags WHERE id = $1 RETURNING *")
            .bind(tag_id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to delete tag {}", tag_id))?;
        tag_entry
            .map(|t| t.into())
            .ok_or(RepoError::NotFound(EntityKind::Tag, tag_id))
    }
}
