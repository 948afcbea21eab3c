use super::MemRepo;
use crate::category_repo::{Category, CategoryRepo, NewCategory};
use crate::error::{EntityKind, RepoError};
use crate::validation::Validate;
use async_trait::async_trait;

#[async_trait]
impl CategoryRepo for MemRepo {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category, RepoError> {
        new_category.validate()?;
        let mut write_guard = self.write_lock()?;

        let category = write_guard
            .categories
            .insert_with(|id| new_category.to_category(id));
        Ok(category)
    }

    async fn get_category(&self, category_id: i32) -> Result<Category, RepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .categories
            .get(category_id, EntityKind::Category)
            .cloned()
    }

    async fn get_all_categories(&self) -> Result<Vec<Category>, RepoError> {
        let read_guard = self.read_lock()?;

        let mut categories: Vec<Category> = read_guard.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, RepoError> {
        updated_category.validate()?;
        let mut write_guard = self.write_lock()?;

        let category = write_guard
            .categories
            .get_mut(category_id, EntityKind::Category)?;
        *category = updated_category.to_category(category_id);
        Ok(category.clone())
    }

    async fn delete_category(&self, category_id: i32) -> Result<Category, RepoError> {
        let mut write_guard = self.write_lock()?;

        let category = write_guard
            .categories
            .remove(category_id, EntityKind::Category)?;
        for transaction in write_guard.transactions_mut() {
            if transaction.category_id == Some(category_id) {
                transaction.category_id = None;
            }
        }
        Ok(category)
    }
}
