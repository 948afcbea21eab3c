use super::MemRepo;
use crate::error::{EntityKind, RepoError};
use crate::tag_repo::{NewTag, Tag, TagRepo};
use crate::validation::Validate;
use async_trait::async_trait;

#[async_trait]
impl TagRepo for MemRepo {
    async fn create_tag(&self, new_tag: NewTag) -> Result<Tag, RepoError> {
        new_tag.validate()?;
        let mut write_guard = self.write_lock()?;

        let tag = write_guard.tags.insert_with(|id| new_tag.to_tag(id));
        Ok(tag)
    }

    async fn get_tag(&self, tag_id: i32) -> Result<Tag, RepoError> {
        let read_guard = self.read_lock()?;

        read_guard.tags.get(tag_id, EntityKind::Tag).cloned()
    }

    async fn get_all_tags(&self) -> Result<Vec<Tag>, RepoError> {
        let read_guard = self.read_lock()?;

        let mut tags: Vec<Tag> = read_guard.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(tags)
    }

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError> {
        let read_guard = self.read_lock()?;

        let tag = read_guard.tags.values().find(|t| t.name == name).cloned();
        Ok(tag)
    }

    async fn find_tag_by_keyword(&self, text: &str) -> Result<Option<Tag>, RepoError> {
        let read_guard = self.read_lock()?;

        // rows are kept in id order
        let tag = read_guard.tags.values().find(|t| t.matches(text)).cloned();
        Ok(tag)
    }

    async fn update_tag(&self, tag_id: i32, updated_tag: NewTag) -> Result<Tag, RepoError> {
        updated_tag.validate()?;
        let mut write_guard = self.write_lock()?;

        let tag = write_guard.tags.get_mut(tag_id, EntityKind::Tag)?;
        *tag = updated_tag.to_tag(tag_id);
        Ok(tag.clone())
    }

    async fn delete_tag(&self, tag_id: i32) -> Result<Tag, RepoError> {
        let mut write_guard = self.write_lock()?;

        let tag = write_guard.tags.remove(tag_id, EntityKind::Tag)?;
        for transaction in write_guard.transactions_mut() {
            if transaction.tag_id == Some(tag_id) {
                transaction.tag_id = None;
            }
        }
        Ok(tag)
    }
}
