use crate::error::RepoError;
use crate::validation::{
    check_name, check_optional_length, Validate, ValidationError, KEYWORD_MAX_LEN,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    /// Text that marks a transaction description as belonging to this tag.
    pub keyword: Option<String>,
    pub description: Option<String>,
}

impl Tag {
    /// Case-insensitive keyword match. Tags without a keyword never match.
    pub fn matches(&self, text: &str) -> bool {
        match self.keyword.as_deref() {
            Some(keyword) if !keyword.is_empty() => {
                text.to_lowercase().contains(&keyword.to_lowercase())
            }
            _ => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewTag {
    pub name: String,
    pub keyword: Option<String>,
    pub description: Option<String>,
}

impl NewTag {
    pub fn new(
        name: impl Into<String>,
        keyword: Option<String>,
        description: Option<String>,
    ) -> NewTag {
        NewTag {
            name: name.into(),
            keyword,
            description,
        }
    }

    pub fn to_tag(self, id: i32) -> Tag {
        Tag {
            id,
            name: self.name,
            keyword: self.keyword,
            description: self.description,
        }
    }
}

impl Validate for NewTag {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)?;
        check_optional_length("keyword", &self.keyword, KEYWORD_MAX_LEN)
    }
}

#[async_trait]
pub trait TagRepo: Sync + Send {
    async fn create_tag(&self, new_tag: NewTag) -> Result<Tag, RepoError>;

    async fn get_tag(&self, tag_id: i32) -> Result<Tag, RepoError>;

    async fn get_all_tags(&self) -> Result<Vec<Tag>, RepoError>;

    async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>, RepoError>;

    /// Returns the lowest id tag whose keyword appears in `text`.
    async fn find_tag_by_keyword(&self, text: &str) -> Result<Option<Tag>, RepoError>;

    async fn update_tag(&self, tag_id: i32, updated_tag: NewTag) -> Result<Tag, RepoError>;

    /// Transactions carrying this tag are kept and left untagged.
    async fn delete_tag(&self, tag_id: i32) -> Result<Tag, RepoError>;
}
