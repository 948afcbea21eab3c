use crate::error::RepoError;
use crate::validation::{check_name, Validate, ValidationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: Option<String>) -> NewCategory {
        NewCategory {
            name: name.into(),
            description,
        }
    }

    pub fn to_category(self, id: i32) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

impl Validate for NewCategory {
    fn validate(&self) -> Result<(), ValidationError> {
        check_name(&self.name)
    }
}

#[async_trait]
pub trait CategoryRepo: Sync + Send {
    async fn create_category(&self, new_category: NewCategory) -> Result<Category, RepoError>;

    async fn get_category(&self, category_id: i32) -> Result<Category, RepoError>;

    async fn get_all_categories(&self) -> Result<Vec<Category>, RepoError>;

    async fn update_category(
        &self,
        category_id: i32,
        updated_category: NewCategory,
    ) -> Result<Category, RepoError>;

    /// Transactions in this category are kept and left uncategorised.
    async fn delete_category(&self, category_id: i32) -> Result<Category, RepoError>;
}
