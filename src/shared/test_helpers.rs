#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::RwLock;

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::categories::models::Category;
#[cfg(test)]
use crate::features::categories::repositories::CategoryRepository;

/// In-memory stand-in for the Postgres repository.
///
/// Mirrors the table's unique index on name: save() rejects a name already
/// held by a different id, same as the database would.
#[cfg(test)]
pub struct InMemoryCategoryRepository {
    rows: RwLock<HashMap<Uuid, Category>>,
}

#[cfg(test)]
impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>> {
        let rows = self.rows.read().unwrap();
        let mut all: Vec<Category> = rows.values().cloned().collect();
        all.sort_by_key(|c| c.created_at);
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        Ok(self.rows.read().unwrap().get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .rows
            .read()
            .unwrap()
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let mut rows = self.rows.write().unwrap();

        let name_taken = rows
            .values()
            .any(|c| c.name == category.name && c.id != category.id);
        if name_taken {
            return Err(AppError::Conflict(
                "Category with the same name already exists".to_string(),
            ));
        }

        rows.insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn delete(&self, category: &Category) -> Result<()> {
        self.rows.write().unwrap().remove(&category.id);
        Ok(())
    }
}
