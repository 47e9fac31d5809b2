use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryCreateUpdateDto, CategoryDto};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;

/// Service for category operations
///
/// Enforces name uniqueness, owns the timestamp and soft-delete bookkeeping,
/// and maps between the persisted entity and the response DTO.
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories, soft-deleted rows included
    pub async fn find_all(&self) -> Result<Vec<CategoryDto>> {
        let categories = self.repository.find_all().await?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get a category by id; absence is not an error at this layer
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CategoryDto>> {
        let category = self.repository.find_by_id(id).await?;

        Ok(category.map(|c| c.into()))
    }

    /// Create a new category with a unique name
    pub async fn create(&self, dto: CategoryCreateUpdateDto) -> Result<CategoryDto> {
        // Early exit on a name collision; the unique index on name catches
        // the concurrent case inside save()
        if self.repository.find_by_name(&dto.name).await?.is_some() {
            return Err(AppError::Conflict(
                "Category with the same name already exists".to_string(),
            ));
        }

        let category = Category {
            id: Uuid::now_v7(),
            name: dto.name,
            description: dto.description,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
            is_deleted: false,
            is_active: dto.is_active,
        };

        let saved = self.repository.save(&category).await?;

        tracing::info!("Category created: id={}, name={}", saved.id, saved.name);

        Ok(saved.into())
    }

    /// Overwrite name/description/is_active of an existing category
    pub async fn update(&self, id: Uuid, dto: CategoryCreateUpdateDto) -> Result<CategoryDto> {
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        // A row may keep its own name; only a different row blocks it
        if let Some(existing) = self.repository.find_by_name(&dto.name).await? {
            if existing.id != id {
                return Err(AppError::Conflict(
                    "Category with the same name already exists".to_string(),
                ));
            }
        }

        category.name = dto.name;
        category.description = dto.description;
        category.is_active = dto.is_active;
        category.updated_at = Some(Utc::now());

        let saved = self.repository.save(&category).await?;

        tracing::info!("Category updated: id={}", saved.id);

        Ok(saved.into())
    }

    /// Delete a category, either physically or by marking it deleted
    ///
    /// Soft delete keeps the row visible to lookups and keeps its name
    /// reserved. Returns whether the delete took effect, verified by
    /// re-reading the row.
    pub async fn delete(&self, id: Uuid, soft_delete: bool) -> Result<bool> {
        let mut category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

        if soft_delete {
            category.is_deleted = true;
            category.deleted_at = Some(Utc::now());
            self.repository.save(&category).await?;

            tracing::info!("Category soft-deleted: id={}", id);

            let deleted = self.repository.find_by_id(id).await?;
            Ok(deleted.is_some_and(|c| c.is_deleted))
        } else {
            self.repository.delete(&category).await?;

            tracing::info!("Category deleted: id={}", id);

            Ok(self.repository.find_by_id(id).await?.is_none())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryCategoryRepository;

    fn service_with_repo() -> (CategoryService, Arc<InMemoryCategoryRepository>) {
        let repo = Arc::new(InMemoryCategoryRepository::new());
        (CategoryService::new(repo.clone()), repo)
    }

    fn dto(name: &str, description: Option<&str>, is_active: bool) -> CategoryCreateUpdateDto {
        CategoryCreateUpdateDto {
            name: name.to_string(),
            description: description.map(|d| d.to_string()),
            is_active,
        }
    }

    #[tokio::test]
    async fn create_returns_dto_matching_input() {
        let (service, repo) = service_with_repo();

        let created = service
            .create(dto("Books", Some("desc"), true))
            .await
            .unwrap();

        assert_eq!(created.name, "Books");
        assert_eq!(created.description.as_deref(), Some("desc"));
        assert!(created.is_active);

        let row = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(!row.is_deleted);
        assert!(row.updated_at.is_none());
        assert!(row.deleted_at.is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name() {
        let (service, repo) = service_with_repo();

        service.create(dto("Books", None, true)).await.unwrap();
        let err = service.create(dto("Books", None, false)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_duplicate_check_is_case_sensitive() {
        let (service, _) = service_with_repo();

        service.create(dto("Books", None, true)).await.unwrap();
        // Exact match only; a different casing is a different name
        service.create(dto("books", None, true)).await.unwrap();
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_sets_updated_at() {
        let (service, repo) = service_with_repo();

        let created = service.create(dto("Toys", None, true)).await.unwrap();
        let updated = service
            .update(created.id, dto("Games", Some("board games"), false))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Games");
        assert_eq!(updated.description.as_deref(), Some("board games"));
        assert!(!updated.is_active);

        let row = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(row.updated_at.is_some());
    }

    #[tokio::test]
    async fn update_rejects_name_held_by_another_row() {
        let (service, _) = service_with_repo();

        service.create(dto("Books", None, true)).await.unwrap();
        let toys = service.create(dto("Toys", None, true)).await.unwrap();

        let err = service
            .update(toys.id, dto("Books", None, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_allows_keeping_own_name() {
        let (service, _) = service_with_repo();

        let created = service.create(dto("Books", None, true)).await.unwrap();
        let updated = service
            .update(created.id, dto("Books", Some("new desc"), true))
            .await
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("new desc"));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let (service, _) = service_with_repo();

        let err = service
            .update(Uuid::now_v7(), dto("Books", None, true))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn soft_delete_marks_row_but_keeps_it_retrievable() {
        let (service, repo) = service_with_repo();

        let created = service.create(dto("Toys", None, true)).await.unwrap();
        let result = service.delete(created.id, true).await.unwrap();

        assert!(result);

        let row = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(row.is_deleted);
        assert!(row.deleted_at.is_some());

        // Soft delete does not hide the row from lookup
        assert!(service.find_by_id(created.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn soft_deleted_name_still_blocks_reuse() {
        let (service, _) = service_with_repo();

        let created = service.create(dto("Toys", None, true)).await.unwrap();
        service.delete(created.id, true).await.unwrap();

        let err = service.create(dto("Toys", None, true)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn hard_delete_removes_row() {
        let (service, _) = service_with_repo();

        let created = service.create(dto("Toys", None, true)).await.unwrap();
        let result = service.delete(created.id, false).await.unwrap();

        assert!(result);
        assert!(service.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let (service, _) = service_with_repo();

        let err = service.delete(Uuid::now_v7(), false).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_all_returns_every_created_category() {
        let (service, _) = service_with_repo();

        let mut expected = Vec::new();
        for i in 0..5 {
            let created = service
                .create(dto(&format!("category-{}", i), None, i % 2 == 0))
                .await
                .unwrap();
            expected.push(created);
        }

        let mut all = service.find_all().await.unwrap();
        all.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(all.len(), expected.len());
        for (got, want) in all.iter().zip(expected.iter()) {
            assert_eq!(got.id, want.id);
            assert_eq!(got.name, want.name);
            assert_eq!(got.is_active, want.is_active);
        }
    }

    #[tokio::test]
    async fn find_by_id_absent_is_none_not_error() {
        let (service, _) = service_with_repo();

        assert!(service.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }
}
