//! Per-user recipe persistence.
//!
//! [`RecipeStore`] layers the recipe identity rules over a document backend
//! that only knows filter based find/insert/update/delete. The duplicate
//! checks in [`RecipeStore::create`] run before the insert without a
//! transaction, so two concurrent creates can both pass them; a backend that
//! enforces unique indexes (like [`MemoryDocumentStore`]) turns the loser into
//! a write-time error instead of a duplicate record.

mod memory;

pub use memory::MemoryDocumentStore;

use crate::error::{BackendError, StoreError, UniqueIndex};
use crate::model::{Recipe, RecipePatch};
use async_trait::async_trait;
use log::{debug, info};

/// Equality filter over recipe documents; `None` matches anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    pub recipe_id: Option<String>,
    pub user_id: Option<String>,
    pub name: Option<String>,
}

impl RecipeFilter {
    pub fn by_recipe_id(recipe_id: impl Into<String>) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
            ..Self::default()
        }
    }

    pub fn by_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub fn by_user_and_name(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.recipe_id
            .as_ref()
            .map_or(true, |id| *id == recipe.recipe_id)
            && self
                .user_id
                .as_ref()
                .map_or(true, |user| *user == recipe.user_id)
            && self.name.as_ref().map_or(true, |name| *name == recipe.name)
    }
}

/// Document backend holding recipe records
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, filter: &RecipeFilter) -> Result<Option<Recipe>, BackendError>;

    async fn find_many(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, BackendError>;

    async fn insert(&self, recipe: Recipe) -> Result<(), BackendError>;

    /// Apply `patch` to the first match and return the updated record
    async fn find_one_and_update(
        &self,
        filter: &RecipeFilter,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, BackendError>;

    /// Remove the first match and return it
    async fn find_one_and_delete(
        &self,
        filter: &RecipeFilter,
    ) -> Result<Option<Recipe>, BackendError>;
}

pub struct RecipeStore<S> {
    backend: S,
}

impl<S: DocumentStore> RecipeStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Insert a new recipe.
    ///
    /// Fails when the recipe id is taken anywhere, or when the owner already
    /// has a recipe with the same name.
    pub async fn create(&self, recipe: Recipe) -> Result<Recipe, StoreError> {
        if self
            .backend
            .find_one(&RecipeFilter::by_recipe_id(&recipe.recipe_id))
            .await?
            .is_some()
        {
            debug!("RecipeStore: recipe id {} already taken", recipe.recipe_id);
            return Err(StoreError::DuplicateRecipeId(recipe.recipe_id));
        }

        if self
            .backend
            .find_one(&RecipeFilter::by_user_and_name(
                &recipe.user_id,
                &recipe.name,
            ))
            .await?
            .is_some()
        {
            debug!(
                "RecipeStore: user {} already has {:?}",
                recipe.user_id, recipe.name
            );
            return Err(duplicate_name(&recipe.user_id, &recipe.name));
        }

        self.backend
            .insert(recipe.clone())
            .await
            .map_err(|e| conflict(e, &recipe.recipe_id, &recipe.user_id, &recipe.name))?;
        info!(
            "RecipeStore: saved recipe {} for user {}",
            recipe.recipe_id, recipe.user_id
        );
        Ok(recipe)
    }

    /// All recipes owned by `user_id`, in insertion order
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self
            .backend
            .find_many(&RecipeFilter::by_user(user_id))
            .await?;
        debug!(
            "RecipeStore: {} recipes for user {}",
            recipes.len(),
            user_id
        );
        Ok(recipes)
    }

    /// Update the recipe matching both `recipe_id` and `user_id`.
    ///
    /// Never creates a record. Renaming onto another recipe of the same user
    /// is rejected.
    pub async fn update(
        &self,
        recipe_id: &str,
        user_id: &str,
        patch: RecipePatch,
    ) -> Result<Recipe, StoreError> {
        let target = RecipeFilter::by_recipe_id(recipe_id).with_user(user_id);
        if self.backend.find_one(&target).await?.is_none() {
            return Err(StoreError::NotFound(recipe_id.to_string()));
        }

        if let Some(name) = &patch.name {
            let clash = self
                .backend
                .find_one(&RecipeFilter::by_user_and_name(user_id, name))
                .await?;
            if clash.is_some_and(|other| other.recipe_id != recipe_id) {
                return Err(duplicate_name(user_id, name));
            }
        }

        let new_name = patch.name.clone().unwrap_or_default();
        let updated = self
            .backend
            .find_one_and_update(&target, patch)
            .await
            .map_err(|e| conflict(e, recipe_id, user_id, &new_name))?
            .ok_or_else(|| StoreError::NotFound(recipe_id.to_string()))?;

        info!("RecipeStore: updated recipe {} for user {}", recipe_id, user_id);
        Ok(updated)
    }

    pub async fn delete(&self, recipe_id: &str) -> Result<(), StoreError> {
        let removed = self
            .backend
            .find_one_and_delete(&RecipeFilter::by_recipe_id(recipe_id))
            .await?
            .ok_or_else(|| StoreError::NotFound(recipe_id.to_string()))?;

        info!(
            "RecipeStore: deleted recipe {} of user {}",
            removed.recipe_id, removed.user_id
        );
        Ok(())
    }
}

fn duplicate_name(user_id: &str, name: &str) -> StoreError {
    StoreError::DuplicateNameForUser {
        user_id: user_id.to_string(),
        name: name.to_string(),
    }
}

/// Translate a unique-index violation raised at write time
fn conflict(err: BackendError, recipe_id: &str, user_id: &str, name: &str) -> StoreError {
    match err {
        BackendError::DuplicateKey(UniqueIndex::RecipeId) => {
            StoreError::DuplicateRecipeId(recipe_id.to_string())
        }
        BackendError::DuplicateKey(UniqueIndex::UserName) => duplicate_name(user_id, name),
        other => StoreError::Backend(other),
    }
}
