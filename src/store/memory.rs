use super::{DocumentStore, RecipeFilter};
use crate::error::{BackendError, UniqueIndex};
use crate::model::{Recipe, RecipePatch};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process document backend with unique indexes on the recipe id and on
/// (user id, name). Index checks and writes happen under one lock.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<Vec<Recipe>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

/// First index `candidate` would violate, ignoring the document at `skip`
fn violated_index(
    documents: &[Recipe],
    candidate: &Recipe,
    skip: Option<usize>,
) -> Option<UniqueIndex> {
    let others = documents
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .map(|(_, doc)| doc);

    let mut violation = None;
    for doc in others {
        if doc.recipe_id == candidate.recipe_id {
            return Some(UniqueIndex::RecipeId);
        }
        if doc.user_id == candidate.user_id && doc.name == candidate.name {
            violation = Some(UniqueIndex::UserName);
        }
    }
    violation
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, filter: &RecipeFilter) -> Result<Option<Recipe>, BackendError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|doc| filter.matches(doc)).cloned())
    }

    async fn find_many(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>, BackendError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|doc| filter.matches(doc))
            .cloned()
            .collect())
    }

    async fn insert(&self, recipe: Recipe) -> Result<(), BackendError> {
        let mut documents = self.documents.write().await;
        if let Some(index) = violated_index(&documents, &recipe, None) {
            return Err(BackendError::DuplicateKey(index));
        }
        documents.push(recipe);
        Ok(())
    }

    async fn find_one_and_update(
        &self,
        filter: &RecipeFilter,
        patch: RecipePatch,
    ) -> Result<Option<Recipe>, BackendError> {
        let mut documents = self.documents.write().await;
        let Some(position) = documents.iter().position(|doc| filter.matches(doc)) else {
            return Ok(None);
        };

        let mut updated = documents[position].clone();
        updated.apply(patch);
        if let Some(index) = violated_index(&documents, &updated, Some(position)) {
            return Err(BackendError::DuplicateKey(index));
        }
        documents[position] = updated.clone();
        Ok(Some(updated))
    }

    async fn find_one_and_delete(
        &self,
        filter: &RecipeFilter,
    ) -> Result<Option<Recipe>, BackendError> {
        let mut documents = self.documents.write().await;
        let position = documents.iter().position(|doc| filter.matches(doc));
        Ok(position.map(|position| documents.remove(position)))
    }
}
