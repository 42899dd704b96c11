#![allow(dead_code)]

//! Session-scoped resume cache.
//!
//! One instance per signed-in session. Holds the last successfully fetched
//! list and refreshes it after every successful mutation, so the cache is
//! eventually consistent with the last operation this session performed.
//! Transport failures leave the prior cache untouched (stale-but-available),
//! and nothing is retried automatically.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::models::resume::ResumeRow;
use crate::store::{NewResume, ResumePatch, ResumeStore, StoreError, MAX_RESUMES};

pub struct SessionLibrary {
    store: Arc<dyn ResumeStore>,
    owner: Uuid,
    cached: Vec<ResumeRow>,
    /// False until the first successful fetch, and after a refresh failure.
    synced: bool,
}

impl SessionLibrary {
    pub fn new(store: Arc<dyn ResumeStore>, owner: Uuid) -> Self {
        Self {
            store,
            owner,
            cached: Vec::new(),
            synced: false,
        }
    }

    /// The cached rows, most-recently-updated first. May be stale after a
    /// failed refresh; check [`is_synced`](Self::is_synced) when it matters.
    pub fn resumes(&self) -> &[ResumeRow] {
        &self.cached
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn count(&self) -> usize {
        self.cached.len()
    }

    /// Advisory fast path: derived from the cache, so two sessions can race.
    /// The store re-checks at insert time either way.
    pub fn can_create(&self) -> bool {
        self.count() < MAX_RESUMES
    }

    /// Re-fetches the owner's list. On failure the prior cache is kept.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        match self.store.list(self.owner).await {
            Ok(rows) => {
                self.cached = rows;
                self.synced = true;
                Ok(())
            }
            Err(e) => {
                self.synced = false;
                Err(e)
            }
        }
    }

    /// Creates a resume. Refuses locally when the cache already shows the cap
    /// — no network call is attempted — and classifies a store-side quota
    /// rejection identically (the authoritative check).
    pub async fn create(&mut self, payload: NewResume) -> Result<ResumeRow, StoreError> {
        if !self.can_create() {
            return Err(StoreError::Quota(MAX_RESUMES));
        }
        let row = self.store.create(self.owner, payload).await?;
        self.refresh_after_mutation().await;
        Ok(row)
    }

    pub async fn update(&mut self, id: Uuid, patch: ResumePatch) -> Result<bool, StoreError> {
        let updated = self.store.update(self.owner, id, patch).await?;
        if updated {
            self.refresh_after_mutation().await;
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self.store.delete(self.owner, id).await?;
        if deleted {
            self.refresh_after_mutation().await;
        }
        Ok(deleted)
    }

    /// A failed re-fetch after a successful mutation must not turn the
    /// mutation into an error; the cache just stays stale until the next
    /// successful refresh.
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!("post-mutation refresh failed for user {}: {e}", self.owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{PersonalInfo, ProfileType};
    use crate::store::memory::MemoryStore;

    fn make_payload(name: &str) -> NewResume {
        NewResume {
            name: name.to_string(),
            profile_type: ProfileType::Fresher,
            template: "classic".to_string(),
            personal_info: PersonalInfo::default(),
            experiences: vec![],
            education: vec![],
            projects: vec![],
            profile_links: vec![],
            achievements: vec![],
            certifications: vec![],
            internships: vec![],
        }
    }

    fn make_patch(name: &str) -> ResumePatch {
        ResumePatch {
            name: name.to_string(),
            personal_info: PersonalInfo::default(),
            experiences: vec![],
            education: vec![],
            projects: vec![],
            profile_links: vec![],
            achievements: vec![],
            certifications: vec![],
            internships: vec![],
        }
    }

    fn make_library() -> (Arc<MemoryStore>, SessionLibrary) {
        let store = Arc::new(MemoryStore::new());
        let library = SessionLibrary::new(store.clone(), Uuid::new_v4());
        (store, library)
    }

    #[tokio::test]
    async fn test_create_refreshes_cache() {
        let (_store, mut library) = make_library();
        library.refresh().await.unwrap();
        assert_eq!(library.count(), 0);

        library.create(make_payload("cv")).await.unwrap();
        assert_eq!(library.count(), 1);
        assert_eq!(library.resumes()[0].name, "cv");
    }

    #[tokio::test]
    async fn test_quota_fast_path_refuses_without_store_call() {
        let (store, mut library) = make_library();
        for i in 0..MAX_RESUMES {
            library.create(make_payload(&format!("cv {i}"))).await.unwrap();
        }

        // Take the store offline: if the fast path works, create never
        // reaches it and we still get the quota classification.
        store.set_offline(true);
        let err = library.create(make_payload("over")).await.unwrap_err();
        assert!(matches!(err, StoreError::Quota(3)));
        assert_eq!(library.count(), MAX_RESUMES);
    }

    #[tokio::test]
    async fn test_store_side_quota_rejection_classified_identically() {
        let (store, mut library) = make_library();
        let owner = library.owner;
        // Another session fills the quota behind this session's back.
        for i in 0..MAX_RESUMES {
            store.create(owner, make_payload(&format!("other {i}"))).await.unwrap();
        }

        // This session's cache still shows zero, so the fast path passes and
        // the store itself must reject.
        assert!(library.can_create());
        let err = library.create(make_payload("racing")).await.unwrap_err();
        assert!(matches!(err, StoreError::Quota(3)));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_cache() {
        let (store, mut library) = make_library();
        library.create(make_payload("cv")).await.unwrap();
        assert!(library.is_synced());

        store.set_offline(true);
        let err = library.refresh().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
        // Prior rows remain readable.
        assert_eq!(library.count(), 1);
        assert_eq!(library.resumes()[0].name, "cv");
        assert!(!library.is_synced());
    }

    #[tokio::test]
    async fn test_update_then_cache_reflects_patch() {
        let (_store, mut library) = make_library();
        let row = library.create(make_payload("cv")).await.unwrap();

        assert!(library.update(row.id, make_patch("edited")).await.unwrap());
        assert_eq!(library.resumes()[0].name, "edited");
        assert!(library.resumes()[0].updated_at > row.updated_at);
    }

    #[tokio::test]
    async fn test_delete_then_create_succeeds_at_cap() {
        let (_store, mut library) = make_library();
        let mut first = None;
        for i in 0..MAX_RESUMES {
            let row = library.create(make_payload(&format!("cv {i}"))).await.unwrap();
            first.get_or_insert(row.id);
        }
        assert!(!library.can_create());

        assert!(library.delete(first.unwrap()).await.unwrap());
        assert_eq!(library.count(), 2);
        library.create(make_payload("replacement")).await.unwrap();
        assert_eq!(library.count(), 3);
    }

    #[tokio::test]
    async fn test_unknown_delete_leaves_cache_untouched() {
        let (_store, mut library) = make_library();
        library.create(make_payload("cv")).await.unwrap();

        assert!(!library.delete(Uuid::new_v4()).await.unwrap());
        assert_eq!(library.count(), 1);
    }
}
