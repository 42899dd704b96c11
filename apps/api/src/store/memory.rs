//! In-memory store mirroring the Postgres semantics — ownership-scoped
//! filters, the insert-time quota check, idempotent delete — without a
//! database. Backs the store and library tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::models::resume::ResumeRow;
use crate::store::{NewResume, ProfilePatch, ResumePatch, ResumeStore, StoreError, MAX_RESUMES};

#[derive(Default)]
pub struct MemoryStore {
    resumes: Mutex<HashMap<Uuid, Vec<ResumeRow>>>,
    profiles: Mutex<HashMap<Uuid, ProfileRow>>,
    /// When set, every call fails with a transport error. Lets tests exercise
    /// the stale-cache-on-failure policy.
    offline: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap() {
            Err(StoreError::Transport(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn list(&self, owner: Uuid) -> Result<Vec<ResumeRow>, StoreError> {
        self.check_online()?;
        let resumes = self.resumes.lock().unwrap();
        let mut rows = resumes.get(&owner).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, payload: NewResume) -> Result<ResumeRow, StoreError> {
        self.check_online()?;
        let mut resumes = self.resumes.lock().unwrap();
        let rows = resumes.entry(owner).or_default();
        if rows.len() >= MAX_RESUMES {
            return Err(StoreError::Quota(MAX_RESUMES));
        }

        let now = Utc::now();
        let row = ResumeRow {
            id: Uuid::new_v4(),
            user_id: owner,
            name: payload.display_name(),
            profile_type: payload.profile_type.as_str().to_string(),
            template: payload.template,
            personal_info: Json(payload.personal_info),
            experiences: Json(payload.experiences),
            education: Json(payload.education),
            projects: Json(payload.projects),
            profile_links: Json(payload.profile_links),
            achievements: Json(payload.achievements),
            certifications: Json(payload.certifications),
            internships: Json(payload.internships),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: ResumePatch,
    ) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut resumes = self.resumes.lock().unwrap();
        let Some(rows) = resumes.get_mut(&owner) else {
            return Ok(false);
        };
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };

        row.name = patch.name;
        row.personal_info = Json(patch.personal_info);
        row.experiences = Json(patch.experiences);
        row.education = Json(patch.education);
        row.projects = Json(patch.projects);
        row.profile_links = Json(patch.profile_links);
        row.achievements = Json(patch.achievements);
        row.certifications = Json(patch.certifications);
        row.internships = Json(patch.internships);
        row.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        self.check_online()?;
        let mut resumes = self.resumes.lock().unwrap();
        let Some(rows) = resumes.get_mut(&owner) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn get_profile(&self, owner: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        self.check_online()?;
        Ok(self.profiles.lock().unwrap().get(&owner).cloned())
    }

    async fn update_profile(
        &self,
        owner: Uuid,
        patch: ProfilePatch,
    ) -> Result<ProfileRow, StoreError> {
        self.check_online()?;
        let row = ProfileRow {
            user_id: owner,
            display_name: patch.display_name,
            avatar: patch.avatar,
            updated_at: Utc::now(),
        };
        self.profiles.lock().unwrap().insert(owner, row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Entry, EntryId, ExperienceEntry, PersonalInfo, ProfileType};

    fn make_payload(name: &str) -> NewResume {
        NewResume {
            name: name.to_string(),
            profile_type: ProfileType::Experienced,
            template: "modern".to_string(),
            personal_info: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            experiences: vec![Entry {
                id: EntryId(0),
                data: ExperienceEntry {
                    title: "Engineer".to_string(),
                    company: "Acme".to_string(),
                    duration: "2020 - 2024".to_string(),
                    description: "Built things".to_string(),
                },
            }],
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

    #[tokio::test]
    async fn test_create_then_list_round_trips_payload() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();

        let created = store.create(owner, make_payload("My CV")).await.unwrap();
        let listed = store.list(owner).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].name, "My CV");
        assert_eq!(listed[0].profile_type(), ProfileType::Experienced);
        assert_eq!(listed[0].experiences.0[0].data.title, "Engineer");
    }

    #[tokio::test]
    async fn test_blank_name_defaults_to_placeholder() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let created = store.create(owner, make_payload("   ")).await.unwrap();
        assert_eq!(created.name, "Untitled Resume");
    }

    #[tokio::test]
    async fn test_create_at_cap_fails_with_quota_and_count_unchanged() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for i in 0..MAX_RESUMES {
            store.create(owner, make_payload(&format!("cv {i}"))).await.unwrap();
        }

        let err = store.create(owner, make_payload("one too many")).await.unwrap_err();
        assert!(matches!(err, StoreError::Quota(3)));
        assert_eq!(store.list(owner).await.unwrap().len(), MAX_RESUMES);
    }

    #[tokio::test]
    async fn test_delete_then_create_frees_a_slot() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut ids = vec![];
        for i in 0..MAX_RESUMES {
            ids.push(store.create(owner, make_payload(&format!("cv {i}"))).await.unwrap().id);
        }

        assert!(store.delete(owner, ids[0]).await.unwrap());
        assert_eq!(store.list(owner).await.unwrap().len(), 2);
        store.create(owner, make_payload("replacement")).await.unwrap();
        assert_eq!(store.list(owner).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_quota_is_per_owner() {
        let store = MemoryStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        for i in 0..MAX_RESUMES {
            store.create(a, make_payload(&format!("a {i}"))).await.unwrap();
        }
        // A full quota for A must not affect B.
        store.create(b, make_payload("b 0")).await.unwrap();
        assert_eq!(store.list(b).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_and_replaces_payload() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let created = store.create(owner, make_payload("cv")).await.unwrap();

        let updated = store.update(owner, created.id, make_patch("renamed")).await.unwrap();
        assert!(updated);

        let listed = store.list(owner).await.unwrap();
        assert_eq!(listed[0].name, "renamed");
        assert!(listed[0].updated_at > created.updated_at);
        // Whole-payload replacement: the experience list was replaced by an
        // empty one, not merged.
        assert!(listed[0].experiences.0.is_empty());
    }

    #[tokio::test]
    async fn test_cross_owner_update_is_a_no_op() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let created = store.create(owner, make_payload("mine")).await.unwrap();

        let touched = store.update(intruder, created.id, make_patch("stolen")).await.unwrap();
        assert!(!touched);
        assert_eq!(store.list(owner).await.unwrap()[0].name, "mine");
    }

    #[tokio::test]
    async fn test_cross_owner_delete_is_a_no_op() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let created = store.create(owner, make_payload("mine")).await.unwrap();

        assert!(!store.delete(intruder, created.id).await.unwrap());
        assert_eq!(store.list(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let created = store.create(owner, make_payload("cv")).await.unwrap();

        assert!(store.delete(owner, created.id).await.unwrap());
        assert!(!store.delete(owner, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_most_recently_updated() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let first = store.create(owner, make_payload("first")).await.unwrap();
        let _second = store.create(owner, make_payload("second")).await.unwrap();

        // Touch the older row; it should move to the front.
        store.update(owner, first.id, make_patch("first, edited")).await.unwrap();
        let listed = store.list(owner).await.unwrap();
        assert_eq!(listed[0].name, "first, edited");
    }

    #[tokio::test]
    async fn test_profile_upsert_round_trips() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        assert!(store.get_profile(owner).await.unwrap().is_none());

        let patch = ProfilePatch {
            display_name: "Jane".to_string(),
            avatar: Some("avatar_female_1".to_string()),
        };
        store.update_profile(owner, patch).await.unwrap();

        let stored = store.get_profile(owner).await.unwrap().unwrap();
        assert_eq!(stored.display_name, "Jane");
        assert_eq!(stored.avatar.as_deref(), Some("avatar_female_1"));
    }
}
