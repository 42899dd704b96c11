//! Resume Store — the sole gateway between builder state and durable storage.
//!
//! The trait is the seam: `PgResumeStore` runs in production, `MemoryStore`
//! mirrors the same semantics (ownership filters, quota check at insert) for
//! tests. `AppState` carries an `Arc<dyn ResumeStore>`, so handlers never
//! name a backend.
//!
//! Ownership is enforced as a filter, not a separate authorization check:
//! every mutation is scoped by `id AND user_id`, so a cross-owner attempt
//! affects zero rows instead of erroring.

pub mod handlers;
pub mod library;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::models::resume::{
    AchievementEntry, CertificationEntry, EducationEntry, Entry, ExperienceEntry,
    InternshipEntry, PersonalInfo, ProfileLinkEntry, ProjectEntry, ProfileType, ResumeRow,
    UNTITLED_RESUME,
};

/// Hard per-owner cap on resume rows. Checked client-side as a fast path and
/// re-checked at insert time by every backend (the two may race across
/// concurrent sessions; the backend check is authoritative).
pub const MAX_RESUMES: usize = 3;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resume quota reached ({0} max)")]
    Quota(usize),

    #[error(transparent)]
    Transport(#[from] sqlx::Error),
}

/// Payload for `create`. `profile_type` is fixed here, once, for the lifetime
/// of the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResume {
    pub name: String,
    pub profile_type: ProfileType,
    pub template: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Entry<ExperienceEntry>>,
    #[serde(default)]
    pub education: Vec<Entry<EducationEntry>>,
    #[serde(default)]
    pub projects: Vec<Entry<ProjectEntry>>,
    #[serde(default)]
    pub profile_links: Vec<Entry<ProfileLinkEntry>>,
    #[serde(default)]
    pub achievements: Vec<Entry<AchievementEntry>>,
    #[serde(default)]
    pub certifications: Vec<Entry<CertificationEntry>>,
    #[serde(default)]
    pub internships: Vec<Entry<InternshipEntry>>,
}

impl NewResume {
    /// The name actually stored: blank input falls back to the placeholder.
    pub fn display_name(&self) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            UNTITLED_RESUME.to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Payload for `update`. The whole personal-info + sublist payload replaces
/// what is stored — no field-by-field merge. `profile_type` and `template`
/// are deliberately absent: neither is updatable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumePatch {
    pub name: String,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub experiences: Vec<Entry<ExperienceEntry>>,
    #[serde(default)]
    pub education: Vec<Entry<EducationEntry>>,
    #[serde(default)]
    pub projects: Vec<Entry<ProjectEntry>>,
    #[serde(default)]
    pub profile_links: Vec<Entry<ProfileLinkEntry>>,
    #[serde(default)]
    pub achievements: Vec<Entry<AchievementEntry>>,
    #[serde(default)]
    pub certifications: Vec<Entry<CertificationEntry>>,
    #[serde(default)]
    pub internships: Vec<Entry<InternshipEntry>>,
}

/// Partial update of the per-owner profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// The five logical row-store operations plus the profile pair.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All resumes for an owner, most-recently-updated first.
    async fn list(&self, owner: Uuid) -> Result<Vec<ResumeRow>, StoreError>;

    /// Inserts a new resume; rejects with `StoreError::Quota` when the owner
    /// is at the cap at insert time.
    async fn create(&self, owner: Uuid, payload: NewResume) -> Result<ResumeRow, StoreError>;

    /// Replaces the mutable fields of the row matching `id AND owner`.
    /// Returns `false` (no-op) when zero rows matched.
    async fn update(&self, owner: Uuid, id: Uuid, patch: ResumePatch)
        -> Result<bool, StoreError>;

    /// Deletes the row matching `id AND owner`. Idempotent: a missing row
    /// returns `false`, never an error.
    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError>;

    /// The profile row for an owner, if one exists.
    async fn get_profile(&self, owner: Uuid) -> Result<Option<ProfileRow>, StoreError>;

    /// Upserts the profile row keyed by owner and returns the stored state.
    async fn update_profile(
        &self,
        owner: Uuid,
        patch: ProfilePatch,
    ) -> Result<ProfileRow, StoreError>;
}
