#![allow(dead_code)]

//! The persisted resume shape: one row per resume, owned by a user, with the
//! seven entry sublists stored as JSONB alongside the flat personal-info record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Display label used when a resume is saved without a name.
pub const UNTITLED_RESUME: &str = "Untitled Resume";

/// Chosen at creation; drives which sections the renderer emits.
/// Never part of the updatable field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileType {
    Fresher,
    Experienced,
}

impl ProfileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Fresher => "fresher",
            ProfileType::Experienced => "experienced",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fresher" => Ok(ProfileType::Fresher),
            "experienced" => Ok(ProfileType::Experienced),
            other => Err(format!("unknown profile type '{other}'")),
        }
    }
}

/// Flat record of optional personal fields. `skills` is a comma-separated
/// string, split only at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub skills: String,
}

/// Locally-unique entry identifier within one sublist.
///
/// Allocated monotonically per form session, so rapid successive adds can
/// never collide (unlike wall-clock ids).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sublist entry: the local id plus the kind-specific fields, flattened so
/// the persisted JSON reads `{"id": 3, "title": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    pub id: EntryId,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLinkEntry {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AchievementEntry {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternshipEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

/// One persisted resume. `id` and `user_id` are immutable after insert;
/// `profile_type` is set once at creation and excluded from updates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub profile_type: String,
    pub template: String,
    pub personal_info: Json<PersonalInfo>,
    pub experiences: Json<Vec<Entry<ExperienceEntry>>>,
    pub education: Json<Vec<Entry<EducationEntry>>>,
    pub projects: Json<Vec<Entry<ProjectEntry>>>,
    pub profile_links: Json<Vec<Entry<ProfileLinkEntry>>>,
    pub achievements: Json<Vec<Entry<AchievementEntry>>>,
    pub certifications: Json<Vec<Entry<CertificationEntry>>>,
    pub internships: Json<Vec<Entry<InternshipEntry>>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    /// Typed view of the stored `profile_type` text. Rows written through the
    /// store only ever hold the two known values; anything else (hand-edited
    /// data) falls back to the more restrictive rendering.
    pub fn profile_type(&self) -> ProfileType {
        self.profile_type.parse().unwrap_or(ProfileType::Fresher)
    }
}
