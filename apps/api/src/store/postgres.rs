use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::models::resume::ResumeRow;
use crate::store::{NewResume, ProfilePatch, ResumePatch, ResumeStore, StoreError, MAX_RESUMES};

/// Production store backed by PostgreSQL.
///
/// The quota check and the insert are a single conditional statement, so two
/// racing sessions cannot both slip past the cap: whichever insert commits
/// second sees the full count and inserts nothing.
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn list(&self, owner: Uuid) -> Result<Vec<ResumeRow>, StoreError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create(&self, owner: Uuid, payload: NewResume) -> Result<ResumeRow, StoreError> {
        let row: Option<ResumeRow> = sqlx::query_as(
            r#"
            INSERT INTO resumes
                (id, user_id, name, profile_type, template, personal_info,
                 experiences, education, projects, profile_links,
                 achievements, certifications, internships)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13
            WHERE (SELECT COUNT(*) FROM resumes WHERE user_id = $2) < $14
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(payload.display_name())
        .bind(payload.profile_type.as_str())
        .bind(&payload.template)
        .bind(Json(&payload.personal_info))
        .bind(Json(&payload.experiences))
        .bind(Json(&payload.education))
        .bind(Json(&payload.projects))
        .bind(Json(&payload.profile_links))
        .bind(Json(&payload.achievements))
        .bind(Json(&payload.certifications))
        .bind(Json(&payload.internships))
        .bind(MAX_RESUMES as i64)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(StoreError::Quota(MAX_RESUMES))?;
        info!("Created resume {} for user {owner}", row.id);
        Ok(row)
    }

    async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        patch: ResumePatch,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE resumes
            SET name = $3, personal_info = $4, experiences = $5, education = $6,
                projects = $7, profile_links = $8, achievements = $9,
                certifications = $10, internships = $11, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&patch.name)
        .bind(Json(&patch.personal_info))
        .bind(Json(&patch.experiences))
        .bind(Json(&patch.education))
        .bind(Json(&patch.projects))
        .bind(Json(&patch.profile_links))
        .bind(Json(&patch.achievements))
        .bind(Json(&patch.certifications))
        .bind(Json(&patch.internships))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted resume {id} for user {owner}");
        }
        Ok(deleted)
    }

    async fn get_profile(&self, owner: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        Ok(sqlx::query_as::<_, ProfileRow>(
            "SELECT user_id, display_name, avatar, updated_at FROM profiles WHERE user_id = $1",
        )
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn update_profile(
        &self,
        owner: Uuid,
        patch: ProfilePatch,
    ) -> Result<ProfileRow, StoreError> {
        Ok(sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (user_id, display_name, avatar)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
                SET display_name = EXCLUDED.display_name,
                    avatar = EXCLUDED.avatar,
                    updated_at = NOW()
            RETURNING user_id, display_name, avatar, updated_at
            "#,
        )
        .bind(owner)
        .bind(&patch.display_name)
        .bind(&patch.avatar)
        .fetch_one(&self.pool)
        .await?)
    }
}
