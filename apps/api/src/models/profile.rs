use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The preset avatar identifiers a profile may reference.
pub const AVATAR_PRESETS: [&str; 2] = ["avatar_female_1", "avatar_male_1"];

pub fn is_preset_avatar(id: &str) -> bool {
    AVATAR_PRESETS.contains(&id)
}

/// Per-owner profile row: display name plus an optional preset avatar.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub display_name: String,
    pub avatar: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_avatars_recognized() {
        assert!(is_preset_avatar("avatar_female_1"));
        assert!(is_preset_avatar("avatar_male_1"));
        assert!(!is_preset_avatar("avatar_cat_1"));
    }
}
