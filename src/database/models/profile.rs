use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Optional social links attached to a profile. Stored as JSONB; absent
/// links are omitted from responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Work experience entry embedded in a profile. The id is assigned at
/// insertion and is the handle for removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Education entry embedded in a profile. Same identifier scheme as
/// [`Experience`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One profile per user. Skills keep the order they were supplied in;
/// experience and education are most-recent-first.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// New entries go to the front: most recent first.
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.0.insert(0, entry);
    }

    /// Remove by the identifier's textual form; an unknown id is a no-op
    /// and the remaining entries keep their relative order.
    pub fn remove_experience(&mut self, entry_id: &str) {
        self.experience.0.retain(|e| e.id.to_string() != entry_id);
    }

    pub fn add_education(&mut self, entry: Education) {
        self.education.0.insert(0, entry);
    }

    pub fn remove_education(&mut self, entry_id: &str) {
        self.education.0.retain(|e| e.id.to_string() != entry_id);
    }
}

/// Name and avatar joined in from the owning user record.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Profile with the linked user's name and avatar, as returned by the
/// read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileWithUser {
    #[serde(flatten)]
    pub profile: Profile,
    pub user: UserSummary,
}

/// Row shape for the profiles-join-users queries.
#[derive(Debug, FromRow)]
pub struct ProfileWithUserRow {
    #[sqlx(flatten)]
    pub profile: Profile,
    pub user_name: String,
    pub user_avatar: Option<String>,
}

impl From<ProfileWithUserRow> for ProfileWithUser {
    fn from(row: ProfileWithUserRow) -> Self {
        let user = UserSummary {
            id: row.profile.user_id,
            name: row.user_name,
            avatar: row.user_avatar,
        };
        Self {
            profile: row.profile,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> Profile {
        let now = Utc::now();
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: "Developer".to_string(),
            company: None,
            website: None,
            location: None,
            bio: None,
            githubusername: None,
            skills: vec![],
            social: Json(SocialLinks::default()),
            experience: Json(vec![]),
            education: Json(vec![]),
            created_at: now,
            updated_at: now,
        }
    }

    fn experience(title: &str) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: None,
            from: NaiveDate::from_ymd_opt(2020, 1, 1).expect("date"),
            to: None,
            current: false,
            description: None,
        }
    }

    #[test]
    fn experience_is_prepended() {
        let mut profile = empty_profile();
        profile.add_experience(experience("first"));
        profile.add_experience(experience("second"));

        let titles: Vec<&str> = profile.experience.0.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[test]
    fn remove_experience_by_id_keeps_relative_order() {
        let mut profile = empty_profile();
        let e1 = experience("e1");
        let e1_id = e1.id.to_string();
        profile.add_experience(e1);
        profile.add_experience(experience("e2"));

        profile.remove_experience(&e1_id);

        let titles: Vec<&str> = profile.experience.0.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["e2"]);
    }

    #[test]
    fn remove_unknown_experience_is_a_noop() {
        let mut profile = empty_profile();
        profile.add_experience(experience("e2"));

        profile.remove_experience(&Uuid::new_v4().to_string());
        profile.remove_experience("not-even-a-uuid");

        assert_eq!(profile.experience.0.len(), 1);
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let profile = empty_profile();
        let value = serde_json::to_value(&profile).expect("json");
        assert!(value.get("company").is_none());
        assert_eq!(value["status"], "Developer");
    }
}
