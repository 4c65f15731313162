use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// Rows serialize camelCase: that is the JSON contract the frontend reads.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub full_name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub profile_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Comma-joined technology names. Filtered by substring, not parsed.
    pub tech_stack: String,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub profile_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: i32,
    pub company: String,
    pub role: String,
    pub start_date: DateTime<Utc>,
    /// `None` means the position is current.
    pub end_date: Option<DateTime<Utc>>,
    pub description: String,
    pub profile_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i32,
    pub school: String,
    pub degree: String,
    pub year: String,
    pub profile_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: i32,
    pub platform: String,
    pub url: String,
    pub profile_id: i32,
}

/// The profile with every child collection attached, as served by `GET /profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(flatten)]
    pub profile: Profile,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub links: Vec<Link>,
}

/// Partial update body for `PUT /profile/:id`.
///
/// Only top-level scalar columns are writable. Unknown keys (including nested
/// collections and `id`) are ignored by serde. For the nullable columns the
/// outer `Option` records presence and the inner one the value, so an explicit
/// `null` clears the column.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub avatar_url: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.title.is_none()
            && self.bio.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.avatar_url.is_none()
    }

    /// Writes the supplied fields onto `profile`, leaving the rest untouched.
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(v) = &self.full_name {
            profile.full_name = v.clone();
        }
        if let Some(v) = &self.title {
            profile.title = v.clone();
        }
        if let Some(v) = &self.bio {
            profile.bio = v.clone();
        }
        if let Some(v) = &self.email {
            profile.email = v.clone();
        }
        if let Some(v) = &self.location {
            profile.location = v.clone();
        }
        if let Some(v) = &self.avatar_url {
            profile.avatar_url = v.clone();
        }
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

// Insert shapes used by the seed routine. Ids are assigned by the store.

#[derive(Debug, Clone)]
pub struct NewProfile {
    pub full_name: String,
    pub title: String,
    pub bio: String,
    pub email: String,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
    pub skills: Vec<NewSkill>,
    pub projects: Vec<NewProject>,
    pub experience: Vec<NewWorkExperience>,
    pub education: Vec<NewEducation>,
    pub links: Vec<NewLink>,
}

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub name: String,
    pub category: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWorkExperience {
    pub company: String,
    pub role: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone)]
pub struct NewLink {
    pub platform: String,
    pub url: String,
}
