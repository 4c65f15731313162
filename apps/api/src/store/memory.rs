use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{
    Education, Link, NewProfile, Profile, ProfileDocument, ProfileUpdate, Project, Skill,
    WorkExperience,
};
use crate::search::{experience_matches, project_matches, skill_matches, TextFilter};
use crate::store::PortfolioStore;

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    profiles: Vec<Profile>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
    experience: Vec<WorkExperience>,
    education: Vec<Education>,
    links: Vec<Link>,
}

impl Tables {
    fn allocate_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn document(&self, profile: &Profile) -> ProfileDocument {
        let owned = |profile_id: i32| profile_id == profile.id;
        ProfileDocument {
            profile: profile.clone(),
            skills: self.skills.iter().filter(|s| owned(s.profile_id)).cloned().collect(),
            projects: self.projects.iter().filter(|p| owned(p.profile_id)).cloned().collect(),
            experience: self
                .experience
                .iter()
                .filter(|e| owned(e.profile_id))
                .cloned()
                .collect(),
            education: self
                .education
                .iter()
                .filter(|e| owned(e.profile_id))
                .cloned()
                .collect(),
            links: self.links.iter().filter(|l| owned(l.profile_id)).cloned().collect(),
        }
    }

    fn clear(&mut self) {
        self.profiles.clear();
        self.skills.clear();
        self.projects.clear();
        self.experience.clear();
        self.education.clear();
        self.links.clear();
    }
}

/// Process-local store. Ids are handed out from one counter shared by every
/// table and never reused, so vector order is id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn profile(&self, id: Option<i32>) -> Result<Option<ProfileDocument>, AppError> {
        let tables = self.tables.read().await;
        let profile = match id {
            Some(id) => tables.profiles.iter().find(|p| p.id == id),
            None => tables.profiles.first(),
        };
        Ok(profile.map(|p| tables.document(p)))
    }

    async fn update_profile(
        &self,
        id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        update.apply_to(profile);
        Ok(Some(profile.clone()))
    }

    async fn list_projects(&self, skill: Option<&TextFilter>) -> Result<Vec<Project>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .filter(|p| skill.map_or(true, |f| f.matches(&p.tech_stack)))
            .cloned()
            .collect())
    }

    async fn list_skills(&self, limit: usize) -> Result<Vec<Skill>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.skills.iter().take(limit).cloned().collect())
    }

    async fn search_projects(&self, filter: &TextFilter) -> Result<Vec<Project>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .filter(|p| project_matches(filter, p))
            .cloned()
            .collect())
    }

    async fn search_skills(&self, filter: &TextFilter) -> Result<Vec<Skill>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .skills
            .iter()
            .filter(|s| skill_matches(filter, s))
            .cloned()
            .collect())
    }

    async fn search_experience(
        &self,
        filter: &TextFilter,
    ) -> Result<Vec<WorkExperience>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .experience
            .iter()
            .filter(|e| experience_matches(filter, e))
            .cloned()
            .collect())
    }

    async fn replace_all(&self, seed: &NewProfile) -> Result<ProfileDocument, AppError> {
        let mut tables = self.tables.write().await;
        tables.clear();

        let profile_id = tables.allocate_id();
        let profile = Profile {
            id: profile_id,
            full_name: seed.full_name.clone(),
            title: seed.title.clone(),
            bio: seed.bio.clone(),
            email: seed.email.clone(),
            location: seed.location.clone(),
            avatar_url: seed.avatar_url.clone(),
        };
        tables.profiles.push(profile.clone());

        for s in &seed.skills {
            let id = tables.allocate_id();
            tables.skills.push(Skill {
                id,
                name: s.name.clone(),
                category: s.category.clone(),
                profile_id,
            });
        }
        for p in &seed.projects {
            let id = tables.allocate_id();
            tables.projects.push(Project {
                id,
                title: p.title.clone(),
                description: p.description.clone(),
                tech_stack: p.tech_stack.clone(),
                repo_url: p.repo_url.clone(),
                demo_url: p.demo_url.clone(),
                image_url: p.image_url.clone(),
                profile_id,
            });
        }
        for e in &seed.experience {
            let id = tables.allocate_id();
            tables.experience.push(WorkExperience {
                id,
                company: e.company.clone(),
                role: e.role.clone(),
                start_date: e.start_date,
                end_date: e.end_date,
                description: e.description.clone(),
                profile_id,
            });
        }
        for e in &seed.education {
            let id = tables.allocate_id();
            tables.education.push(Education {
                id,
                school: e.school.clone(),
                degree: e.degree.clone(),
                year: e.year.clone(),
                profile_id,
            });
        }
        for l in &seed.links {
            let id = tables.allocate_id();
            tables.links.push(Link {
                id,
                platform: l.platform.clone(),
                url: l.url.clone(),
                profile_id,
            });
        }

        info!("In-memory store reseeded with profile {profile_id}");
        Ok(tables.document(&profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_profile;
    use crate::store::TOP_SKILLS_LIMIT;

    #[tokio::test]
    async fn test_empty_store_has_no_profile() {
        let store = MemoryStore::new();
        assert!(store.profile(None).await.unwrap().is_none());
        assert!(store.list_projects(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_is_idempotent_in_shape() {
        let store = MemoryStore::new();
        let first = store.replace_all(&seed_profile().unwrap()).await.unwrap();
        let second = store.replace_all(&seed_profile().unwrap()).await.unwrap();

        // Old rows are gone, ids keep growing.
        assert!(second.profile.id > first.profile.id);
        assert!(store.profile(Some(first.profile.id)).await.unwrap().is_none());
        assert_eq!(store.list_projects(None).await.unwrap().len(), 3);
        assert_eq!(second.skills.len(), first.skills.len());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let store = MemoryStore::new();
        store.replace_all(&seed_profile().unwrap()).await.unwrap();
        let update = ProfileUpdate {
            bio: Some("x".to_string()),
            ..Default::default()
        };
        assert!(store.update_profile(-1, &update).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skills_respects_limit() {
        let store = MemoryStore::new();
        store.replace_all(&seed_profile().unwrap()).await.unwrap();
        let skills = store.list_skills(TOP_SKILLS_LIMIT).await.unwrap();
        assert_eq!(skills.len(), TOP_SKILLS_LIMIT);
        assert_eq!(skills[0].name, "Python");
        assert!(skills.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(store.list_skills(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_children_belong_to_profile() {
        let store = MemoryStore::new();
        let doc = store.replace_all(&seed_profile().unwrap()).await.unwrap();
        let id = doc.profile.id;
        assert!(doc.links.iter().all(|l| l.profile_id == id));
        assert!(doc.education.iter().all(|e| e.profile_id == id));
    }
}
