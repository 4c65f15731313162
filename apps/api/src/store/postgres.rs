//! Postgres-backed store.
//!
//! Substring filters use `strpos(column, $n) > 0` rather than `LIKE`: it is
//! byte-exact (case-sensitive under every collation) and needs no escaping of
//! `%` or `_` in user input.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{
    Education, Link, NewProfile, Profile, ProfileDocument, ProfileUpdate, Project, Skill,
    WorkExperience,
};
use crate::search::TextFilter;
use crate::store::PortfolioStore;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_children(&self, profile: Profile) -> Result<ProfileDocument, AppError> {
        let id = profile.id;
        let (skills, projects, experience, education, links) = tokio::try_join!(
            sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE profile_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool),
            sqlx::query_as::<_, Project>(
                "SELECT * FROM projects WHERE profile_id = $1 ORDER BY id"
            )
            .bind(id)
            .fetch_all(&self.pool),
            sqlx::query_as::<_, WorkExperience>(
                "SELECT * FROM work_experience WHERE profile_id = $1 ORDER BY id"
            )
            .bind(id)
            .fetch_all(&self.pool),
            sqlx::query_as::<_, Education>(
                "SELECT * FROM education WHERE profile_id = $1 ORDER BY id"
            )
            .bind(id)
            .fetch_all(&self.pool),
            sqlx::query_as::<_, Link>("SELECT * FROM links WHERE profile_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool),
        )?;

        Ok(ProfileDocument {
            profile,
            skills,
            projects,
            experience,
            education,
            links,
        })
    }
}

#[async_trait]
impl PortfolioStore for PgStore {
    async fn profile(&self, id: Option<i32>) -> Result<Option<ProfileDocument>, AppError> {
        let profile: Option<Profile> = sqlx::query_as(
            "SELECT * FROM profiles WHERE ($1::INTEGER IS NULL OR id = $1) ORDER BY id LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match profile {
            Some(p) => Ok(Some(self.attach_children(p).await?)),
            None => Ok(None),
        }
    }

    async fn update_profile(
        &self,
        id: i32,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, AppError> {
        if update.is_empty() {
            return Ok(sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?);
        }

        // Nullable columns carry a presence flag so an explicit null clears them.
        let updated: Option<Profile> = sqlx::query_as(
            r#"
            UPDATE profiles SET
                full_name  = COALESCE($2, full_name),
                title      = COALESCE($3, title),
                bio        = COALESCE($4, bio),
                email      = COALESCE($5, email),
                location   = CASE WHEN $6 THEN $7 ELSE location END,
                avatar_url = CASE WHEN $8 THEN $9 ELSE avatar_url END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.full_name.as_deref())
        .bind(update.title.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.email.as_deref())
        .bind(update.location.is_some())
        .bind(update.location.clone().flatten())
        .bind(update.avatar_url.is_some())
        .bind(update.avatar_url.clone().flatten())
        .fetch_optional(&self.pool)
        .await?;

        if updated.is_some() {
            info!("Updated profile {id}");
        }
        Ok(updated)
    }

    async fn list_projects(&self, skill: Option<&TextFilter>) -> Result<Vec<Project>, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE ($1::TEXT IS NULL OR strpos(tech_stack, $1) > 0)
            ORDER BY id
            "#,
        )
        .bind(skill.map(TextFilter::as_str))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn list_skills(&self, limit: usize) -> Result<Vec<Skill>, AppError> {
        let limit = i64::try_from(limit).map_err(|e| AppError::Internal(e.into()))?;
        Ok(
            sqlx::query_as::<_, Skill>("SELECT * FROM skills ORDER BY id LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn search_projects(&self, filter: &TextFilter) -> Result<Vec<Project>, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE strpos(title, $1) > 0
               OR strpos(description, $1) > 0
               OR strpos(tech_stack, $1) > 0
            ORDER BY id
            "#,
        )
        .bind(filter.as_str())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn search_skills(&self, filter: &TextFilter) -> Result<Vec<Skill>, AppError> {
        Ok(sqlx::query_as::<_, Skill>(
            "SELECT * FROM skills WHERE strpos(name, $1) > 0 ORDER BY id",
        )
        .bind(filter.as_str())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn search_experience(
        &self,
        filter: &TextFilter,
    ) -> Result<Vec<WorkExperience>, AppError> {
        Ok(sqlx::query_as::<_, WorkExperience>(
            r#"
            SELECT * FROM work_experience
            WHERE strpos(company, $1) > 0
               OR strpos(role, $1) > 0
               OR strpos(description, $1) > 0
            ORDER BY id
            "#,
        )
        .bind(filter.as_str())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn replace_all(&self, seed: &NewProfile) -> Result<ProfileDocument, AppError> {
        let mut tx = self.pool.begin().await?;

        // Children first, so the delete order works with or without cascades.
        for table in [
            "links",
            "education",
            "work_experience",
            "projects",
            "skills",
            "profiles",
        ] {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await?;
        }

        let profile: Profile = sqlx::query_as(
            r#"
            INSERT INTO profiles (full_name, title, bio, email, location, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&seed.full_name)
        .bind(&seed.title)
        .bind(&seed.bio)
        .bind(&seed.email)
        .bind(&seed.location)
        .bind(&seed.avatar_url)
        .fetch_one(&mut *tx)
        .await?;
        let profile_id = profile.id;

        let mut skills = Vec::with_capacity(seed.skills.len());
        for s in &seed.skills {
            let row: Skill = sqlx::query_as(
                "INSERT INTO skills (name, category, profile_id) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(&s.name)
            .bind(&s.category)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
            skills.push(row);
        }

        let mut projects = Vec::with_capacity(seed.projects.len());
        for p in &seed.projects {
            let row: Project = sqlx::query_as(
                r#"
                INSERT INTO projects
                    (title, description, tech_stack, repo_url, demo_url, image_url, profile_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(&p.title)
            .bind(&p.description)
            .bind(&p.tech_stack)
            .bind(&p.repo_url)
            .bind(&p.demo_url)
            .bind(&p.image_url)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
            projects.push(row);
        }

        let mut experience = Vec::with_capacity(seed.experience.len());
        for e in &seed.experience {
            let row: WorkExperience = sqlx::query_as(
                r#"
                INSERT INTO work_experience
                    (company, role, start_date, end_date, description, profile_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
                "#,
            )
            .bind(&e.company)
            .bind(&e.role)
            .bind(e.start_date)
            .bind(e.end_date)
            .bind(&e.description)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
            experience.push(row);
        }

        let mut education = Vec::with_capacity(seed.education.len());
        for e in &seed.education {
            let row: Education = sqlx::query_as(
                "INSERT INTO education (school, degree, year, profile_id) VALUES ($1, $2, $3, $4) RETURNING *",
            )
            .bind(&e.school)
            .bind(&e.degree)
            .bind(&e.year)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
            education.push(row);
        }

        let mut links = Vec::with_capacity(seed.links.len());
        for l in &seed.links {
            let row: Link = sqlx::query_as(
                "INSERT INTO links (platform, url, profile_id) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(&l.platform)
            .bind(&l.url)
            .bind(profile_id)
            .fetch_one(&mut *tx)
            .await?;
            links.push(row);
        }

        tx.commit().await?;
        info!("Database reseeded with profile {profile_id}");

        Ok(ProfileDocument {
            profile,
            skills,
            projects,
            experience,
            education,
            links,
        })
    }
}
