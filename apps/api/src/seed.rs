//! The fixed dataset the site ships with, and the routine that installs it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{
    NewEducation, NewLink, NewProfile, NewProject, NewSkill, NewWorkExperience, ProfileDocument,
};
use crate::store::PortfolioStore;

const SKILLS: &[(&str, &str)] = &[
    ("Python", "Language"),
    ("C/C++", "Language"),
    ("SQL", "Language"),
    ("JavaScript", "Language"),
    ("HTML", "Language"),
    ("CSS", "Language"),
    ("React", "Framework"),
    ("TensorFlow", "ML/DL"),
    ("Keras", "ML/DL"),
    ("PyTorch", "ML/DL"),
    ("Scikit-learn", "ML/DL"),
    ("Pandas", "Data Analysis"),
    ("NumPy", "Data Analysis"),
    ("Matplotlib", "Data Analysis"),
    ("Streamlit", "Framework"),
    ("NLTK", "ML/DL"),
    ("Git", "Tool"),
    ("GitHub", "Tool"),
    ("VS Code", "Tool"),
    ("Jupyter Notebook", "Tool"),
];

const LINKS: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/angad-1407"),
    (
        "LinkedIn",
        "https://www.linkedin.com/in/angad-aheer-895630317/",
    ),
    ("Leetcode", "https://leetcode.com/u/angad_aheer/"),
    ("Portfolio", "https://angad-1407.github.io/Angad-portfolio/"),
];

/// Midnight UTC on the given day.
fn utc_date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>, AppError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "invalid seed date {year:04}-{month:02}-{day:02}"
            ))
        })
}

pub fn seed_profile() -> Result<NewProfile, AppError> {
    Ok(NewProfile {
        full_name: "Angad Aheer".to_string(),
        title: "AI & Data Science Undergraduate".to_string(),
        bio: "Aspiring developer with expertise in AI/ML and Full Stack Web Development. \
              Passionate about building data-driven solutions."
            .to_string(),
        email: "ahirangad66@gmail.com".to_string(),
        location: Some("Delhi, India".to_string()),
        avatar_url: None,
        skills: SKILLS
            .iter()
            .map(|(name, category)| NewSkill {
                name: name.to_string(),
                category: Some(category.to_string()),
            })
            .collect(),
        projects: vec![
            NewProject {
                title: "AgriNova".to_string(),
                description: "A web application to assist farmers by integrating ML, DL and \
                              data-driven solutions. Detects plant diseases using CNN, suggests \
                              crops/fertilizers based on environment, and provides real-time \
                              weather using OpenWeatherMap API."
                    .to_string(),
                tech_stack: "Python, Streamlit, TensorFlow, Scikit-learn, Matplotlib".to_string(),
                repo_url: Some("https://github.com/angad-1407".to_string()),
                demo_url: Some(
                    "https://agrinova-ecspappfaiebprgcbjeynmi.streamlit.app/".to_string(),
                ),
                image_url: None,
            },
            NewProject {
                title: "PixelPlayground".to_string(),
                description: "A collection of 3 front-end projects: Tic-Tac-Toe Game, Book List \
                              App, and Pulsify song app. Implemented Object Oriented Programming \
                              and deployed on Github and Netlify."
                    .to_string(),
                tech_stack: "HTML, CSS, JavaScript, Netlify, Git".to_string(),
                repo_url: Some("https://github.com/angad-1407".to_string()),
                demo_url: Some("https://angad-1407.github.io/PixelPlayground/".to_string()),
                image_url: None,
            },
            NewProject {
                title: "Skin Disease Classification".to_string(),
                description: "Built initial dataset with augmentation and analyzed different \
                              pretrained model architectures. Currently working on improving \
                              accuracy on MobileNET model using hypertuning."
                    .to_string(),
                tech_stack: "Keras, TensorFlow, Scikit-Learn, Pandas, NumPy".to_string(),
                repo_url: None,
                demo_url: None,
                image_url: None,
            },
        ],
        experience: vec![
            NewWorkExperience {
                company: "Training and Placement Cell, NIT Delhi".to_string(),
                role: "Database Head".to_string(),
                start_date: utc_date(2024, 9, 1)?,
                end_date: None,
                description:
                    "Currently managing and updating recruiter and company databases using Excel."
                        .to_string(),
            },
            NewWorkExperience {
                company: "Social Reform Cell, NIT Delhi".to_string(),
                role: "Executive Member".to_string(),
                start_date: utc_date(2023, 9, 1)?,
                end_date: None,
                description:
                    "Contributing to event planning and poster designing for social initiatives."
                        .to_string(),
            },
        ],
        education: vec![
            NewEducation {
                school: "National Institute of Technology Delhi".to_string(),
                degree: "B.Tech AI & Data Science".to_string(),
                year: "2023 - 2027".to_string(),
            },
            NewEducation {
                school: "Govt. Sr. Sec. School, Rajendra Marg, Bhilwara".to_string(),
                degree: "Senior Secondary (Class XII)".to_string(),
                year: "2021 - 2022".to_string(),
            },
        ],
        links: LINKS
            .iter()
            .map(|(platform, url)| NewLink {
                platform: platform.to_string(),
                url: url.to_string(),
            })
            .collect(),
    })
}

/// Replaces everything in the store with the seed dataset.
pub async fn run_seed(store: &dyn PortfolioStore) -> Result<ProfileDocument, AppError> {
    let doc = store.replace_all(&seed_profile()?).await?;
    info!(
        "Seed data created: profile {} ({}) with {} skills, {} projects, {} experience, {} education, {} links",
        doc.profile.id,
        doc.profile.full_name,
        doc.skills.len(),
        doc.projects.len(),
        doc.experience.len(),
        doc.education.len(),
        doc.links.len()
    );
    Ok(doc)
}
