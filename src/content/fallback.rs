//! Static content used when the backend cannot be reached.
//!
//! Every function builds the same shape a successful response deserializes
//! into, so the renderer never needs to know where its input came from.

use super::types::*;

/// Bumped whenever the default data set changes
pub const FALLBACK_VERSION: u32 = 1;

const DEVICON_BASE: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

fn devicon(slug: &str, variant: &str) -> String {
    format!("{}/{}/{}-{}.svg", DEVICON_BASE, slug, slug, variant)
}

pub fn profile() -> Profile {
    Profile {
        name: "Your Name".to_string(),
        title: "Full Stack Developer".to_string(),
        intro: "Building digital experiences that matter. Passionate about solving problems through code."
            .to_string(),
        about: About {
            journey: "I began my coding journey in 2020 when I discovered my passion for building things with code. \
                      Since then, I've worked on numerous projects, collaborated with talented people, and continuously \
                      improved my skills."
                .to_string(),
            interests: "When I'm not coding, you'll find me reading tech blogs and exploring new technologies. \
                        I believe in lifelong learning and staying curious about technology and the world around me."
                .to_string(),
        },
        personal_details: PersonalDetails {
            email: "your.email@example.com".to_string(),
            location: "City, Country".to_string(),
            experience: "3+ Years".to_string(),
        },
        profile_image: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face"
            .to_string(),
    }
}

pub fn skills() -> SkillSet {
    let technical = [("JavaScript", 90), ("React", 85), ("Node.js", 80), ("Python", 75), ("MongoDB", 70)]
        .into_iter()
        .map(|(name, level)| TechnicalSkill { name: name.to_string(), level })
        .collect();

    let professional = [
        ("Communication", "message-square"),
        ("Time Management", "clock"),
        ("Teamwork", "users"),
        ("Problem Solving", "target"),
    ]
    .into_iter()
    .map(|(name, icon)| ProfessionalSkill { name: name.to_string(), icon: icon.to_string() })
    .collect();

    let technologies = [
        ("React", "react"),
        ("Node.js", "nodejs"),
        ("JavaScript", "javascript"),
        ("TypeScript", "typescript"),
        ("MongoDB", "mongodb"),
        ("PostgreSQL", "postgresql"),
    ]
    .into_iter()
    .map(|(name, slug)| Technology { name: name.to_string(), icon: devicon(slug, "original") })
    .collect();

    SkillSet { technical, professional, technologies }
}

fn project(
    id: i64,
    title: &str,
    description: &str,
    photo: &str,
    technologies: &[&str],
    repo: &str,
    live: &str,
) -> Project {
    Project {
        id,
        title: title.to_string(),
        description: description.to_string(),
        image: format!("https://images.unsplash.com/{}?w=640&h=360&fit=crop", photo),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        github_url: Some(format!("https://github.com/yourusername/{}", repo)),
        live_url: Some(live.to_string()),
        featured: true,
    }
}

pub fn projects() -> Vec<Project> {
    vec![
        project(
            1,
            "E-commerce Platform",
            "A full-featured e-commerce platform with payment integration and admin dashboard.",
            "photo-1556742049-0cfed4f6a45d",
            &["React", "Node.js", "MongoDB"],
            "ecommerce-platform",
            "https://your-ecommerce-demo.com",
        ),
        project(
            2,
            "Task Management App",
            "A collaborative task management application with real-time updates.",
            "photo-1611224923853-80b023f02d71",
            &["Vue.js", "Firebase", "Tailwind CSS"],
            "task-manager",
            "https://your-task-app.com",
        ),
        project(
            3,
            "Portfolio Website",
            "A responsive portfolio website showcasing my work and skills.",
            "photo-1467232004584-a241de8bcf5d",
            &["HTML/CSS", "JavaScript", "GSAP"],
            "portfolio",
            "https://your-portfolio.com",
        ),
    ]
}

pub fn experience() -> Vec<ExperienceEntry> {
    let entry = |id, title: &str, company: &str, period: &str, description: &str, kind| ExperienceEntry {
        id,
        title: title.to_string(),
        company: company.to_string(),
        period: period.to_string(),
        description: description.to_string(),
        kind,
    };

    vec![
        entry(
            1,
            "Senior Developer",
            "Tech Company Inc.",
            "2020 - Present",
            "Led a team of developers in building scalable web applications. Implemented CI/CD pipelines and mentored junior developers.",
            ExperienceKind::Experience,
        ),
        entry(
            2,
            "Frontend Developer",
            "Digital Agency",
            "2018 - 2020",
            "Developed responsive web applications using React and Vue.js. Collaborated with designers to implement UI/UX best practices.",
            ExperienceKind::Experience,
        ),
        entry(
            3,
            "Computer Science Degree",
            "University Name",
            "2014 - 2018",
            "Specialized in software engineering and web development. Completed coursework in algorithms, databases, and human-computer interaction.",
            ExperienceKind::Education,
        ),
    ]
}

pub fn contact() -> ContactInfo {
    let social = [
        ("GitHub", "https://github.com/yourusername", "github"),
        ("LinkedIn", "https://linkedin.com/in/yourusername", "linkedin"),
        ("Twitter", "https://twitter.com/yourusername", "twitter"),
        ("Instagram", "https://instagram.com/yourusername", "instagram"),
    ]
    .into_iter()
    .map(|(name, url, icon)| SocialLink {
        name: name.to_string(),
        url: url.to_string(),
        icon: icon.to_string(),
    })
    .collect();

    ContactInfo {
        email: "your.email@example.com".to_string(),
        phone: "+1 (234) 567-890".to_string(),
        location: "City, Country".to_string(),
        social,
        resume_url: Some("/assets/resume.pdf".to_string()),
    }
}
