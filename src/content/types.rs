use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Free-text portion of the about section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct About {
    #[serde(default)]
    pub journey: String,
    #[serde(default)]
    pub interests: String,
}

/// Contact facts shown next to the about section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PersonalDetails {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub experience: String,
}

/// Profile in its canonical nested shape.
///
/// Deserialization goes through [`ProfileWire`], which also accepts the
/// flattened field layout (`about_journey`, `email`, `experience_years`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfileWire", rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub intro: String,
    pub about: About,
    pub personal_details: PersonalDetails,
    pub profile_image: String,
}

/// Every field either wire shape may carry
#[derive(Debug, Deserialize)]
struct ProfileWire {
    #[serde(default)]
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    intro: String,
    #[serde(default)]
    about: Option<About>,
    #[serde(default)]
    about_journey: Option<String>,
    #[serde(default)]
    about_interests: Option<String>,
    #[serde(default, rename = "personalDetails", alias = "personal_details")]
    personal_details: Option<PersonalDetails>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    experience_years: Option<String>,
    #[serde(default, rename = "profileImage", alias = "profile_image", alias = "profile_image_url")]
    profile_image: Option<String>,
}

impl From<ProfileWire> for Profile {
    fn from(wire: ProfileWire) -> Self {
        let about = wire.about.unwrap_or_else(|| About {
            journey: wire.about_journey.unwrap_or_default(),
            interests: wire.about_interests.unwrap_or_default(),
        });
        let personal_details = wire.personal_details.unwrap_or_else(|| PersonalDetails {
            email: wire.email.unwrap_or_default(),
            location: wire.location.unwrap_or_default(),
            experience: wire.experience_years.unwrap_or_default(),
        });

        Profile {
            name: wire.name,
            title: wire.title,
            intro: wire.intro,
            about,
            personal_details,
            profile_image: wire.profile_image.unwrap_or_default(),
        }
    }
}

/// A technical skill with a percentage level.
///
/// `level` is rendered as a CSS width as-is; values outside 0..=100 are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSkill {
    pub name: String,
    pub level: i64,
}

/// A soft skill shown with a symbolic icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalSkill {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// A technology badge; `icon` is an image URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    #[serde(default, alias = "icon_url")]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<TechnicalSkill>,
    #[serde(default)]
    pub professional: Vec<ProfessionalSkill>,
    #[serde(default)]
    pub technologies: Vec<Technology>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image_url", deserialize_with = "nullable_string")]
    pub image: String,
    #[serde(default, deserialize_with = "technology_names")]
    pub technologies: Vec<String>,
    #[serde(
        default,
        alias = "github_url",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub github_url: Option<String>,
    #[serde(
        default,
        alias = "live_url",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub live_url: Option<String>,
    #[serde(default, alias = "is_featured")]
    pub featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    #[serde(alias = "work")]
    Experience,
    Education,
}

/// One timeline entry, in the order the backend returned it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExperienceWire")]
pub struct ExperienceEntry {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub period: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ExperienceKind,
}

#[derive(Debug, Deserialize)]
struct ExperienceWire {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    is_current: bool,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "type", alias = "experience_type")]
    kind: Option<ExperienceKind>,
}

impl From<ExperienceWire> for ExperienceEntry {
    fn from(wire: ExperienceWire) -> Self {
        let period = wire
            .period
            .unwrap_or_else(|| derive_period(wire.start_date, wire.end_date, wire.is_current));

        ExperienceEntry {
            id: wire.id,
            title: wire.title,
            company: wire.company,
            period,
            description: wire.description,
            kind: wire.kind.unwrap_or(ExperienceKind::Experience),
        }
    }
}

/// "2018 - 2020", "2020 - Present", or empty when no start date is known
fn derive_period(start: Option<NaiveDate>, end: Option<NaiveDate>, is_current: bool) -> String {
    let Some(start) = start else {
        return String::new();
    };
    match (end, is_current) {
        (_, true) | (None, false) => format!("{} - Present", start.year()),
        (Some(end), false) => format!("{} - {}", start.year(), end.year()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    #[serde(
        default,
        alias = "resume_url",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub resume_url: Option<String>,
}

/// Outbound contact form payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Body of an accepted send-message call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageReceipt {
    /// Always true; rejected messages surface as errors
    pub accepted: bool,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageReceipt {
    /// Build a receipt from whatever JSON the backend answered with
    pub fn from_body(body: &Value) -> Self {
        Self {
            accepted: true,
            id: body.get("id").and_then(Value::as_i64),
            message: body.get("message").and_then(Value::as_str).map(str::to_string),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_or_number(deserializer)?.unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.trim().is_empty()))
}

/// Accept a list of names or a list of `{ "name": ... }` objects
fn technology_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattened_profile_matches_nested() {
        let nested: Profile = serde_json::from_value(json!({
            "name": "Alex",
            "title": "Engineer",
            "intro": "Hi",
            "about": { "journey": "Started in 2019", "interests": "Climbing" },
            "personalDetails": { "email": "alex@example.com", "location": "Oslo", "experience": "5 Years" },
            "profileImage": "https://example.com/me.png"
        }))
        .unwrap();

        let flattened: Profile = serde_json::from_value(json!({
            "id": 1,
            "name": "Alex",
            "title": "Engineer",
            "intro": "Hi",
            "about_journey": "Started in 2019",
            "about_interests": "Climbing",
            "email": "alex@example.com",
            "location": "Oslo",
            "experience_years": "5 Years",
            "profile_image": "https://example.com/me.png",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(nested, flattened);
    }

    #[test]
    fn test_profile_serializes_nested_camel_case() {
        let profile: Profile = serde_json::from_value(json!({
            "name": "Alex", "title": "", "intro": "",
            "about_journey": "j", "email": "e@x.io", "experience_years": 4
        }))
        .unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["personalDetails"]["experience"], "4");
        assert_eq!(value["about"]["journey"], "j");
        assert!(value.get("about_journey").is_none());
    }

    #[test]
    fn test_project_accepts_snake_case_backend_shape() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "title": "Tool",
            "description": "Does things",
            "image": null,
            "github_url": "https://github.com/me/tool",
            "live_url": "",
            "is_featured": true
        }))
        .unwrap();
        assert_eq!(project.github_url.as_deref(), Some("https://github.com/me/tool"));
        assert_eq!(project.live_url, None);
        assert!(project.featured);
        assert!(project.technologies.is_empty());
        assert_eq!(project.image, "");
    }

    #[test]
    fn test_skill_level_passes_through_out_of_range() {
        let skills: SkillSet = serde_json::from_value(json!({
            "technical": [{ "name": "Rust", "level": 140, "category": "Programming" }],
            "professional": [],
            "technologies": []
        }))
        .unwrap();
        assert_eq!(skills.technical[0].level, 140);
    }

    #[test]
    fn test_experience_period_derived_from_dates() {
        let entries: Vec<ExperienceEntry> = serde_json::from_value(json!([
            { "id": 1, "title": "Dev", "company": "A", "start_date": "2020-01-01",
              "is_current": true, "description": "", "experience_type": "work" },
            { "id": 2, "title": "Degree", "company": "U", "start_date": "2014-09-01",
              "end_date": "2018-06-30", "description": "", "experience_type": "education" }
        ]))
        .unwrap();
        assert_eq!(entries[0].period, "2020 - Present");
        assert_eq!(entries[0].kind, ExperienceKind::Experience);
        assert_eq!(entries[1].period, "2014 - 2018");
        assert_eq!(entries[1].kind, ExperienceKind::Education);
    }

    #[test]
    fn test_contact_null_resume_url() {
        let contact: ContactInfo = serde_json::from_value(json!({
            "email": "a@b.com", "phone": "1", "location": "X", "social": [], "resume_url": null
        }))
        .unwrap();
        assert_eq!(contact.resume_url, None);
    }
}
