//! Rendering of content into page regions
//!
//! Every `render_*` call replaces the markup of the regions it owns, so
//! rendering the same content twice leaves the page in the same state as
//! rendering it once. Text from the backend or the fallback data is always
//! escaped; only the template markup in this module and the icon table are
//! inserted verbatim.

pub mod icons;
pub mod markup;
mod page;

use std::collections::BTreeSet;

use tracing::debug;

use crate::content::{ContactInfo, ExperienceEntry, ExperienceKind, Profile, Project, SkillSet, SocialLink};

pub use icons::icon_svg;
pub use markup::Markup;
pub use page::{Element, Notice, NoticeKind, Page, Region};

/// Class placed on a region while its content is loading
pub const LOADING_CLASS: &str = "loading";

/// Regions that receive fetched content, grouped by the load that fills them
pub const PROFILE_REGIONS: &[Region] = &[
    Region::UserName,
    Region::UserTitle,
    Region::UserIntro,
    Region::ProfileImage,
    Region::FooterName,
    Region::AboutContent,
    Region::PersonalDetails,
];
pub const SKILL_REGIONS: &[Region] = &[Region::TechnicalSkills, Region::ProfessionalSkills, Region::Technologies];
pub const PROJECT_REGIONS: &[Region] = &[Region::ProjectsContainer];
pub const EXPERIENCE_REGIONS: &[Region] = &[Region::Timeline];
pub const CONTACT_REGIONS: &[Region] = &[Region::ContactInfo, Region::SocialLinks, Region::FooterSocial];

/// Stateless mapping from content to page mutations
#[derive(Debug, Clone, Default)]
pub struct ContentRenderer {
    bound: BTreeSet<Region>,
}

impl ContentRenderer {
    /// Record which regions exist on the page
    pub fn bind(page: &Page) -> Self {
        let bound: BTreeSet<Region> = Region::ALL.iter().copied().filter(|r| page.contains(*r)).collect();
        for region in Region::ALL.iter().filter(|r| !bound.contains(r)) {
            debug!("Region #{} not present; renders into it will be skipped", region.id());
        }
        Self { bound }
    }

    pub fn is_bound(&self, region: Region) -> bool {
        self.bound.contains(&region)
    }

    fn text(&self, page: &mut Page, region: Region, text: &str) {
        if self.is_bound(region) {
            page.set_text(region, text);
        }
    }

    fn markup(&self, page: &mut Page, region: Region, build: impl FnOnce(&mut Markup)) {
        if !self.is_bound(region) {
            return;
        }
        let mut markup = Markup::new();
        build(&mut markup);
        page.set_markup(region, markup);
    }

    /// Toggle the loading indicator on a group of regions
    pub fn set_loading(&self, page: &mut Page, regions: &[Region], loading: bool) {
        for region in regions.iter().copied().filter(|r| self.is_bound(*r)) {
            if loading {
                page.add_class(region, LOADING_CLASS);
            } else {
                page.remove_class(region, LOADING_CLASS);
            }
        }
    }

    /// Header fields, profile image, footer name, about and personal details
    pub fn render_profile(&self, page: &mut Page, profile: &Profile) {
        self.text(page, Region::UserName, &profile.name);
        self.text(page, Region::UserTitle, &profile.title);
        self.text(page, Region::UserIntro, &profile.intro);
        self.text(page, Region::FooterName, &profile.name);

        if self.is_bound(Region::ProfileImage) {
            let src = markup::safe_url(&profile.profile_image).unwrap_or("");
            page.set_attribute(Region::ProfileImage, "src", src);
            page.set_attribute(Region::ProfileImage, "alt", &profile.name);
        }

        self.render_about(page, profile);
    }

    fn render_about(&self, page: &mut Page, profile: &Profile) {
        self.markup(page, Region::AboutContent, |m| {
            m.raw(r#"<h3 class="text-2xl font-semibold text-gray-800 mb-4">My Journey</h3>"#);
            m.raw(r#"<p class="text-gray-600 mb-6">"#).text(&profile.about.journey).raw("</p>");
            m.raw(r#"<p class="text-gray-600 mb-6">"#).text(&profile.about.interests).raw("</p>");
        });

        let details = &profile.personal_details;
        self.markup(page, Region::PersonalDetails, |m| {
            for (label, value) in [
                ("Name", profile.name.as_str()),
                ("Email", details.email.as_str()),
                ("Location", details.location.as_str()),
                ("Experience", details.experience.as_str()),
            ] {
                m.raw(r#"<div class="flex items-center"><div><p class="text-gray-500 text-sm">"#)
                    .raw(label)
                    .raw(r#"</p><p class="text-gray-800">"#)
                    .text(value)
                    .raw("</p></div></div>");
            }
        });
    }

    /// Technical bars, professional skills and technology badges
    pub fn render_skills(&self, page: &mut Page, skills: &SkillSet) {
        self.markup(page, Region::TechnicalSkills, |m| {
            for skill in &skills.technical {
                m.raw(r#"<div><div class="flex justify-between mb-1"><span class="text-gray-700">"#)
                    .text(&skill.name)
                    .raw(r#"</span><span class="text-gray-500">"#)
                    .text(&format!("{}%", skill.level))
                    .raw(r#"</span></div><div class="w-full bg-gray-200 rounded-full h-2"><div class="skill-bar bg-blue-600 h-2 rounded-full""#)
                    .attr("style", &format!("--skill-width: {}%", skill.level))
                    .raw("></div></div></div>");
            }
        });

        self.markup(page, Region::ProfessionalSkills, |m| {
            for skill in &skills.professional {
                m.raw(r#"<div class="bg-white p-4 rounded-lg shadow-sm flex items-center">"#)
                    .raw(icon_svg(&skill.icon))
                    .raw("<span>")
                    .text(&skill.name)
                    .raw("</span></div>");
            }
        });

        self.markup(page, Region::Technologies, |m| {
            for tech in &skills.technologies {
                m.raw(r#"<div class="tech-icon""#)
                    .attr("data-tech", &tech.name.to_lowercase())
                    .raw("><img")
                    .url_attr("src", &tech.icon)
                    .attr("alt", &tech.name)
                    .attr("title", &tech.name)
                    .raw(r#" class="w-12 h-12"></div>"#);
            }
        });
    }

    /// Project cards; optional repository and demo links render only when set
    pub fn render_projects(&self, page: &mut Page, projects: &[Project]) {
        self.markup(page, Region::ProjectsContainer, |m| {
            for (index, project) in projects.iter().enumerate() {
                m.raw(r#"<div class="project-card bg-white rounded-xl shadow-md overflow-hidden""#)
                    .attr("data-aos-delay", &((index + 1) * 100).to_string())
                    .attr("data-featured", if project.featured { "true" } else { "false" })
                    .raw(r#"><div class="h-48 overflow-hidden"><img"#)
                    .url_attr("src", &project.image)
                    .attr("alt", &project.title)
                    .raw(r#" class="w-full h-full object-cover"></div><div class="p-6"><div class="flex justify-between items-start mb-2"><h3 class="text-xl font-bold text-gray-800">"#)
                    .text(&project.title)
                    .raw(r#"</h3><div class="flex space-x-2">"#);

                for (url, icon) in [(&project.github_url, "github"), (&project.live_url, "external-link")] {
                    if let Some(url) = url {
                        m.open_link(url, "text-blue-600 hover:text-blue-800", true)
                            .raw(icon_svg(icon))
                            .raw("</a>");
                    }
                }

                m.raw(r#"</div></div><p class="text-gray-600 mb-4">"#)
                    .text(&project.description)
                    .raw(r#"</p><div class="flex flex-wrap gap-2">"#);
                for tech in &project.technologies {
                    m.raw(r#"<span class="bg-blue-100 text-blue-800 text-xs px-3 py-1 rounded-full">"#)
                        .text(tech)
                        .raw("</span>");
                }
                m.raw("</div></div></div>");
            }
        });
    }

    /// Experience and education timeline, in the order given
    pub fn render_experience(&self, page: &mut Page, entries: &[ExperienceEntry]) {
        self.markup(page, Region::Timeline, |m| {
            for (index, entry) in entries.iter().enumerate() {
                let kind = match entry.kind {
                    ExperienceKind::Experience => "experience",
                    ExperienceKind::Education => "education",
                };
                m.raw(r#"<div class="relative timeline-item pl-8""#)
                    .attr("data-type", kind)
                    .attr("data-aos-delay", &((index + 1) * 100).to_string())
                    .raw(r#"><div class="timeline-dot"></div><div class="bg-white p-6 rounded-lg shadow-sm"><div class="flex flex-col md:flex-row md:justify-between md:items-center mb-2"><h3 class="text-xl font-bold text-gray-800">"#)
                    .text(&entry.title)
                    .raw(r#"</h3><span class="text-blue-600 font-medium">"#)
                    .text(&entry.period)
                    .raw(r#"</span></div><h4 class="text-gray-600 font-medium mb-3">"#)
                    .text(&entry.company)
                    .raw(r#"</h4><p class="text-gray-600">"#)
                    .text(&entry.description)
                    .raw("</p></div></div>");
            }
        });
    }

    /// Contact block, both social link rows and the resume link
    pub fn render_contact_info(&self, page: &mut Page, contact: &ContactInfo) {
        self.markup(page, Region::ContactInfo, |m| {
            contact_row(m, "mail", "Email", Some(format!("mailto:{}", contact.email).as_str()), &contact.email);
            contact_row(m, "phone", "Phone", Some(format!("tel:{}", contact.phone).as_str()), &contact.phone);
            contact_row(m, "map-pin", "Location", None, &contact.location);
        });

        self.render_social_links(page, &contact.social);

        if self.is_bound(Region::DownloadResume) {
            match contact.resume_url.as_deref().and_then(markup::safe_url) {
                Some(url) => {
                    page.set_attribute(Region::DownloadResume, "href", url);
                    page.set_hidden(Region::DownloadResume, false);
                }
                None => {
                    page.set_hidden(Region::DownloadResume, true);
                }
            }
        }
    }

    /// The same link row goes to the contact section and the footer
    pub fn render_social_links(&self, page: &mut Page, links: &[SocialLink]) {
        let build = |m: &mut Markup| {
            for link in links {
                m.open_link(&link.url, "bg-gray-100 p-3 rounded-full hover:bg-blue-100 transition", true)
                    .raw(icon_svg(&link.icon))
                    .raw(r#"<span class="sr-only">"#)
                    .text(&link.name)
                    .raw("</span></a>");
            }
        };
        self.markup(page, Region::SocialLinks, build);
        self.markup(page, Region::FooterSocial, build);
    }

    /// Copyright year in the footer
    pub fn render_footer_year(&self, page: &mut Page, year: i32) {
        self.text(page, Region::CurrentYear, &year.to_string());
    }
}

fn contact_row(m: &mut Markup, icon: &str, label: &str, href: Option<&str>, value: &str) {
    m.raw(r#"<div class="flex items-start"><div class="bg-blue-100 p-3 rounded-full mr-4">"#)
        .raw(icon_svg(icon))
        .raw(r#"</div><div><h4 class="text-gray-500 text-sm">"#)
        .raw(label)
        .raw("</h4>");
    match href {
        Some(href) => {
            m.open_link(href, "text-gray-800 hover:text-blue-600", false).text(value).raw("</a>");
        }
        None => {
            m.raw(r#"<p class="text-gray-800">"#).text(value).raw("</p>");
        }
    }
    m.raw("</div></div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback;

    fn render_all(page: &mut Page) {
        let renderer = ContentRenderer::bind(page);
        renderer.render_profile(page, &fallback::profile());
        renderer.render_skills(page, &fallback::skills());
        renderer.render_projects(page, &fallback::projects());
        renderer.render_experience(page, &fallback::experience());
        renderer.render_contact_info(page, &fallback::contact());
    }

    #[test]
    fn test_render_profile_fields() {
        let mut page = Page::new();
        render_all(&mut page);

        let name = page.element(Region::UserName).unwrap();
        assert_eq!(name.text.as_deref(), Some("Your Name"));
        let image = page.element(Region::ProfileImage).unwrap();
        assert_eq!(image.attribute("alt"), Some("Your Name"));
        assert!(image.attribute("src").unwrap().starts_with("https://images.unsplash.com/"));
        assert!(page.element(Region::PersonalDetails).unwrap().inner_html().contains("3+ Years"));
    }

    #[test]
    fn test_skill_level_used_as_width() {
        let mut page = Page::new();
        render_all(&mut page);
        let html = page.element(Region::TechnicalSkills).unwrap().inner_html();
        assert!(html.contains(r#"style="--skill-width: 90%""#));
        assert!(html.contains("90%</span>"));
    }

    #[test]
    fn test_projects_render_both_links() {
        let mut page = Page::new();
        render_all(&mut page);
        let element = page.element(Region::ProjectsContainer).unwrap();
        assert_eq!(element.links.len(), 6);
        assert_eq!(element.links[0], "https://github.com/yourusername/ecommerce-platform");
        assert_eq!(element.links[1], "https://your-ecommerce-demo.com");
    }

    #[test]
    fn test_project_without_urls_has_no_links() {
        let mut page = Page::new();
        let renderer = ContentRenderer::bind(&page);
        let mut project = fallback::projects().remove(0);
        project.github_url = None;
        project.live_url = None;
        renderer.render_projects(&mut page, &[project]);
        assert!(page.element(Region::ProjectsContainer).unwrap().links.is_empty());
    }

    #[test]
    fn test_social_links_render_in_both_places() {
        let mut page = Page::new();
        render_all(&mut page);
        let contact = page.element(Region::SocialLinks).unwrap();
        let footer = page.element(Region::FooterSocial).unwrap();
        assert_eq!(contact.links.len(), 4);
        assert_eq!(contact.links, footer.links);
        let resume = page.element(Region::DownloadResume).unwrap();
        assert_eq!(resume.attribute("href"), Some("/assets/resume.pdf"));
        assert!(!resume.hidden);
    }

    #[test]
    fn test_missing_regions_are_skipped() {
        let mut page = Page::with_regions([Region::UserName, Region::Timeline]);
        render_all(&mut page);
        assert_eq!(page.element(Region::UserName).unwrap().text.as_deref(), Some("Your Name"));
        assert!(page.element(Region::Timeline).unwrap().markup.is_some());
        assert!(page.element(Region::ProjectsContainer).is_none());
    }

    #[test]
    fn test_unknown_professional_icon_renders_empty() {
        let mut page = Page::new();
        let renderer = ContentRenderer::bind(&page);
        let mut skills = fallback::skills();
        skills.professional[0].icon = "brain".to_string();
        renderer.render_skills(&mut page, &skills);
        let html = page.element(Region::ProfessionalSkills).unwrap().inner_html();
        assert!(html.starts_with(r#"<div class="bg-white p-4 rounded-lg shadow-sm flex items-center"><span>Communication</span>"#));
    }

    #[test]
    fn test_unsafe_link_scheme_is_neutralized() {
        let mut page = Page::new();
        let renderer = ContentRenderer::bind(&page);
        let links = vec![SocialLink {
            name: "x".to_string(),
            url: "javascript:alert(document.cookie)".to_string(),
            icon: "github".to_string(),
        }];
        renderer.render_social_links(&mut page, &links);
        let element = page.element(Region::SocialLinks).unwrap();
        assert_eq!(element.links, vec!["#"]);
        assert!(!element.inner_html().contains("javascript:"));
    }

    #[test]
    fn test_loading_class_toggles() {
        let mut page = Page::new();
        let renderer = ContentRenderer::bind(&page);
        renderer.set_loading(&mut page, SKILL_REGIONS, true);
        assert!(page.element(Region::Technologies).unwrap().has_class(LOADING_CLASS));
        renderer.set_loading(&mut page, SKILL_REGIONS, false);
        assert!(!page.element(Region::Technologies).unwrap().has_class(LOADING_CLASS));
    }
}
