//! In-memory page made of named regions

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use super::markup::{escape_attr, escape_text, Markup};

/// Named element of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    UserName,
    UserTitle,
    UserIntro,
    ProfileImage,
    AboutContent,
    PersonalDetails,
    TechnicalSkills,
    ProfessionalSkills,
    Technologies,
    ProjectsContainer,
    Timeline,
    ContactInfo,
    SocialLinks,
    FooterSocial,
    FooterName,
    DownloadResume,
    LoadMoreProjects,
    CurrentYear,
    ContactForm,
    FormName,
    FormEmail,
    FormSubject,
    FormMessage,
    SubmitButton,
}

impl Region {
    pub const ALL: [Region; 24] = [
        Region::UserName,
        Region::UserTitle,
        Region::UserIntro,
        Region::ProfileImage,
        Region::AboutContent,
        Region::PersonalDetails,
        Region::TechnicalSkills,
        Region::ProfessionalSkills,
        Region::Technologies,
        Region::ProjectsContainer,
        Region::Timeline,
        Region::ContactInfo,
        Region::SocialLinks,
        Region::FooterSocial,
        Region::FooterName,
        Region::DownloadResume,
        Region::LoadMoreProjects,
        Region::CurrentYear,
        Region::ContactForm,
        Region::FormName,
        Region::FormEmail,
        Region::FormSubject,
        Region::FormMessage,
        Region::SubmitButton,
    ];

    /// Element id in the page template
    pub fn id(self) -> &'static str {
        match self {
            Region::UserName => "user-name",
            Region::UserTitle => "user-title",
            Region::UserIntro => "user-intro",
            Region::ProfileImage => "profile-image",
            Region::AboutContent => "about-content",
            Region::PersonalDetails => "personal-details",
            Region::TechnicalSkills => "technical-skills",
            Region::ProfessionalSkills => "professional-skills",
            Region::Technologies => "technologies",
            Region::ProjectsContainer => "projects-container",
            Region::Timeline => "timeline",
            Region::ContactInfo => "contact-info",
            Region::SocialLinks => "social-links",
            Region::FooterSocial => "footer-social",
            Region::FooterName => "footer-name",
            Region::DownloadResume => "download-resume",
            Region::LoadMoreProjects => "load-more-projects",
            Region::CurrentYear => "current-year",
            Region::ContactForm => "contact-form",
            Region::FormName => "name",
            Region::FormEmail => "email",
            Region::FormSubject => "subject",
            Region::FormMessage => "message",
            Region::SubmitButton => "submit-button",
        }
    }

    pub fn from_id(id: &str) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message shown to the visitor inside the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    fn class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "success-message",
            NoticeKind::Error => "error-message",
        }
    }
}

/// State of one region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Plain text content; escaped on output
    pub text: Option<String>,
    /// Generated inner markup; replaces `text` when set
    pub markup: Option<String>,
    /// Destinations of the anchors inside `markup`
    pub links: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    /// Current value of a form field
    pub value: String,
    pub disabled: bool,
    pub hidden: bool,
    pub notices: Vec<Notice>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Inner HTML as a browser would serialize it
    pub fn inner_html(&self) -> String {
        let mut html = match (&self.markup, &self.text) {
            (Some(markup), _) => markup.clone(),
            (None, Some(text)) => escape_text(text),
            (None, None) => escape_text(&self.value),
        };
        for notice in &self.notices {
            let _ = write!(
                html,
                r#"<div class="{}">{}</div>"#,
                notice.class(),
                escape_text(&notice.message)
            );
        }
        html
    }
}

/// The page the renderer writes into.
///
/// Only regions present at construction exist; writes to absent regions
/// are dropped and reported as `false`.
#[derive(Debug, Clone, Default)]
pub struct Page {
    elements: BTreeMap<Region, Element>,
    navigations: Vec<String>,
}

impl Page {
    /// Page containing every known region
    pub fn new() -> Self {
        Self::with_regions(Region::ALL)
    }

    /// Page containing only the given regions
    pub fn with_regions(regions: impl IntoIterator<Item = Region>) -> Self {
        Self {
            elements: regions.into_iter().map(|r| (r, Element::default())).collect(),
            navigations: Vec::new(),
        }
    }

    /// Whether the region exists on this page
    pub fn contains(&self, region: Region) -> bool {
        self.elements.contains_key(&region)
    }

    /// Current state of a region
    pub fn element(&self, region: Region) -> Option<&Element> {
        self.elements.get(&region)
    }

    /// Mutable access to a region
    pub fn element_mut(&mut self, region: Region) -> Option<&mut Element> {
        self.elements.get_mut(&region)
    }

    fn update(&mut self, region: Region, f: impl FnOnce(&mut Element)) -> bool {
        match self.elements.get_mut(&region) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    /// Replace the region's content with plain text
    pub fn set_text(&mut self, region: Region, text: &str) -> bool {
        self.update(region, |el| {
            el.markup = None;
            el.links.clear();
            el.text = Some(text.to_string());
        })
    }

    /// Replace the region's content with generated markup
    pub fn set_markup(&mut self, region: Region, markup: Markup) -> bool {
        let (html, links) = markup.into_parts();
        self.update(region, |el| {
            el.text = None;
            el.markup = Some(html);
            el.links = links;
        })
    }

    /// Set an attribute on the region's element
    pub fn set_attribute(&mut self, region: Region, name: &str, value: &str) -> bool {
        self.update(region, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        })
    }

    /// Add a CSS class
    pub fn add_class(&mut self, region: Region, class: &str) -> bool {
        self.update(region, |el| {
            el.classes.insert(class.to_string());
        })
    }

    /// Remove a CSS class
    pub fn remove_class(&mut self, region: Region, class: &str) -> bool {
        self.update(region, |el| {
            el.classes.remove(class);
        })
    }

    /// Toggle the disabled state of a control
    pub fn set_disabled(&mut self, region: Region, disabled: bool) -> bool {
        self.update(region, |el| el.disabled = disabled)
    }

    /// Toggle visibility
    pub fn set_hidden(&mut self, region: Region, hidden: bool) -> bool {
        self.update(region, |el| el.hidden = hidden)
    }

    /// Current value of a form field; empty when the field is absent
    pub fn value(&self, region: Region) -> &str {
        self.elements.get(&region).map(|el| el.value.as_str()).unwrap_or("")
    }

    /// Set the value of a form field
    pub fn set_value(&mut self, region: Region, value: &str) -> bool {
        self.update(region, |el| el.value = value.to_string())
    }

    /// Append a notice to the region
    pub fn push_notice(&mut self, region: Region, notice: Notice) -> bool {
        self.update(region, |el| el.notices.push(notice))
    }

    /// Notices currently shown in the region
    pub fn notices(&self, region: Region) -> &[Notice] {
        self.elements.get(&region).map(|el| el.notices.as_slice()).unwrap_or(&[])
    }

    /// Remove every notice from the region
    pub fn dismiss_notices(&mut self, region: Region) -> bool {
        self.update(region, |el| el.notices.clear())
    }

    /// Follow the `index`-th link rendered in `region`.
    ///
    /// Returns the destination and records one navigation.
    pub fn click_link(&mut self, region: Region, index: usize) -> Option<String> {
        let href = self.elements.get(&region)?.links.get(index)?.clone();
        self.navigations.push(href.clone());
        Some(href)
    }

    /// Every navigation triggered so far, oldest first
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Serialize the page as a standalone HTML document
    pub fn to_html(&self, title: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_text(title));
        html.push_str("</head>\n<body>\n");
        for (region, element) in &self.elements {
            let _ = write!(html, "<div id=\"{}\"", region.id());
            for (name, value) in &element.attributes {
                let _ = write!(html, " {}=\"{}\"", escape_attr(name), escape_attr(value));
            }
            if !element.classes.is_empty() {
                let classes: Vec<&str> = element.classes.iter().map(String::as_str).collect();
                let _ = write!(html, " class=\"{}\"", escape_attr(&classes.join(" ")));
            }
            if element.hidden {
                html.push_str(" hidden");
            }
            let _ = writeln!(html, ">{}</div>", element.inner_html());
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_region_is_a_no_op() {
        let mut page = Page::with_regions([Region::UserName]);
        assert!(page.set_text(Region::UserName, "Alex"));
        assert!(!page.set_text(Region::UserTitle, "Engineer"));
        assert!(page.element(Region::UserTitle).is_none());
        assert_eq!(page.value(Region::FormName), "");
    }

    #[test]
    fn test_text_is_escaped_in_output() {
        let mut page = Page::with_regions([Region::UserName]);
        page.set_text(Region::UserName, "<img src=x onerror=alert(1)>");
        let html = page.element(Region::UserName).unwrap().inner_html();
        assert_eq!(html, "&lt;img src=x onerror=alert(1)&gt;");
    }

    #[test]
    fn test_markup_replaces_links() {
        let mut page = Page::with_regions([Region::SocialLinks]);
        let mut first = Markup::new();
        first.open_link("https://a.example", "", true).raw("</a>");
        first.open_link("https://b.example", "", true).raw("</a>");
        page.set_markup(Region::SocialLinks, first);

        let mut second = Markup::new();
        second.open_link("https://c.example", "", true).raw("</a>");
        page.set_markup(Region::SocialLinks, second);

        assert_eq!(page.element(Region::SocialLinks).unwrap().links, vec!["https://c.example"]);
        assert_eq!(page.click_link(Region::SocialLinks, 1), None);
        assert_eq!(page.click_link(Region::SocialLinks, 0).as_deref(), Some("https://c.example"));
        assert_eq!(page.navigations().len(), 1);
    }

    #[test]
    fn test_region_ids_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_id(region.id()), Some(region));
        }
    }
}
