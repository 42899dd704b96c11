//! Preview Renderer — a pure projection from form state to the read-only
//! document view. Recomputed on every form change; no caching, no hidden
//! state, so identical input always yields an identical view.
//!
//! Section order is fixed: header → summary → skills → experience →
//! internships → projects → education → certifications → achievements.
//! The experience section additionally requires an experienced profile;
//! internships render for freshers and experienced profiles alike.

use serde::Serialize;

use crate::builder::form::{output_eligible, FormState, SectionEntry};
use crate::models::resume::{Entry, ProfileType};

/// Placeholder shown when no name has been entered yet.
const NAME_PLACEHOLDER: &str = "Your Name";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeView {
    pub name: String,
    /// Non-blank contact fields, in email-then-phone order.
    pub contact: Vec<String>,
    pub links: Vec<RenderedLink>,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedLink {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub items: Vec<SectionItem>,
}

/// One rendered entry: a bold heading line, an optional secondary line, an
/// optional right-aligned meta (dates, year), and optional body text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionItem {
    pub heading: String,
    pub subheading: Option<String>,
    pub meta: Option<String>,
    pub body: Option<String>,
}

pub fn render(profile_type: ProfileType, form: &FormState) -> ResumeView {
    let info = &form.personal_info;

    let name = match info.full_name.trim() {
        "" => NAME_PLACEHOLDER.to_string(),
        trimmed => trimmed.to_string(),
    };

    let contact: Vec<String> = [info.email.trim(), info.phone.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let links: Vec<RenderedLink> = form
        .profile_links
        .entries()
        .iter()
        .filter(|e| output_eligible(e))
        .map(|e| RenderedLink {
            platform: e.data.platform.trim().to_string(),
            url: e.data.url.trim().to_string(),
        })
        .collect();

    let summary = non_blank(&info.summary);

    let skills: Vec<String> = info
        .skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let mut sections = Vec::new();

    // Experience is gated on profile type; entered data is merely suppressed
    // for freshers, never dropped from the form.
    if profile_type == ProfileType::Experienced {
        push_section(
            &mut sections,
            "Experience",
            form.experiences.entries(),
            |e| SectionItem {
                heading: e.title.trim().to_string(),
                subheading: non_blank(&e.company),
                meta: non_blank(&e.duration),
                body: non_blank(&e.description),
            },
        );
    }

    push_section(
        &mut sections,
        "Internships",
        form.internships.entries(),
        |e| SectionItem {
            heading: e.title.trim().to_string(),
            subheading: non_blank(&e.company),
            meta: non_blank(&e.duration),
            body: non_blank(&e.description),
        },
    );

    push_section(&mut sections, "Projects", form.projects.entries(), |e| {
        SectionItem {
            heading: e.name.trim().to_string(),
            subheading: None,
            meta: non_blank(&e.technologies),
            body: non_blank(&e.description),
        }
    });

    push_section(&mut sections, "Education", form.education.entries(), |e| {
        SectionItem {
            heading: e.degree.trim().to_string(),
            subheading: non_blank(&e.institution),
            meta: non_blank(&e.year),
            body: None,
        }
    });

    push_section(
        &mut sections,
        "Certifications",
        form.certifications.entries(),
        |e| SectionItem {
            heading: e.name.trim().to_string(),
            subheading: non_blank(&e.issuer),
            meta: non_blank(&e.date),
            body: None,
        },
    );

    push_section(
        &mut sections,
        "Achievements",
        form.achievements.entries(),
        |e| SectionItem {
            heading: e.title.trim().to_string(),
            subheading: None,
            meta: None,
            body: non_blank(&e.description),
        },
    );

    ResumeView {
        name,
        contact,
        links,
        summary,
        skills,
        sections,
    }
}

/// Appends a section unless every entry is output-ineligible.
fn push_section<T: SectionEntry>(
    sections: &mut Vec<Section>,
    title: &'static str,
    entries: &[Entry<T>],
    to_item: impl Fn(&T) -> SectionItem,
) {
    let items: Vec<SectionItem> = entries
        .iter()
        .filter(|e| output_eligible(e))
        .map(|e| to_item(&e.data))
        .collect();
    if !items.is_empty() {
        sections.push(Section { title, items });
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
