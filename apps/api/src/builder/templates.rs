//! Template selection: the builtin layout set, and the extension allow-list
//! for user-supplied template files.

use serde::{Deserialize, Serialize};

/// The predefined visual layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinTemplate {
    Modern,
    Classic,
    Minimal,
    Professional,
}

impl BuiltinTemplate {
    pub const ALL: [BuiltinTemplate; 4] = [
        BuiltinTemplate::Modern,
        BuiltinTemplate::Classic,
        BuiltinTemplate::Minimal,
        BuiltinTemplate::Professional,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BuiltinTemplate::Modern => "modern",
            BuiltinTemplate::Classic => "classic",
            BuiltinTemplate::Minimal => "minimal",
            BuiltinTemplate::Professional => "professional",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.id() == id)
    }
}

/// A builtin layout or a user-supplied file — mutually exclusive by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateChoice {
    Builtin(BuiltinTemplate),
    Custom { file_name: String },
}

impl TemplateChoice {
    /// The value stored in the `template` column: the builtin id, or the
    /// literal `"custom"` for an uploaded file.
    pub fn storage_id(&self) -> &str {
        match self {
            TemplateChoice::Builtin(builtin) => builtin.id(),
            TemplateChoice::Custom { .. } => "custom",
        }
    }
}

/// What kind of artifact a custom template file is for; each context accepts
/// a different extension set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateContext {
    Resume,
    Portfolio,
}

impl TemplateContext {
    fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            TemplateContext::Resume => &["pdf", "doc", "docx"],
            TemplateContext::Portfolio => &["html", "zip"],
        }
    }

    /// Extension check on the file name, case-insensitive. Everything else
    /// about the file is opaque to the builder.
    pub fn accepts(&self, file_name: &str) -> bool {
        let Some((_, extension)) = file_name.rsplit_once('.') else {
            return false;
        };
        let extension = extension.to_ascii_lowercase();
        self.allowed_extensions().contains(&extension.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_round_trip() {
        for builtin in BuiltinTemplate::ALL {
            assert_eq!(BuiltinTemplate::from_id(builtin.id()), Some(builtin));
        }
        assert_eq!(BuiltinTemplate::from_id("holographic"), None);
    }

    #[test]
    fn test_custom_choice_stores_as_custom() {
        let choice = TemplateChoice::Custom {
            file_name: "mine.pdf".to_string(),
        };
        assert_eq!(choice.storage_id(), "custom");
        assert_eq!(
            TemplateChoice::Builtin(BuiltinTemplate::Minimal).storage_id(),
            "minimal"
        );
    }

    #[test]
    fn test_resume_context_accepts_document_extensions() {
        let ctx = TemplateContext::Resume;
        assert!(ctx.accepts("template.pdf"));
        assert!(ctx.accepts("template.DOCX"));
        assert!(ctx.accepts("template.doc"));
        assert!(!ctx.accepts("template.html"));
        assert!(!ctx.accepts("template.exe"));
        assert!(!ctx.accepts("no-extension"));
    }

    #[test]
    fn test_portfolio_context_accepts_web_bundles() {
        let ctx = TemplateContext::Portfolio;
        assert!(ctx.accepts("site.html"));
        assert!(ctx.accepts("bundle.zip"));
        assert!(!ctx.accepts("resume.pdf"));
    }
}
