#![allow(dead_code)]

//! Builder State Machine — the three-stage wizard that carries one
//! resume-in-progress: choose a profile type, choose a template, edit the
//! form. Saving and exporting are terminal actions that leave the machine
//! where it is; backward navigation never discards entered data.

pub mod form;
pub mod templates;

use thiserror::Error;

use crate::builder::form::FormState;
use crate::builder::templates::{BuiltinTemplate, TemplateChoice, TemplateContext};
use crate::models::resume::ProfileType;
use crate::render::{render, ResumeView};
use crate::store::NewResume;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderStage {
    ChoosingProfileType,
    ChoosingTemplate,
    Editing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    #[error("preview is not the active view")]
    PreviewNotActive,

    #[error("builder is not in the editing stage")]
    NotEditing,
}

pub struct ResumeBuilder {
    context: TemplateContext,
    stage: BuilderStage,
    profile_type: Option<ProfileType>,
    template: Option<TemplateChoice>,
    pub form: FormState,
    show_preview: bool,
}

impl ResumeBuilder {
    pub fn new() -> Self {
        Self::with_context(TemplateContext::Resume)
    }

    pub fn with_context(context: TemplateContext) -> Self {
        Self {
            context,
            stage: BuilderStage::ChoosingProfileType,
            profile_type: None,
            template: None,
            form: FormState::default(),
            show_preview: false,
        }
    }

    pub fn stage(&self) -> BuilderStage {
        self.stage
    }

    pub fn profile_type(&self) -> Option<ProfileType> {
        self.profile_type
    }

    pub fn template(&self) -> Option<&TemplateChoice> {
        self.template.as_ref()
    }

    pub fn preview_active(&self) -> bool {
        self.show_preview
    }

    /// `ChoosingProfileType → ChoosingTemplate`. A fresher selection makes
    /// experience not-applicable to output; any experience data already in
    /// the form is retained, not destroyed.
    pub fn select_profile_type(&mut self, profile_type: ProfileType) -> bool {
        if self.stage != BuilderStage::ChoosingProfileType {
            return false;
        }
        self.profile_type = Some(profile_type);
        self.stage = BuilderStage::ChoosingTemplate;
        true
    }

    /// Picks a builtin layout; clears any custom file (the two are mutually
    /// exclusive). Stays in `ChoosingTemplate`.
    pub fn select_template(&mut self, builtin: BuiltinTemplate) -> bool {
        if self.stage != BuilderStage::ChoosingTemplate {
            return false;
        }
        self.template = Some(TemplateChoice::Builtin(builtin));
        true
    }

    /// Sets a custom template file; clears any builtin selection. A file
    /// outside the context's extension allow-list is silently ignored —
    /// observed upstream behavior, kept as-is.
    pub fn upload_template(&mut self, file_name: &str) -> bool {
        if self.stage != BuilderStage::ChoosingTemplate {
            return false;
        }
        if !self.context.accepts(file_name) {
            return false;
        }
        self.template = Some(TemplateChoice::Custom {
            file_name: file_name.to_string(),
        });
        true
    }

    /// `ChoosingTemplate → Editing`, only once a template (builtin or
    /// custom) is selected.
    pub fn continue_to_editing(&mut self) -> bool {
        if self.stage != BuilderStage::ChoosingTemplate || self.template.is_none() {
            return false;
        }
        self.stage = BuilderStage::Editing;
        true
    }

    /// Steps one stage backward. Nothing is cleared — selections and form
    /// data survive the round trip.
    pub fn back(&mut self) -> bool {
        match self.stage {
            BuilderStage::ChoosingProfileType => false,
            BuilderStage::ChoosingTemplate => {
                self.stage = BuilderStage::ChoosingProfileType;
                true
            }
            BuilderStage::Editing => {
                self.show_preview = false;
                self.stage = BuilderStage::ChoosingTemplate;
                true
            }
        }
    }

    /// Flips between the editable form and the rendered preview. Only
    /// meaningful while editing; form state is untouched either way.
    pub fn toggle_preview(&mut self) -> bool {
        if self.stage != BuilderStage::Editing {
            return false;
        }
        self.show_preview = !self.show_preview;
        true
    }

    /// The read-only document view for the current form state. Available
    /// from the editing stage regardless of which view is showing — the
    /// preview pane recomputes on every form change.
    pub fn preview(&self) -> Result<ResumeView, BuilderError> {
        if self.stage != BuilderStage::Editing {
            return Err(BuilderError::NotEditing);
        }
        // profile_type is always set by the time Editing is reachable.
        let profile_type = self.profile_type.unwrap_or(ProfileType::Fresher);
        Ok(render(profile_type, &self.form))
    }

    /// The view the Export Pipeline is allowed to rasterize: exporting the
    /// edit form instead of the preview is disallowed.
    pub fn export_view(&self) -> Result<ResumeView, BuilderError> {
        if !self.show_preview {
            return Err(BuilderError::PreviewNotActive);
        }
        self.preview()
    }

    /// The create payload for a completed wizard; `None` until both the
    /// profile type and a template have been chosen.
    pub fn save_payload(&self, name: &str) -> Option<NewResume> {
        let profile_type = self.profile_type?;
        let template = self.template.as_ref()?;
        let patch = self.form.to_patch(name);
        Some(NewResume {
            name: patch.name,
            profile_type,
            template: template.storage_id().to_string(),
            personal_info: patch.personal_info,
            experiences: patch.experiences,
            education: patch.education,
            projects: patch.projects,
            profile_links: patch.profile_links,
            achievements: patch.achievements,
            certifications: patch.certifications,
            internships: patch.internships,
        })
    }
}

impl Default for ResumeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
