//! Presentation state: active skin, customization, edit/preview mode.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::domain::customization::{ColumnLayout, Customization, CustomizationPatch, EditorMode, TemplateId};

/// Presentation state every skin reads. Never touches the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationState {
    #[serde(default)]
    pub template: TemplateId,
    #[serde(default)]
    pub customization: Customization,
    #[serde(default)]
    pub mode: EditorMode,
}

impl CustomizationState {
    pub fn for_template(template: TemplateId) -> Self {
        Self {
            template,
            customization: template.default_customization(),
            mode: EditorMode::Edit,
        }
    }

    pub fn is_preview_mode(&self) -> bool {
        self.mode == EditorMode::Preview
    }

    pub fn layout(&self) -> ColumnLayout {
        self.template.layout()
    }
}

impl Default for CustomizationState {
    fn default() -> Self {
        Self::for_template(TemplateId::default())
    }
}

#[derive(Debug, Default)]
pub struct CustomizationStore {
    state: CustomizationState,
}

impl CustomizationStore {
    pub fn new(state: CustomizationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &CustomizationState {
        &self.state
    }

    pub fn template(&self) -> TemplateId {
        self.state.template
    }

    pub fn mode(&self) -> EditorMode {
        self.state.mode
    }

    pub fn layout(&self) -> ColumnLayout {
        self.state.layout()
    }

    /// Switch skin. Customization is kept as is.
    pub fn set_template(&mut self, template: TemplateId) -> bool {
        if self.state.template == template {
            return false;
        }
        info!(from = self.state.template.as_str(), to = template.as_str(), "Template switched");
        self.state.template = template;
        true
    }

    /// Switch skin by name. Unknown names are ignored.
    pub fn set_template_by_name(&mut self, name: &str) -> bool {
        match TemplateId::parse(name) {
            Some(template) => self.set_template(template),
            None => {
                debug!(name, "Unknown template name, ignoring");
                false
            }
        }
    }

    pub fn update_customization(&mut self, patch: &CustomizationPatch) -> bool {
        self.state.customization.merge(patch)
    }

    /// Overwrite customization with the active skin's built-in look.
    pub fn apply_template_defaults(&mut self) -> bool {
        let defaults = self.state.template.default_customization();
        if self.state.customization == defaults {
            return false;
        }
        self.state.customization = defaults;
        true
    }

    pub fn reset_customization(&mut self) -> bool {
        let changed = self.apply_template_defaults();
        if changed {
            debug!(template = self.state.template.as_str(), "Customization reset");
        }
        changed
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.state.mode = mode;
    }

    /// Flip between Edit and Preview. Returns the new mode.
    pub fn toggle_preview_mode(&mut self) -> EditorMode {
        self.state.mode = match self.state.mode {
            EditorMode::Edit => EditorMode::Preview,
            EditorMode::Preview => EditorMode::Edit,
        };
        debug!(mode = ?self.state.mode, "Editor mode toggled");
        self.state.mode
    }
}
