//! Handlebars-based renderer for fragment templates.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled.
//! Any `{{variable}}` referenced by a fragment must exist in the data context,
//! otherwise rendering fails. Fragments produce C, Python and Markdown, so HTML
//! escaping is turned off.
//!
//! One renderer is built per run and passed to the merger explicitly.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::renderer::TemplateRenderer;
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "config": config });
//! let output = renderer.render(Path::new("kems.fragment"), "{{#each config.kems}}...", &data)?;
//! ```

use std::path::Path;

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value;

use crate::error::{OqsTemplateError, Result};

handlebars_helper!(upper: |s: str| s.to_uppercase());
handlebars_helper!(lower: |s: str| s.to_lowercase());
handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));

/// Template renderer for fragment files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode enabled and escaping disabled.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(no_escape);
        hbs.register_helper("upper", Box::new(upper));
        hbs.register_helper("lower", Box::new(lower));
        hbs.register_helper("replace", Box::new(replace));
        Self { hbs }
    }

    /// Render a template string with the given data context.
    ///
    /// `name` identifies the template in error messages.
    pub fn render(&self, name: &Path, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| OqsTemplateError::TemplateRender {
                fragment: name.to_path_buf(),
                message: e.to_string(),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
