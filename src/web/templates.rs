//! Template engine
//!
//! Thin wrapper over tera, loading templates from the configured
//! directory. Every page renders a typed, serializable context struct
//! wrapped in [`PageContext`], which contributes the fields shared by the
//! base layout.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tera::Tera;

use crate::models::User;

/// Template engine
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load all `.html` templates under the given directory.
    pub fn new(dir: &Path) -> Result<Self> {
        let glob = format!("{}/**/*.html", dir.display());
        let tera = Tera::new(&glob)
            .with_context(|| format!("Failed to load templates from {:?}", dir))?;

        Ok(Self { tera })
    }

    /// Render a template with the given context.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        let context =
            tera::Context::from_serialize(context).context("Failed to build template context")?;
        self.tera
            .render(name, &context)
            .with_context(|| format!("Failed to render template '{}'", name))
    }
}

/// Wrapper adding the layout-level fields to a page's own context
#[derive(Debug, Serialize)]
pub struct PageContext<T: Serialize> {
    /// Username of the authenticated requester, if any (drives the nav)
    pub current_username: Option<String>,
    #[serde(flatten)]
    pub page: T,
}

impl<T: Serialize> PageContext<T> {
    /// Context for a page rendered for the given (possibly anonymous) user
    pub fn new(user: Option<&User>, page: T) -> Self {
        Self {
            current_username: user.map(|u| u.username.clone()),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_loads_repository_templates() {
        let engine =
            TemplateEngine::new(Path::new("templates")).expect("Templates should load");

        #[derive(Serialize)]
        struct Empty {}

        let html = engine
            .render("home.html", &PageContext::new(None, Empty {}))
            .expect("Render should succeed");
        assert!(html.contains("<html"));
    }

    #[test]
    fn test_page_context_carries_username() {
        let mut user = User::new("Автор".to_string(), "hash".to_string());
        user.id = 1;

        #[derive(Serialize)]
        struct Empty {}

        let context = PageContext::new(Some(&user), Empty {});
        assert_eq!(context.current_username.as_deref(), Some("Автор"));
    }
}
