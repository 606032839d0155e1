//! View rendering
//!
//! Template rendering using Tera. The templates are embedded into the
//! binary with rust-embed and registered once at startup, so the server
//! has no runtime dependency on a template directory.

use anyhow::{Context as _, Result};
use rust_embed::RustEmbed;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct Templates;

/// View engine rendering the embedded templates
pub struct ViewEngine {
    tera: Tera,
}

impl ViewEngine {
    /// Create a view engine with all embedded templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any embedded template fails to parse.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        for path in Templates::iter() {
            let file = Templates::get(&path)
                .with_context(|| format!("Missing embedded template: {}", path))?;
            let source = std::str::from_utf8(file.data.as_ref())
                .with_context(|| format!("Template is not valid UTF-8: {}", path))?;
            tera.add_raw_template(&path, source)
                .with_context(|| format!("Failed to parse template: {}", path))?;
        }

        Ok(Self { tera })
    }

    /// Render a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or a variable it uses is
    /// missing from the context.
    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template, context)
            .with_context(|| format!("Failed to render '{}'", template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ViewEngine {
        ViewEngine::new().expect("Failed to create view engine")
    }

    fn page_context(authenticated: bool, username: &str) -> Context {
        let mut ctx = Context::new();
        ctx.insert("authenticated", &authenticated);
        ctx.insert("username", username);
        ctx
    }

    #[test]
    fn test_all_templates_are_registered() {
        let engine = engine();
        for template in ["index.html", "signup.html", "login.html", "members.html", "404.html"] {
            assert!(
                engine.tera.get_template_names().any(|name| name == template),
                "missing template {}",
                template
            );
        }
    }

    #[test]
    fn test_render_index_authenticated() {
        let html = engine()
            .render("index.html", &page_context(true, "Ada"))
            .expect("Render should succeed");
        assert!(html.contains("Ada"));
        assert!(html.contains("/members"));
    }

    #[test]
    fn test_render_index_anonymous() {
        let html = engine()
            .render("index.html", &page_context(false, ""))
            .expect("Render should succeed");
        assert!(html.contains("/signup"));
        assert!(html.contains("/login"));
    }

    #[test]
    fn test_render_signup_with_error() {
        let mut ctx = Context::new();
        ctx.insert("error", "Name is required");
        let html = engine()
            .render("signup.html", &ctx)
            .expect("Render should succeed");
        assert!(html.contains("Name is required"));
    }

    #[test]
    fn test_render_members() {
        let mut ctx = Context::new();
        ctx.insert("username", "Ada");
        ctx.insert("image", "/public/img2.svg");
        let html = engine()
            .render("members.html", &ctx)
            .expect("Render should succeed");
        assert!(html.contains("Ada"));
        assert!(html.contains("/public/img2.svg"));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let result = engine().render("nope.html", &Context::new());
        assert!(result.is_err());
    }
}
