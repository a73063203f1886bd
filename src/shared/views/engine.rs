use minijinja::{Environment, Value};
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Templates compiled into the binary: (name, source)
const TEMPLATES: &[(&str, &str)] = &[
    (
        "layout.html",
        include_str!("../../../templates/views/layout.html"),
    ),
    (
        "auth/login.html",
        include_str!("../../../templates/views/auth/login.html"),
    ),
    (
        "products/index.html",
        include_str!("../../../templates/views/products/index.html"),
    ),
    (
        "products/form.html",
        include_str!("../../../templates/views/products/form.html"),
    ),
    (
        "categories/index.html",
        include_str!("../../../templates/views/categories/index.html"),
    ),
    (
        "errors/status.html",
        include_str!("../../../templates/views/errors/status.html"),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Build the environment. `.html` templates are auto-escaped by minijinja.
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a view with the given context.
///
/// # Arguments
/// * `template_name` - The template path relative to `templates/views/` (e.g., "products/index.html")
/// * `ctx` - Context value, usually built with `minijinja::context!`
pub fn render(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
