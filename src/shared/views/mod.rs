//! Server-rendered HTML views.
//!
//! Templates live in `templates/views/` and use Jinja2 syntax. They are
//! embedded at compile time, so the binary does not depend on its working
//! directory.
//!
//! # Usage
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::views::render;
//!
//! let html = render("products/index.html", context! { products => page })?;
//! ```

pub mod engine;

pub use engine::{render, TemplateError};
