//! Render dispatch for pikchr diagrams.
//!
//! The pikchr engine itself is external and reached through the `Renderer`
//! trait. This module adds what sits around it:
//!
//! - `Dispatcher` collapses concurrent renders of the same source into one
//!   engine call and retries failures on a fixed delay
//! - `markup` shapes the engine's SVG as inline `<svg>` or an `<img>`
//! - `placeholder` swaps rendered markup into a host document once the
//!   placeholder node exists, and renders fenced code blocks

pub mod dispatch;
pub mod markup;
pub mod placeholder;

use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};

use crate::errors::errors::RenderError;

pub use dispatch::Dispatcher;
pub use placeholder::{render_later, replace_placeholder, Document, FenceRenderer, Placeholders};

/// How rendered markup is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    #[default]
    Img,
    Svg,
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "img" => Ok(Tag::Img),
            "svg" => Ok(Tag::Svg),
            other => Err(format!("unknown render tag `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    pub tag: Tag,
    pub dark_mode: Option<bool>,
    pub css_class: Option<String>,
}

/// What the engine hands back for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    pub markup: String,
    pub width: f64,
    pub height: f64,
    /// Set when `markup` is the engine's error report rather than a diagram.
    pub is_error: bool,
}

/// Bounded retry on a fixed delay. `retries` counts attempts after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: usize, delay: Duration) -> Self {
        RetryPolicy { retries, delay }
    }

    pub fn attempts(&self) -> usize {
        self.retries + 1
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(5, Duration::from_millis(100))
    }
}

/// The external pikchr engine.
pub trait Renderer: Send + Sync {
    fn render(&self, source: &str, options: &RenderOptions) -> Result<Rendered, RenderError>;
}

impl<F> Renderer for F
where
    F: Fn(&str, &RenderOptions) -> Result<Rendered, RenderError> + Send + Sync,
{
    fn render(&self, source: &str, options: &RenderOptions) -> Result<Rendered, RenderError> {
        self(source, options)
    }
}
