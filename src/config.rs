// RENDER PREFERENCES

use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

use crate::render::{RenderOptions, RetryPolicy, Tag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Attempts after the first before a render or placeholder swap gives up
    pub render_retries: usize,

    /// Pause between attempts, in milliseconds
    pub render_delay_ms: u64,

    /// Forced dark mode; unset leaves it to the engine
    pub dark_mode: Option<bool>,

    /// How rendered diagrams are embedded
    pub tag: Tag,

    pub css_class: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config::from_lookup(|key| env::var(key).ok())
    }
}

impl Config {
    /// Builds a config from `lookup`, falling back per key when a value is
    /// missing or does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RetryPolicy::default();

        Self {
            render_retries: lookup("PIKCHR_RENDER_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retries),
            render_delay_ms: lookup("PIKCHR_RENDER_DELAY_MS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.delay.as_millis() as u64),
            dark_mode: lookup("PIKCHR_DARK_MODE").and_then(|v| v.parse().ok()),
            tag: lookup("PIKCHR_RENDER_TAG")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            css_class: lookup("PIKCHR_CSS_CLASS").filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.render_retries, Duration::from_millis(self.render_delay_ms))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            tag: self.tag,
            dark_mode: self.dark_mode,
            css_class: self.css_class.clone(),
        }
    }
}
