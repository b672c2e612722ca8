use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use log::{debug, warn};

use crate::mode::is_pikchr_fence;

use super::{Dispatcher, RenderOptions, Renderer, RetryPolicy};

/// The host document holding placeholder nodes.
pub trait Document {
    /// Replaces the node with `id` by `markup`. Returns false while no such
    /// node exists.
    fn replace_node(&self, id: &str, markup: &str) -> bool;
}

/// Hands out unique placeholder ids.
#[derive(Debug)]
pub struct Placeholders {
    prefix: String,
    next: AtomicUsize,
}

impl Default for Placeholders {
    fn default() -> Self {
        Placeholders::new("pikchr-placeholder")
    }
}

impl Placeholders {
    pub fn new(prefix: impl Into<String>) -> Self {
        Placeholders {
            prefix: prefix.into(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        format!("{}-{}", self.prefix, self.next.fetch_add(1, Ordering::Relaxed))
    }

    pub fn markup(id: &str) -> String {
        format!("<img id=\"{}\" />", id)
    }
}

/// Swaps `markup` in for the placeholder `id`, retrying while the node is
/// missing. Gives up with a warning once the policy is spent.
pub fn replace_placeholder<D: Document + ?Sized>(
    document: &D,
    id: &str,
    markup: &str,
    policy: RetryPolicy,
) -> bool {
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
        if document.replace_node(id, markup) {
            debug!("replaced placeholder {} on attempt {}", id, attempt);
            return true;
        }
        if attempt < attempts {
            thread::sleep(policy.delay);
        }
    }

    warn!("failed to update placeholder {} after {} attempts", id, attempts);
    false
}

/// Renders `source` and replaces placeholder `id` with the result.
///
/// Failures end in a logged warning and `false`, never an error.
pub fn render_later<R: Renderer, D: Document + ?Sized>(
    dispatcher: &Dispatcher<R>,
    document: &D,
    source: &str,
    options: &RenderOptions,
    id: &str,
) -> bool {
    match dispatcher.render(source, options) {
        Ok(markup) => replace_placeholder(document, id, &markup, dispatcher.policy()),
        Err(error) => {
            warn!("placeholder {} failed to render: {}", id, error);
            false
        }
    }
}

/// Renders fenced code blocks in markdown output.
///
/// A pikchr fence becomes a placeholder right away; the diagram replaces it
/// from a background thread once rendered.
pub struct FenceRenderer<R, D>
where
    R: Renderer + 'static,
    D: Document + Send + Sync + 'static,
{
    dispatcher: Arc<Dispatcher<R>>,
    document: Arc<D>,
    placeholders: Placeholders,
    options: RenderOptions,
}

impl<R, D> FenceRenderer<R, D>
where
    R: Renderer + 'static,
    D: Document + Send + Sync + 'static,
{
    pub fn new(dispatcher: Arc<Dispatcher<R>>, document: Arc<D>, options: RenderOptions) -> Self {
        FenceRenderer {
            dispatcher,
            document,
            placeholders: Placeholders::default(),
            options,
        }
    }

    /// Returns the placeholder markup and the background render, or `None`
    /// when `info` does not name pikchr and the host should render the fence
    /// itself.
    pub fn render_fence(&self, info: &str, content: &str) -> Option<(String, JoinHandle<bool>)> {
        if !is_pikchr_fence(info) {
            return None;
        }

        let id = self.placeholders.next_id();
        let placeholder = Placeholders::markup(&id);

        let dispatcher = Arc::clone(&self.dispatcher);
        let document = Arc::clone(&self.document);
        let source = content.to_string();
        let options = self.options.clone();

        let handle = thread::spawn(move || {
            render_later(&dispatcher, document.as_ref(), &source, &options, &id)
        });

        Some((placeholder, handle))
    }
}
