//! The display seam: where vetted markup and user-visible messages go.

use crate::domain::SlotName;

/// User-visible notice for an infeasible SEFE pair. An expected negative
/// outcome, surfaced distinctly from any fault.
pub const INFEASIBLE_NOTICE: &str = "graphs do not admit a simultaneous embedding";

/// Where the control surface delivers its output.
///
/// Implementations are direct plumbing (a DOM node, a GUI pane, a test
/// recorder); the workflows never touch a concrete display.
pub trait DisplaySurface {
    /// Inject vetted artifact markup into the display target for `slot`.
    /// Replaces whatever that target showed before.
    fn render_artifact(&mut self, slot: SlotName, markup: &str);

    /// Surface an expected negative outcome to the user.
    fn show_notice(&mut self, message: &str);

    /// Surface a failure to the user. Read failures and undefined engine
    /// codes go here; they must not stay console-only.
    fn show_error(&mut self, message: &str);
}

/// A surface that records everything it is shown. Test support.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub rendered: Vec<(SlotName, String)>,
    pub notices: Vec<String>,
    pub errors: Vec<String>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The markup most recently rendered for `slot`, if any.
    pub fn markup_for(&self, slot: SlotName) -> Option<&str> {
        self.rendered
            .iter()
            .rev()
            .find(|(s, _)| *s == slot)
            .map(|(_, m)| m.as_str())
    }
}

impl DisplaySurface for RecordingSurface {
    fn render_artifact(&mut self, slot: SlotName, markup: &str) {
        self.rendered.push((slot, markup.to_string()));
    }

    fn show_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
