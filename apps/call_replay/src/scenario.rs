//! Scripted call scenarios replayed through the layout core.

use std::{fs, io::Write, path::Path, rc::Rc};

use anyhow::{Context, Result};
use call_layout::{
    CallStateObserver, GroupCallPresenter, LayoutReconciler, LayoutSettings, PlanRenderer,
    RenderDirective, ScrollPosition, ViewPlan,
};
use call_session::{ScriptedCallSession, SessionUpdate};
use serde::Deserialize;
use serde_json::json;
use shared::{
    domain::{CallEndReason, CallSnapshot, RemoteDevice},
    protocol::CallSessionEvent,
};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub initial: CallSnapshot,
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScenarioStep {
    Scroll { scroll: ScrollPosition },
    Session(SessionUpdate),
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario '{}'", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse scenario '{}'", path.display()))
}

/// Writes one JSON object per renderer callback.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    error: Option<std::io::Error>,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn emit(&mut self, line: serde_json::Value) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(self.out, "{line}") {
            self.error = Some(err);
        }
    }

    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err).context("failed to write replay output");
        }
        self.out.flush().context("failed to flush replay output")?;
        Ok(self.out)
    }
}

impl<W: Write> PlanRenderer for JsonLinesRenderer<W> {
    fn render(&mut self, plan: &ViewPlan, directives: &[RenderDirective]) {
        self.emit(json!({ "event": "plan", "plan": plan, "directives": directives }));
    }

    fn reload_overflow(&mut self, members: &[RemoteDevice]) {
        self.emit(json!({ "event": "overflow", "members": members }));
    }

    fn tear_down(&mut self, reason: CallEndReason) {
        self.emit(json!({ "event": "tear_down", "reason": reason }));
    }
}

pub fn replay<W: Write>(scenario: Scenario, settings: LayoutSettings, out: W) -> Result<W> {
    let session = Rc::new(ScriptedCallSession::new(scenario.initial));
    let mut observer = CallStateObserver::new(Rc::clone(&session));
    let mut presenter =
        GroupCallPresenter::new(LayoutReconciler::new(settings), JsonLinesRenderer::new(out));

    // Render the starting state before any scripted change arrives.
    observer.forward(CallSessionEvent::LocalDeviceStateChanged, &mut presenter);

    for (index, step) in scenario.steps.into_iter().enumerate() {
        match step {
            ScenarioStep::Session(update) => {
                session
                    .apply(update)
                    .with_context(|| format!("scenario step {index} rejected"))?;
                observer.drain(&mut presenter);
            }
            ScenarioStep::Scroll { scroll } => {
                presenter.on_scrolled(scroll);
            }
        }
    }

    info!(
        "replay: finished ended={:?}",
        presenter.reconciler().ended_reason()
    );
    presenter.into_renderer().finish()
}
