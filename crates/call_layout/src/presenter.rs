use call_session::CallSession;
use tracing::debug;

use crate::{
    observer::{CallStateChange, CallStateSink},
    plan::ViewPlan,
    reconciler::{LayoutReconciler, Reconciliation},
    render::{plan_directives, PlanRenderer, RenderDirective},
    scroll::ScrollPosition,
};

/// Glue between observed call changes, the reconciler and a renderer.
pub struct GroupCallPresenter<R: PlanRenderer> {
    reconciler: LayoutReconciler,
    renderer: R,
    rendered: Option<ViewPlan>,
    scroll: Option<ScrollPosition>,
    torn_down: bool,
}

impl<R: PlanRenderer> GroupCallPresenter<R> {
    pub fn new(reconciler: LayoutReconciler, renderer: R) -> Self {
        Self {
            reconciler,
            renderer,
            rendered: None,
            scroll: None,
            torn_down: false,
        }
    }

    pub fn reconciler(&self) -> &LayoutReconciler {
        &self.reconciler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn rendered_plan(&self) -> Option<&ViewPlan> {
        self.rendered.as_ref()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Records the renderer's scroll offset and refreshes the overflow strip
    /// once the scroll settles on a page.
    pub fn on_scrolled(&mut self, scroll: ScrollPosition) -> bool {
        self.scroll = Some(scroll);
        let Some(plan) = self.rendered.as_ref() else {
            return false;
        };
        if !scroll.is_at_page_boundary() {
            return false;
        }
        let members = self.reconciler.visible_overflow(plan, scroll);
        self.renderer.reload_overflow(&members);
        true
    }

    fn present(&mut self, plan: ViewPlan) {
        let directives = plan_directives(self.rendered.as_ref(), &plan);
        debug!(?directives, "presenter: rendering view plan");
        self.renderer.render(&plan, &directives);

        let page_height = self.scroll.map_or(0.0, |scroll| scroll.page_height);
        if directives.iter().any(|d| {
            matches!(
                d,
                RenderDirective::ScrollToGridPage | RenderDirective::CollapseToSinglePage
            )
        }) {
            self.scroll = Some(ScrollPosition::top(page_height));
        }

        if directives.contains(&RenderDirective::ReloadOverflow) {
            let scroll = self.scroll.unwrap_or(ScrollPosition::top(page_height));
            let members = self.reconciler.visible_overflow(&plan, scroll);
            self.renderer.reload_overflow(&members);
        }

        self.rendered = Some(plan);
    }
}

impl<R: PlanRenderer> CallStateSink for GroupCallPresenter<R> {
    fn on_call_state_changed(&mut self, change: CallStateChange, session: &dyn CallSession) {
        match self.reconciler.apply(change, session) {
            Reconciliation::Updated(plan) => self.present(plan),
            Reconciliation::TearDown(reason) => {
                self.rendered = None;
                self.scroll = None;
                self.torn_down = true;
                self.renderer.tear_down(reason);
            }
            Reconciliation::Ignored => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
