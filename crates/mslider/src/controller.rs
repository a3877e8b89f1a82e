#![forbid(unsafe_code)]

//! [`MultiSlider`]: a session wired to its callbacks.
//!
//! Every operation runs the core transition first, then delivers the
//! resulting notifications. A panicking callback is caught and counted in
//! the returned [`DispatchReport`]; the session state is already committed
//! by then and stays consistent.

use mslider_core::{
    DispatchReport, GestureDelta, GestureEvent, GestureTarget, MarkerId, MarkerRenderer,
    SliderConfig, SliderConfigError, SliderRenderState, SliderSession, SliderTransition, deliver,
};

use crate::callbacks::SliderCallbacks;

/// A transition together with the outcome of delivering its notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderOutcome {
    pub transition: SliderTransition,
    pub report: DispatchReport,
}

/// Range slider with one or two markers and closure callbacks.
#[derive(Debug)]
pub struct MultiSlider {
    session: SliderSession,
    callbacks: SliderCallbacks,
}

impl MultiSlider {
    /// Build a slider. Toggle behavior follows which toggle callbacks are
    /// registered, regardless of the `toggle_*` flags in `config`.
    pub fn new(config: SliderConfig, callbacks: SliderCallbacks) -> Result<Self, SliderConfigError> {
        let config = wire_toggles(config, &callbacks);
        let session = SliderSession::new(config)?;
        Ok(Self { session, callbacks })
    }

    #[must_use]
    pub const fn session(&self) -> &SliderSession {
        &self.session
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.session.values()
    }

    #[must_use]
    pub fn positions(&self) -> Vec<f64> {
        self.session.positions()
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.session.is_pressed()
    }

    /// Feed one host gesture event.
    pub fn handle(&mut self, target: GestureTarget, event: GestureEvent) -> SliderOutcome {
        let transition = self.session.apply(target, event);
        self.dispatch(transition)
    }

    pub fn start(&mut self, target: GestureTarget) -> SliderOutcome {
        self.handle(target, GestureEvent::Start)
    }

    pub fn move_by(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderOutcome {
        self.handle(target, GestureEvent::Move(delta))
    }

    pub fn end(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderOutcome {
        self.handle(target, GestureEvent::End(delta))
    }

    pub fn terminate(&mut self, target: GestureTarget, delta: GestureDelta) -> SliderOutcome {
        self.handle(target, GestureEvent::Terminate(delta))
    }

    /// Tap on the bare track at `x` px from its visual start.
    pub fn tap_track(&mut self, x: f64) -> SliderOutcome {
        let transition = self.session.tap_track(x);
        self.dispatch(transition)
    }

    /// Apply new host options. Geometry changes arriving mid-gesture are
    /// dropped; behavior flags always apply.
    pub fn update_config(&mut self, next: SliderConfig) -> Result<SliderOutcome, SliderConfigError> {
        let next = wire_toggles(next, &self.callbacks);
        let transition = self.session.sync(&next)?;
        Ok(self.dispatch(transition))
    }

    /// Swap the callback set, re-deriving toggle behavior from it.
    ///
    /// Any re-separation the resync performs is reported to the new set.
    pub fn set_callbacks(
        &mut self,
        callbacks: SliderCallbacks,
    ) -> Result<SliderOutcome, SliderConfigError> {
        self.callbacks = callbacks;
        let mut next = wire_toggles(self.session.config().clone(), &self.callbacks);
        next.values = self.session.values();
        let transition = self.session.sync(&next)?;
        Ok(self.dispatch(transition))
    }

    /// Current render state.
    #[must_use]
    pub fn render_state(&self) -> SliderRenderState {
        self.session.render_state()
    }

    /// Draw through `renderer`.
    pub fn render<R: MarkerRenderer + ?Sized>(&self, renderer: &mut R) {
        self.session.render_state().render_with(renderer);
    }

    fn dispatch(&mut self, transition: SliderTransition) -> SliderOutcome {
        let _span = tracing::debug_span!(
            "slider.dispatch",
            transition_id = transition.transition_id,
            notifications = transition.notifications.len()
        )
        .entered();
        let report = deliver(&transition.notifications, &mut self.callbacks);
        if !report.is_clean() {
            tracing::warn!(
                panicked = report.panicked,
                delivered = report.delivered,
                "slider callbacks panicked; state kept"
            );
        }
        SliderOutcome { transition, report }
    }
}

fn wire_toggles(mut config: SliderConfig, callbacks: &SliderCallbacks) -> SliderConfig {
    config.toggle_one = callbacks.has_toggle(MarkerId::One);
    config.toggle_two = callbacks.has_toggle(MarkerId::Two);
    config
}
