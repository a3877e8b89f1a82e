#![forbid(unsafe_code)]

//! Replay a [`GestureScript`] against a [`MultiSlider`].
//!
//! Notifications are recorded through real callbacks, so what comes out is
//! exactly what a host would have observed, in delivery order.

use std::cell::RefCell;
use std::rc::Rc;

use mslider::{
    MarkerId, MultiSlider, Notification, SliderCallbacks, SliderConfig, SliderEffect,
    SliderRenderState,
};
use serde::Serialize;

use crate::error::{HarnessError, Result};
use crate::script::{GestureScript, ScriptEvent};

/// One delivered notification, tagged with the script step that caused it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayLine {
    pub step: usize,
    pub event: &'static str,
    pub transition_id: u64,
    pub notification: Notification,
}

/// Outcome of one script step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub step: usize,
    pub event: &'static str,
    pub transition_id: u64,
    pub effect: SliderEffect,
    pub panicked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replay {
    pub lines: Vec<ReplayLine>,
    pub steps: Vec<StepSummary>,
    pub values: Vec<f64>,
    pub positions: Vec<f64>,
    pub render: SliderRenderState,
}

type Sink = Rc<RefCell<Vec<Notification>>>;

/// Callbacks that push every notification into `sink`. Toggle callbacks are
/// registered only where `config` asks for them.
fn recording_callbacks(sink: &Sink, config: &SliderConfig) -> SliderCallbacks {
    let push = |sink: &Sink| {
        let sink = Rc::clone(sink);
        move |n: Notification| sink.borrow_mut().push(n)
    };
    let start = push(sink);
    let change = push(sink);
    let finish = push(sink);
    let position = push(sink);
    let mut callbacks = SliderCallbacks::new()
        .on_values_change_start(move || start(Notification::ValuesChangeStart))
        .on_values_change(move |v| change(Notification::ValuesChange(v.to_vec())))
        .on_values_change_finish(move |v| finish(Notification::ValuesChangeFinish(v.to_vec())))
        .on_markers_position(move |p| position(Notification::MarkersPosition(p.to_vec())));
    if config.toggle_one {
        let toggle = push(sink);
        callbacks = callbacks.on_toggle_one(move || toggle(Notification::Toggle(MarkerId::One)));
    }
    if config.toggle_two {
        let toggle = push(sink);
        callbacks = callbacks.on_toggle_two(move || toggle(Notification::Toggle(MarkerId::Two)));
    }
    callbacks
}

/// Run every event of `script` in order.
pub fn replay(script: &GestureScript) -> Result<Replay> {
    let sink = Sink::default();
    let mut slider = MultiSlider::new(script.config.clone(), recording_callbacks(&sink, &script.config))
        .map_err(|source| HarnessError::Config { step: 0, source })?;

    let mut lines = Vec::new();
    let mut steps = Vec::with_capacity(script.events.len());
    for (index, event) in script.events.iter().enumerate() {
        let step = index + 1;
        let outcome = match event {
            ScriptEvent::TapTrack { x } => slider.tap_track(*x),
            ScriptEvent::Sync { config } => {
                let config_error = |source| HarnessError::Config { step, source };
                slider
                    .set_callbacks(recording_callbacks(&sink, config))
                    .map_err(config_error)?;
                slider.update_config(config.clone()).map_err(config_error)?
            }
            gesture => match gesture.gesture() {
                Some((target, gesture)) => slider.handle(target, gesture),
                None => continue,
            },
        };

        let transition_id = outcome.transition.transition_id;
        tracing::debug!(
            step,
            event = event.name(),
            transition_id,
            effect = ?outcome.transition.effect,
            "script step replayed"
        );
        lines.extend(sink.borrow_mut().drain(..).map(|notification| ReplayLine {
            step,
            event: event.name(),
            transition_id,
            notification,
        }));
        steps.push(StepSummary {
            step,
            event: event.name(),
            transition_id,
            effect: outcome.transition.effect,
            panicked: outcome.report.panicked,
        });
    }

    Ok(Replay {
        lines,
        steps,
        values: slider.values(),
        positions: slider.positions(),
        render: slider.render_state(),
    })
}
