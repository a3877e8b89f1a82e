//! Callback delivery through the facade.

use std::cell::RefCell;
use std::rc::Rc;

use mslider::prelude::*;
use mslider::{MarkerRenderState, MarkerRenderer, SliderConfigError, SliderEffect, TrackLayout};

type Log = Rc<RefCell<Vec<String>>>;

fn recording_callbacks(log: &Log) -> SliderCallbacks {
    let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
    SliderCallbacks::new()
        .on_values_change_start(move || a.borrow_mut().push("start".into()))
        .on_values_change(move |v| b.borrow_mut().push(format!("change {v:?}")))
        .on_markers_position(move |p| c.borrow_mut().push(format!("position {p:?}")))
        .on_values_change_finish(move |v| d.borrow_mut().push(format!("finish {v:?}")))
}

#[test]
fn drag_delivers_callbacks_in_order() {
    let log = Log::default();
    let mut slider = MultiSlider::new(SliderConfig::range(2.0, 8.0), recording_callbacks(&log))
        .expect("valid config");

    slider.start(GestureTarget::One);
    slider.move_by(GestureTarget::One, GestureDelta::horizontal(10.0));
    slider.move_by(GestureTarget::One, GestureDelta::horizontal(244.0));
    slider.end(GestureTarget::One, GestureDelta::horizontal(244.0));

    assert_eq!(
        *log.borrow(),
        vec![
            "start",
            "position [66.0, 224.0]",
            "change [7.0, 8.0]",
            "position [196.0, 224.0]",
            "finish [7.0, 8.0]",
        ]
    );
}

#[test]
fn tap_with_toggle_callback_skips_finish() {
    let log = Log::default();
    let toggles = log.clone();
    let callbacks =
        recording_callbacks(&log).on_toggle_two(move || toggles.borrow_mut().push("toggle two".into()));
    let mut slider = MultiSlider::new(SliderConfig::range(2.0, 8.0), callbacks).expect("valid config");

    slider.start(GestureTarget::Two);
    slider.end(GestureTarget::Two, GestureDelta::ZERO);
    assert_eq!(*log.borrow(), vec!["start", "toggle two"]);

    // Marker One has no toggle callback, so its tap finishes normally.
    log.borrow_mut().clear();
    slider.start(GestureTarget::One);
    slider.end(GestureTarget::One, GestureDelta::ZERO);
    assert_eq!(*log.borrow(), vec!["start", "finish [2.0, 8.0]"]);
}

#[test]
fn panicking_callback_does_not_stick_the_marker() {
    let finished = Rc::new(RefCell::new(Vec::new()));
    let sink = finished.clone();
    let callbacks = SliderCallbacks::new()
        .on_values_change(|_| panic!("host bug"))
        .on_values_change_finish(move |v| sink.borrow_mut().push(v.to_vec()));
    let mut slider = MultiSlider::new(
        SliderConfig {
            values: vec![5.0],
            ..SliderConfig::default()
        },
        callbacks,
    )
    .expect("valid config");

    slider.start(GestureTarget::One);
    let moved = slider.move_by(GestureTarget::One, GestureDelta::horizontal(28.0));
    assert_eq!(moved.report.panicked, 1);
    assert_eq!(moved.report.delivered, 1);

    let ended = slider.end(GestureTarget::One, GestureDelta::horizontal(28.0));
    assert!(ended.report.is_clean());
    assert!(!slider.is_pressed());
    assert_eq!(*finished.borrow(), vec![vec![6.0]]);
}

#[test]
fn external_update_reports_positions_only() {
    let log = Log::default();
    let mut slider = MultiSlider::new(SliderConfig::range(2.0, 8.0), recording_callbacks(&log))
        .expect("valid config");

    slider
        .update_config(SliderConfig::range(3.0, 6.0))
        .expect("valid config");
    assert_eq!(*log.borrow(), vec!["position [84.0, 168.0]"]);
    assert_eq!(slider.values(), vec![3.0, 6.0]);
}

#[test]
fn invalid_update_is_rejected() {
    let mut slider =
        MultiSlider::new(SliderConfig::range(2.0, 8.0), SliderCallbacks::new()).expect("valid config");
    let err = slider
        .update_config(SliderConfig {
            max: -1.0,
            ..SliderConfig::range(2.0, 8.0)
        })
        .unwrap_err();
    assert!(matches!(err, SliderConfigError::InvalidRange { .. }));
    assert_eq!(slider.values(), vec![2.0, 8.0]);
}

#[test]
fn render_passes_labels_to_renderer() {
    #[derive(Default)]
    struct Labels(Vec<String>);

    impl MarkerRenderer for Labels {
        fn render_track(&mut self, _track: &TrackLayout) {}
        fn render_marker(&mut self, marker: &MarkerRenderState) {
            self.0.push(marker.label.clone());
        }
    }

    let slider = MultiSlider::new(
        SliderConfig {
            value_suffix: " km".into(),
            ..SliderConfig::range(2.0, 8.0)
        },
        SliderCallbacks::new(),
    )
    .expect("valid config");
    let mut labels = Labels::default();
    slider.render(&mut labels);
    assert_eq!(labels.0, vec!["2 km", "8 km"]);
}

#[test]
fn swapped_callbacks_hear_pending_reseparation() {
    let mut slider = MultiSlider::new(SliderConfig::range(4.0, 5.0), SliderCallbacks::new())
        .expect("valid config");

    // A wider gap adopted mid-press leaves the idle pair too close together.
    slider.start(GestureTarget::One);
    slider
        .update_config(SliderConfig {
            min_overlap_distance: 56.0,
            ..SliderConfig::range(4.0, 5.0)
        })
        .expect("valid config");
    slider.end(GestureTarget::One, GestureDelta::ZERO);
    assert_eq!(slider.positions(), vec![112.0, 140.0]);

    let log = Log::default();
    let outcome = slider
        .set_callbacks(recording_callbacks(&log))
        .expect("valid config");

    assert_eq!(outcome.transition.effect, SliderEffect::Resynced);
    assert!(outcome.report.is_clean());
    assert_eq!(slider.values(), vec![4.0, 6.0]);
    assert_eq!(*log.borrow(), vec!["position [112.0, 168.0]"]);
}
