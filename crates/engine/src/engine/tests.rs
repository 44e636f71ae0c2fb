use std::cell::RefCell;
use std::rc::Rc;

use waypoint_core::{GraphBuilder, GraphError, Step};

use super::*;
use crate::availability::Control;

fn linear_engine(names: &[&str], complete: bool) -> (NavigationEngine<()>, Vec<StepId>) {
    let (builder, path, steps) = GraphBuilder::<()>::linear(names.iter().copied());
    let graph = builder.build(path).unwrap();
    let mut engine = NavigationEngine::new(graph, ()).unwrap();
    for step in &steps {
        engine.set_step_complete(*step, complete).unwrap();
    }
    (engine, steps)
}

struct Choice {
    left: bool,
}

/// `head=[h]` branches to `left=[l]` or `right=[r]`; `left` continues to `right`.
fn branching_engine(left: bool) -> (NavigationEngine<Choice>, [StepId; 3]) {
    let mut b = GraphBuilder::<Choice>::new();
    let head = b.branching_path_labeled("head");
    let lp = b.linear_path_labeled("left");
    let rp = b.linear_path_labeled("right");
    let h = b.step_with(Step::new("h").with_complete(true));
    let l = b.step_with(Step::new("l").with_complete(true));
    let r = b.step_with(Step::new("r").with_complete(true));
    b.add_step(head, h).unwrap();
    b.add_step(lp, l).unwrap();
    b.add_step(rp, r).unwrap();
    b.add_branch(head, lp, |c: &Choice| c.left).unwrap();
    b.add_branch(head, rp, |c: &Choice| !c.left).unwrap();
    b.set_next_path(lp, rp).unwrap();
    let graph = b.build(head).unwrap();
    (NavigationEngine::new(graph, Choice { left }).unwrap(), [h, l, r])
}

#[test]
fn construction_starts_on_the_first_step() {
    let (engine, steps) = linear_engine(&["a", "b"], false);
    assert_eq!(engine.active_step(), steps[0]);
    assert_eq!(engine.history(), &[steps[0]]);
    assert!(!engine.is_retreat_available());
    assert!(!engine.is_advance_available());
    assert!(engine.is_cancel_available());
    assert!(engine.is_jump_visible());
}

#[test]
fn construction_fails_on_an_invalid_graph() {
    let mut b = GraphBuilder::<()>::new();
    let first = b.linear_path_labeled("first");
    let empty = b.linear_path_labeled("empty");
    let step = b.step("only");
    b.add_step(first, step).unwrap();
    b.set_next_path(first, empty).unwrap();
    let graph = b.build(first).unwrap();

    let err = NavigationEngine::new(graph, ()).err().unwrap();
    assert_eq!(
        err,
        NavigationError::Graph(GraphError::EmptyPath {
            path: "empty".into()
        })
    );
}

#[test]
fn advancing_past_the_final_step_is_illegal() {
    let (mut engine, steps) = linear_engine(&["only"], true);
    assert!(engine.is_terminal_step(steps[0]));
    let err = engine.advance().unwrap_err();
    assert!(matches!(err, NavigationError::IllegalNavigation { .. }));
    assert_eq!(engine.active_step(), steps[0]);
    assert_eq!(engine.history(), &[steps[0]]);
}

#[test]
fn advance_follows_the_selected_branch() {
    let (mut engine, [h, l, r]) = branching_engine(true);
    assert_eq!(engine.advance().unwrap(), l);
    assert_eq!(engine.advance().unwrap(), r);
    assert_eq!(engine.history(), &[h, h, l]);

    let (mut engine, [_, _, r]) = branching_engine(false);
    assert_eq!(engine.advance().unwrap(), r);
}

#[test]
fn unmatched_branches_leave_state_untouched() {
    let mut b = GraphBuilder::<()>::new();
    let head = b.branching_path_labeled("head");
    let tail = b.linear_path_labeled("tail");
    let h = b.step_with(Step::new("h").with_complete(true));
    let t = b.step("t");
    b.add_step(head, h).unwrap();
    b.add_step(tail, t).unwrap();
    b.add_branch(head, tail, |_: &()| false).unwrap();
    let graph = b.build(head).unwrap();
    let mut engine = NavigationEngine::new(graph, ()).unwrap();

    let err = engine.advance().unwrap_err();
    assert_eq!(
        err,
        NavigationError::Graph(GraphError::NoBranchSelected {
            path: "head".into()
        })
    );
    assert_eq!(engine.active_step(), h);
    assert_eq!(engine.history(), &[h]);
}

#[test]
fn model_changes_steer_the_next_resolution() {
    let (mut engine, [_, l, r]) = branching_engine(false);
    engine.model_mut().left = true;
    assert_eq!(engine.advance().unwrap(), l);
    engine.retreat().unwrap();
    engine.model_mut().left = false;
    assert_eq!(engine.advance().unwrap(), r);
}

#[test]
fn jump_requires_every_step_complete() {
    let (mut engine, steps) = linear_engine(&["a", "b", "c"], false);
    engine.set_step_complete(steps[0], true).unwrap();
    engine.set_step_complete(steps[1], true).unwrap();
    assert!(!engine.is_jump_available());
    engine.set_step_complete(steps[2], true).unwrap();
    assert!(engine.all_steps_complete());
    assert!(engine.is_jump_available());

    assert_eq!(engine.jump_to_last(), steps[2]);
    assert!(!engine.is_jump_available());
    assert_eq!(engine.retreat().unwrap(), steps[0]);
}

#[test]
fn unknown_steps_are_rejected() {
    let (mut engine, _) = linear_engine(&["a"], false);
    let (_, _, foreign) = GraphBuilder::<()>::linear(["x", "y", "z"]);
    let stray = foreign[2];
    assert_eq!(
        engine.set_step_complete(stray, true),
        Err(NavigationError::UnknownStep(stray))
    );
    assert_eq!(
        engine.is_step_busy(stray),
        Err(NavigationError::UnknownStep(stray))
    );
}

#[test]
fn completion_changes_notify_observers_in_order() {
    let (mut engine, steps) = linear_engine(&["a", "b"], false);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe_fn(move |event, view| {
        sink.borrow_mut().push((*event, view.is_advance_available()));
    });

    engine.set_step_complete(steps[0], true).unwrap();
    engine.set_step_complete(steps[0], true).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            (
                NavigationEvent::StepCompletionChanged {
                    step: steps[0],
                    complete: true
                },
                true
            ),
            (
                NavigationEvent::AvailabilityChanged {
                    control: Control::Advance,
                    old: false,
                    new: true
                },
                true
            ),
        ]
    );
}

#[test]
fn unsubscribed_observers_stop_receiving_events() {
    let (mut engine, steps) = linear_engine(&["a", "b"], true);
    let count = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&count);
    let id = engine.subscribe_fn(move |_, _| *counter.borrow_mut() += 1);

    engine.advance().unwrap();
    let after_advance = *count.borrow();
    assert!(after_advance > 0);

    assert!(engine.unsubscribe(id));
    assert!(!engine.unsubscribe(id));
    assert_eq!(engine.observer_count(), 0);
    engine.retreat().unwrap();
    engine.set_step_busy(steps[0], true).unwrap();
    assert_eq!(*count.borrow(), after_advance);
}

#[test]
fn busy_and_visibility_changes_are_reported() {
    let (mut engine, steps) = linear_engine(&["a"], false);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe_fn(move |event, _| sink.borrow_mut().push(*event));

    engine.set_step_busy(steps[0], true).unwrap();
    engine.set_jump_visible(false);
    engine.set_jump_visible(false);

    assert!(engine.is_step_busy(steps[0]).unwrap());
    assert!(!engine.is_jump_visible());
    assert_eq!(
        *seen.borrow(),
        vec![
            NavigationEvent::StepBusyChanged {
                step: steps[0],
                busy: true
            },
            NavigationEvent::JumpVisibilityChanged {
                old: true,
                new: false
            },
        ]
    );
}

#[test]
fn view_mirrors_engine_state() {
    let (mut engine, steps) = linear_engine(&["a", "b"], true);
    engine.advance().unwrap();
    let view = engine.view();
    assert_eq!(view.active_step(), steps[1]);
    assert_eq!(view.history(), &[steps[0], steps[0]]);
    assert!(view.is_terminal_step(steps[1]));
    assert!(view.is_step_complete(steps[0]));
    assert!(!view.is_step_busy(steps[0]));
    assert_eq!(view.step_name(steps[1]), Some("b"));
    assert_eq!(view.availability(), engine.availability());
}
