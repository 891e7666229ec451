use super::*;
use crate::state::store::cell;
use crate::util::test_support::FakePlatform;

#[test]
fn variant_from_name_falls_back_to_info() {
    assert_eq!(ToastVariant::from_name("success"), ToastVariant::Success);
    assert_eq!(ToastVariant::from_name("ERROR"), ToastVariant::Error);
    assert_eq!(ToastVariant::from_name("danger"), ToastVariant::Error);
    assert_eq!(ToastVariant::from_name("warning"), ToastVariant::Warning);
    assert_eq!(ToastVariant::from_name("sparkles"), ToastVariant::Info);
}

#[test]
fn push_applies_variant_preset() {
    let mut state = ToastState::default();
    let id = state.push(ToastRequest::error("Could not load"));
    let toast = state.get(id).cloned();
    let toast = toast.as_ref();
    assert_eq!(toast.map(|t| t.icon.as_str()), Some("[!]"));
    assert_eq!(toast.and_then(|t| t.title.as_deref()), Some("Error"));
    assert_eq!(toast.map(|t| t.phase), Some(ToastPhase::Visible));
}

#[test]
fn explicit_title_overrides_preset_and_empty_title_hides_it() {
    let mut state = ToastState::default();
    let custom = state.push(ToastRequest::success("Started").with_title("Pipeline running"));
    let hidden = state.push(ToastRequest::success("Saved").with_title(""));
    assert_eq!(state.get(custom).and_then(|t| t.title.clone()), Some("Pipeline running".to_owned()));
    assert_eq!(state.get(hidden).and_then(|t| t.title.clone()), None);
}

#[test]
fn ids_are_unique_and_increasing() {
    let mut state = ToastState::default();
    let a = state.push(ToastRequest::new("a", ToastVariant::Info));
    let b = state.push(ToastRequest::new("b", ToastVariant::Info));
    assert!(b > a);
    assert_eq!(state.len(), 2);
}

#[test]
fn phases_advance_in_order() {
    let mut state = ToastState::default();
    let id = state.push(ToastRequest::warning("Heads up"));
    assert!(!state.remove(id), "visible toasts cannot skip the fade");
    assert!(state.begin_fade(id));
    assert_eq!(state.phase(id), ToastPhase::FadingOut);
    assert!(!state.begin_fade(id));
    assert!(state.remove(id));
    assert_eq!(state.phase(id), ToastPhase::Removed);
    assert!(state.is_empty());
}

#[test]
fn class_marks_visible_phase() {
    let mut state = ToastState::default();
    let id = state.push(ToastRequest::new("x", ToastVariant::Info));
    assert_eq!(state.get(id).map(Toast::class), Some("toast toast--info visible".to_owned()));
    state.begin_fade(id);
    assert_eq!(state.get(id).map(Toast::class), Some("toast toast--info".to_owned()));
}

#[test]
fn notify_schedules_fade_then_removal() {
    let platform = FakePlatform::new();
    let store = cell(ToastState::default());
    let id = notify(&platform, &store, ToastRequest::success("Done"));

    assert_eq!(store.borrow().phase(id), ToastPhase::Visible);
    assert_eq!(
        platform.scheduled_delays(),
        vec![DISPLAY_DURATION, DISPLAY_DURATION + FADE_DURATION]
    );

    assert_eq!(platform.run_scheduled(), 2);
    assert_eq!(store.borrow().phase(id), ToastPhase::Removed);
    assert!(store.borrow().is_empty());
}

#[test]
fn notify_leaves_other_toasts_alone() {
    let platform = FakePlatform::new();
    let store = cell(ToastState::default());
    let first = notify(&platform, &store, ToastRequest::success("one"));
    platform.run_scheduled();
    let second = notify(&platform, &store, ToastRequest::error("two"));
    assert_eq!(store.borrow().phase(first), ToastPhase::Removed);
    assert_eq!(store.borrow().phase(second), ToastPhase::Visible);
}
