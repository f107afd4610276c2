use uploader_core::{
    update, Effect, FileCandidate, Msg, PreviewRegistry, SubmissionState, WidgetState,
    NOT_AN_IMAGE_NOTICE, PICKER_ACCEPT,
};

fn init_logging() {
    uploader_logging::initialize_for_tests();
}

fn png(name: &str) -> FileCandidate {
    FileCandidate::new(name, "image/png", vec![7u8; 2048])
}

fn pdf(name: &str) -> FileCandidate {
    FileCandidate::new(name, "application/pdf", &b"%PDF-1.7"[..])
}

fn choose(state: WidgetState, candidate: FileCandidate) -> (WidgetState, Vec<Effect>) {
    update(state, Msg::FileChosen(Some(candidate)))
}

fn submit_and_settle(state: WidgetState, outcome: Result<String, String>) -> WidgetState {
    let (state, effects) = update(state, Msg::SubmitClicked);
    let request_id = match effects.as_slice() {
        [Effect::SubmitPrediction { request_id, .. }] => *request_id,
        other => panic!("expected one submit effect, got {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::PredictionFinished {
            request_id,
            outcome,
        },
    );
    state
}

#[test]
fn choosing_an_image_selects_it_and_derives_preview() {
    init_logging();
    let (mut state, effects) = choose(WidgetState::new(), png("cat.png"));
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.file.as_ref().unwrap().name, "cat.png");
    assert_eq!(view.file.as_ref().unwrap().details, "2.0 KB • image/png");
    assert!(view.preview_locator.is_some());
    assert!(view.predict_enabled);
    assert_eq!(view.predict_caption, "Predict");
    assert_eq!(state.preview_registry().live_count(), 1);
    assert!(state.consume_dirty());
}

#[test]
fn rejected_pdf_leaves_selection_unset_and_alerts() {
    init_logging();
    let (mut state, effects) = choose(WidgetState::new(), pdf("doc.pdf"));

    assert!(state.selected_file().is_none());
    assert_eq!(
        effects,
        vec![Effect::Alert {
            message: NOT_AN_IMAGE_NOTICE.to_string()
        }]
    );
    assert!(!state.consume_dirty());
}

#[test]
fn rejected_file_keeps_previous_selection_and_result() {
    init_logging();
    let (state, _) = choose(WidgetState::new(), png("cat.png"));
    let state = submit_and_settle(state, Ok("cat".to_string()));
    let before = state.selected_file().unwrap().id();

    let (state, _) = choose(state, pdf("doc.pdf"));

    assert_eq!(state.selected_file().unwrap().id(), before);
    assert_eq!(state.submission(), &SubmissionState::Succeeded("cat".to_string()));
    assert_eq!(state.preview_registry().live_count(), 1);
}

#[test]
fn cancelled_picker_is_silent_noop() {
    init_logging();
    let (mut state, effects) = update(WidgetState::new(), Msg::FileChosen(None));

    assert!(effects.is_empty());
    assert!(state.selected_file().is_none());
    assert!(!state.consume_dirty());
}

#[test]
fn new_selection_resets_succeeded_and_failed_results() {
    init_logging();
    for outcome in [Ok("cat".to_string()), Err("model unavailable".to_string())] {
        let (state, _) = choose(WidgetState::new(), png("cat.png"));
        let state = submit_and_settle(state, outcome);
        assert_ne!(state.submission(), &SubmissionState::Idle);

        let (state, _) = choose(state, png("dog.png"));
        assert_eq!(state.submission(), &SubmissionState::Idle);
        assert_eq!(state.view().result(), None);
        assert_eq!(state.view().error(), None);
    }
}

#[test]
fn drop_zone_click_opens_picker() {
    init_logging();
    let (_state, effects) = update(WidgetState::new(), Msg::DropZoneClicked);
    assert_eq!(
        effects,
        vec![Effect::OpenFilePicker {
            accept: PICKER_ACCEPT
        }]
    );
}

#[test]
fn drag_enter_highlights_and_suppresses_default() {
    init_logging();
    let (mut state, effects) = update(WidgetState::new(), Msg::DragEnter);

    assert!(state.is_dragging());
    assert!(state.view().dragging);
    assert_eq!(effects, vec![Effect::SuppressDefault]);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::DragLeave);
    assert!(!state.is_dragging());
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn drag_leave_without_enter_changes_nothing() {
    init_logging();
    let (mut state, effects) = update(WidgetState::new(), Msg::DragLeave);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn drop_uses_only_the_first_file() {
    init_logging();
    let (state, _) = update(WidgetState::new(), Msg::DragEnter);
    let (state, effects) = update(
        state,
        Msg::Dropped(vec![png("first.png"), png("second.png"), pdf("third.pdf")]),
    );

    assert!(!state.is_dragging());
    assert_eq!(effects, vec![Effect::SuppressDefault]);
    assert_eq!(state.selected_file().unwrap().name(), "first.png");
    assert_eq!(state.preview_registry().live_count(), 1);
}

#[test]
fn drop_and_picker_validate_identically() {
    init_logging();
    let (picked, picked_effects) = choose(WidgetState::new(), pdf("doc.pdf"));
    let (dropped, mut dropped_effects) =
        update(WidgetState::new(), Msg::Dropped(vec![pdf("doc.pdf")]));

    assert_eq!(dropped_effects.remove(0), Effect::SuppressDefault);
    assert_eq!(picked_effects, dropped_effects);
    assert!(picked.selected_file().is_none());
    assert!(dropped.selected_file().is_none());
}

#[test]
fn empty_drop_clears_highlight_only() {
    init_logging();
    let (state, _) = update(WidgetState::new(), Msg::DragEnter);
    let (state, effects) = update(state, Msg::Dropped(Vec::new()));

    assert!(!state.is_dragging());
    assert!(state.selected_file().is_none());
    assert_eq!(effects, vec![Effect::SuppressDefault]);
}

#[test]
fn second_selection_replaces_preview() {
    init_logging();
    let (state, _) = choose(WidgetState::new(), png("a.png"));
    let first_locator = state.view().preview_locator.unwrap();

    let (state, _) = choose(state, png("b.png"));
    let view = state.view();
    let registry = state.preview_registry();

    assert_eq!(view.file.unwrap().name, "b.png");
    assert_eq!(registry.live_count(), 1);
    assert!(registry.resolve(&first_locator).is_none());
    assert!(registry.resolve(view.preview_locator.as_deref().unwrap()).is_some());
}

#[test]
fn clear_releases_preview_and_resets_picker() {
    init_logging();
    let (state, _) = choose(WidgetState::new(), png("a.png"));
    let state = submit_and_settle(state, Err("HTTP 502".to_string()));

    let (state, effects) = update(state, Msg::ClearClicked);
    let view = state.view();

    assert_eq!(effects, vec![Effect::ResetPicker]);
    assert!(state.selected_file().is_none());
    assert_eq!(state.preview_registry().live_count(), 0);
    assert_eq!(view.preview_locator, None);
    assert_eq!(view.submission, SubmissionState::Idle);
    assert!(!view.predict_enabled);
}

#[test]
fn preview_count_never_exceeds_one() {
    init_logging();
    let registry = PreviewRegistry::new();
    let mut state = WidgetState::with_registry(registry.clone());
    for name in ["a.png", "b.png", "c.png", "d.png"] {
        let (next, _) = choose(state, png(name));
        assert_eq!(registry.live_count(), 1);
        state = next;
    }
    let (_state, _) = update(state, Msg::ClearClicked);
    assert_eq!(registry.live_count(), 0);
}
