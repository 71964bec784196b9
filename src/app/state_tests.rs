//! Tests for app state

use super::*;
use crate::suggest::{AssistOutput, AssistTask};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::{self as std_mpsc, Sender};
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn app() -> (App, UnboundedReceiver<AssistRequest>, Sender<AssistResponse>) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, response_rx) = std_mpsc::channel();
    let mut app = App::new(&Config::default());
    app.set_channels(request_tx, response_rx);
    (app, request_rx, response_tx)
}

fn items(values: &[&str]) -> AssistOutput {
    AssistOutput::Items(values.iter().map(|v| v.to_string()).collect())
}

fn type_body(app: &mut App, text: &str) {
    for c in text.chars() {
        app.body.input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        app.on_body_changed();
    }
}

#[test]
fn test_focus_cycles_forward_and_back() {
    let mut focus = Focus::Title;
    for _ in 0..8 {
        focus = focus.next();
    }
    assert_eq!(focus, Focus::Title);
    assert_eq!(Focus::Title.prev(), Focus::Submit);
    assert_eq!(Focus::Content.next(), Focus::AddParagraph);
}

#[test]
fn test_new_app_is_empty() {
    let app = App::new(&Config::default());
    assert_eq!(app.title_text(), "");
    assert_eq!(app.controller.buffer(), "");
    assert_eq!(app.controller.threshold(), 100);
    assert!(!app.should_quit());
}

#[test]
fn test_typing_past_threshold_requests_suggestions() {
    let (mut app, mut request_rx, _response_tx) = app();

    type_body(&mut app, &"a".repeat(100));
    assert!(request_rx.try_recv().is_err());

    type_body(&mut app, "b");
    let first = request_rx.try_recv().unwrap();
    assert!(matches!(
        first,
        AssistRequest::Run {
            task: AssistTask::Suggest(SuggestionKind::Titles),
            ..
        }
    ));
}

#[test]
fn test_poll_responses_updates_titles() {
    let (mut app, _request_rx, response_tx) = app();
    app.controller.refresh("some post");

    response_tx
        .send(AssistResponse::Completed {
            task: AssistTask::Suggest(SuggestionKind::Titles),
            request_id: 1,
            output: items(&["First", "Second"]),
        })
        .unwrap();

    assert!(app.poll_responses());
    assert_eq!(
        app.controller.suggestions(SuggestionKind::Titles).items(),
        &["First".to_string(), "Second".to_string()]
    );
    assert!(!app.poll_responses());
}

#[test]
fn test_choose_title_replaces_title_field() {
    let (mut app, _request_rx, _response_tx) = app();
    app.title.insert_str("Draft title");
    app.controller.refresh("post");
    app.apply_response(AssistResponse::Completed {
        task: AssistTask::Suggest(SuggestionKind::Titles),
        request_id: 1,
        output: items(&["Better Title"]),
    });

    app.choose_title(0);
    assert_eq!(app.title_text(), "Better Title");

    // Out of range is ignored
    app.choose_title(5);
    assert_eq!(app.title_text(), "Better Title");
}

#[test]
fn test_choose_tag_is_idempotent_and_rewrites_field() {
    let (mut app, _request_rx, _response_tx) = app();
    app.controller.refresh("post");
    app.apply_response(AssistResponse::Completed {
        task: AssistTask::Suggest(SuggestionKind::Tags),
        request_id: 2,
        output: items(&["rust", "tui"]),
    });

    app.choose_tag(0);
    app.choose_tag(1);
    app.choose_tag(0);

    assert_eq!(app.controller.tag_selection().as_slice(), &["rust", "tui"]);
    assert_eq!(app.tags_input.lines().join(""), "rust, tui");
}

#[test]
fn test_generated_paragraph_is_appended_to_body() {
    let (mut app, mut request_rx, response_tx) = app();
    type_body(&mut app, "Intro.");

    app.generate(GenerateKind::Paragraph);
    let request_id = match request_rx.try_recv().unwrap() {
        AssistRequest::Run {
            task: AssistTask::Generate(GenerateKind::Paragraph),
            text,
            request_id,
        } => {
            assert_eq!(text, "Intro.");
            request_id
        }
        other => panic!("unexpected request: {:?}", other),
    };

    response_tx
        .send(AssistResponse::Completed {
            task: AssistTask::Generate(GenerateKind::Paragraph),
            request_id,
            output: AssistOutput::Text("Hello.".to_string()),
        })
        .unwrap();
    app.poll_responses();

    assert_eq!(app.controller.buffer(), "Intro.\n\nHello.");
    assert_eq!(app.body.lines(), &["Intro.", "", "Hello."]);
    assert!(!app.controller.loading(GenerateKind::Paragraph).is_loading());
}

#[test]
fn test_generated_text_keeps_cursor_and_undo_history() {
    let (mut app, mut request_rx, _response_tx) = app();
    type_body(&mut app, "Intro.");
    app.body.move_cursor(CursorMove::Head);

    app.generate(GenerateKind::Conclusion);
    let request_id = match request_rx.try_recv().unwrap() {
        AssistRequest::Run { request_id, .. } => request_id,
        other => panic!("unexpected request: {:?}", other),
    };
    app.apply_response(AssistResponse::Completed {
        task: AssistTask::Generate(GenerateKind::Conclusion),
        request_id,
        output: AssistOutput::Text("Done.".to_string()),
    });

    assert_eq!(app.body.lines(), &["Intro.", "", "Done."]);
    assert_eq!(app.body.cursor(), (0, 0));

    // The append is one edit; undoing it leaves the typed text intact
    assert!(app.body.undo());
    assert_eq!(app.body.lines(), &["Intro."]);
    assert!(app.body.undo());
}

#[test]
fn test_failed_generation_sets_status() {
    let (mut app, mut request_rx, _response_tx) = app();
    app.generate(GenerateKind::Conclusion);
    let request_id = match request_rx.try_recv().unwrap() {
        AssistRequest::Run { request_id, .. } => request_id,
        other => panic!("unexpected request: {:?}", other),
    };

    app.apply_response(AssistResponse::Failed {
        task: AssistTask::Generate(GenerateKind::Conclusion),
        request_id,
        message: "boom".to_string(),
    });

    assert_eq!(app.status.as_deref(), Some("conclusion failed: boom"));
}

#[test]
fn test_generate_without_worker_reports_unavailable() {
    let mut app = App::new(&Config::default());
    app.generate(GenerateKind::Paragraph);
    assert_eq!(app.status.as_deref(), Some("assistant unavailable"));
}

#[test]
fn test_tags_field_sets_selection_literally() {
    let (mut app, _request_rx, _response_tx) = app();
    app.tags_input.insert_str("a, b,c, ");
    app.on_tags_changed();
    assert_eq!(app.controller.tag_selection().as_slice(), &["a", "b,c", ""]);
}

#[test]
fn test_submit_captures_draft() {
    let (mut app, _request_rx, _response_tx) = app();
    app.title.insert_str("My Post");
    type_body(&mut app, "Body");
    app.controller.select_tag("rust");

    app.submit();

    assert!(app.should_quit());
    assert_eq!(
        app.submitted,
        Some(Draft {
            title: "My Post".to_string(),
            body: "Body".to_string(),
            tags: vec!["rust".to_string()],
        })
    );
}

#[test]
fn test_choice_is_clamped_when_list_shrinks() {
    let (mut app, _request_rx, _response_tx) = app();
    app.controller.refresh("one");
    app.apply_response(AssistResponse::Completed {
        task: AssistTask::Suggest(SuggestionKind::Titles),
        request_id: 1,
        output: items(&["a", "b", "c"]),
    });
    app.title_choice = 2;

    app.controller.refresh("two");
    app.apply_response(AssistResponse::Completed {
        task: AssistTask::Suggest(SuggestionKind::Titles),
        request_id: 3,
        output: items(&["only"]),
    });
    assert_eq!(app.title_choice, 0);
}
