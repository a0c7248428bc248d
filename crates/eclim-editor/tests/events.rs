mod support;

use eclim_editor::{
    Buffer, DeferredTask, DocumentId, ERROR_REGIONS_KEY, EditorEvent, EventOutcome,
    LINE_MESSAGES_STATUS_KEY, REVALIDATE_DELAY, TextRange,
};
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use support::{Project, RecordingUi, scripted_tools};

const DOC: DocumentId = DocumentId(1);

#[test]
fn test_non_java_documents_are_ignored() {
    let (mut tools, script) = scripted_tools();
    let mut ui = RecordingUi::default();
    let mut notes = Buffer::new(DOC, "shopping list").with_path("/tmp/notes.txt");

    for event in [
        EditorEvent::Loaded,
        EditorEvent::PostSave,
        EditorEvent::SelectionModified,
        EditorEvent::QueryCompletions { locations: vec![0] },
    ] {
        assert_eq!(
            tools.dispatch(event, &mut notes, &mut ui),
            EventOutcome::Ignored
        );
    }
    assert!(script.borrow().calls.is_empty());
    assert!(tools.tasks().is_empty());
}

#[test]
fn test_load_validates() {
    let project = Project::new();
    let mut buf = project.open_cart();
    let (mut tools, script) = scripted_tools();
    script
        .borrow_mut()
        .reply("java_src_update", "Cart.java|4 col 5|Item cannot be resolved|e\n");
    let mut ui = RecordingUi::default();

    assert_eq!(
        tools.dispatch(EditorEvent::Loaded, &mut buf, &mut ui),
        EventOutcome::Validated
    );
    assert_eq!(ui.regions(DOC, ERROR_REGIONS_KEY), vec![4]);
    assert!(tools.tasks().is_empty());
}

#[test]
fn test_post_save_schedules_revalidation() {
    let project = Project::new();
    let buf = project.open_cart();
    let (mut tools, script) = scripted_tools();
    script
        .borrow_mut()
        .reply("java_src_update", "Cart.java|4 col 5|Item cannot be resolved|e\n");
    let mut ui = RecordingUi::default();
    let mut docs = [buf];

    let before = Instant::now();
    assert_eq!(
        tools.dispatch(EditorEvent::PostSave, &mut docs[0], &mut ui),
        EventOutcome::Validated
    );
    let tasks: Vec<_> = tools.tasks().iter().map(|(_, t)| t.clone()).collect();
    assert_eq!(tasks, vec![DeferredTask::Revalidate { document: DOC }]);
    assert!(tools.tasks().next_due().unwrap() >= before + REVALIDATE_DELAY);

    // Eclipse finished building in the meantime: the second report is clean.
    script.borrow_mut().reply("java_src_update", "");
    let later = Instant::now() + REVALIDATE_DELAY + Duration::from_millis(100);
    assert_eq!(tools.run_due(later, &mut docs, &mut ui), 1);

    assert_eq!(script.borrow().command_names().len(), 2);
    assert!(tools.diagnostics().lines(DOC).is_empty());
    assert!(ui.regions(DOC, ERROR_REGIONS_KEY).is_empty());
}

#[test]
fn test_revalidation_of_closed_document_is_dropped() {
    let project = Project::new();
    let mut buf = project.open_cart();
    let (mut tools, script) = scripted_tools();
    let mut ui = RecordingUi::default();

    tools.dispatch(EditorEvent::PostSave, &mut buf, &mut ui);
    drop(buf);

    let later = Instant::now() + REVALIDATE_DELAY + Duration::from_millis(100);
    let mut open: [Buffer; 0] = [];
    assert_eq!(tools.run_due(later, &mut open, &mut ui), 0);
    assert!(tools.tasks().is_empty());
    assert_eq!(script.borrow().command_names().len(), 1);
}

#[test]
fn test_selection_change_shows_line_messages() {
    let project = Project::new();
    let mut buf = project.open_cart();
    let (mut tools, script) = scripted_tools();
    script
        .borrow_mut()
        .reply("java_src_update", "Cart.java|4 col 5|Item cannot be resolved|e\n");
    let mut ui = RecordingUi::default();
    tools.dispatch(EditorEvent::Loaded, &mut buf, &mut ui);

    buf.set_selection(TextRange::new(2, buf.offset_of(3, 8)));
    assert_eq!(
        tools.dispatch(EditorEvent::SelectionModified, &mut buf, &mut ui),
        EventOutcome::LineMessages
    );
    assert_eq!(
        ui.status(DOC, LINE_MESSAGES_STATUS_KEY),
        Some("Item cannot be resolved")
    );
}

#[test]
fn test_query_completions_event() {
    let project = Project::new();
    let mut buf = project.open_cart();
    let (mut tools, script) = scripted_tools();
    script
        .borrow_mut()
        .reply("java_complete", "f|items|items : List|\n");
    let mut ui = RecordingUi::default();

    let outcome = tools.dispatch(
        EditorEvent::QueryCompletions {
            locations: vec![41, 12],
        },
        &mut buf,
        &mut ui,
    );
    let completions = match outcome {
        EventOutcome::Completions(completions) => completions,
        other => panic!("expected completions, got {:?}", other),
    };
    assert_eq!(
        completions.pairs(),
        vec![("items".to_string(), "items".to_string())]
    );
}
