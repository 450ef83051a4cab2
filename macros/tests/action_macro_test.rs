//! Tests for #[derive(Action)] macro

use statekit_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    #[command]
    AddEntry { text: String },

    #[command]
    Clear,

    #[command]
    Drop(usize),

    #[event]
    EntryAdded { id: u64, text: String },

    #[event]
    Cleared,

    Rejected { reason: String },
}

#[test]
fn test_is_command() {
    let action = ListAction::AddEntry {
        text: "Test".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());
}

#[test]
fn test_is_event() {
    let action = ListAction::EntryAdded {
        id: 1,
        text: "Test".to_string(),
    };
    assert!(!action.is_command());
    assert!(action.is_event());
}

#[test]
fn test_event_type() {
    let action = ListAction::EntryAdded {
        id: 1,
        text: "Test".to_string(),
    };
    assert_eq!(action.event_type(), "EntryAdded.v1");
    assert_eq!(ListAction::Cleared.event_type(), "Cleared.v1");
}

#[test]
fn test_command_event_type() {
    // Commands don't have event types
    assert_eq!(ListAction::Clear.event_type(), "unknown");
}

#[test]
fn test_unit_and_tuple_commands() {
    assert!(ListAction::Clear.is_command());
    assert!(ListAction::Drop(3).is_command());
    assert!(!ListAction::Drop(3).is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    let action = ListAction::Rejected {
        reason: "nope".to_string(),
    };
    assert!(!action.is_command());
    assert!(!action.is_event());
    assert_eq!(action.event_type(), "unknown");
}

#[test]
fn test_name_covers_every_variant() {
    let cases = vec![
        (ListAction::AddEntry { text: String::new() }, "AddEntry"),
        (ListAction::Clear, "Clear"),
        (ListAction::Drop(0), "Drop"),
        (ListAction::EntryAdded { id: 2, text: String::new() }, "EntryAdded"),
        (ListAction::Cleared, "Cleared"),
        (ListAction::Rejected { reason: String::new() }, "Rejected"),
    ];

    for (action, expected) in cases {
        assert_eq!(action.name(), expected, "wrong name for {action:?}");
    }
}
