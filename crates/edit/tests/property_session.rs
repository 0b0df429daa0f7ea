// Property-based tests for edit session event pairing.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;

use gridedit_config::GridSettings;
use gridedit_edit::{ColumnDefinition, EditOrigin, EditorKind, Worksheet};
use gridedit_engine::cell_ref::CellRef;
use gridedit_engine::events::{EventCollector, GridEvent};
use gridedit_engine::sheet::Sheet;
use serde_json::json;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Open { x: usize, y: usize, empty: bool },
    Input(String),
    Close { x: usize, y: usize, save: bool },
    CloseCurrent { save: bool },
    Undo,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..4usize, 0..3usize, any::<bool>()).prop_map(|(x, y, empty)| Op::Open { x, y, empty }),
        2 => r"[a-z0-9=]{0,6}".prop_map(Op::Input),
        1 => (0..4usize, 0..3usize, any::<bool>()).prop_map(|(x, y, save)| Op::Close { x, y, save }),
        2 => any::<bool>().prop_map(|save| Op::CloseCurrent { save }),
        1 => Just(Op::Undo),
    ]
}

/// Text, numeric, checkbox and a read-only column.
fn worksheet() -> Worksheet {
    let rows = vec![vec![json!("a"), json!(1), json!(true), json!("ro")]; 3];
    let columns = vec![
        ColumnDefinition::new(EditorKind::Text),
        ColumnDefinition::new(EditorKind::Numeric),
        ColumnDefinition::new(EditorKind::Checkbox),
        ColumnDefinition::new(EditorKind::Text).with_config(|c| c.read_only = true),
    ];
    Worksheet::new(Sheet::from_rows(&rows), columns, GridSettings::default())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn starts_and_ends_alternate(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut ws = worksheet();
        let events = ws.events_mut().collect_into(EventCollector::shared());

        for op in ops {
            match op {
                Op::Open { x, y, empty } => ws.open_editor(CellRef::new(x, y), empty, EditOrigin::Pointer),
                Op::Input(text) => ws.input_text(&text),
                Op::Close { x, y, save } => ws.close_editor(CellRef::new(x, y), save),
                Op::CloseCurrent { save } => ws.close_current(save),
                Op::Undo => {
                    ws.undo();
                }
            }
        }
        ws.close_current(true);
        prop_assert!(!ws.is_editing());

        let events = events.borrow();
        let mut open: Option<CellRef> = None;
        for event in events.events() {
            match event {
                GridEvent::EditionStart { x, y } => {
                    prop_assert!(open.is_none(), "start while {:?} is open", open);
                    prop_assert!(*x != 3, "read-only column opened");
                    open = Some(CellRef::new(*x, *y));
                }
                GridEvent::CreateEditor { x, y } => {
                    prop_assert_eq!(open, Some(CellRef::new(*x, *y)));
                }
                GridEvent::EditionEnd { x, y, .. } => {
                    prop_assert_eq!(open, Some(CellRef::new(*x, *y)));
                    open = None;
                }
                GridEvent::AfterChanges { records } => {
                    prop_assert!(!records.is_empty());
                }
            }
        }
        prop_assert!(open.is_none());
        prop_assert_eq!(events.count("oneditionstart"), events.count("oneditionend"));
    }

    #[test]
    fn discard_never_changes_data(text in r"[a-z0-9=., ]{0,10}", x in 0..2usize, y in 0..3usize) {
        let mut ws = worksheet();
        let cell = CellRef::new(x, y);
        let before = ws.value(cell).clone();
        let html = ws.view(cell).map(|v| v.html.clone());

        ws.open_editor(cell, false, EditOrigin::Pointer);
        ws.input_text(&text);
        ws.close_editor(cell, false);

        prop_assert_eq!(ws.value(cell), &before);
        prop_assert_eq!(ws.view(cell).map(|v| v.html.clone()), html);
    }
}
