// Auto-growing text editor wired to row height recomputation.

use std::cell::RefCell;
use std::rc::Rc;

use gridedit_config::GridSettings;
use gridedit_edit::surface::Dimension;
use gridedit_edit::{ColumnDefinition, EditOrigin, EditorKind, FixedLayout, Worksheet};
use gridedit_engine::cell::CellValue;
use gridedit_engine::cell_ref::CellRef;
use gridedit_engine::sheet::Sheet;
use serde_json::json;

fn a1() -> CellRef {
    CellRef::new(0, 0)
}

/// Row 0 is 42px tall, so the editor's minimum height is 40.
/// Each text line measures 20px plus 4px of padding.
fn setup(auto_wrap_rows: bool) -> (Worksheet, Rc<RefCell<FixedLayout>>) {
    let mut layout = FixedLayout::default().with_metrics(10.0, 20.0, 4.0);
    layout.row_heights.insert(0, 42.0);
    let layout = Rc::new(RefCell::new(layout));

    let settings = GridSettings { auto_wrap_rows, ..Default::default() };
    let ws = Worksheet::new(
        Sheet::from_rows(&[vec![json!("a")], vec![json!("b")]]),
        vec![ColumnDefinition::new(EditorKind::Text)],
        settings,
    )
    .with_layout(Rc::clone(&layout));
    (ws, layout)
}

#[test]
fn test_growth_triggers_one_row_adjust() {
    let (mut ws, layout) = setup(true);
    ws.open_editor(a1(), false, EditOrigin::Pointer);

    let editor = ws.text_editor().unwrap();
    assert!(editor.multiline);
    assert_eq!(editor.scroll_height, 40.0);
    assert_eq!(editor.style.min_height, Some(40.0));
    assert!(!editor.style.resizable);
    assert!(!editor.caret_at_end);
    assert!(ws.edition().unwrap().auto_resize.is_some());

    // initial check: one line still fits the minimum height
    assert_eq!(ws.pending_tasks(), 1);
    ws.run_deferred();
    assert_eq!(ws.pending_tasks(), 0);
    assert!(layout.borrow().adjust_requests().is_empty());

    ws.input_text("a\nb\nc");
    assert_eq!(ws.text_editor().unwrap().style.height, Dimension::Px(64.0));
    assert_eq!(ws.text_editor().unwrap().scroll_height, 64.0);
    ws.input_text("a\nb\nc");
    assert_eq!(layout.borrow().adjust_requests(), &[0]);

    ws.close_editor(a1(), true);
    assert_eq!(ws.value(a1()), &CellValue::Text("a\nb\nc".into()));
}

#[test]
fn test_initial_check_grows_tall_content() {
    let (mut ws, layout) = setup(true);
    ws.update_cell(CellRef::new(0, 1), CellValue::Text("1\n2\n3\n4".into()));
    ws.open_editor(CellRef::new(0, 1), false, EditOrigin::Pointer);
    ws.run_deferred();
    assert_eq!(layout.borrow().adjust_requests(), &[1]);
    assert_eq!(ws.edition().unwrap().auto_resize.as_ref().unwrap().last_height(), 84.0);
}

#[test]
fn test_closed_session_drops_deferred_check() {
    let (mut ws, layout) = setup(true);
    ws.update_cell(a1(), CellValue::Text("1\n2\n3\n4".into()));
    ws.open_editor(a1(), false, EditOrigin::Pointer);
    ws.close_editor(a1(), false);
    assert_eq!(ws.pending_tasks(), 0);
    ws.run_deferred();
    assert!(layout.borrow().adjust_requests().is_empty());
}

#[test]
fn test_without_auto_wrap_rows_no_controller() {
    let (mut ws, layout) = setup(false);
    ws.open_editor(a1(), false, EditOrigin::Pointer);

    assert!(ws.edition().unwrap().auto_resize.is_none());
    assert!(ws.text_editor().unwrap().caret_at_end);
    assert_eq!(ws.pending_tasks(), 0);
    ws.input_text("a\nb\nc\nd");
    assert!(layout.borrow().adjust_requests().is_empty());
}
