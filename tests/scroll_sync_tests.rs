//! Tests for scroll synchronization between the header and body panes
//!
//! Drives a `Table` with in-memory panes the way a host would: the pointer
//! enters a pane, the pane scrolls, and the table mirrors the offset.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

mod common;

use test_case::test_case;

use panetable::scroll::{MemoryPane, ScrollPane, ScrollSync};
use panetable::table::{Table, TableProps};
use panetable::types::{Pane, ScrollExtent, ScrollOptions, ScrollPosition};

use common::{flat_records, person_columns, scroll_options};

// ============================================================================
// Helpers
// ============================================================================

/// Fixed-header table, 600px of content in a 200px viewport
fn scrolling_table(x: Option<ScrollExtent>, y: Option<ScrollExtent>) -> Table {
    let props =
        TableProps::new(person_columns(), flat_records(20)).options(scroll_options(x, y));
    let mut table: Table = Table::new(props).unwrap();
    table.attach_panes(
        Some(MemoryPane::new(600.0, 200.0).with_heights(40.0, 40.0)),
        MemoryPane::new(600.0, 200.0).with_heights(2_000.0, 300.0),
    );
    table
}

fn both_axes() -> Table {
    scrolling_table(
        Some(ScrollExtent::Flag(true)),
        Some(ScrollExtent::Px(300.0)),
    )
}

fn pane(table: &Table, which: Pane) -> &MemoryPane {
    table.scroll_sync().unwrap().pane(which).unwrap()
}

/// User scrolls `which` horizontally to `left`
fn scroll_to(table: &mut Table, which: Pane, left: f64) {
    table
        .scroll_sync_mut()
        .unwrap()
        .pane_mut(which)
        .unwrap()
        .set_scroll_left(left);
    table.handle_scroll(which);
}

// ============================================================================
// Horizontal Sync
// ============================================================================

#[test]
fn test_body_scroll_moves_head_and_goes_middle() {
    let mut table = both_axes();
    table.detect_scroll_target(Pane::Body);

    scroll_to(&mut table, Pane::Body, 50.0);
    assert_eq!(pane(&table, Pane::Head).scroll_left, 50.0);
    assert_eq!(table.scroll_position(), ScrollPosition::Middle);
    assert!(table.take_needs_render());

    // The head's echo of that write is not the active target and changes nothing
    let echo = table.handle_scroll(Pane::Head);
    assert!(!echo.accepted);
    assert_eq!(echo.propagated_left, None);
    assert_eq!(table.scroll_position(), ScrollPosition::Middle);
    assert!(!table.take_needs_render());
    assert_eq!(pane(&table, Pane::Body).scroll_left, 50.0);
}

#[test]
fn test_head_scroll_moves_body() {
    let mut table = both_axes();
    table.detect_scroll_target(Pane::Head);
    scroll_to(&mut table, Pane::Head, 120.0);
    assert_eq!(pane(&table, Pane::Body).scroll_left, 120.0);
}

#[test_case(0.0, ScrollPosition::Left ; "left edge")]
#[test_case(1.0, ScrollPosition::Middle ; "just off the left edge")]
#[test_case(250.0, ScrollPosition::Middle ; "middle")]
#[test_case(399.5, ScrollPosition::Right ; "within tolerance of the right edge")]
#[test_case(400.0, ScrollPosition::Right ; "right edge")]
fn test_scroll_position_classes(left: f64, expected: ScrollPosition) {
    let mut table = both_axes();
    table.detect_scroll_target(Pane::Body);
    // Start away from the target so every case registers a change
    scroll_to(&mut table, Pane::Body, 123.0);
    scroll_to(&mut table, Pane::Body, left);

    assert_eq!(table.scroll_position(), expected);
    let view = table.render();
    assert!(view
        .class_name
        .ends_with(&format!("rc-table-scroll-position-{}", expected.as_str())));
}

#[test]
fn test_no_target_ignores_scroll() {
    let mut table = both_axes();
    scroll_to(&mut table, Pane::Body, 80.0);
    assert_eq!(pane(&table, Pane::Head).scroll_left, 0.0);
    assert_eq!(table.scroll_position(), ScrollPosition::Left);
}

#[test]
fn test_without_panes_scroll_is_a_no_op() {
    let mut table = common::table(person_columns(), flat_records(3));
    table.detect_scroll_target(Pane::Body);
    let outcome = table.handle_scroll(Pane::Body);
    assert!(!outcome.accepted);
    assert_eq!(table.scroll_position(), ScrollPosition::Left);
}

// ============================================================================
// Vertical Sync
// ============================================================================

#[test]
fn test_vertical_scroll_flows_body_to_head() {
    let props = TableProps::new(person_columns(), flat_records(20))
        .options(scroll_options(None, Some(ScrollExtent::Px(300.0))));
    let mut table: Table = Table::new(props).unwrap();
    table.attach_panes(
        Some(MemoryPane::new(600.0, 200.0).with_heights(2_000.0, 300.0)),
        MemoryPane::new(600.0, 200.0).with_heights(2_000.0, 300.0),
    );
    table.detect_scroll_target(Pane::Body);
    table
        .scroll_sync_mut()
        .unwrap()
        .pane_mut(Pane::Body)
        .unwrap()
        .set_scroll_top(90.0);
    let outcome = table.handle_scroll(Pane::Body);
    assert_eq!(outcome.propagated_top, Some(90.0));
    assert_eq!(pane(&table, Pane::Head).scroll_top, 90.0);
}

#[test]
fn test_head_pane_dropped_without_fixed_header() {
    let mut table = scrolling_table(Some(ScrollExtent::Flag(true)), None);
    assert!(!table.is_fixed_header());
    assert!(table.scroll_sync().unwrap().pane(Pane::Head).is_none());

    table.detect_scroll_target(Pane::Body);
    scroll_to(&mut table, Pane::Body, 30.0);
    assert_eq!(table.scroll_position(), ScrollPosition::Middle);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_emptying_data_resets_horizontal_scroll() {
    let mut table = both_axes();
    table.detect_scroll_target(Pane::Body);
    scroll_to(&mut table, Pane::Body, 150.0);

    let emptied = table.props().clone().data(Vec::new());
    table.set_props(emptied).unwrap();
    assert_eq!(pane(&table, Pane::Head).scroll_left, 0.0);
    assert_eq!(pane(&table, Pane::Body).scroll_left, 0.0);

    // The body's own scroll event brings the position back to the left
    table.handle_scroll(Pane::Body);
    assert_eq!(table.scroll_position(), ScrollPosition::Left);
}

#[test]
fn test_no_reset_without_scroll_x() {
    let mut table = scrolling_table(None, Some(ScrollExtent::Px(300.0)));
    table
        .scroll_sync_mut()
        .unwrap()
        .pane_mut(Pane::Body)
        .unwrap()
        .set_scroll_left(40.0);
    let emptied = table.props().clone().data(Vec::new());
    table.set_props(emptied).unwrap();
    assert_eq!(pane(&table, Pane::Body).scroll_left, 40.0);
}

#[test]
fn test_no_reset_when_data_stays_non_empty() {
    let mut table = both_axes();
    table.detect_scroll_target(Pane::Body);
    scroll_to(&mut table, Pane::Body, 150.0);
    let next = table.props().clone().data(flat_records(5));
    table.set_props(next).unwrap();
    assert_eq!(pane(&table, Pane::Body).scroll_left, 150.0);
}

// ============================================================================
// Standalone Synchronizer
// ============================================================================

#[test]
fn test_sync_picks_up_new_options() {
    let mut sync = ScrollSync::new(
        Some(MemoryPane::new(600.0, 200.0)),
        MemoryPane::new(600.0, 200.0),
        &ScrollOptions::default(),
    );
    sync.detect_scroll_target(Pane::Body);
    sync.pane_mut(Pane::Body).unwrap().set_scroll_left(60.0);
    assert_eq!(sync.on_scroll(Pane::Body).propagated_left, None);

    sync.set_options(&ScrollOptions {
        x: Some(ScrollExtent::Flag(true)),
        y: None,
    });
    sync.pane_mut(Pane::Body).unwrap().set_scroll_left(70.0);
    assert_eq!(sync.on_scroll(Pane::Body).propagated_left, Some(70.0));
}
