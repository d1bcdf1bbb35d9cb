//! Table composer.
//!
//! [`Table`] owns the resolved columns, the flattener and its decorators, the
//! hover store and (once panes are attached) the scroll synchronizer. It turns
//! props into a [`TableView`] the host paints, and routes host events (scroll,
//! pointer, click, resize) back into those parts.

pub mod props;
pub mod view;

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde_json::Value;

pub use props::{
    BodyWrapperFn, DataFn, EmptyTextFn, PointerEvent, RowClassNameFn, RowEventFn, TableProps,
};
pub use view::{
    BodyView, CellView, ColView, IndentView, PaneStyle, PaneView, RowKind, RowView, TableElement,
    TableView,
};

use crate::columns::ColumnManager;
use crate::error::Result;
use crate::header::build_header_rows;
use crate::rows::{ExpandableRows, NoDecoration, RowDecorator, RowFlattener, RowKeySelector};
use crate::scroll::{
    head_compensation, Debouncer, FixedScrollbar, MemoryPane, ScrollOutcome, ScrollPane,
    ScrollSync, ScrollbarMeasure,
};
use crate::store::{HoverPatch, RowHover, Store, TableState};
use crate::types::{
    FlattenedRow, Pane, RenderRow, RowKey, ScrollExtent, ScrollPosition, SyntheticRow,
};

/// Quiet period after the last resize before panes are re-measured
pub const RESYNC_DELAY_MS: f64 = 150.0;

/// A table instance: props in, [`TableView`]s out.
pub struct Table<P: ScrollPane = MemoryPane> {
    props: TableProps,
    columns: ColumnManager,
    flattener: RowFlattener,
    expandable: Option<ExpandableRows>,
    store: Store<TableState>,
    mounted_rows: HashMap<RowKey, RowHover>,
    needs_render: Rc<Cell<bool>>,
    scroll: Option<ScrollSync<P>>,
    scrollbar: Box<dyn ScrollbarMeasure>,
    resync: Debouncer,
    torn_down: bool,
}

impl<P: ScrollPane> Table<P> {
    /// Build a table from `props`.
    ///
    /// # Errors
    /// Fails when the columns cannot be resolved (see [`ColumnManager::new`]).
    pub fn new(props: TableProps) -> Result<Self> {
        let columns = ColumnManager::new(
            props.columns.as_deref().map(Vec::as_slice),
            props.column_descriptors.as_deref().map(Vec::as_slice),
        )?;
        let flattener = flattener_for(&props);
        let expandable = props
            .expandable
            .clone()
            .map(|options| ExpandableRows::new(options, &props.data, &flattener));
        Ok(Self {
            props,
            columns,
            flattener,
            expandable,
            store: Store::new(TableState::default()),
            mounted_rows: HashMap::new(),
            needs_render: Rc::new(Cell::new(true)),
            scroll: None,
            scrollbar: Box::new(FixedScrollbar(0.0)),
            resync: Debouncer::new(RESYNC_DELAY_MS),
            torn_down: false,
        })
    }

    /// Use `measure` for the fixed-header scrollbar compensation
    #[must_use]
    pub fn with_scrollbar_measure(mut self, measure: impl ScrollbarMeasure + 'static) -> Self {
        self.scrollbar = Box::new(measure);
        self
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    pub fn columns(&self) -> &ColumnManager {
        &self.columns
    }

    pub fn store(&self) -> &Store<TableState> {
        &self.store
    }

    pub fn expandable(&self) -> Option<&ExpandableRows> {
        self.expandable.as_ref()
    }

    pub fn scroll_sync(&self) -> Option<&ScrollSync<P>> {
        self.scroll.as_ref()
    }

    pub fn scroll_sync_mut(&mut self) -> Option<&mut ScrollSync<P>> {
        self.scroll.as_mut()
    }

    pub fn is_fixed_header(&self) -> bool {
        self.props.options.fixed_header()
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
            .as_ref()
            .map_or(ScrollPosition::Left, ScrollSync::scroll_position)
    }

    /// Rows currently subscribed to the hover store
    pub fn mounted_row_count(&self) -> usize {
        self.mounted_rows.len()
    }

    pub fn is_row_hovered(&self, key: &RowKey) -> bool {
        self.mounted_rows.get(key).is_some_and(RowHover::is_hovered)
    }

    /// Whether something changed since the last call; clears the flag.
    pub fn take_needs_render(&self) -> bool {
        self.needs_render.replace(false)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Compose the current view and bring row subscriptions in line with it.
    pub fn render(&mut self) -> TableView {
        let rows = flatten(&self.flattener, self.expandable.as_ref(), &self.props.data);
        sync_row_subscriptions(&mut self.mounted_rows, &self.store, &self.needs_render, &rows);

        let options = &self.props.options;
        let prefix = options.prefix_cls.as_str();
        let scroll = &options.scroll;
        let fixed_header = options.fixed_header();

        let body_rows = rows.iter().map(|row| self.row_view(row)).collect();
        let mut body = BodyView {
            class_name: format!("{prefix}-tbody"),
            rows: body_rows,
        };
        if let Some(wrap) = &self.props.body_wrapper {
            body = wrap(body);
        }

        let mut head_style = PaneStyle::default();
        let mut body_style = PaneStyle::default();
        if scroll.x_enabled() {
            body_style.overflow_x = Some("auto".to_string());
        }
        if let Some(y) = scroll.y.as_ref().filter(|y| y.is_enabled()) {
            body_style.max_height = y.to_css();
            body_style.overflow_y = Some("scroll".to_string());
            head_style.compensation = head_compensation(self.scrollbar.scrollbar_width());
        }

        let (table_layout, width) = match scroll.x.as_ref().filter(|x| x.is_enabled()) {
            Some(ScrollExtent::Flag(_)) => (Some("fixed".to_string()), None),
            Some(extent) => (None, extent.to_css()),
            None => (None, None),
        };
        let col_group: Vec<ColView> = self
            .columns
            .leaf_columns()
            .iter()
            .map(|col| ColView {
                key: col.key.clone(),
                width: col.width.as_ref().map(|w| w.to_css()),
            })
            .collect();
        let header = options
            .show_header
            .then(|| build_header_rows(self.columns.grouped_columns()));
        let table_class = if scroll.x_enabled() {
            format!("{prefix}-fixed")
        } else {
            String::new()
        };
        let element = |with_header: bool, body: Option<BodyView>| TableElement {
            class_name: table_class.clone(),
            table_layout: table_layout.clone(),
            width: width.clone(),
            col_group: col_group.clone(),
            header: header.clone().filter(|_| with_header),
            body,
        };

        let head = fixed_header.then(|| PaneView {
            class_name: format!("{prefix}-header"),
            style: head_style,
            table: element(true, None),
        });
        let body = PaneView {
            class_name: format!("{prefix}-body"),
            style: body_style,
            table: element(!fixed_header, Some(body)),
        };

        let scroll_position = self.scroll_position();
        let mut class_names = vec![prefix.to_string()];
        if let Some(extra) = options.class_name.as_deref().filter(|c| !c.is_empty()) {
            class_names.push(extra.to_string());
        }
        if fixed_header {
            class_names.push(format!("{prefix}-fixed-header"));
        }
        class_names.push(format!("{prefix}-scroll-position-{}", scroll_position.as_str()));

        let data = self.props.data.as_slice();
        TableView {
            class_name: class_names.join(" "),
            scroll_position,
            title: self.props.title.as_ref().map(|title| title(data)),
            head,
            body,
            placeholder: data
                .is_empty()
                .then(|| self.props.empty_text_or_default()),
            footer: self.props.footer.as_ref().map(|footer| footer(data)),
        }
    }

    fn row_view(&self, row: &RenderRow<'_>) -> RowView {
        match row {
            RenderRow::Data(row) => self.data_row_view(row),
            RenderRow::Synthetic(row) => self.synthetic_row_view(row),
        }
    }

    fn data_row_view(&self, row: &FlattenedRow<'_>) -> RowView {
        let prefix = format!("{}-row", self.props.options.prefix_cls);
        let custom = self
            .props
            .row_class_name
            .as_ref()
            .map(|class| class(row.record, row.index, row.indent))
            .unwrap_or_default();
        let hovered = self.is_row_hovered(&row.key);

        let mut classes = vec![prefix.clone()];
        if !custom.is_empty() {
            classes.push(custom);
        }
        classes.push(format!("{prefix}-level-{}", row.indent));
        if hovered {
            classes.push(format!("{prefix}-hover"));
        }

        let indent_size = self.props.options.indent_size;
        let cells = self
            .columns
            .leaf_columns()
            .iter()
            .enumerate()
            .map(|(i, col)| CellView {
                key: col.key.clone(),
                class_name: col.class_name.clone().unwrap_or_default(),
                value: col
                    .data_index
                    .as_ref()
                    .and_then(|field| row.record.get(field))
                    .cloned()
                    .unwrap_or(Value::Null),
                indent: (i == 0).then(|| IndentView {
                    padding_left: row.indent as f64 * indent_size,
                    spaced: row.need_indent_spaced,
                }),
            })
            .collect();

        RowView {
            key: row.key.to_string(),
            kind: RowKind::Data,
            class_name: classes.join(" "),
            index: row.index,
            indent: row.indent,
            visible: row.visible,
            hovered,
            cells,
            content: None,
        }
    }

    fn synthetic_row_view(&self, row: &SyntheticRow) -> RowView {
        let prefix = &self.props.options.prefix_cls;
        let mut classes = vec![format!("{prefix}-expanded-row")];
        if !row.class_name.is_empty() {
            classes.push(row.class_name.clone());
        }
        classes.push(format!("{prefix}-expanded-row-level-{}", row.indent));
        RowView {
            key: row.key.clone(),
            kind: RowKind::Expanded,
            class_name: classes.join(" "),
            index: 0,
            indent: row.indent,
            visible: row.visible,
            hovered: false,
            cells: Vec::new(),
            content: Some(row.content.clone()),
        }
    }

    /// Replace the props.
    ///
    /// Columns are re-resolved only when their source `Rc` changed. Going from
    /// some rows to none scrolls back to the left edge when `scroll.x` is set.
    ///
    /// # Errors
    /// Fails when new columns cannot be resolved; the table is left unchanged.
    pub fn set_props(&mut self, next: TableProps) -> Result<()> {
        let columns_changed = next
            .columns
            .as_ref()
            .is_some_and(|n| !self.props.columns.as_ref().is_some_and(|p| Rc::ptr_eq(n, p)));
        if columns_changed {
            self.columns
                .reset(next.columns.as_deref().map(Vec::as_slice), None)?;
        } else if !same_source(&next.column_descriptors, &self.props.column_descriptors) {
            self.columns.reset(
                next.columns.as_deref().map(Vec::as_slice),
                next.column_descriptors.as_deref().map(Vec::as_slice),
            )?;
        }

        self.flattener = flattener_for(&next);
        self.expandable = match (self.expandable.take(), next.expandable.clone()) {
            (Some(mut current), Some(options)) => {
                current.update_options(options);
                Some(current)
            }
            (None, Some(options)) => {
                Some(ExpandableRows::new(options, &next.data, &self.flattener))
            }
            (_, None) => None,
        };

        let had_rows = !self.props.data.is_empty();
        self.props = next;
        if let Some(sync) = self.scroll.as_mut() {
            sync.set_options(&self.props.options.scroll);
            if had_rows && self.props.data.is_empty() && self.props.options.scroll.has_x() {
                sync.reset_scroll_x();
            }
        }
        self.needs_render.set(true);
        Ok(())
    }

    /// Attach the host's scrollable panes. The head pane is only kept in
    /// fixed-header mode.
    pub fn attach_panes(&mut self, head: Option<P>, body: P) {
        let head = if self.is_fixed_header() { head } else { None };
        self.scroll = Some(ScrollSync::new(head, body, &self.props.options.scroll));
    }

    /// Pointer entered or touched `pane`
    pub fn detect_scroll_target(&mut self, pane: Pane) {
        if let Some(sync) = self.scroll.as_mut() {
            sync.detect_scroll_target(pane);
        }
    }

    /// `pane` fired a scroll event. Without attached panes nothing happens.
    pub fn handle_scroll(&mut self, pane: Pane) -> ScrollOutcome {
        let Some(sync) = self.scroll.as_mut() else {
            return ScrollOutcome::default();
        };
        let outcome = sync.on_scroll(pane);
        if let Some(position) = outcome.position {
            log::debug!("scroll position -> {}", position.as_str());
            self.needs_render.set(true);
        }
        outcome
    }

    pub fn reset_scroll_x(&mut self) {
        if let Some(sync) = self.scroll.as_mut() {
            sync.reset_scroll_x();
        }
    }

    /// Pointer entered (`true`) or left (`false`) the row `key`.
    pub fn handle_row_hover(&self, is_hover: bool, key: &RowKey) {
        self.store.set_state(HoverPatch {
            current_hover_key: is_hover.then(|| key.clone()),
        });
    }

    /// Forward a click on row `key` to the host. Returns whether a handler ran.
    pub fn click_row(&self, key: &RowKey, event: &PointerEvent) -> bool {
        self.dispatch_row_event(self.props.on_row_click.as_ref(), key, event)
    }

    pub fn double_click_row(&self, key: &RowKey, event: &PointerEvent) -> bool {
        self.dispatch_row_event(self.props.on_row_double_click.as_ref(), key, event)
    }

    fn dispatch_row_event(
        &self,
        handler: Option<&RowEventFn>,
        key: &RowKey,
        event: &PointerEvent,
    ) -> bool {
        let Some(handler) = handler else {
            return false;
        };
        match find_row(&self.flattener, &self.props.data, key) {
            Some(row) => {
                handler(row.record, row.index, event);
                true
            }
            None => false,
        }
    }

    /// Expand or collapse row `key`. Returns the requested state, `None` when
    /// rows are not expandable or the key is unknown.
    pub fn toggle_expanded(&mut self, key: &RowKey) -> Option<bool> {
        let expandable = self.expandable.as_mut()?;
        let row = find_row(&self.flattener, &self.props.data, key)?;
        let expanded = expandable.toggle(key, row.record);
        self.needs_render.set(true);
        Some(expanded)
    }

    /// The viewport resized at `now_ms`; re-measure once resizing settles.
    pub fn request_resync(&mut self, now_ms: f64) {
        if !self.torn_down {
            self.resync.schedule(now_ms);
        }
    }

    pub fn is_resync_pending(&self) -> bool {
        !self.torn_down && self.resync.is_pending()
    }

    /// True once the resync delay has passed; the host re-renders then.
    pub fn poll_resync(&mut self, now_ms: f64) -> bool {
        if self.torn_down || !self.resync.poll(now_ms) {
            return false;
        }
        self.needs_render.set(true);
        true
    }

    /// Release everything tied to the host: pending resync, row subscriptions
    /// and panes. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.resync.cancel() {
            log::debug!("cancelled pending resync");
        }
        self.mounted_rows.clear();
        self.scroll = None;
        self.torn_down = true;
    }
}

fn flattener_for(props: &TableProps) -> RowFlattener {
    match &props.row_key {
        Some(key_fn) => RowFlattener::new(
            RowKeySelector::Func(Rc::clone(key_fn)),
            props.options.children_column_name.clone(),
        ),
        None => RowFlattener::from_options(&props.options),
    }
}

fn flatten<'a>(
    flattener: &RowFlattener,
    expandable: Option<&ExpandableRows>,
    data: &'a [Value],
) -> Vec<RenderRow<'a>> {
    let decorator: &dyn RowDecorator = match expandable {
        Some(expandable) => expandable,
        None => &NoDecoration,
    };
    flattener.flatten_with(data, decorator)
}

fn find_row<'a>(
    flattener: &RowFlattener,
    data: &'a [Value],
    key: &RowKey,
) -> Option<FlattenedRow<'a>> {
    flattener
        .flatten(data, 0, true)
        .into_iter()
        .find(|row| &row.key == key)
}

fn same_source<T>(a: &Option<Rc<T>>, b: &Option<Rc<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Mount a hover subscription for every new data row key, drop the vanished.
fn sync_row_subscriptions(
    mounted: &mut HashMap<RowKey, RowHover>,
    store: &Store<TableState>,
    needs_render: &Rc<Cell<bool>>,
    rows: &[RenderRow<'_>],
) {
    let live: HashSet<&RowKey> = rows
        .iter()
        .filter_map(|row| match row {
            RenderRow::Data(row) => Some(&row.key),
            RenderRow::Synthetic(_) => None,
        })
        .collect();
    mounted.retain(|key, _| live.contains(key));
    for key in live {
        if !mounted.contains_key(key) {
            let flag = Rc::clone(needs_render);
            let hover = RowHover::mount(store, key.clone(), move |_| flag.set(true));
            mounted.insert(key.clone(), hover);
        }
    }
}
