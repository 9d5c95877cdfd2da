use crate::models::{Column, WideTable};
use eframe::egui;
use egui_extras::TableBuilder;

/// What the user can put into edit mode: one cell or one column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Header { col: usize },
    Cell { row: usize, col: usize },
}

#[derive(Debug, Clone)]
struct EditState {
    target: EditTarget,
    buffer: String,
    focus_requested: bool,
}

/// Editable grid backing the table window. Edits go through an explicit
/// begin/commit/cancel cycle: the buffer is only written back on commit, so
/// an abandoned edit leaves the grid untouched.
#[derive(Debug, Clone, Default)]
pub struct TableGrid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    edit: Option<EditState>,
}

impl TableGrid {
    pub fn from_table(table: &WideTable) -> Self {
        let mut grid = Self::default();
        grid.reseed(table);
        grid
    }

    /// Clears and repopulates the grid in place. Any in-flight edit is
    /// dropped with the old contents.
    pub fn reseed(&mut self, table: &WideTable) {
        self.headers = table.headers();
        self.rows = (0..table.n_rows())
            .map(|row| {
                table
                    .columns()
                    .iter()
                    .map(|column| column.cells[row].clone())
                    .collect()
            })
            .collect();
        self.edit = None;
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.edit.as_ref().map(|state| state.target)
    }

    /// Opens an inline edit on the target, pre-filled with its current
    /// value. Out-of-range targets are ignored.
    pub fn begin_edit(&mut self, target: EditTarget) {
        let current = match target {
            EditTarget::Header { col } => self.headers.get(col),
            EditTarget::Cell { row, col } => self.rows.get(row).and_then(|r| r.get(col)),
        };
        if let Some(value) = current {
            self.edit = Some(EditState {
                target,
                buffer: value.clone(),
                focus_requested: true,
            });
        }
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        self.edit.as_mut().map(|state| &mut state.buffer)
    }

    /// Writes the edit buffer back to its target. No type validation; the
    /// reshaper drops non-numeric cells later.
    pub fn commit_edit(&mut self) {
        if let Some(state) = self.edit.take() {
            match state.target {
                EditTarget::Header { col } => {
                    if let Some(header) = self.headers.get_mut(col) {
                        *header = state.buffer;
                    }
                }
                EditTarget::Cell { row, col } => {
                    if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                        *cell = state.buffer;
                    }
                }
            }
        }
    }

    /// Discards the edit buffer silently.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// The grid as a wide table, reflecting every committed edit.
    pub fn current_contents(&self) -> WideTable {
        let columns = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                let cells = self.rows.iter().map(|row| row[col].clone()).collect();
                Column::new(header.clone(), cells)
            })
            .collect();
        WideTable::from_columns(columns)
    }
}

pub enum TableAction {
    None,
    PlotRequested(WideTable),
}

enum EditFinish {
    Commit,
    Cancel,
}

/// Singleton data-table window. The app owns at most one and re-displays it
/// by reseeding rather than opening a second instance.
pub struct TableWindow {
    grid: TableGrid,
    open: bool,
}

impl TableWindow {
    pub fn new(table: &WideTable) -> Self {
        Self {
            grid: TableGrid::from_table(table),
            open: true,
        }
    }

    /// Clear-and-reseed in place, then make sure the window is visible.
    pub fn display(&mut self, table: &WideTable) {
        self.grid.reseed(table);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn grid(&self) -> &TableGrid {
        &self.grid
    }

    pub fn show(&mut self, ctx: &egui::Context) -> TableAction {
        let mut action = TableAction::None;
        let Self { grid, open } = self;

        egui::Window::new("Data Table")
            .open(open)
            .default_width(520.0)
            .default_height(380.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Generate Plot from Table").clicked() {
                        action = TableAction::PlotRequested(grid.current_contents());
                    }
                    ui.separator();
                    ui.label(format!("{} columns × {} rows", grid.n_cols(), grid.n_rows()));
                });
                ui.label(
                    egui::RichText::new(
                        "Double-click a cell or header to edit. Enter commits, clicking away discards.",
                    )
                    .weak()
                    .small(),
                );
                ui.separator();
                render_grid(ui, grid);
            });

        action
    }
}

fn render_grid(ui: &mut egui::Ui, grid: &mut TableGrid) {
    let n_cols = grid.n_cols();
    if n_cols == 0 {
        ui.label("No data.");
        return;
    }

    let enter_pressed = ui.input(|i| i.key_pressed(egui::Key::Enter));
    let available_height = ui.available_height();
    let mut finish: Option<EditFinish> = None;
    let mut begin: Option<EditTarget> = None;

    let TableGrid {
        headers,
        rows,
        edit,
    } = grid;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .max_scroll_height(available_height);
    for _ in 0..n_cols {
        builder = builder.column(egui_extras::Column::initial(110.0).at_least(60.0));
    }

    builder
        .header(24.0, |mut header_row| {
            for (col, title) in headers.iter().enumerate() {
                header_row.col(|ui| {
                    let target = EditTarget::Header { col };
                    if let Some(state) = edit.as_mut().filter(|s| s.target == target) {
                        if let Some(outcome) = show_edit_widget(ui, state, enter_pressed) {
                            finish = Some(outcome);
                        }
                    } else {
                        let label = egui::Label::new(egui::RichText::new(title.as_str()).strong())
                            .sense(egui::Sense::click());
                        if ui.add(label).double_clicked() {
                            begin = Some(target);
                        }
                    }
                });
            }
        })
        .body(|mut body| {
            for (row_idx, row) in rows.iter().enumerate() {
                body.row(22.0, |mut table_row| {
                    for (col_idx, cell) in row.iter().enumerate().take(n_cols) {
                        table_row.col(|ui| {
                            let target = EditTarget::Cell {
                                row: row_idx,
                                col: col_idx,
                            };
                            if let Some(state) = edit.as_mut().filter(|s| s.target == target) {
                                if let Some(outcome) =
                                    show_edit_widget(ui, state, enter_pressed)
                                {
                                    finish = Some(outcome);
                                }
                            } else {
                                // Keep empty cells clickable.
                                let text = if cell.is_empty() { " " } else { cell.as_str() };
                                let label = egui::Label::new(text).sense(egui::Sense::click());
                                if ui.add(label).double_clicked() {
                                    begin = Some(target);
                                }
                            }
                        });
                    }
                });
            }
        });

    // Settle the old edit before a freshly double-clicked one starts.
    match finish {
        Some(EditFinish::Commit) => grid.commit_edit(),
        Some(EditFinish::Cancel) => grid.cancel_edit(),
        None => {}
    }
    if let Some(target) = begin {
        grid.begin_edit(target);
    }
}

/// The inline edit widget: created when an edit begins, torn down on both
/// the commit and the discard path.
fn show_edit_widget(
    ui: &mut egui::Ui,
    state: &mut EditState,
    enter_pressed: bool,
) -> Option<EditFinish> {
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.buffer).desired_width(f32::INFINITY),
    );
    if state.focus_requested {
        response.request_focus();
        state.focus_requested = false;
    }
    if response.lost_focus() {
        if enter_pressed {
            Some(EditFinish::Commit)
        } else {
            Some(EditFinish::Cancel)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WideTable {
        WideTable::from_columns(vec![
            Column::new("A", vec!["1".into(), "2".into(), "3".into()]),
            Column::new("B", vec!["4".into(), "5".into(), "6".into()]),
        ])
    }

    #[test]
    fn commit_changes_exactly_one_cell() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Cell { row: 1, col: 0 });
        *grid.edit_buffer_mut().unwrap() = "42".to_string();
        grid.commit_edit();

        let contents = grid.current_contents();
        assert_eq!(contents.columns()[0].cells, vec!["1", "42", "3"]);
        assert_eq!(contents.columns()[1].cells, vec!["4", "5", "6"]);
        assert_eq!(grid.editing(), None);
    }

    #[test]
    fn cancel_leaves_contents_unchanged() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Cell { row: 0, col: 1 });
        *grid.edit_buffer_mut().unwrap() = "999".to_string();
        grid.cancel_edit();

        assert_eq!(grid.current_contents(), table());
        assert_eq!(grid.editing(), None);
    }

    #[test]
    fn header_rename_flows_into_contents() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Header { col: 0 });
        assert_eq!(grid.edit_buffer_mut().unwrap(), "A");
        *grid.edit_buffer_mut().unwrap() = "Alpha".to_string();
        grid.commit_edit();

        let contents = grid.current_contents();
        assert_eq!(contents.headers(), vec!["Alpha", "B"]);
        assert_eq!(contents.columns()[0].cells, vec!["1", "2", "3"]);
    }

    #[test]
    fn begin_edit_prefills_with_current_value() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Cell { row: 2, col: 1 });
        assert_eq!(grid.edit_buffer_mut().unwrap(), "6");
    }

    #[test]
    fn out_of_range_target_is_ignored() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Cell { row: 10, col: 0 });
        assert_eq!(grid.editing(), None);
        grid.begin_edit(EditTarget::Header { col: 5 });
        assert_eq!(grid.editing(), None);
    }

    #[test]
    fn reseed_replaces_contents_and_drops_edit() {
        let mut grid = TableGrid::from_table(&table());
        grid.begin_edit(EditTarget::Cell { row: 0, col: 0 });

        let next = WideTable::from_columns(vec![Column::new("X", vec!["7".into()])]);
        grid.reseed(&next);

        assert_eq!(grid.editing(), None);
        assert_eq!(grid.current_contents(), next);
    }

    #[test]
    fn window_redisplay_reuses_the_single_instance() {
        let mut window = TableWindow::new(&table());
        assert!(window.is_open());

        let next = WideTable::from_columns(vec![Column::new("X", vec!["7".into()])]);
        window.display(&next);

        assert!(window.is_open());
        assert_eq!(window.grid().current_contents(), next);
    }
}
