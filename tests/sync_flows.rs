// tests/sync_flows.rs
// End-to-end runs of the dispatcher against workbook files in a temp dir.

use std::path::PathBuf;

use sheetsync::settings::SyncConfig;
use sheetsync::sheets::database::{Workbook, WorkbookStore};
use sheetsync::sheets::sync::{Dispatcher, EditEvent, FilterStrategy, TriggerEvent};
use sheetsync::sheets::{FilterCriteria, SheetFilter};

struct TempStore {
    root: PathBuf,
}

impl TempStore {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("sheetsync-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).unwrap();
        Self { root }
    }

    fn store(&self) -> WorkbookStore {
        WorkbookStore::new(&self.root)
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

const MAIN_HEADER: [&str; 5] = ["推薦済みフラグ", "推薦URL", "求職者名", "スプシ", "連携ステータス"];
const TARGET_HEADER: [&str; 3] = ["推薦URL（自動入力）", "候補者名", "推薦ステータス"];

fn main_workbook(rows: &[[&str; 5]]) -> Workbook {
    let wb = Workbook::in_memory("main").unwrap();
    let sheet = wb.create_sheet("推薦一覧", &strings(&MAIN_HEADER)).unwrap();
    for r in rows {
        sheet.append_row(&strings(r)).unwrap();
    }
    wb
}

fn target_workbook(store: &WorkbookStore, id: &str, rows: &[[&str; 3]]) {
    let wb = store.create(id).unwrap();
    let sheet = wb.create_sheet("A社推薦管理", &strings(&TARGET_HEADER)).unwrap();
    for r in rows {
        sheet.append_row(&strings(r)).unwrap();
    }
    wb.flush().unwrap();
}

fn target_column(store: &WorkbookStore, id: &str, column: usize) -> Vec<String> {
    let wb = store.open_by_id(id).unwrap();
    let snapshot = wb.sheet("A社推薦管理").unwrap().unwrap().snapshot().unwrap();
    snapshot.rows.iter().map(|r| r[column - 1].clone()).collect()
}

fn main_column(main: &Workbook, column: usize) -> Vec<String> {
    let snapshot = main.sheet("推薦一覧").unwrap().unwrap().snapshot().unwrap();
    snapshot.rows.iter().map(|r| r[column - 1].clone()).collect()
}

fn trigger_edit(row: usize) -> TriggerEvent {
    TriggerEvent::Edit(EditEvent {
        sheet_name: "推薦一覧".into(),
        row,
        column: 1,
        new_value: "TRUE".into(),
    })
}

#[test]
fn edit_syncs_trimmed_name_and_hides_completed_row() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(
        &store,
        "abc1234567",
        &[["https://x/0", "Someone", ""], ["https://x/1", "Jane Doe", ""]],
    );
    let main = main_workbook(&[["TRUE", "https://x/1", " Jane Doe ", "abc1234567", ""]]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    let report = dispatcher.dispatch(&main, &trigger_edit(2));

    assert_eq!(report.synced, 1);
    assert_eq!(target_column(&store, "abc1234567", 3), vec!["", "推薦済"]);
    assert_eq!(main_column(&main, 5), vec!["連携済"]);

    let book = store.open_by_id("abc1234567").unwrap();
    let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
    let visible: Vec<usize> = sheet.visible_rows().unwrap().into_iter().map(|(r, _)| r).collect();
    assert_eq!(visible, vec![2]);
    assert_eq!(
        sheet.filter().unwrap().unwrap().column_criteria(3),
        Some(&FilterCriteria::WhenCellEmpty)
    );
}

#[test]
fn only_first_duplicate_target_row_is_written() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(
        &store,
        "DupBook12345",
        &[
            ["https://x/1", "Jane Doe", ""],
            ["https://x/1", "Jane Doe", ""],
        ],
    );
    let main = main_workbook(&[[
        "TRUE",
        "https://x/1",
        "Jane Doe",
        "https://docs.example.com/spreadsheets/d/DupBook12345/edit",
        "",
    ]]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    let report = dispatcher.dispatch(&main, &TriggerEvent::Sweep);

    assert_eq!(report.synced, 1);
    assert_eq!(target_column(&store, "DupBook12345", 3), vec!["推薦済", ""]);
}

#[test]
fn row_added_after_first_sync_is_hidden_once_completed() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(&store, "Growing12345", &[["https://x/1", "Jane", ""]]);
    let main = main_workbook(&[["TRUE", "https://x/1", "Jane", "Growing12345", ""]]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    assert_eq!(dispatcher.dispatch(&main, &TriggerEvent::Sweep).synced, 1);

    {
        let book = store.open_by_id("Growing12345").unwrap();
        let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
        sheet.append_row(&strings(&["https://x/2", "Bob", ""])).unwrap();
        sheet.flush().unwrap();
    }
    main.sheet("推薦一覧")
        .unwrap()
        .unwrap()
        .append_row(&strings(&["TRUE", "https://x/2", "Bob", "Growing12345", ""]))
        .unwrap();

    let report = dispatcher.dispatch(&main, &trigger_edit(3));

    assert_eq!(report.synced, 1);
    assert_eq!(target_column(&store, "Growing12345", 3), vec!["推薦済", "推薦済"]);
    let book = store.open_by_id("Growing12345").unwrap();
    let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
    assert_eq!(sheet.filter().unwrap().unwrap().last_row, 3);
    assert!(sheet.visible_rows().unwrap().is_empty());
}

#[test]
fn sweep_rerun_skips_rows_already_marked() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(&store, "abc1234567", &[["https://x/1", "Jane Doe", ""]]);
    let main = main_workbook(&[["TRUE", "https://x/1", "Jane Doe", "abc1234567", ""]]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    let first = dispatcher.sweep(&main);
    assert_eq!((first.examined, first.synced), (1, 1));
    assert_eq!(main_column(&main, 5), vec!["連携済"]);

    // Clear the target cell by hand; a second write would put the label back.
    {
        let book = store.open_by_id("abc1234567").unwrap();
        let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
        sheet.set_cell(2, 3, "").unwrap();
        sheet.flush().unwrap();
    }

    let second = dispatcher.sweep(&main);
    assert_eq!(second.examined, 0);
    assert_eq!(second.synced, 0);
    assert_eq!(target_column(&store, "abc1234567", 3), vec![""]);
}

#[test]
fn sweep_continues_after_failing_rows() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(&store, "GoodBook1234", &[["https://x/3", "Ann", ""]]);
    let main = main_workbook(&[
        ["TRUE", "", "Nobody", "GoodBook1234", ""],
        ["TRUE", "https://x/2", "Bob", "MissingBook1", ""],
        ["TRUE", "https://x/9", "Zed", "GoodBook1234", ""],
        ["TRUE", "https://x/3", "Ann", "GoodBook1234", ""],
    ]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    let report = dispatcher.sweep(&main);

    assert_eq!(report.examined, 4);
    assert_eq!(report.failed, 2);
    assert_eq!(report.unmatched, 1);
    assert_eq!(report.synced, 1);
    assert_eq!(main_column(&main, 5), vec!["", "", "", "連携済"]);
    assert_eq!(target_column(&store, "GoodBook1234", 3), vec!["推薦済"]);
}

#[test]
fn missing_target_sheet_aborts_row() {
    let tmp = TempStore::new();
    let store = tmp.store();
    {
        let wb = store.create("WrongSheets1").unwrap();
        wb.create_sheet("Other", &strings(&TARGET_HEADER)).unwrap();
    }
    let main = main_workbook(&[["TRUE", "https://x/1", "Jane", "WrongSheets1", ""]]);
    let dispatcher = Dispatcher::new(SyncConfig::default(), store.clone());

    let report = dispatcher.sweep(&main);
    assert_eq!(report.failed, 1);
    assert_eq!(main_column(&main, 5), vec![""]);
}

#[test]
fn merge_strategy_keeps_human_filter_rules() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(
        &store,
        "FilterBook12",
        &[["https://x/1", "Jane", ""], ["https://x/2", "Bob", ""]],
    );
    {
        let book = store.open_by_id("FilterBook12").unwrap();
        let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
        let mut filter = SheetFilter::covering(&sheet.snapshot().unwrap());
        filter.set_column_criteria(2, FilterCriteria::TextContains("o".into()));
        sheet.set_filter(&filter).unwrap();
    }
    let main = main_workbook(&[["TRUE", "https://x/1", "Jane", "FilterBook12", ""]]);

    let merge = Dispatcher::new(SyncConfig::default(), store.clone());
    assert_eq!(merge.sweep(&main).synced, 1);

    let book = store.open_by_id("FilterBook12").unwrap();
    let filter = book.sheet("A社推薦管理").unwrap().unwrap().filter().unwrap().unwrap();
    assert_eq!(filter.column_criteria(2), Some(&FilterCriteria::TextContains("o".into())));
    assert_eq!(filter.column_criteria(3), Some(&FilterCriteria::WhenCellEmpty));
}

#[test]
fn recreate_strategy_replaces_filter() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(&store, "FilterBook34", &[["https://x/1", "Jane", ""]]);
    {
        let book = store.open_by_id("FilterBook34").unwrap();
        let sheet = book.sheet("A社推薦管理").unwrap().unwrap();
        let mut filter = SheetFilter::covering(&sheet.snapshot().unwrap());
        filter.set_column_criteria(2, FilterCriteria::TextContains("o".into()));
        sheet.set_filter(&filter).unwrap();
    }
    let main = main_workbook(&[["TRUE", "https://x/1", "Jane", "FilterBook34", ""]]);
    let config = SyncConfig {
        filter_strategy: FilterStrategy::Recreate,
        ..SyncConfig::default()
    };

    assert_eq!(Dispatcher::new(config, store.clone()).sweep(&main).synced, 1);

    let book = store.open_by_id("FilterBook34").unwrap();
    let filter = book.sheet("A社推薦管理").unwrap().unwrap().filter().unwrap().unwrap();
    assert_eq!(filter.column_criteria(2), None);
    assert_eq!(filter.column_criteria(3), Some(&FilterCriteria::WhenCellEmpty));
}

#[test]
fn edit_without_marker_column_still_syncs() {
    let tmp = TempStore::new();
    let store = tmp.store();
    target_workbook(&store, "abc1234567", &[["https://x/1", "Jane Doe", ""]]);

    let main = Workbook::in_memory("main").unwrap();
    let sheet = main
        .create_sheet("推薦一覧", &strings(&MAIN_HEADER[..4]))
        .unwrap();
    sheet
        .append_row(&strings(&["TRUE", "https://x/1", "Jane Doe", "abc1234567"]))
        .unwrap();

    let report = Dispatcher::new(SyncConfig::default(), store.clone()).dispatch(&main, &trigger_edit(2));
    assert_eq!(report.synced, 1);
    assert_eq!(target_column(&store, "abc1234567", 3), vec!["推薦済"]);
}
