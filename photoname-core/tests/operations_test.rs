use photoname_core::{
    apply_items_operation, apply_operation, history_operation, preview_operation, undo_operation,
    Config, OutputFormat, OutputFormatter, Plan, SelectionItem,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, name).unwrap();
    path
}

#[test]
fn test_preview_operation_uses_configured_template() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let photo = touch(root, "IMG_1.jpg");

    let mut config = Config::default();
    config.defaults.template = "{label}-{seq:2}".to_string();
    config
        .save_to_path(&root.join(".photoname").join("config.toml"))
        .unwrap();

    let items = vec![SelectionItem::new(&photo, "kitchen", 3)];
    let result = preview_operation(&items, None, Some(root)).unwrap();
    assert_eq!(result.template, "{label}-{seq:2}");
    assert_eq!(result.rows[0].new_name, "kitchen-01.jpg");

    // Nothing on disk moves during preview; the plan is saved for apply.
    assert!(photo.exists());
    let plan_path = root.join(".photoname").join("plan.json");
    assert_eq!(result.plan_path.as_deref(), Some(plan_path.as_path()));
    assert_eq!(Plan::load(&plan_path).unwrap().rows, result.rows);

    let explicit = preview_operation(&items, Some("G{group}"), Some(root)).unwrap();
    assert_eq!(explicit.rows[0].new_name, "G3.jpg");
}

#[test]
fn test_apply_undo_history_operations() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let a = touch(root, "a.jpg");
    let b = touch(root, "b.jpg");
    let items = vec![SelectionItem::from_path(&a), SelectionItem::from_path(&b)];

    let applied = apply_items_operation(&items, None, Some(root)).unwrap();
    assert_eq!(applied.result.success, 2);
    assert!(applied.result.is_clean());
    assert_eq!(
        applied.log_path,
        root.join(".photoname").join("rename_map.csv")
    );
    assert!(root.join("V-1_general_001.jpg").exists());
    assert!(root.join("V-1_general_002.jpg").exists());
    // The lock is gone once the operation returns.
    assert!(!root.join(".photoname").join("photoname.lock").exists());

    let history = history_operation(None, Some(root)).unwrap();
    assert_eq!(history.transactions.len(), 1);
    assert_eq!(history.transactions[0].rows, 2);
    assert_eq!(history.transactions[0].succeeded, 2);

    let undone = undo_operation(Some(root)).unwrap();
    assert_eq!(undone.result.success, 2);
    assert!(a.exists());
    assert!(b.exists());

    let json: serde_json::Value =
        serde_json::from_str(&undone.format(OutputFormat::Json)).unwrap();
    assert_eq!(json["operation"], "undo");
    assert_eq!(json["success"], 2);
}

#[test]
fn test_undo_operation_without_history() {
    let temp_dir = TempDir::new().unwrap();

    let undone = undo_operation(Some(temp_dir.path())).unwrap();
    assert_eq!(undone.result.success, 0);
    assert_eq!(undone.result.failed, 0);
    assert_eq!(undone.result.errors, vec!["no undo history".to_string()]);
}

#[test]
fn test_apply_operation_respects_configured_log_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let a = touch(root, "a.jpg");

    let mut config = Config::default();
    config.log.path = PathBuf::from("logs/renames.csv");
    config
        .save_to_path(&root.join(".photoname").join("config.toml"))
        .unwrap();

    let applied = apply_items_operation(&[SelectionItem::from_path(&a)], None, Some(root)).unwrap();
    assert_eq!(applied.log_path, root.join("logs").join("renames.csv"));
    assert!(applied.log_path.exists());

    let history = history_operation(Some(5), Some(root)).unwrap();
    assert_eq!(history.transactions.len(), 1);
}

#[test]
fn test_apply_operation_refuses_while_locked() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let a = touch(root, "a.jpg");

    let state_dir = root.join(".photoname");
    let _held = photoname_core::StateLock::acquire(&state_dir).unwrap();

    let err = apply_items_operation(&[SelectionItem::from_path(&a)], None, Some(root)).unwrap_err();
    assert!(format!("{err:#}").contains("already running"));
    assert!(a.exists());
}

#[test]
fn test_apply_executes_the_previewed_plan() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let items: Vec<SelectionItem> = ["a.jpg", "b.jpg", "c.jpg"]
        .iter()
        .map(|name| SelectionItem::from_path(touch(root, name)))
        .collect();

    let previewed = preview_operation(&items, None, Some(root)).unwrap();
    assert_eq!(previewed.rows.len(), 3);

    // The vanished file stays in the batch and fails rather than dropping out.
    fs::remove_file(root.join("b.jpg")).unwrap();

    let applied = apply_operation(None, Some(root)).unwrap();
    assert_eq!(applied.result.success, 2);
    assert_eq!(applied.result.failed, 1);
    assert_eq!(
        applied.result.errors,
        vec![format!("file does not exist: {}", root.join("b.jpg").display())]
    );
    let executed: Vec<_> = applied.rows.iter().map(|row| row.new_name.clone()).collect();
    let planned: Vec<_> = previewed.rows.iter().map(|row| row.new_name.clone()).collect();
    assert_eq!(executed, planned);
    assert!(root.join("V-1_general_001.jpg").exists());
    assert!(root.join("V-1_general_003.jpg").exists());

    // The default plan is consumed.
    assert!(!root.join(".photoname").join("plan.json").exists());
    let err = apply_operation(None, Some(root)).unwrap_err();
    assert!(err.to_string().contains("No plan found"));
}

#[test]
fn test_apply_explicit_plan_file_is_kept() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let a = touch(root, "a.jpg");

    let plan_path = root.join("reviewed.json");
    let rows = photoname_core::preview(&[SelectionItem::from_path(&a)], "{seq}");
    Plan::new("{seq}", rows).save(&plan_path).unwrap();

    let applied = apply_operation(Some(&plan_path), Some(root)).unwrap();
    assert_eq!(applied.result.success, 1);
    assert_eq!(applied.template, "{seq}");
    assert!(root.join("1.jpg").exists());
    assert!(plan_path.exists());
}
