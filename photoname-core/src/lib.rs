#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod history;
pub mod lock;
pub mod model;
pub mod operations;
pub mod output;
pub mod pathsafe;
pub mod plan;
pub mod preview;
pub mod template;
pub mod undo;

pub use apply::{execute, rename_row};
pub use config::Config;
pub use history::{format_timestamp, TransactionSummary, UndoLog};
pub use lock::StateLock;
pub use model::{BatchResult, RenameRow, RowFailure, RowOutcome, SelectionItem};
pub use operations::{
    apply_items_operation, apply_operation, history_operation, preview_operation, undo_operation,
};
pub use output::{
    ApplyResult, HistoryResult, OutputFormat, OutputFormatter, PreviewResult, UndoResult,
};
pub use plan::Plan;
pub use preview::{preview, render_rows, should_use_color, Preview};
pub use template::{expand, DEFAULT_TEMPLATE};
pub use undo::{undo, NO_UNDO_HISTORY};
