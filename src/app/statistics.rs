//! End-of-run statistics logging.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ImportStats, InfoType, WarningType};
use crate::import::{ImportReport, TaskStatus};

/// Logs one line per task followed by the warning and info counters.
pub fn print_import_statistics(report: &ImportReport) {
    for task in &report.tasks {
        match &task.status {
            TaskStatus::Imported(summary) => info!(
                "   {}: {} docs in {} batch{}",
                task.collection,
                summary.documents,
                summary.batches,
                if summary.batches == 1 { "" } else { "es" }
            ),
            TaskStatus::SkippedMissingFile => info!(
                "   {}: skipped ({} not found)",
                task.collection,
                task.file.display()
            ),
        }
    }
    print_counters(&report.stats);
}

fn print_counters(stats: &ImportStats) {
    let total_warnings = stats.total_warnings();
    if total_warnings > 0 {
        info!("Warning Counts ({} total):", total_warnings);
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                info!("   {}: {}", warning_type.as_str(), count);
            }
        }
    }

    let total_info = stats.total_info();
    if total_info > 0 {
        info!("Info Counts ({} total):", total_info);
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}
