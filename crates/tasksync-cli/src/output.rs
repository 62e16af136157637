//! Output formatting for human and JSON modes

use tasksync_core::domain::{Filter, ListEntry};
use tasksync_sync::snapshot::ListSnapshot;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Trait for formatting CLI output
pub trait OutputFormatter {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    fn info(&self, message: &str);
    fn print_json(&self, value: &serde_json::Value);
}

/// Human-readable output formatter with checkmarks and indentation
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        println!("\u{2713} {}", message);
    }
    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {}", message);
    }
    fn warn(&self, message: &str) {
        eprintln!("\u{26a0} Warning: {}", message);
    }
    fn info(&self, message: &str) {
        println!("  {}", message);
    }
    fn print_json(&self, _value: &serde_json::Value) {}
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!(
            "{}",
            serde_json::json!({"success": true, "message": message})
        );
    }
    fn error(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"success": false, "error": message})
        );
    }
    fn warn(&self, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({"level": "warning", "message": message})
        );
    }
    fn info(&self, _message: &str) {}
    fn print_json(&self, value: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_default()
        );
    }
}

pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(HumanFormatter)
    }
}

// ============================================================================
// List rendering
// ============================================================================

/// One line per visible row, the placeholder last
pub fn list_lines(snapshot: &ListSnapshot, filter: Filter) -> Vec<String> {
    snapshot
        .entries(filter)
        .iter()
        .map(|entry| match entry {
            ListEntry::Confirmed(item) => {
                let mark = if item.completed { "[x]" } else { "[ ]" };
                let busy = if snapshot.is_busy(item.id) { " (saving)" } else { "" };
                format!("{mark} {:>4}  {}{busy}", item.id.as_u64(), item.title)
            }
            ListEntry::Pending(pending) => format!("[ ]    -  {} (saving)", pending.title()),
        })
        .collect()
}

/// Footer with the number of active items
pub fn items_left_line(snapshot: &ListSnapshot) -> String {
    format!("{} items left", snapshot.items_left())
}

/// JSON document describing the visible list
pub fn list_json(snapshot: &ListSnapshot, filter: Filter) -> serde_json::Value {
    serde_json::json!({
        "filter": filter.to_string(),
        "items": snapshot.entries(filter),
        "items_left": snapshot.items_left(),
        "has_completed": snapshot.has_completed(),
        "all_completed": snapshot.all_completed(),
        "notification": snapshot.notification,
    })
}
