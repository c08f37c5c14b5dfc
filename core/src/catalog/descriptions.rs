//! Human-readable labels for every known alert clip.
//!
//! Keyed by filename. A clip without an entry here is never listed by the
//! catalog loader.

use phf::phf_map;

use crate::Category;

pub static WARNING_DESCRIPTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "Abnormal_activity.m4a" => "ABNORMAL ACTIVITY",
    "Critical_error.m4a" => "CRITICAL ERROR",
    "Execution_error.m4a" => "EXECUTION ERROR",
    "Fatal_error.m4a" => "FATAL ERROR",
    "System_warning.m4a" => "SYSTEM WARNING",
    "Unusual_activity.m4a" => "UNUSUAL ACTIVITY",
    "Warning.m4a" => "GENERAL WARNING",
};

pub static MESSAGE_DESCRIPTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "Program completed.m4a" => "PROGRAM COMPLETED",
    "Program stopped.m4a" => "PROGRAM STOPPED",
    "Program crashed.m4a" => "PROGRAM FAILED",
    "Program started.m4a" => "PROGRAM STARTED",
};

pub static REASON_DESCRIPTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "Potential crash.m4a" => "POTENTIAL CRASH",
    "Stopped by user.m4a" => "STOPPED BY USER",
    "System error.m4a" => "SYSTEM ERROR",
    "Task completed.m4a" => "TASK COMPLETED",
    "Task failed.m4a" => "TASK FAILED",
    "Unknown.m4a" => "UNKNOWN ISSUE",
};

/// Description table for a category
pub fn table(category: Category) -> &'static phf::Map<&'static str, &'static str> {
    match category {
        Category::Warning => &WARNING_DESCRIPTIONS,
        Category::Message => &MESSAGE_DESCRIPTIONS,
        Category::Reason => &REASON_DESCRIPTIONS,
    }
}

/// Look up the label for a clip filename
pub fn describe(category: Category, clip: &str) -> Option<&'static str> {
    table(category).get(clip).copied()
}
