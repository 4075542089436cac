//! User-facing console output. The run summary is deliberately separate
//! from the tracing log stream: these lines are the product of the tool,
//! logs are diagnostics.

use std::io::Write;

pub fn report_generated(file_name: &str) {
    println!("✅ {file_name}.cs generated");
}

pub fn report_skipped(type_name: &str) {
    println!("   interface for {type_name} wasn't generated");
}

pub fn report_warning(message: &str) {
    println!("⚠️  {message}");
}

pub fn print_result(success: bool) {
    if success {
        println!("✅ interface files generated properly");
    } else {
        println!("❌ interface generation failure");
    }
}

/// Offers the annotation cleanup after a successful run. Returns whether
/// the user typed the confirmation word.
pub fn confirm_cleanup() -> bool {
    println!("-----------------------------------------------------------------------------");
    print!("type \"clean\" to remove all marker annotations from the source classes, or press Enter to keep them: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim() == "clean"
}
