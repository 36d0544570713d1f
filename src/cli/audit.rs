//! `audit` command: show the most recent audit log entries

use crate::audit::AuditLogger;
use crate::config::LedgerPaths;
use crate::error::LedgerResult;

pub fn handle_audit(paths: &LedgerPaths, count: usize) -> LedgerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    print!("{}", format_recent(&logger, count)?);
    Ok(())
}

fn format_recent(logger: &AuditLogger, count: usize) -> LedgerResult<String> {
    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        return Ok("No audit entries.\n".to_string());
    }

    let mut output = String::new();
    for entry in entries.iter().rev() {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    Ok(output)
}
