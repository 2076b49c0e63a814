//! Formatted output helpers for CLI commands.

use tomcs_runtime::poller::BindingSnapshot;

/// Formats a binding snapshot as aligned `id  value` lines.
///
/// Multi-line values are indented under their id.
#[must_use]
pub fn format_snapshot(snapshot: &BindingSnapshot) -> String {
    let width = snapshot.keys().map(|id| id.chars().count()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(snapshot.len());
    for (id, value) in snapshot {
        let mut rows = value.lines();
        let first = rows.next().unwrap_or("");
        lines.push(format!("{id:<width$}  {first}"));
        for row in rows {
            lines.push(format!("{:width$}  {row}", ""));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_values_after_longest_id() {
        let snapshot = BindingSnapshot::from([
            ("cpu".to_string(), "7%".to_string()),
            ("uptime".to_string(), "3 days".to_string()),
        ]);
        assert_eq!(format_snapshot(&snapshot), "cpu     7%\nuptime  3 days");
    }

    #[test]
    fn indents_multiline_values() {
        let snapshot = BindingSnapshot::from([("ls".to_string(), "a\nb".to_string())]);
        assert_eq!(format_snapshot(&snapshot), "ls  a\n    b");
    }

    #[test]
    fn empty_snapshot_is_empty_string() {
        assert_eq!(format_snapshot(&BindingSnapshot::new()), "");
    }
}
