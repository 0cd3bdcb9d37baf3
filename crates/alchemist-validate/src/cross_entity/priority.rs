use alchemist_model::{EntityKind, Finding, RowSet, Severity};

use super::{Pass, finding};

/// Share of clients at level 4-5 above which the mix is flagged.
const HIGH_PRIORITY_SHARE: f64 = 60.0;

pub(super) fn check(clients: &RowSet) -> Vec<Finding> {
    if clients.is_empty() {
        return Vec::new();
    }
    let mut counts = [0usize; 5];
    for row in &clients.rows {
        if let Some(level) = row.number("PriorityLevel").map(f64::trunc)
            && (1.0..=5.0).contains(&level)
        {
            counts[level as usize - 1] += 1;
        }
    }

    let mut findings = Vec::new();
    let share = (counts[3] + counts[4]) as f64 / clients.len() as f64 * 100.0;
    if share > HIGH_PRIORITY_SHARE {
        findings.push(finding(
            Pass::Priority,
            Severity::Warning,
            EntityKind::Client,
            None,
            "PriorityLevel",
            format!(
                "{share:.1}% of clients have high priority (4-5). This may impact scheduling efficiency."
            ),
            "Review priority assignments to ensure balanced workload distribution",
        ));
    }
    if counts[4] == 0 {
        findings.push(finding(
            Pass::Priority,
            Severity::Info,
            EntityKind::Client,
            None,
            "PriorityLevel",
            "No clients have critical priority (5). Consider if any clients need urgent attention."
                .to_string(),
            "Review if any clients should have critical priority",
        ));
    }
    findings
}
