use crate::domain::assumptions::{Field, FieldValue};
use crate::domain::inputs::DashboardInputs;

pub const PENDING_MARKER: &str = "(pending)";

/// A field is pending while a sync is queued and its raw value still
/// differs from the committed one.
pub fn is_field_pending(
    field: Field,
    raw: &DashboardInputs,
    committed: &DashboardInputs,
    debouncing: bool,
) -> bool {
    debouncing && raw.differs(committed, field)
}

pub fn format_field_value(value: FieldValue) -> String {
    match value {
        FieldValue::Count(None) => "(empty)".to_string(),
        other => other.to_string(),
    }
}

/// Renders one editable line: label, raw value, pending marker.
pub fn render_field(
    field: Field,
    raw: &DashboardInputs,
    committed: &DashboardInputs,
    debouncing: bool,
) -> String {
    let value = format_field_value(raw.get(field));
    let line = format!("  {:<30} {value}", format!("{}:", field.label()));
    if is_field_pending(field, raw, committed, debouncing) {
        format!("{line} {PENDING_MARKER}")
    } else {
        line
    }
}

pub fn render_assumptions_input(
    raw: &DashboardInputs,
    committed: &DashboardInputs,
    debouncing: bool,
) -> String {
    let mut lines = vec!["Inventory Assumptions".to_string()];
    lines.extend(
        Field::ASSUMPTIONS
            .iter()
            .map(|field| render_field(*field, raw, committed, debouncing)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_requires_group_flag_and_difference() {
        let committed = DashboardInputs::default();
        let mut raw = committed;
        raw.edit(Field::HoldingCost, "2.25").unwrap();

        assert!(is_field_pending(Field::HoldingCost, &raw, &committed, true));
        assert!(!is_field_pending(Field::HoldingCost, &raw, &committed, false));
        assert!(!is_field_pending(Field::OrderingCost, &raw, &committed, true));
    }

    #[test]
    fn render_marks_only_changed_fields() {
        let committed = DashboardInputs::default();
        let mut raw = committed;
        raw.edit(Field::ServiceLevel, "97.5").unwrap();

        let output = render_assumptions_input(&raw, &committed, true);
        let service_line = output
            .lines()
            .find(|line| line.contains("Service Level"))
            .unwrap();
        assert!(service_line.contains("97.5"));
        assert!(service_line.ends_with(PENDING_MARKER));

        let lead_line = output.lines().find(|line| line.contains("Lead Time")).unwrap();
        assert!(!lead_line.contains(PENDING_MARKER));
    }

    #[test]
    fn empty_lead_time_is_shown_as_empty() {
        let committed = DashboardInputs::default();
        let mut raw = committed;
        raw.edit(Field::LeadTime, "").unwrap();

        let line = render_field(Field::LeadTime, &raw, &committed, true);
        assert!(line.contains("(empty) (pending)"));
    }
}
