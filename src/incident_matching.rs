use crate::models::IncidentRecord;

/// Splits a rail `LinesAffected` value such as `"BL; YL;"` into line codes.
pub fn parse_lines_affected(lines_affected: &str) -> Vec<String> {
    lines_affected
        .split(';')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the incidents that affect at least one of `codes`, in feed order.
///
/// Works for both feeds: rail incidents carry line codes, bus incidents carry
/// route codes. An incident touching several requested codes is returned once.
pub fn relevant_incidents<S: AsRef<str>>(
    codes: &[S],
    incidents: &[IncidentRecord],
) -> Vec<IncidentRecord> {
    incidents
        .iter()
        .filter(|incident| incident.affects_any(codes))
        .cloned()
        .collect()
}
