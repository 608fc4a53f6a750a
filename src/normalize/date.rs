use chrono::NaiveDate;

/// Formats seen in the `date_mise_en_service` column across exports. The
/// column mixes plain ISO dates, slashed dates and full datetimes.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Best-effort parse of a commissioning date. Returns `None` for anything
/// unrecognized; a single bad date must not abort the run.
pub fn parse_install_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // Datetimes: keep the date part only.
    let s = s.split(['T', ' ']).next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
