//! Report filenames

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Day-first local date and time, e.g. `16/10/2026, 14:05:09`
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// `<brand>_Report_<timestamp>.pdf` with path-unsafe characters replaced
pub fn report_filename<Tz>(brand: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let stamp = path_safe(&at.format(TIMESTAMP_FORMAT).to_string());
    format!("{}_Report_{stamp}.pdf", path_safe(brand.trim()))
}

fn path_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '-',
            ',' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_filename_is_path_safe() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 9).unwrap();
        assert_eq!(report_filename("Acme", &at), "Acme_Report_16-10-2026__14-05-09.pdf");
    }

    #[test]
    fn test_brand_is_made_path_safe() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 9).unwrap();
        let name = report_filename("Acme Corp/EU", &at);
        assert_eq!(name, "Acme_Corp-EU_Report_16-10-2026__14-05-09.pdf");
        assert!(!name.contains(['/', '\\', ':']));
        assert_eq!(
            report_filename(r"Acme\Lab: Norte", &at),
            "Acme-Lab-_Norte_Report_16-10-2026__14-05-09.pdf"
        );
    }

    #[test]
    fn test_filename_uses_given_offset() {
        let madrid = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = Utc
            .with_ymd_and_hms(2026, 10, 16, 23, 30, 0)
            .unwrap()
            .with_timezone(&madrid);
        assert_eq!(report_filename("Acme", &at), "Acme_Report_17-10-2026__01-30-00.pdf");
    }
}
