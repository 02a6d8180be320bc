use chrono::{DateTime, Utc};
use web_sys::window;

/// Read the Live API key from the page URL's `key` query parameter.
pub fn api_key_from_location() -> Option<String> {
    let search = window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("key").filter(|key| !key.is_empty())
}

/// Wall-clock formatting used by the transcript pane.
pub fn format_clock(date: &DateTime<Utc>) -> String {
    date.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_clock() {
        let date = Utc.with_ymd_and_hms(2025, 1, 2, 9, 5, 7).unwrap();
        assert_eq!(format_clock(&date), "09:05:07");
    }
}
