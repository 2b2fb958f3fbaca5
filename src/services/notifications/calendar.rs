//! 日历邀请链接

use chrono::{DateTime, Utc};
use serde::Serialize;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_CALENDAR_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLinks {
    pub google: String,
    pub outlook: String,
}

impl CalendarLinks {
    pub fn build(title: &str, details: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let google = format!(
            "{GOOGLE_CALENDAR_URL}?action=TEMPLATE&text={}&dates={}/{}&details={}",
            urlencoding::encode(title),
            google_time(start),
            google_time(end),
            urlencoding::encode(details),
        );

        let outlook = format!(
            "{OUTLOOK_CALENDAR_URL}?path=%2Fcalendar%2Faction%2Fcompose&rru=addevent&subject={}&startdt={}&enddt={}&body={}",
            urlencoding::encode(title),
            urlencoding::encode(&start.to_rfc3339()),
            urlencoding::encode(&end.to_rfc3339()),
            urlencoding::encode(details),
        );

        Self { google, outlook }
    }
}

// Google 日历要求 UTC 基本格式，如 20250310T100000Z
fn google_time(time: DateTime<Utc>) -> String {
    time.format("%Y%m%dT%H%M%SZ").to_string()
}
