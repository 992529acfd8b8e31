use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

// 仪表盘查询参数
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

impl DashboardQuery {
    /// `YYYY-MM-DD`，缺省或无法解析时取今天
    pub fn date_or(&self, today: NaiveDate) -> NaiveDate {
        match self.date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .unwrap_or_else(|_| {
                    debug!("Ignoring unparsable dashboard date {raw:?}");
                    today
                }),
            _ => today,
        }
    }
}

/// 当天 [00:00, 次日 00:00)，UTC
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    let end = date
        .checked_add_days(Days::new(1))
        .map(|next| next.and_time(chrono::NaiveTime::MIN).and_utc())
        .unwrap_or(start);
    (start, end)
}

/// 所在周的周一 00:00，UTC
pub fn week_start(date: NaiveDate) -> DateTime<Utc> {
    let monday = date.week(chrono::Weekday::Mon).first_day();
    monday.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_parsing_falls_back_to_today() {
        let today = date(2024, 5, 8);
        let query = |raw: Option<&str>| DashboardQuery {
            date: raw.map(str::to_string),
        };
        assert_eq!(query(None).date_or(today), today);
        assert_eq!(query(Some("2024-02-29")).date_or(today), date(2024, 2, 29));
        assert_eq!(query(Some("29/02/2024")).date_or(today), today);
        assert_eq!(query(Some("")).date_or(today), today);
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-05-08 是周三
        let start = week_start(date(2024, 5, 8));
        assert_eq!(start.date_naive(), date(2024, 5, 6));
        assert_eq!(week_start(date(2024, 5, 12)).date_naive(), date(2024, 5, 6));
    }

    #[test]
    fn test_day_bounds() {
        let (start, end) = day_bounds(date(2024, 12, 31));
        assert_eq!(start.date_naive(), date(2024, 12, 31));
        assert_eq!(end.date_naive(), date(2025, 1, 1));
    }
}
