use chrono::NaiveDateTime;

/// Length of `YYYY-MM-DDTHH:MM:SS`; anything after it (fraction, offset) is ignored.
const SIGNIFICANT_LEN: usize = 19;
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses the API's `date` field, yielding `None` for anything that does not fit the format.
pub fn parse_publication_date(raw: &str) -> Option<NaiveDateTime> {
    let head = raw.get(..SIGNIFICANT_LEN)?;
    NaiveDateTime::parse_from_str(head, DATE_FORMAT).ok()
}
