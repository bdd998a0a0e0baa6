use ::chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

static DATE_FORMAT: &str = "%Y-%m-%d";
static TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A positional query parameter.
#[derive(Clone, Debug, Eq, From, Hash, IsVariant, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

/// The type a filter column expects its parameter to have.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IsVariant, PartialEq)]
pub enum ValueKind {
    #[display("integer")]
    Integer,
    #[display("text")]
    Text,
    #[display("date")]
    Date,
    #[display("timestamp")]
    Timestamp,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl SqlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
            Self::Date(_) => ValueKind::Date,
            Self::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Converts the value into `kind`, returning `None` when it cannot be
    /// represented as one. Blank text never coerces.
    pub fn coerce(self, kind: ValueKind) -> Option<Self> {
        if let Self::Text(text) = &self {
            if text.trim().is_empty() {
                return None;
            }
        }
        match (self, kind) {
            (value @ Self::Integer(_), ValueKind::Integer) => Some(value),
            (Self::Text(text), ValueKind::Integer) => text.trim().parse().ok().map(Self::Integer),

            (Self::Text(text), ValueKind::Text) => Some(Self::Text(text.trim().to_owned())),
            (Self::Integer(value), ValueKind::Text) => Some(Self::Text(value.to_string())),

            (value @ Self::Date(_), ValueKind::Date) => Some(value),
            (Self::Timestamp(value), ValueKind::Date) => Some(Self::Date(value.date())),
            (Self::Text(text), ValueKind::Date) => parse_date(text.trim())
                .or_else(|| parse_timestamp(text.trim()).map(|value| value.date()))
                .map(Self::Date),

            (value @ Self::Timestamp(_), ValueKind::Timestamp) => Some(value),
            (Self::Date(value), ValueKind::Timestamp) => Some(Self::Timestamp(value.and_time(NaiveTime::MIN))),
            (Self::Text(text), ValueKind::Timestamp) => parse_timestamp(text.trim())
                .or_else(|| parse_date(text.trim()).map(|value| value.and_time(NaiveTime::MIN)))
                .map(Self::Timestamp),

            _ => None,
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn text_coerces_to_integer() {
        assert_eq!(SqlValue::from(" 42 ").coerce(ValueKind::Integer), Some(SqlValue::Integer(42)));
        assert_eq!(SqlValue::from("forty-two").coerce(ValueKind::Integer), None);
        assert_eq!(SqlValue::from("4.2").coerce(ValueKind::Integer), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(SqlValue::from("   ").coerce(ValueKind::Text), None);
        assert_eq!(SqlValue::from("").coerce(ValueKind::Integer), None);
    }

    #[test]
    fn text_coerces_to_dates() {
        assert_eq!(
            SqlValue::from("2024-03-01").coerce(ValueKind::Date),
            Some(SqlValue::Date(date(2024, 3, 1)))
        );
        assert_eq!(
            SqlValue::from("2024-03-01T10:30:00Z").coerce(ValueKind::Date),
            Some(SqlValue::Date(date(2024, 3, 1)))
        );
        assert_eq!(
            SqlValue::from("2024-03-01").coerce(ValueKind::Timestamp),
            Some(SqlValue::Timestamp(date(2024, 3, 1).and_time(NaiveTime::MIN)))
        );
        assert_eq!(SqlValue::from("03/01/2024").coerce(ValueKind::Date), None);
    }

    #[test]
    fn mismatched_kinds_do_not_coerce() {
        assert_eq!(SqlValue::Date(date(2024, 3, 1)).coerce(ValueKind::Integer), None);
        assert_eq!(SqlValue::Integer(7).coerce(ValueKind::Date), None);
        assert_eq!(SqlValue::Integer(7).coerce(ValueKind::Text), Some(SqlValue::from("7")));
    }

    #[test]
    fn coerced_values_have_the_requested_kind() {
        for kind in [ValueKind::Integer, ValueKind::Text, ValueKind::Date, ValueKind::Timestamp] {
            let value = SqlValue::from("2024-03-01").coerce(kind);
            match kind {
                ValueKind::Integer => assert_eq!(value, None),
                _ => assert_eq!(value.map(|value| value.kind()), Some(kind)),
            }
        }
    }
}
