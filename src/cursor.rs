use crate::{Comparison, CursorError};
use ::base64::alphabet::URL_SAFE;
use ::base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use ::base64::Engine;
use ::serde_json::{Map, Value};

/// URL-safe alphabet, unpadded on output; decoding accepts padded tokens too.
const CURSOR_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The decoded form of an opaque pagination token: the ordering-key value of
/// the last row of the page that produced it.
///
/// On the wire a cursor is the base64 of a single-entry JSON object, e.g.
/// `{"drug_exposure_id":321}` encodes as `eyJkcnVnX2V4cG9zdXJlX2lkIjozMjF9`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PageCursor {
    pub key: String,
    pub value: i64,
}

impl PageCursor {
    pub fn new(key: impl Into<String>, value: i64) -> Self {
        Self { key: key.into(), value }
    }

    pub fn encode(&self) -> String {
        let mut object = Map::with_capacity(1);
        object.insert(self.key.clone(), Value::from(self.value));
        CURSOR_ENGINE.encode(Value::Object(object).to_string())
    }

    /// Decodes a token, returning `None` for anything malformed. Never panics.
    pub fn decode(token: &str) -> Option<Self> {
        Self::try_decode(token).ok()
    }

    pub fn try_decode(token: &str) -> Result<Self, CursorError> {
        let bytes = CURSOR_ENGINE
            .decode(token.trim())
            .map_err(|_| CursorError::InvalidEncoding)?;
        let object: Map<String, Value> =
            ::serde_json::from_slice(&bytes).map_err(|err| CursorError::InvalidJson(err.to_string()))?;
        if object.len() != 1 {
            return Err(CursorError::UnexpectedShape);
        }
        match object.into_iter().next() {
            Some((key, value)) => value
                .as_i64()
                .map(|value| Self { key, value })
                .ok_or(CursorError::UnexpectedShape),
            None => Err(CursorError::UnexpectedShape),
        }
    }

    /// Returns the cursor's value if it was issued for `key`.
    pub fn value_for(&self, key: &str) -> Result<i64, CursorError> {
        if self.key == key {
            Ok(self.value)
        } else {
            Err(CursorError::KeyMismatch {
                expected: key.to_owned(),
                found: self.key.clone(),
            })
        }
    }
}

/// Fixed ordering direction of an entity's ordering key.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IsVariant, PartialEq)]
pub enum SortDirection {
    #[display("ASC")]
    Ascending,
    #[display("DESC")]
    Descending,
}

impl SortDirection {
    /// The comparison that selects rows strictly after a cursor in this order.
    pub fn cursor_comparison(self) -> Comparison {
        match self {
            Self::Ascending => Comparison::Greater,
            Self::Descending => Comparison::Less,
        }
    }
}
