use serde::Serialize;

/// 一条地理位置记录
///
/// `address` 是规范化后的 key，只用于内部，不出现在响应里。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRecord {
    #[serde(skip)]
    pub address: String,
    pub country: String,
    pub city: String,
}

impl LocationRecord {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

/// Unvalidated row as produced by a dataset source.
///
/// A well-formed row has exactly three fields: address, city, country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub fields: Vec<String>,
}

impl RawRecord {
    pub const FIELD_COUNT: usize = 3;

    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            fields: vec![address.into(), city.into(), country.into()],
        }
    }

    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Borrow the three fields, or `None` when the row has the wrong shape.
    pub fn as_triple(&self) -> Option<(&str, &str, &str)> {
        match self.fields.as_slice() {
            [address, city, country] => Some((address, city, country)),
            _ => None,
        }
    }
}

impl<A, C, K> From<(A, C, K)> for RawRecord
where
    A: Into<String>,
    C: Into<String>,
    K: Into<String>,
{
    fn from((address, city, country): (A, C, K)) -> Self {
        Self::new(address, city, country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_record_omits_address_on_the_wire() {
        let record = LocationRecord::new("8.8.8.8", "Mountain View", "United States");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"country":"United States","city":"Mountain View"}"#);
    }

    #[test]
    fn test_raw_record_shape() {
        assert!(RawRecord::new("1.1.1.1", "", "").as_triple().is_some());
        assert!(
            RawRecord::from_fields(vec!["1.1.1.1".into(), "x".into()])
                .as_triple()
                .is_none()
        );
    }
}
