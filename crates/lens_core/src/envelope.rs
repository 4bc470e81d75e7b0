use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Dispatch key of a [`ResponseEnvelope`].
///
/// Anything other than `success` or `info` is handled as an error; the raw
/// value of an unexpected status is kept so it can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum ResponseStatus {
    Success,
    Info,
    #[default]
    Error,
    Unrecognized(String),
}

impl From<Value> for ResponseStatus {
    fn from(value: Value) -> Self {
        match value {
            Value::String(status) => match status.as_str() {
                "success" => ResponseStatus::Success,
                "info" => ResponseStatus::Info,
                "error" => ResponseStatus::Error,
                _ => ResponseStatus::Unrecognized(status),
            },
            other => ResponseStatus::Unrecognized(other.to_string()),
        }
    }
}

/// Top-level JSON object returned by the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(default)]
    pub status: ResponseStatus,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<FindingRecord>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub excel_filename: Option<String>,
}

impl ResponseEnvelope {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Server message, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|text| !text.is_empty())
    }

    pub fn excel_filename(&self) -> Option<&str> {
        self.excel_filename.as_deref().filter(|name| !name.is_empty())
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// One extracted allegation.
///
/// Every field is optional and may hold any JSON value; malformed fields are
/// rendered with a placeholder instead of rejecting the record. Records that
/// are not JSON objects deserialize with every field absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct FindingRecord {
    pub product_name: Option<Value>,
    pub allegation_category: Option<Value>,
    pub allegation_summary: Option<Value>,
    pub involved_parties: Option<Value>,
    pub pin_cite_page: Option<Value>,
    pub pin_cite_paragraph: Option<Value>,
}

impl From<Value> for FindingRecord {
    fn from(value: Value) -> Self {
        let Value::Object(mut fields) = value else {
            return Self::default();
        };
        let mut take = |key: &str| fields.remove(key).filter(|value| !value.is_null());
        Self {
            product_name: take("Product_Name"),
            allegation_category: take("Allegation_Category"),
            allegation_summary: take("Specific_Allegation_Summary"),
            involved_parties: take("Involved_Defendants_CoConspirators"),
            pin_cite_page: take("Pin_Cite_Page"),
            pin_cite_paragraph: take("Pin_Cite_Paragraph"),
        }
    }
}
