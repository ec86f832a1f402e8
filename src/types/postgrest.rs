use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Error body returned by PostgREST on non-2xx responses.
///
/// ```json
/// {"code":"PGRST205","details":null,"hint":null,"message":"Could not find the table ..."}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PostgrestError {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl fmt::Display for PostgrestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " [code: {code}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Rows returned by a successful select.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub data: Vec<Value>,
}
