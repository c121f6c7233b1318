use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON body returned for every failed request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self { error: error.into(), code, message: message.into() }
    }
}
