use std::fmt;

/// One rating scale: a named question with anchor labels and configurable
/// numeric bounds. Bounds differ between revisions of the scales, so they
/// are parameters here, never constants.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub name: String,
    pub question: String,
    pub anchors: (String, String),
    pub low: u8,
    pub high: u8,
}

impl Prompt {
    pub fn new(
        name: impl Into<String>,
        question: impl Into<String>,
        anchors: (impl Into<String>, impl Into<String>),
        low: u8,
        high: u8,
    ) -> Self {
        Self {
            name: name.into(),
            question: question.into(),
            anchors: (anchors.0.into(), anchors.1.into()),
            low,
            high,
        }
    }

    pub fn accepts(&self, value: u8) -> bool {
        self.low <= value && value <= self.high
    }
}

/// A single captured answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseValue {
    Number(f64),
    Flag(bool),
    Choice(String),
}

impl fmt::Display for ResponseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseValue::Number(n) => write!(f, "{n}"),
            ResponseValue::Flag(b) => write!(f, "{b}"),
            ResponseValue::Choice(s) => write!(f, "{s}"),
        }
    }
}

/// Everything the ledger stores about one completed trial: its order
/// index, the identifying fields of the condition record it came from,
/// and the captured responses. Written exactly once, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub order: usize,
    pub info: Vec<(String, String)>,
    pub responses: Vec<(String, ResponseValue)>,
}

impl ResponseRecord {
    pub fn new(order: usize) -> Self {
        Self {
            order,
            info: Vec::new(),
            responses: Vec::new(),
        }
    }

    pub fn with_info(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.info.push((name.into(), value.into()));
        self
    }

    pub fn with_response(mut self, name: impl Into<String>, value: ResponseValue) -> Self {
        self.responses.push((name.into(), value));
        self
    }

    pub fn response(&self, name: &str) -> Option<&ResponseValue> {
        self.responses
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Looks a ledger column up, info fields first, then responses.
    pub fn cell(&self, column: &str) -> Option<String> {
        if column == "order" {
            return Some(self.order.to_string());
        }
        if let Some((_, value)) = self.info.iter().find(|(key, _)| key == column) {
            return Some(value.clone());
        }
        self.response(column).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_bounds_are_inclusive() {
        let prompt = Prompt::new("rating", "q", ("low", "high"), 0, 4);
        assert!(prompt.accepts(0));
        assert!(prompt.accepts(4));
        assert!(!prompt.accepts(5));
    }

    #[test]
    fn cell_lookup_prefers_info_then_responses() {
        let rec = ResponseRecord::new(3)
            .with_info("id", "d07")
            .with_response("rating", ResponseValue::Number(7.0));
        assert_eq!(rec.cell("order"), Some("3".to_string()));
        assert_eq!(rec.cell("id"), Some("d07".to_string()));
        assert_eq!(rec.cell("rating"), Some("7".to_string()));
        assert_eq!(rec.cell("missing"), None);
    }
}
