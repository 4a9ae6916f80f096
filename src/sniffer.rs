/// Shape of a test case's data source payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Inline,
    SharedReference,
    Unknown,
}

impl PayloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadFormat::Inline => "inline",
            PayloadFormat::SharedReference => "shared-reference",
            PayloadFormat::Unknown => "unknown",
        }
    }
}

/// Classifies by the outer brackets only. Nothing is validated here.
pub fn classify(raw: &str) -> PayloadFormat {
    let trimmed = raw.trim();
    if is_json_shaped(trimmed) {
        PayloadFormat::SharedReference
    } else if trimmed.starts_with('<') && trimmed.ends_with('>') {
        PayloadFormat::Inline
    } else {
        PayloadFormat::Unknown
    }
}

fn is_json_shaped(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}
