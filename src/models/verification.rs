use std::fmt;

use serde::{ Deserialize, Serialize };

/// Verdict text stored when the LLM call for a fact fails
pub const VERIFICATION_ERROR_SENTINEL: &str = "Error: Unable to get response";

/// Outcome of adjudicating a fact against the fetched evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictLabel {
    Proved,
    Refuted,
    Unclear,
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictLabel::Proved => write!(f, "Proved"),
            VerdictLabel::Refuted => write!(f, "Refuted"),
            VerdictLabel::Unclear => write!(f, "Unclear"),
        }
    }
}

/// Structured reading of the engine's formatted verdict text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub reasoning: String,
    pub label: VerdictLabel,
    pub sources: Vec<String>,
    /// 0-100, absent when the model did not give a score
    pub confidence: Option<u8>,
}

/// One verified fact: the terminal artifact of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub fact: String,
    pub related_search: String,
    /// Raw text as returned by the verification engine
    pub verdict: String,
    /// Parsed form of `verdict`; `None` when the text did not follow the format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<Verdict>,
}

impl Verification {
    pub fn new(fact: impl Into<String>, related_search: impl Into<String>, verdict: String) -> Self {
        let assessment = Verdict::parse(&verdict);
        Self {
            fact: fact.into(),
            related_search: related_search.into(),
            verdict,
            assessment,
        }
    }

    pub fn label(&self) -> Option<VerdictLabel> {
        self.assessment.as_ref().map(|a| a.label)
    }

    /// True when the engine substituted the failure sentinel for this fact
    pub fn is_error(&self) -> bool {
        self.verdict == VERIFICATION_ERROR_SENTINEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Reasoning,
    Verdict,
    Sources,
    Confidence,
}

impl Verdict {
    /// Parse the `Reasoning / Verdict / Sources / Confidence Score` layout.
    ///
    /// Markdown emphasis, list numbering and multi-line sections are tolerated.
    /// Returns `None` when no verdict label can be found.
    pub fn parse(text: &str) -> Option<Verdict> {
        let mut reasoning = String::new();
        let mut verdict = String::new();
        let mut sources = String::new();
        let mut confidence = String::new();
        let mut current: Option<Field> = None;

        for line in text.lines() {
            let cleaned = clean_line(line);
            if cleaned.is_empty() {
                continue;
            }

            let (field, rest) = match split_field(&cleaned) {
                Some((field, rest)) => {
                    current = Some(field);
                    (field, rest)
                }
                None =>
                    match current {
                        Some(field) => (field, cleaned.as_str()),
                        None => {
                            continue;
                        }
                    }
            };

            let buffer = match field {
                Field::Reasoning => &mut reasoning,
                Field::Verdict => &mut verdict,
                Field::Sources => &mut sources,
                Field::Confidence => &mut confidence,
            };
            let rest = rest.trim();
            if !rest.is_empty() {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(rest);
            }
        }

        let label = parse_label(&verdict)?;

        Some(Verdict {
            reasoning,
            label,
            sources: parse_sources(&sources),
            confidence: parse_confidence(&confidence),
        })
    }
}

fn clean_line(line: &str) -> String {
    let trimmed = line
        .trim()
        .trim_start_matches(|c: char| c == '*' || c == '#' || c == '-' || c.is_whitespace());
    // "1. **Short Reasoning**: ..." style numbering
    let without_number = match trimmed.find(". ") {
        Some(idx) if idx > 0 && trimmed[..idx].chars().all(|c| c.is_ascii_digit()) =>
            &trimmed[idx + 2..],
        _ => trimmed,
    };
    without_number.replace("**", "").trim().to_string()
}

fn split_field(line: &str) -> Option<(Field, &str)> {
    let colon = line.find(':')?;
    let head = line[..colon].to_lowercase();
    if head.len() > 40 {
        return None;
    }
    let field = if head.contains("reasoning") {
        Field::Reasoning
    } else if head.contains("verdict") {
        Field::Verdict
    } else if head.contains("source") {
        Field::Sources
    } else if head.contains("confidence") {
        Field::Confidence
    } else {
        return None;
    };
    Some((field, &line[colon + 1..]))
}

fn parse_label(text: &str) -> Option<VerdictLabel> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();
    for (idx, word) in words.iter().enumerate() {
        let negated = idx > 0 && matches!(words[idx - 1], "not" | "never");
        let label = match *word {
            "proved" | "proven" if negated => VerdictLabel::Unclear,
            "proved" | "proven" => VerdictLabel::Proved,
            "refuted" | "disproved" | "disproven" if negated => VerdictLabel::Unclear,
            "refuted" | "disproved" | "disproven" => VerdictLabel::Refuted,
            "unclear" | "unproved" | "unproven" => VerdictLabel::Unclear,
            _ => {
                continue;
            }
        };
        return Some(label);
    }
    None
}

fn parse_sources(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == ';')
        .map(|s| s.trim().trim_matches('"').trim())
        .filter(|s| !s.is_empty())
        .filter(|s| !s.eq_ignore_ascii_case("none") && !s.eq_ignore_ascii_case("n/a"))
        .map(str::to_string)
        .collect()
}

/// Reads the leading number; fractions up to 1.0 are taken as a 0-1 scale
fn parse_confidence(text: &str) -> Option<u8> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let number: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let number = number.trim_end_matches('.');
    let value = number.parse::<f64>().ok()?;
    let scaled = if number.contains('.') && value <= 1.0 { value * 100.0 } else { value };
    Some(scaled.round().min(100.0) as u8)
}
