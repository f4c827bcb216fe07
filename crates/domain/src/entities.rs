use std::fmt;

use serde::{Deserialize, Serialize};

/// One tracked participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub age: u32,
    pub wallet_address: String,
    pub attendance_count: u64,
}

impl Student {
    pub fn new(name: String, age: u32, wallet_address: String) -> Self {
        Self {
            name,
            age,
            wallet_address,
            attendance_count: 0,
        }
    }

    pub fn take_attendance(&mut self) {
        self.attendance_count += 1;
    }

    /// Case-insensitive address match.
    pub fn has_address(&self, address: &str) -> bool {
        self.wallet_address.eq_ignore_ascii_case(address)
    }

    pub fn summary(&self) -> StudentSummary<'_> {
        StudentSummary {
            name: &self.name,
            age: self.age,
            wallet_address: &self.wallet_address,
        }
    }
}

/// Listing projection of a [`Student`]; attendance is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentSummary<'a> {
    pub name: &'a str,
    pub age: u32,
    pub wallet_address: &'a str,
}

/// Decoded `advance_state` instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateRecord {
        name: String,
        age: u32,
        wallet_address: String,
    },
    /// The address is the request's `msg_sender`, never a payload field.
    MarkAttendance,
    DeleteRecord {
        wallet_address: String,
    },
    Unknown {
        raw: String,
    },
}

/// Decoded `inspect_state` route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    ListAll,
    GetByAddress { address: String },
    UnknownRoute { raw: String },
}

/// Event sent back to the rollup server after handling a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// Durable, part of the verifiable output of an accepted input
    Notice { text: String },
    /// Ephemeral diagnostics and query results
    Report { text: String },
}

impl OutboundEvent {
    pub fn notice<S: Into<String>>(text: S) -> Self {
        Self::Notice { text: text.into() }
    }

    pub fn report<S: Into<String>>(text: S) -> Self {
        Self::Report { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            OutboundEvent::Notice { text } | OutboundEvent::Report { text } => text,
        }
    }

    /// Rollup server endpoint the event is posted to.
    pub fn endpoint(&self) -> &'static str {
        match self {
            OutboundEvent::Notice { .. } => "notice",
            OutboundEvent::Report { .. } => "report",
        }
    }

    pub fn is_notice(&self) -> bool {
        matches!(self, OutboundEvent::Notice { .. })
    }

    pub fn is_report(&self) -> bool {
        matches!(self, OutboundEvent::Report { .. })
    }
}

/// Status reported to the rollup server with every `/finish` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishStatus {
    #[default]
    Accept,
    Reject,
}

impl fmt::Display for FinishStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishStatus::Accept => write!(f, "accept"),
            FinishStatus::Reject => write!(f, "reject"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_has_no_attendance() {
        let student = Student::new("Alice".to_string(), 20, "0xAAA".to_string());
        assert_eq!(student.attendance_count, 0);
    }

    #[test]
    fn test_has_address_ignores_case() {
        let student = Student::new("Alice".to_string(), 20, "0xAbC".to_string());
        assert!(student.has_address("0xabc"));
        assert!(student.has_address("0XABC"));
        assert!(!student.has_address("0xabd"));
    }

    #[test]
    fn test_summary_serialization_excludes_attendance() {
        let mut student = Student::new("Alice".to_string(), 20, "0xAAA".to_string());
        student.take_attendance();

        let json = serde_json::to_value(student.summary()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Alice", "age": 20, "wallet_address": "0xAAA"})
        );
    }

    #[test]
    fn test_finish_status_serialization() {
        assert_eq!(
            serde_json::to_string(&FinishStatus::Accept).unwrap(),
            "\"accept\""
        );
        assert_eq!(
            serde_json::to_string(&FinishStatus::Reject).unwrap(),
            "\"reject\""
        );
        assert_eq!(FinishStatus::default(), FinishStatus::Accept);
    }

    #[test]
    fn test_event_endpoints() {
        assert_eq!(OutboundEvent::notice("done").endpoint(), "notice");
        assert_eq!(OutboundEvent::report("oops").endpoint(), "report");
        assert_eq!(OutboundEvent::report("oops").text(), "oops");
    }
}
