use roster_domain::{Command, OutboundEvent, Query, Roster, Student};
use serde_json::json;
use tracing::{info, warn};

pub const FUNCTION_NOT_IMPLEMENTED: &str = "Function not implemented";

/// Applies a decoded command. `sender` is the request's `msg_sender`.
///
/// Unknown methods are only logged and produce no event; compare with
/// [`run_query`], where an unknown route does produce a report.
pub fn apply_command(roster: &mut Roster, command: Command, sender: &str) -> Option<OutboundEvent> {
    match command {
        Command::CreateRecord {
            name,
            age,
            wallet_address,
        } => Some(create_student(roster, name, age, wallet_address)),
        Command::MarkAttendance => Some(sign_attendance(roster, sender)),
        Command::DeleteRecord { wallet_address } => Some(delete_student(roster, &wallet_address)),
        Command::Unknown { raw } => {
            warn!("Unsupported method in payload: {:?}", raw);
            None
        }
    }
}

pub fn create_student(
    roster: &mut Roster,
    name: String,
    age: u32,
    wallet_address: String,
) -> OutboundEvent {
    let student = Student::new(name, age, wallet_address);
    info!(
        "New student added: {}, {}, {}",
        student.name, student.age, student.wallet_address
    );
    let text = format!("New student created: {}", json!(student));
    roster.insert(student);
    OutboundEvent::notice(text)
}

pub fn sign_attendance(roster: &mut Roster, wallet_address: &str) -> OutboundEvent {
    match roster.find_by_address_mut(wallet_address) {
        Some(student) => {
            student.take_attendance();
            info!(
                "{} has signed attendance, count is now {}",
                student.name, student.attendance_count
            );
            OutboundEvent::notice(format!("Attendance signed by: {wallet_address}"))
        }
        None => not_found(wallet_address),
    }
}

pub fn delete_student(roster: &mut Roster, wallet_address: &str) -> OutboundEvent {
    match roster.remove_by_address(wallet_address) {
        Some(student) => {
            info!("Student deleted: {}", student.wallet_address);
            OutboundEvent::notice(format!("Student deleted successfully: {wallet_address}"))
        }
        None => not_found(wallet_address),
    }
}

fn not_found(wallet_address: &str) -> OutboundEvent {
    info!("Student not found: {}", wallet_address);
    OutboundEvent::report(format!("Student not found: {wallet_address}"))
}

/// Runs a read-only query and returns the report text.
pub fn run_query(roster: &Roster, query: &Query) -> String {
    match query {
        Query::ListAll => list_students(roster),
        Query::GetByAddress { address } => get_student(roster, address),
        Query::UnknownRoute { raw } => {
            warn!("Unsupported route in payload: {:?}", raw);
            FUNCTION_NOT_IMPLEMENTED.to_string()
        }
    }
}

/// `{"students_list": [...]}` in roster order, without attendance counts.
pub fn list_students(roster: &Roster) -> String {
    let students_list: Vec<_> = roster.list().iter().map(Student::summary).collect();
    json!({ "students_list": students_list }).to_string()
}

/// `{"student": {...}}`, or `{"student": null}` when nobody has the address.
pub fn get_student(roster: &Roster, address: &str) -> String {
    json!({ "student": roster.find_by_address(address) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn roster_with(students: &[(&str, u32, &str)]) -> Roster {
        let mut roster = Roster::new();
        for (name, age, address) in students {
            roster.insert(Student::new(name.to_string(), *age, address.to_string()));
        }
        roster
    }

    #[test]
    fn test_create_appends_with_zero_attendance() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA")]);

        let event = create_student(&mut roster, "Bob".to_string(), 22, "0xBBB".to_string());

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.list()[1].name, "Bob");
        assert_eq!(roster.list()[1].attendance_count, 0);
        assert!(event.is_notice());
        let json = event.text().strip_prefix("New student created: ").unwrap();
        assert_eq!(
            serde_json::from_str::<Value>(json).unwrap(),
            serde_json::json!({"name": "Bob", "age": 22, "wallet_address": "0xBBB", "attendance_count": 0})
        );
    }

    #[test]
    fn test_create_does_not_reject_duplicate_address() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA")]);
        let event = create_student(&mut roster, "Eve".to_string(), 30, "0xaaa".to_string());

        assert!(event.is_notice());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_sign_attendance_only_touches_matching_student() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA"), ("Bob", 22, "0xBBB")]);

        let event = sign_attendance(&mut roster, "0xbbb");

        assert_eq!(event, OutboundEvent::notice("Attendance signed by: 0xbbb"));
        assert_eq!(roster.list()[0].attendance_count, 0);
        assert_eq!(roster.list()[1].attendance_count, 1);
    }

    #[test]
    fn test_sign_attendance_missing_student_reports() {
        let mut roster = Roster::new();

        let event = sign_attendance(&mut roster, "0xDEAD");

        assert_eq!(event, OutboundEvent::report("Student not found: 0xDEAD"));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_delete_existing_and_missing() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA"), ("Bob", 22, "0xBBB")]);

        let event = delete_student(&mut roster, "0xaaa");
        assert_eq!(
            event,
            OutboundEvent::notice("Student deleted successfully: 0xaaa")
        );
        assert_eq!(roster.len(), 1);

        let event = delete_student(&mut roster, "0xAAA");
        assert_eq!(event, OutboundEvent::report("Student not found: 0xAAA"));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_unknown_command_has_no_event() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA")]);
        let event = apply_command(
            &mut roster,
            Command::Unknown {
                raw: "promote".to_string(),
            },
            "0xAAA",
        );
        assert!(event.is_none());
        assert_eq!(roster.list()[0].attendance_count, 0);
    }

    #[test]
    fn test_apply_mark_attendance_uses_sender() {
        let mut roster = roster_with(&[("Alice", 20, "0xAAA")]);
        let event = apply_command(&mut roster, Command::MarkAttendance, "0xaaa").unwrap();
        assert!(event.is_notice());
        assert_eq!(roster.list()[0].attendance_count, 1);
    }

    #[test]
    fn test_list_students_keeps_order_and_hides_attendance() {
        let mut roster = roster_with(&[("Carol", 21, "0xCCC"), ("Alice", 20, "0xAAA")]);
        sign_attendance(&mut roster, "0xAAA");

        let value: Value = serde_json::from_str(&list_students(&roster)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "students_list": [
                    {"name": "Carol", "age": 21, "wallet_address": "0xCCC"},
                    {"name": "Alice", "age": 20, "wallet_address": "0xAAA"}
                ]
            })
        );
    }

    #[test]
    fn test_list_students_empty() {
        assert_eq!(list_students(&Roster::new()), r#"{"students_list":[]}"#);
    }

    #[test]
    fn test_get_student_case_insensitive_and_null_when_missing() {
        let mut roster = roster_with(&[("Alice", 20, "0xAbC")]);
        sign_attendance(&mut roster, "0xabc");

        let value: Value = serde_json::from_str(&get_student(&roster, "0xabc")).unwrap();
        assert_eq!(value["student"]["name"], "Alice");
        assert_eq!(value["student"]["attendance_count"], 1);

        assert_eq!(get_student(&roster, "0xdef"), r#"{"student":null}"#);
    }

    #[test]
    fn test_unknown_route() {
        let text = run_query(
            &Roster::new(),
            &Query::UnknownRoute {
                raw: "teachers".to_string(),
            },
        );
        assert_eq!(text, FUNCTION_NOT_IMPLEMENTED);
    }
}
