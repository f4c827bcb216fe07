use crate::entities::Student;

/// In-memory, insertion-ordered collection of students.
///
/// Address lookups are case-insensitive and return the first match. `insert`
/// does not check for an existing address, so duplicates are possible and
/// the oldest one shadows the rest.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    students: Vec<Student>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, student: Student) {
        self.students.push(student);
    }

    pub fn find_by_address(&self, address: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.has_address(address))
    }

    pub fn find_by_address_mut(&mut self, address: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.has_address(address))
    }

    pub fn remove_by_address(&mut self, address: &str) -> Option<Student> {
        let index = self.students.iter().position(|s| s.has_address(address))?;
        Some(self.students.remove(index))
    }

    pub fn list(&self) -> &[Student] {
        &self.students
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
