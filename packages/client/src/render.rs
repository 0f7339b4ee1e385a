//! The rendered list as a pure projection of the last `List` response.
//!
//! Re-computed wholesale on every refresh; never patched incrementally.

use rosterbox_students::models::Student;

pub const EMPTY_PLACEHOLDER: &str = "No students found. Add some students to get started!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
}

/// The full visible representation of the student list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Shown instead of an empty list.
    Placeholder(&'static str),
    /// One row per record, in the order the server returned them.
    Rows(Vec<StudentRow>),
}

impl ListView {
    #[must_use]
    pub fn project(students: &[Student]) -> Self {
        if students.is_empty() {
            return Self::Placeholder(EMPTY_PLACEHOLDER);
        }

        Self::Rows(
            students
                .iter()
                .map(|student| StudentRow {
                    id: student.id.clone(),
                    name: student.name.clone(),
                    email: student.email.clone(),
                    course: student.course.clone(),
                })
                .collect(),
        )
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::Placeholder(EMPTY_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn student(id: &str, name: &str) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            email: format!("{id}@x.com"),
            course: "CS101".into(),
        }
    }

    #[test]
    fn empty_list_projects_to_placeholder() {
        assert_eq!(ListView::project(&[]), ListView::Placeholder(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn rows_keep_server_order() {
        let view = ListView::project(&[student("b", "Ben"), student("a", "Ana")]);

        let ListView::Rows(rows) = view else {
            panic!("expected rows");
        };
        assert_eq!(
            rows.iter().map(|row| row.name.as_str()).collect::<Vec<_>>(),
            vec!["Ben", "Ana"]
        );
    }
}
