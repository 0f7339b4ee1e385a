use serde::{Deserialize, Serialize};

use crate::models::Student;

/// Wire model for a student record: `{id, name, email, course}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStudent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
}

impl From<Student> for ApiStudent {
    fn from(value: Student) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            course: value.course,
        }
    }
}

impl From<ApiStudent> for Student {
    fn from(value: ApiStudent) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            course: value.course,
        }
    }
}
