use rosterbox_database::{ParseError, Row, ToValue as _, ToValueType};
use serde::{Deserialize, Serialize};

/// A persisted student record. The `id` is assigned by the record store on
/// creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
}

impl ToValueType<Student> for &Row {
    fn to_value_type(self) -> Result<Student, ParseError> {
        Ok(Student {
            id: self.to_value("id")?,
            name: self.to_value("name")?,
            email: self.to_value("email")?,
            course: self.to_value("course")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    pub name: String,
    pub email: String,
    pub course: String,
}

/// Full-replace update body. Every field is overwritten; the identifier is
/// taken from the request path, not the body.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    pub name: String,
    pub email: String,
    pub course: String,
}
