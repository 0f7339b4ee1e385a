//! Client controller for `RosterBox`.
//!
//! Owns the browser-facing interaction state: the create form draft, the
//! transient editing surface, the loading phase, notifications, and the
//! rendered list view. Talks to the server exclusively through the
//! [`StudentsApi`](api::StudentsApi) seam, one call at a time, and never
//! retries on its own; every failure ends the interaction and informs the
//! user.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

use rosterbox_students::models::{CreateStudent, Student, UpdateStudent};
use rosterbox_students::validate::validate_student;

use api::{ClientError, StudentsApi};
use notifications::{Notification, NotificationKind, Notifications};
use render::ListView;

pub mod api;
pub mod notifications;
pub mod render;

pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this student?";

/// Whether an interaction is in flight. Purely advisory UI state, not a
/// concurrency control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

/// The three writable fields as currently typed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub course: String,
}

impl StudentDraft {
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            course: self.course.trim().to_string(),
        }
    }

    fn validate(&self) -> Result<(), rosterbox_students::validate::ValidationError> {
        validate_student(&self.name, &self.email, &self.course)
    }
}

impl From<Student> for StudentDraft {
    fn from(value: Student) -> Self {
        Self {
            name: value.name,
            email: value.email,
            course: value.course,
        }
    }
}

impl From<StudentDraft> for CreateStudent {
    fn from(value: StudentDraft) -> Self {
        Self {
            name: value.name,
            email: value.email,
            course: value.course,
        }
    }
}

impl From<StudentDraft> for UpdateStudent {
    fn from(value: StudentDraft) -> Self {
        Self {
            name: value.name,
            email: value.email,
            course: value.course,
        }
    }
}

/// The transient editing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    Closed,
    Editing { id: String, draft: StudentDraft },
}

/// Explicit user confirmation gate for destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

pub struct Controller<A: StudentsApi> {
    api: A,
    phase: Phase,
    editor: Editor,
    draft: StudentDraft,
    notifications: Notifications,
    students: Vec<Student>,
    view: ListView,
}

impl<A: StudentsApi> Controller<A> {
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            phase: Phase::Idle,
            editor: Editor::Closed,
            draft: StudentDraft::default(),
            notifications: Notifications::new(),
            students: vec![],
            view: ListView::default(),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    #[must_use]
    pub const fn view(&self) -> &ListView {
        &self.view
    }

    #[must_use]
    pub const fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut StudentDraft {
        &mut self.draft
    }

    pub fn notifications(&mut self) -> &[Notification] {
        self.notifications.active()
    }

    fn notify_success(&mut self, message: &str) {
        self.notifications
            .notify(NotificationKind::Success, message);
    }

    fn notify_error(&mut self, message: impl Into<String>) {
        self.notifications.notify(NotificationKind::Error, message);
    }

    fn notify_failure(&mut self, error: &ClientError, fallback: &str) {
        let message = match error {
            ClientError::Validation(message) => message.clone(),
            ClientError::Transport => "Network error".to_string(),
            _ => fallback.to_string(),
        };
        self.notify_error(message);
    }

    /// Fetches the current collection and replaces the rendered view
    /// wholesale. The load is reported as in flight for its duration, the
    /// same as a submission.
    pub async fn refresh(&mut self) {
        self.phase = Phase::Submitting;

        match self.api.list().await {
            Ok(students) => {
                self.view = ListView::project(&students);
                self.students = students;
            }
            Err(error) => {
                log::warn!("refresh failed: {error:?}");
                self.notify_error("Error loading students");
            }
        }

        self.phase = Phase::Idle;
    }

    /// Submits the create form. Client-side validation failures never reach
    /// the network; the interaction always ends back in `Idle`.
    pub async fn submit_create(&mut self) {
        let draft = self.draft.trimmed();

        if let Err(error) = draft.validate() {
            self.notify_error(error.to_string());
            return;
        }

        self.phase = Phase::Submitting;

        match self.api.create(&draft.into()).await {
            Ok(_) => {
                self.draft = StudentDraft::default();
                self.refresh().await;
                self.notify_success("Student added successfully!");
            }
            Err(error) => {
                self.notify_failure(&error, "Error adding student");
            }
        }

        self.phase = Phase::Idle;
    }

    /// Deletes a record after explicit confirmation. Declining performs no
    /// network call.
    pub async fn delete(&mut self, id: &str, prompt: &dyn ConfirmPrompt) {
        if !prompt.confirm(DELETE_CONFIRM_MESSAGE) {
            return;
        }

        self.phase = Phase::Submitting;

        match self.api.delete(id).await {
            Ok(()) => {
                self.refresh().await;
                self.notify_success("Student deleted successfully!");
            }
            Err(error) => {
                self.notify_failure(&error, "Error deleting student");
            }
        }

        self.phase = Phase::Idle;
    }

    /// Opens the editing surface, pre-populated from a `Get` for the target
    /// identifier. On failure the surface stays closed.
    pub async fn open_editor(&mut self, id: &str) {
        match self.api.get(id).await {
            Ok(student) => {
                self.editor = Editor::Editing {
                    id: id.to_string(),
                    draft: student.into(),
                };
            }
            Err(error) => {
                self.notify_failure(&error, "Error loading student");
            }
        }
    }

    pub fn editor_draft_mut(&mut self) -> Option<&mut StudentDraft> {
        match &mut self.editor {
            Editor::Editing { draft, .. } => Some(draft),
            Editor::Closed => None,
        }
    }

    /// Closes the editing surface without submitting.
    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Submits the editing surface. On success the surface closes; on failure
    /// it stays open for correction.
    pub async fn submit_edit(&mut self) {
        let Editor::Editing { id, draft } = self.editor.clone() else {
            return;
        };

        let draft = draft.trimmed();

        if let Err(error) = draft.validate() {
            self.notify_error(error.to_string());
            return;
        }

        self.phase = Phase::Submitting;

        match self.api.update(&id, &draft.into()).await {
            Ok(_) => {
                self.refresh().await;
                self.notify_success("Student updated successfully!");
                self.editor = Editor::Closed;
            }
            Err(error) => {
                self.notify_failure(&error, "Error updating student");
            }
        }

        self.phase = Phase::Idle;
    }
}
