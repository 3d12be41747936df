use thiserror::Error;

use crate::domain::todo::{NewTodo, Todo};

/// User-visible submission failures. Neither is fatal and neither is retried
/// automatically; the message is shown as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The title was empty after trimming; no request was attempted.
    #[error("Title should not be empty")]
    EmptyTitle,
    /// The create request was rejected; the cause is not surfaced.
    #[error("Unable to add a todo")]
    CreateFailed,
}

/// In-memory todo list plus the form state of the new-todo input.
///
/// The controller never performs I/O. A submission is split in two: the view
/// calls [`begin_submit`](Self::begin_submit), sends the returned payload to
/// the backend however it likes, and reports back through
/// [`finish_submit`](Self::finish_submit). Between the two the input is
/// disabled and a placeholder todo (id 0) is exposed for rendering, while the
/// rest of the list stays fully mutable.
///
/// Focus is modelled as an effect flag rather than a handle into the view:
/// the controller raises it on construction and after every submission
/// attempt, and the view drains it with
/// [`take_focus_request`](Self::take_focus_request).
pub struct TodoListController {
    user_id: i64,
    todos: Vec<Todo>,
    title: String,
    pending: Option<Todo>,
    error: Option<SubmitError>,
    input_disabled: bool,
    focus_requested: bool,
}

impl TodoListController {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            todos: Vec::new(),
            title: String::new(),
            pending: None,
            error: None,
            input_disabled: false,
            // Auto-focus the input on mount.
            focus_requested: true,
        }
    }

    /// Replaces the collection, e.g. with the backend's list on startup.
    pub fn load(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    /// Display-ordered collection. Does not include the pending placeholder.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Placeholder for the create currently in flight, if any.
    pub fn pending(&self) -> Option<&Todo> {
        self.pending.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Edits the input text. Ignored while a submission is in flight, the
    /// same way a disabled field accepts no keystrokes.
    pub fn set_title(&mut self, title: impl Into<String>) {
        if !self.input_disabled {
            self.title = title.into();
        }
    }

    pub fn error(&self) -> Option<SubmitError> {
        self.error
    }

    pub fn input_disabled(&self) -> bool {
        self.input_disabled
    }

    /// Returns and clears the pending focus-request effect.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Starts a submission. Returns the create payload to send, or `None`
    /// when validation failed (error recorded) or a submission is already in
    /// flight (no state change — the disabled input should have prevented
    /// the call).
    ///
    /// On success the placeholder is immediately visible via
    /// [`pending`](Self::pending) and the input is disabled until
    /// [`finish_submit`](Self::finish_submit).
    pub fn begin_submit(&mut self) -> Option<NewTodo> {
        if self.input_disabled {
            return None;
        }
        self.error = None;

        let title = self.title.trim();
        if title.is_empty() {
            self.error = Some(SubmitError::EmptyTitle);
            return None;
        }

        let payload = NewTodo {
            title: title.to_string(),
            completed: false,
            user_id: self.user_id,
        };
        self.pending = Some(Todo::placeholder(title, self.user_id));
        self.input_disabled = true;
        Some(payload)
    }

    /// Completes the submission started by [`begin_submit`](Self::begin_submit).
    ///
    /// On `Ok` the server record replaces the placeholder at the end of the
    /// collection and the input text is cleared. On `Err` the placeholder is
    /// discarded and the typed title is left in place so the user can retry
    /// without retyping. Either way the input is re-enabled and refocused.
    pub fn finish_submit(&mut self, result: anyhow::Result<Todo>) {
        if self.pending.take().is_none() {
            // No submission in flight; nothing to complete.
            return;
        }
        self.input_disabled = false;
        self.focus_requested = true;
        match result {
            Ok(todo) => {
                self.todos.push(todo);
                self.title.clear();
            }
            Err(err) => {
                tracing::debug!(error = %err, "create todo failed");
                self.error = Some(SubmitError::CreateFailed);
            }
        }
    }

    /// Flips every todo to the opposite of "all completed" and returns the
    /// new completed value. Local mutation only; syncing the backend is the
    /// caller's concern.
    pub fn toggle_all(&mut self) -> bool {
        let target = !self.all_completed();
        for todo in &mut self.todos {
            todo.completed = target;
        }
        target
    }

    /// Removes every completed todo, preserving the order of the remainder,
    /// and returns the removed records so the caller can sync the backend.
    pub fn delete_completed(&mut self) -> Vec<Todo> {
        let mut removed = Vec::new();
        self.todos.retain(|todo| {
            if todo.completed {
                removed.push(todo.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|t| t.completed)
    }

    /// Vacuously true on an empty collection.
    pub fn all_completed(&self) -> bool {
        self.todos.iter().all(|t| t.completed)
    }
}
