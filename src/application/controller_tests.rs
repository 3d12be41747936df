#[cfg(test)]
mod tests {
    use super::super::controller::{SubmitError, TodoListController};
    use crate::domain::todo::Todo;

    const USER: i64 = 42;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo { id, title: title.to_string(), completed, user_id: USER }
    }

    fn controller_with(todos: Vec<Todo>) -> TodoListController {
        let mut c = TodoListController::new(USER);
        c.load(todos);
        c
    }

    #[test]
    fn focus_is_requested_on_mount_and_consumed_once() {
        let mut c = TodoListController::new(USER);
        assert!(c.take_focus_request());
        assert!(!c.take_focus_request());
    }

    #[test]
    fn empty_title_is_rejected_without_a_payload() {
        let mut c = TodoListController::new(USER);
        c.set_title("   ");
        assert!(c.begin_submit().is_none());
        assert_eq!(c.error(), Some(SubmitError::EmptyTitle));
        assert_eq!(c.error().unwrap().to_string(), "Title should not be empty");
        assert!(c.todos().is_empty());
        assert!(c.pending().is_none());
        assert!(!c.input_disabled());
    }

    #[test]
    fn begin_submit_trims_and_shows_a_placeholder() {
        let mut c = TodoListController::new(USER);
        c.set_title("  Buy milk  ");
        let payload = c.begin_submit().expect("payload");
        assert_eq!(payload.title, "Buy milk");
        assert!(!payload.completed);
        assert_eq!(payload.user_id, USER);

        let pending = c.pending().expect("placeholder");
        assert!(pending.is_placeholder());
        assert_eq!(pending.title, "Buy milk");
        assert!(!pending.completed);
        assert!(c.input_disabled());
        // The collection itself is untouched until the server answers.
        assert!(c.todos().is_empty());
    }

    #[test]
    fn begin_submit_clears_a_previous_error() {
        let mut c = TodoListController::new(USER);
        c.begin_submit();
        assert_eq!(c.error(), Some(SubmitError::EmptyTitle));
        c.set_title("Walk the dog");
        assert!(c.begin_submit().is_some());
        assert_eq!(c.error(), None);
    }

    #[test]
    fn no_second_submission_while_one_is_in_flight() {
        let mut c = TodoListController::new(USER);
        c.set_title("First");
        assert!(c.begin_submit().is_some());
        assert!(c.begin_submit().is_none());
        assert_eq!(c.error(), None);
        assert_eq!(c.pending().unwrap().title, "First");
        // The disabled input also swallows edits.
        c.set_title("Second");
        assert_eq!(c.title(), "First");
    }

    #[test]
    fn successful_submit_appends_server_record_and_clears_input() {
        let mut c = TodoListController::new(USER);
        c.set_title("Buy milk");
        c.begin_submit().unwrap();
        c.take_focus_request();

        c.finish_submit(Ok(todo(7, "Buy milk", false)));
        assert!(c.pending().is_none());
        assert!(!c.input_disabled());
        assert_eq!(c.title(), "");
        assert_eq!(c.error(), None);
        assert!(c.take_focus_request());

        let todos = c.todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, 7);
        assert_eq!(todos[0].title, "Buy milk");
    }

    #[test]
    fn failed_submit_drops_placeholder_and_keeps_title() {
        let mut c = TodoListController::new(USER);
        c.set_title("Buy milk");
        c.begin_submit().unwrap();
        c.take_focus_request();

        c.finish_submit(Err(anyhow::anyhow!("connection refused")));
        assert!(c.pending().is_none());
        assert!(!c.input_disabled());
        assert_eq!(c.error(), Some(SubmitError::CreateFailed));
        assert_eq!(c.error().unwrap().to_string(), "Unable to add a todo");
        // Kept so the user can retry without retyping.
        assert_eq!(c.title(), "Buy milk");
        assert!(c.todos().is_empty());
        assert!(c.take_focus_request());
    }

    #[test]
    fn stray_finish_without_begin_is_ignored() {
        let mut c = TodoListController::new(USER);
        c.finish_submit(Ok(todo(9, "stale", false)));
        assert!(c.todos().is_empty());
        assert_eq!(c.error(), None);
    }

    #[test]
    fn toggle_all_flips_everything_then_back() {
        let mut c = controller_with(vec![
            todo(1, "A", false),
            todo(2, "B", true),
            todo(3, "C", false),
        ]);
        assert!(c.toggle_all());
        assert!(c.todos().iter().all(|t| t.completed));
        assert!(!c.toggle_all());
        assert!(c.todos().iter().all(|t| !t.completed));
    }

    #[test]
    fn toggle_all_on_empty_collection_is_a_noop() {
        let mut c = TodoListController::new(USER);
        // Everything is vacuously completed, so the target state is false.
        assert!(!c.toggle_all());
        assert!(c.todos().is_empty());
    }

    #[test]
    fn delete_completed_removes_exactly_the_completed_in_order() {
        let mut c = controller_with(vec![
            todo(1, "A", false),
            todo(2, "B", true),
            todo(3, "C", false),
            todo(4, "D", true),
        ]);
        let removed = c.delete_completed();
        assert_eq!(removed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(c.todos().iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert!(!c.has_completed());
    }

    #[test]
    fn derived_counts() {
        let mut c = controller_with(vec![todo(1, "A", false), todo(2, "B", true)]);
        assert_eq!(c.remaining_count(), 1);
        assert!(c.has_completed());
        assert!(!c.all_completed());

        c.delete_completed();
        assert_eq!(c.remaining_count(), 1);
        assert_eq!(c.todos().len(), 1);
        assert_eq!(c.todos()[0].id, 1);
    }

    #[test]
    fn all_completed_is_vacuously_true_on_empty() {
        let c = TodoListController::new(USER);
        assert!(c.all_completed());
        assert_eq!(c.remaining_count(), 0);
        assert!(!c.has_completed());
    }

    #[test]
    fn toggling_stays_available_while_a_create_is_in_flight() {
        let mut c = controller_with(vec![todo(1, "A", false)]);
        c.set_title("B");
        c.begin_submit().unwrap();
        assert!(c.toggle_all());
        assert!(c.todos()[0].completed);
        assert_eq!(c.delete_completed().len(), 1);
        // The placeholder is unaffected by collection mutations.
        assert_eq!(c.pending().unwrap().title, "B");
        c.finish_submit(Ok(todo(5, "B", false)));
        assert_eq!(c.todos().len(), 1);
        assert_eq!(c.todos()[0].id, 5);
    }
}
