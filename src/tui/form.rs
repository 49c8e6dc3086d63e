use crate::model::task::{TaskId, TaskStore};
use crate::util::unicode;

/// Single-line text input with a byte-offset cursor (always on a grapheme boundary)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the grapheme before the cursor
    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    /// Delete the grapheme under the cursor
    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.value.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// One entry in the parent selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentOption {
    pub id: TaskId,
    pub label: String,
}

/// Raw form values as read from the fields, without coercion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub description: String,
    pub is_subtask: bool,
    /// Currently selected parent option, if any
    pub parent_id: Option<TaskId>,
}

/// The add-task form: title, description, subtask checkbox, parent selector
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: TextField,
    pub description: TextField,
    pub is_subtask: bool,
    pub parent_options: Vec<ParentOption>,
    pub parent_index: usize,
}

impl TaskForm {
    /// Read the current field values
    pub fn values(&self) -> FormValues {
        FormValues {
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            is_subtask: self.is_subtask,
            parent_id: self.parent_options.get(self.parent_index).map(|o| o.id),
        }
    }

    /// The parent selector is only shown while the subtask box is checked
    pub fn parent_visible(&self) -> bool {
        self.is_subtask
    }

    /// Flip the "is subtask" checkbox. Checking it refreshes the parent options.
    pub fn toggle_subtask(&mut self, store: &TaskStore) {
        self.is_subtask = !self.is_subtask;
        if self.is_subtask {
            self.refresh_parent_options(store);
        }
    }

    /// Rebuild the parent selector from the current top-level tasks.
    /// Options are labelled `ID <id>`; the selection is kept if that task is still listed.
    pub fn refresh_parent_options(&mut self, store: &TaskStore) {
        let selected = self.parent_options.get(self.parent_index).map(|o| o.id);
        self.parent_options = store
            .tasks()
            .iter()
            .map(|t| ParentOption {
                id: t.id,
                label: format!("ID {}", t.id),
            })
            .collect();
        self.parent_index = selected
            .and_then(|id| self.parent_options.iter().position(|o| o.id == id))
            .unwrap_or(0);
    }

    pub fn select_next_parent(&mut self) {
        if self.parent_index + 1 < self.parent_options.len() {
            self.parent_index += 1;
        }
    }

    pub fn select_prev_parent(&mut self) {
        self.parent_index = self.parent_index.saturating_sub(1);
    }

    /// Clear the text fields after a successful add (checkbox and parent stay)
    pub fn reset_text(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;
    use pretty_assertions::assert_eq;

    fn store() -> TaskStore {
        TaskStore::from_tasks(vec![
            Task::new(1, "Buy milk", ""),
            Task::new(2, "Walk dog", ""),
            Task::new(5, "Write report", ""),
        ])
    }

    #[test]
    fn text_field_editing() {
        let mut field = TextField::default();
        for c in "cafe".chars() {
            field.insert_char(c);
        }
        field.insert_char('\u{0301}');
        assert_eq!(field.value, "cafe\u{0301}");

        // Backspace removes the whole grapheme (e + combining accent)
        field.backspace();
        assert_eq!(field.value, "caf");
        assert_eq!(field.cursor, 3);

        field.home();
        field.delete();
        assert_eq!(field.value, "af");
        field.move_right();
        field.insert_char('-');
        assert_eq!(field.value, "a-f");
        field.end();
        field.move_left();
        assert_eq!(field.cursor, 2);
        field.clear();
        assert_eq!(field, TextField::default());
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut field = TextField::default();
        field.backspace();
        field.delete();
        assert_eq!(field, TextField::default());
    }

    #[test]
    fn refresh_lists_top_level_tasks_by_id() {
        let mut form = TaskForm::default();
        form.refresh_parent_options(&store());
        let labels: Vec<_> = form.parent_options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["ID 1", "ID 2", "ID 5"]);
        assert_eq!(form.values().parent_id, Some(1));
    }

    #[test]
    fn toggling_on_refreshes_options() {
        let mut form = TaskForm::default();
        assert!(!form.parent_visible());
        assert!(form.parent_options.is_empty());

        form.toggle_subtask(&store());
        assert!(form.parent_visible());
        assert_eq!(form.parent_options.len(), 3);

        form.toggle_subtask(&store());
        assert!(!form.parent_visible());
        assert!(!form.values().is_subtask);
    }

    #[test]
    fn refresh_keeps_selected_parent() {
        let mut form = TaskForm::default();
        form.refresh_parent_options(&store());
        form.select_next_parent();
        form.select_next_parent();
        form.select_next_parent(); // clamps at the last option
        assert_eq!(form.values().parent_id, Some(5));

        let mut smaller = store();
        smaller.replace(vec![Task::new(5, "Write report", ""), Task::new(9, "New", "")]);
        form.refresh_parent_options(&smaller);
        assert_eq!(form.parent_index, 0);
        assert_eq!(form.values().parent_id, Some(5));

        form.select_prev_parent();
        assert_eq!(form.parent_index, 0);
    }

    #[test]
    fn values_are_raw() {
        let mut form = TaskForm::default();
        for c in "  spaced  ".chars() {
            form.title.insert_char(c);
        }
        let values = form.values();
        assert_eq!(values.title, "  spaced  ");
        assert_eq!(values.description, "");
        assert!(!values.is_subtask);
        assert_eq!(values.parent_id, None);

        form.reset_text();
        assert_eq!(form.values().title, "");
    }
}
