//! Partial update model for todos.
//!
//! A patch records, per field, whether the client supplied a value. For the
//! nullable `description` column an explicit `null` is distinct from an absent
//! key and clears the stored value. `name` and `done` are not nullable, so the
//! schema layer folds an explicit `null` for them into "absent".

use super::{Todo, TodoName};

/// Tri-state field update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the payload: keep the stored value.
    #[default]
    Absent,
    /// Key present with `null`: clear the stored value.
    Null,
    /// Key present with a value: overwrite the stored value.
    Value(T),
}

impl<T> Patch<T> {
    /// Resolve the patch against the currently stored optional value.
    ///
    /// Returns `None` when the field is left untouched.
    fn resolve(&self, current: Option<&T>) -> Option<Option<T>>
    where
        T: Clone + PartialEq,
    {
        match self {
            Self::Absent => None,
            Self::Null => current.is_some().then_some(None),
            Self::Value(value) => (current != Some(value)).then(|| Some(value.clone())),
        }
    }
}

/// Validated partial update for a todo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub name: Option<TodoName>,
    pub description: Patch<String>,
    pub done: Option<bool>,
}

/// Field changes that actually differ from the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub done: Option<bool>,
}

impl TodoChanges {
    /// Whether applying these changes would leave the record untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.done.is_none()
    }

    /// Return `todo` with the changes applied. Timestamps are left to the
    /// caller because only the store knows the current time.
    #[must_use]
    pub fn apply(&self, mut todo: Todo) -> Todo {
        if let Some(name) = &self.name {
            todo.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            todo.description.clone_from(description);
        }
        if let Some(done) = self.done {
            todo.done = done;
        }
        todo
    }
}

impl TodoPatch {
    /// Compute the changes this patch makes to `current`.
    ///
    /// Fields whose new value equals the stored one are dropped, so a patch
    /// that restates the record yields empty changes.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use todo_backend::domain::{Patch, Todo, TodoId, TodoPatch};
    ///
    /// let now = Utc::now();
    /// let todo = Todo {
    ///     id: TodoId::new(1),
    ///     name: "Buy milk".to_owned(),
    ///     description: Some("2 litres".to_owned()),
    ///     done: false,
    ///     created_at: now,
    ///     updated_at: now,
    /// };
    /// let patch = TodoPatch {
    ///     done: Some(true),
    ///     description: Patch::Null,
    ///     ..TodoPatch::default()
    /// };
    /// let changes = patch.changes_for(&todo);
    /// assert_eq!(changes.done, Some(true));
    /// assert_eq!(changes.description, Some(None));
    /// assert_eq!(changes.name, None);
    /// ```
    #[must_use]
    pub fn changes_for(&self, current: &Todo) -> TodoChanges {
        TodoChanges {
            name: self
                .name
                .as_ref()
                .filter(|name| name.as_str() != current.name)
                .map(|name| name.as_str().to_owned()),
            description: self.description.resolve(current.description.as_ref()),
            done: self.done.filter(|done| *done != current.done),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TodoId;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn stored() -> Todo {
        let now = Utc::now();
        Todo {
            id: TodoId::new(4),
            name: "Water plants".to_owned(),
            description: Some("balcony".to_owned()),
            done: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn empty_patch_changes_nothing(stored: Todo) {
        assert!(TodoPatch::default().changes_for(&stored).is_empty());
    }

    #[rstest]
    fn done_only_patch_leaves_other_fields(stored: Todo) {
        let patch = TodoPatch {
            done: Some(true),
            ..TodoPatch::default()
        };
        let changes = patch.changes_for(&stored);
        assert_eq!(
            changes,
            TodoChanges {
                done: Some(true),
                ..TodoChanges::default()
            }
        );

        let updated = changes.apply(stored.clone());
        assert!(updated.done);
        assert_eq!(updated.name, stored.name);
        assert_eq!(updated.description, stored.description);
    }

    #[rstest]
    fn null_description_clears_value(stored: Todo) {
        let patch = TodoPatch {
            description: Patch::Null,
            ..TodoPatch::default()
        };
        let updated = patch.changes_for(&stored).apply(stored);
        assert_eq!(updated.description, None);
    }

    #[rstest]
    fn null_description_on_empty_value_is_no_change(mut stored: Todo) {
        stored.description = None;
        let patch = TodoPatch {
            description: Patch::Null,
            ..TodoPatch::default()
        };
        assert!(patch.changes_for(&stored).is_empty());
    }

    #[rstest]
    fn restating_values_is_no_change(stored: Todo) {
        let patch = TodoPatch {
            name: Some(TodoName::new("Water plants").expect("valid name")),
            description: Patch::Value("balcony".to_owned()),
            done: Some(false),
        };
        assert!(patch.changes_for(&stored).is_empty());
    }

    #[rstest]
    fn new_name_and_description_are_applied(stored: Todo) {
        let patch = TodoPatch {
            name: Some(TodoName::new("Feed cat").expect("valid name")),
            description: Patch::Value("twice".to_owned()),
            done: None,
        };
        let updated = patch.changes_for(&stored).apply(stored);
        assert_eq!(updated.name, "Feed cat");
        assert_eq!(updated.description.as_deref(), Some("twice"));
        assert!(!updated.done);
    }
}
