//! Row-level actions.

use std::fmt;
use std::rc::Rc;

use super::RowId;

/// Callback invoked with the id of the row an action was activated on.
pub type ActionTrigger = Rc<dyn Fn(&RowId)>;

/// A per-row button, rendered after the column cells.
#[derive(Clone)]
pub struct Action {
    pub id: String,
    pub label: String,
    pub trigger: Option<ActionTrigger>,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            trigger: None,
        }
    }

    pub fn with_trigger(mut self, trigger: impl Fn(&RowId) + 'static) -> Self {
        self.trigger = Some(Rc::new(trigger));
        self
    }

    /// Runs the trigger for `row`. No-op without a trigger.
    pub fn fire(&self, row: &RowId) {
        if let Some(trigger) = &self.trigger {
            trigger(row);
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("trigger", &self.trigger.is_some())
            .finish()
    }
}
