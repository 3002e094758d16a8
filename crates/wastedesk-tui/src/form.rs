//! Text-entry forms used by the overlays and the profile page.
//!
//! A form is a column of fields followed by a row of actions (buttons). Focus
//! moves over both with Tab / arrow keys; the caller decides what an action does.

use wastedesk_core::utils::mask;

/// Longest value a field accepts unless configured otherwise
const DEFAULT_MAX_LENGTH: usize = 80;

/// Passwords get more room for passphrases
const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Shown dimmed while the value is empty
    pub placeholder: String,
    pub masked: bool,
    max_length: usize,
}

impl FormField {
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            placeholder: String::new(),
            masked: false,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    pub fn password(label: &'static str) -> Self {
        Self {
            masked: true,
            max_length: MAX_PASSWORD_LENGTH,
            ..Self::text(label)
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn display(&self) -> String {
        if self.masked {
            mask(&self.value)
        } else {
            self.value.clone()
        }
    }

    pub fn can_add_char(&self, c: char) -> bool {
        self.value.chars().count() < self.max_length && is_valid_input_char(c)
    }
}

/// Reject control characters
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub actions: Vec<&'static str>,
    focus: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>, actions: Vec<&'static str>) -> Self {
        Self {
            fields,
            actions,
            focus: 0,
        }
    }

    fn slots(&self) -> usize {
        self.fields.len() + self.actions.len()
    }

    pub fn set_focus(&mut self, index: usize) {
        self.focus = index.min(self.slots().saturating_sub(1));
    }

    pub fn next(&mut self) {
        let slots = self.slots();
        if slots > 0 {
            self.focus = (self.focus + 1) % slots;
        }
    }

    pub fn prev(&mut self) {
        let slots = self.slots();
        if slots > 0 {
            self.focus = (self.focus + slots - 1) % slots;
        }
    }

    pub fn is_field_focused(&self, index: usize) -> bool {
        self.focus == index
    }

    pub fn is_action_focused(&self, index: usize) -> bool {
        self.focus == self.fields.len() + index
    }

    /// Index into `actions` when an action has focus
    pub fn focused_action(&self) -> Option<usize> {
        self.focus.checked_sub(self.fields.len())
    }

    fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    /// Type into the focused field. Ignored when an action has focus.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            if field.can_add_char(c) {
                field.value.push(c);
            }
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.value.pop();
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 0;
    }
}
