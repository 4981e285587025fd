//! Statement labels in scope, per function.

use tsfront_core::intern::InternedString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub name: InternedString,
    /// The label directly names a loop, so `continue label` is legal.
    pub iteration: bool,
}

/// Labels are visible only inside the function that declares them; entering
/// a function body starts an empty scope and leaving it restores the outer
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    scopes: Vec<Vec<Label>>,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelTable {
    pub fn new() -> Self {
        Self { scopes: vec![Vec::new()] }
    }

    fn current(&self) -> &[Label] {
        self.scopes.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn enter_function(&mut self) {
        self.scopes.push(Vec::new());
    }

    pub fn exit_function(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Activate a label. Returns `false` if the same name is already active
    /// in this function.
    pub fn push(&mut self, name: InternedString, iteration: bool) -> bool {
        if self.find(name).is_some() {
            return false;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.push(Label { name, iteration });
        }
        true
    }

    pub fn pop(&mut self) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.pop();
        }
    }

    pub fn find(&self, name: InternedString) -> Option<&Label> {
        self.current().iter().rev().find(|label| label.name == name)
    }

    /// `break name` is legal.
    pub fn can_break_to(&self, name: InternedString) -> bool {
        self.find(name).is_some()
    }

    /// `continue name` is legal.
    pub fn can_continue_to(&self, name: InternedString) -> bool {
        self.find(name).is_some_and(|label| label.iteration)
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsfront_core::intern::StringInterner;

    #[test]
    fn duplicates_are_rejected_within_a_function() {
        let interner = StringInterner::new();
        let outer = interner.intern("outer");
        let mut labels = LabelTable::new();
        assert!(labels.push(outer, true));
        assert!(!labels.push(outer, false));
        labels.pop();
        assert!(labels.push(outer, false));
    }

    #[test]
    fn functions_start_a_fresh_scope() {
        let interner = StringInterner::new();
        let a = interner.intern("a");
        let mut labels = LabelTable::new();
        labels.push(a, true);

        labels.enter_function();
        assert!(!labels.can_break_to(a));
        assert!(labels.push(a, false));
        labels.exit_function();

        assert!(labels.can_continue_to(a));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn continue_needs_an_iteration_label() {
        let interner = StringInterner::new();
        let block = interner.intern("block");
        let mut labels = LabelTable::new();
        labels.push(block, false);
        assert!(labels.can_break_to(block));
        assert!(!labels.can_continue_to(block));
    }

    #[test]
    fn root_scope_is_kept() {
        let mut labels = LabelTable::new();
        labels.exit_function();
        labels.pop();
        assert!(labels.is_empty());
    }
}
