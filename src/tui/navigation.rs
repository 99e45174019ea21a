//! Stack of presented lists. The root list is never popped; backing out of
//! it quits.

use crate::tui::components::ListController;

pub struct NavigationStack {
    root: ListController,
    pushed: Vec<ListController>,
}

impl NavigationStack {
    pub fn new(root: ListController) -> Self {
        Self {
            root,
            pushed: Vec::new(),
        }
    }

    pub fn push(&mut self, list: ListController) {
        self.pushed.push(list);
    }

    /// Dismisses the top list. Returns false at the root.
    pub fn pop(&mut self) -> bool {
        self.pushed.pop().is_some()
    }

    pub fn depth(&self) -> usize {
        self.pushed.len() + 1
    }

    pub fn top(&self) -> &ListController {
        self.pushed.last().unwrap_or(&self.root)
    }

    pub fn top_mut(&mut self) -> &mut ListController {
        self.pushed.last_mut().unwrap_or(&mut self.root)
    }

    /// Polls every list, so lists below the top still fill in while the user
    /// has moved on. Returns true if any list changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.root.poll();
        for list in &mut self.pushed {
            changed |= list.poll();
        }
        changed
    }

    /// Title of the top list; titles already carry their parent context.
    pub fn breadcrumb(&self) -> String {
        self.top().title().to_string()
    }
}
