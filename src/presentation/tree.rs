//! In-memory screen hierarchy
//!
//! [`ScreenTree`] is an arena of screens implementing [`ScreenHost`]. It
//! finishes transitions immediately and records each one, which makes it
//! handy for embedding in tests and headless tools.

use super::{Alert, ScreenHost, ScreenId, ScreenKind};
use crate::core::error::{Error, Result};
use std::future::{Future, ready};

/// A finished present/dismiss transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Present {
        presenter: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    Dismiss {
        presenter: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
}

#[derive(Debug)]
struct Node {
    title: String,
    kind: ScreenKind,
    /// Navigation stack (bottom first) or tab list
    children: Vec<ScreenId>,
    selected: Option<usize>,
    parent: Option<ScreenId>,
    presented: Option<ScreenId>,
    presenting: Option<ScreenId>,
    alert: Option<Alert>,
}

impl Node {
    fn new(title: &str, kind: ScreenKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            children: Vec::new(),
            selected: None,
            parent: None,
            presented: None,
            presenting: None,
            alert: None,
        }
    }
}

/// Screen arena. Ids handed out by one tree must not be used with another.
#[derive(Debug, Default)]
pub struct ScreenTree {
    nodes: Vec<Node>,
    root: Option<ScreenId>,
    transitions: Vec<Transition>,
}

impl ScreenTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: Node) -> ScreenId {
        self.nodes.push(node);
        ScreenId(self.nodes.len() - 1)
    }

    fn node(&self, id: ScreenId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: ScreenId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn adopt(&mut self, parent: ScreenId, children: &[ScreenId]) {
        for child in children {
            self.node_mut(*child).parent = Some(parent);
        }
        self.node_mut(parent).children.extend_from_slice(children);
    }

    pub fn add_screen(&mut self, title: &str) -> ScreenId {
        self.insert(Node::new(title, ScreenKind::Content))
    }

    /// Navigation container with `stack` (bottom first).
    pub fn add_navigation(&mut self, title: &str, stack: &[ScreenId]) -> ScreenId {
        let nav = self.insert(Node::new(title, ScreenKind::Navigation));
        self.adopt(nav, stack);
        nav
    }

    /// Tab container; an out-of-range `selected` leaves no tab selected.
    pub fn add_tabs(&mut self, title: &str, tabs: &[ScreenId], selected: Option<usize>) -> ScreenId {
        let id = self.insert(Node::new(title, ScreenKind::Tabs));
        self.adopt(id, tabs);
        self.node_mut(id).selected = selected.filter(|&index| index < tabs.len());
        id
    }

    pub fn set_root(&mut self, id: ScreenId) {
        self.root = Some(id);
    }

    pub fn push(&mut self, nav: ScreenId, screen: ScreenId) {
        self.adopt(nav, &[screen]);
    }

    pub fn pop(&mut self, nav: ScreenId) -> Option<ScreenId> {
        let popped = self.node_mut(nav).children.pop()?;
        self.node_mut(popped).parent = None;
        Some(popped)
    }

    pub fn select_tab(&mut self, tabs: ScreenId, index: usize) {
        let node = self.node_mut(tabs);
        node.selected = (index < node.children.len()).then_some(index);
    }

    pub fn title(&self, id: ScreenId) -> &str {
        &self.node(id).title
    }

    pub fn alert(&self, id: ScreenId) -> Option<&Alert> {
        self.node(id).alert.as_ref()
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Presents immediately, without animation.
    pub fn present_now(&mut self, presenter: ScreenId, screen: ScreenId) -> Result<()> {
        self.present_inner(presenter, screen, false)
    }

    /// Dismisses immediately, without animation.
    pub fn dismiss_now(&mut self, presenter: ScreenId) -> Result<()> {
        self.dismiss_inner(presenter, false)
    }

    fn present_inner(&mut self, presenter: ScreenId, screen: ScreenId, animated: bool) -> Result<()> {
        if presenter == screen {
            return Err(Error::Presentation(format!(
                "'{}' cannot present itself",
                self.title(screen)
            )));
        }
        if let Some(current) = self.node(presenter).presented {
            return Err(Error::Presentation(format!(
                "'{}' is already presenting '{}'",
                self.title(presenter),
                self.title(current)
            )));
        }
        if self.node(screen).presenting.is_some() {
            return Err(Error::Presentation(format!(
                "'{}' is already presented",
                self.title(screen)
            )));
        }

        self.node_mut(presenter).presented = Some(screen);
        self.node_mut(screen).presenting = Some(presenter);
        self.transitions.push(Transition::Present {
            presenter,
            screen,
            animated,
        });
        Ok(())
    }

    /// Takes down the presented screen and everything stacked above it.
    fn dismiss_inner(&mut self, presenter: ScreenId, animated: bool) -> Result<()> {
        let Some(screen) = self.node_mut(presenter).presented.take() else {
            return Err(Error::Presentation(format!(
                "'{}' is not presenting anything",
                self.title(presenter)
            )));
        };

        let mut next = Some(screen);
        while let Some(id) = next {
            let node = self.node_mut(id);
            node.presenting = None;
            next = node.presented.take();
        }

        self.transitions.push(Transition::Dismiss {
            presenter,
            screen,
            animated,
        });
        Ok(())
    }

    /// Links an overlay without any checks, for building malformed trees.
    #[cfg(test)]
    pub(crate) fn force_presented(&mut self, presenter: ScreenId, screen: ScreenId) {
        self.node_mut(presenter).presented = Some(screen);
        self.node_mut(screen).presenting = Some(presenter);
    }
}

impl ScreenHost for ScreenTree {
    fn root(&self) -> Option<ScreenId> {
        self.root
    }

    fn kind(&self, id: ScreenId) -> ScreenKind {
        self.node(id).kind
    }

    fn top_of_stack(&self, id: ScreenId) -> Option<ScreenId> {
        let node = self.node(id);
        match node.kind {
            ScreenKind::Navigation => node.children.last().copied(),
            _ => None,
        }
    }

    fn selected_tab(&self, id: ScreenId) -> Option<ScreenId> {
        let node = self.node(id);
        match node.kind {
            ScreenKind::Tabs => node.selected.and_then(|index| node.children.get(index).copied()),
            _ => None,
        }
    }

    /// A contained screen sees the overlay presented by its nearest container.
    fn presented(&self, id: ScreenId) -> Option<ScreenId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.presented.is_some() {
                return node.presented;
            }
            current = node.parent;
        }
        None
    }

    fn presenting(&self, id: ScreenId) -> Option<ScreenId> {
        self.node(id).presenting
    }

    fn tab_container(&self, id: ScreenId) -> Option<ScreenId> {
        let mut current = self.node(id).parent;
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.kind == ScreenKind::Tabs {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    fn make_alert(&mut self, alert: Alert) -> ScreenId {
        let mut node = Node::new(&alert.title, ScreenKind::Alert);
        node.alert = Some(alert);
        self.insert(node)
    }

    fn present(
        &mut self,
        presenter: ScreenId,
        screen: ScreenId,
        animated: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        ready(self.present_inner(presenter, screen, animated))
    }

    fn dismiss(
        &mut self,
        presenter: ScreenId,
        animated: bool,
    ) -> impl Future<Output = Result<()>> + Send {
        ready(self.dismiss_inner(presenter, animated))
    }
}
