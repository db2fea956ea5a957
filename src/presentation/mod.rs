//! Finding the visible screen and presenting over it
//!
//! The host application owns its screen hierarchy; this module only reads
//! it through [`ScreenHost`] and asks it to perform transitions. The walk
//! follows, in order:
//!
//! 1. a navigation stack's top screen,
//! 2. a tab container's selected tab,
//! 3. a modally presented overlay,
//!
//! and stops at the first screen that has none of those.
//!
//! [`tree`] holds [`ScreenTree`], an in-memory host.

pub mod tree;

pub use tree::{ScreenTree, Transition};

use crate::core::error::{Error, Result};
use std::future::Future;

/// Deepest hierarchy [`resolve_visible_screen`] walks before assuming a cycle.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Handle to a screen owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    /// Ordinary content screen
    Content,
    /// Transient alert or dialog
    Alert,
    /// Navigation stack container
    Navigation,
    /// Tab container
    Tabs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertActionStyle {
    Default,
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertAction {
    pub title: String,
    pub style: AlertActionStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub actions: Vec<AlertAction>,
}

impl Alert {
    /// Alert with a single cancel-style "Ok" button.
    pub fn simple(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            actions: vec![AlertAction {
                title: "Ok".to_string(),
                style: AlertActionStyle::Cancel,
            }],
        }
    }
}

/// Read access to the host's screen hierarchy plus the transitions it can run.
///
/// `present` and `dismiss` resolve once the transition has finished.
pub trait ScreenHost {
    /// Current root screen, if a window is up.
    fn root(&self) -> Option<ScreenId>;

    fn kind(&self, id: ScreenId) -> ScreenKind;

    /// Top of a navigation stack; `None` for other kinds or an empty stack.
    fn top_of_stack(&self, id: ScreenId) -> Option<ScreenId>;

    /// Selected tab of a tab container; `None` for other kinds.
    fn selected_tab(&self, id: ScreenId) -> Option<ScreenId>;

    /// Overlay this screen is presenting.
    fn presented(&self, id: ScreenId) -> Option<ScreenId>;

    /// Screen that presented this one.
    fn presenting(&self, id: ScreenId) -> Option<ScreenId>;

    /// Nearest enclosing tab container.
    fn tab_container(&self, id: ScreenId) -> Option<ScreenId>;

    /// Registers an alert screen, not yet presented.
    fn make_alert(&mut self, alert: Alert) -> ScreenId;

    fn present(
        &mut self,
        presenter: ScreenId,
        screen: ScreenId,
        animated: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Dismisses whatever `presenter` is presenting.
    fn dismiss(
        &mut self,
        presenter: ScreenId,
        animated: bool,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Visible leaf below `base` (or below the host's root when `base` is `None`).
///
/// Returns `Ok(None)` when there is no root, or when a navigation stack in
/// the path is empty.
///
/// # Errors
///
/// [`Error::RecursionLimitExceeded`] after [`DEFAULT_MAX_DEPTH`] steps.
pub fn resolve_visible_screen<H: ScreenHost + ?Sized>(
    host: &H,
    base: Option<ScreenId>,
) -> Result<Option<ScreenId>> {
    resolve_visible_screen_with_limit(host, base, DEFAULT_MAX_DEPTH)
}

/// [`resolve_visible_screen`] with an explicit depth limit.
pub fn resolve_visible_screen_with_limit<H: ScreenHost + ?Sized>(
    host: &H,
    base: Option<ScreenId>,
    max_depth: usize,
) -> Result<Option<ScreenId>> {
    let mut current = base.or_else(|| host.root());

    for _ in 0..=max_depth {
        let Some(id) = current else {
            return Ok(None);
        };

        if host.kind(id) == ScreenKind::Navigation {
            current = host.top_of_stack(id);
            continue;
        }

        if host.kind(id) == ScreenKind::Tabs
            && let Some(selected) = host.selected_tab(id)
        {
            current = Some(selected);
            continue;
        }

        match host.presented(id) {
            Some(presented) => current = Some(presented),
            None => return Ok(Some(id)),
        }
    }

    Err(Error::RecursionLimitExceeded { limit: max_depth })
}

/// Where [`present_without_conflict`] presented from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// A visible alert was dismissed first; presented from its presenter.
    ReplacedAlert { presenter: ScreenId },
    /// Presented from the tab container holding the visible screen.
    FromTabContainer(ScreenId),
    /// Presented straight from the visible screen.
    Direct(ScreenId),
}

impl Presentation {
    pub fn presenter(&self) -> ScreenId {
        match self {
            Self::ReplacedAlert { presenter } => *presenter,
            Self::FromTabContainer(id) | Self::Direct(id) => *id,
        }
    }
}

/// Presents `screen` over whatever is visible, without stacking on an alert.
///
/// - Visible alert: its presenter dismisses it, then presents `screen`.
/// - Visible screen inside a tab container: the container presents.
/// - Otherwise the visible screen presents.
///
/// Resolves after the presentation transition completes.
///
/// # Errors
///
/// [`Error::NoVisibleScreen`] when nothing is on screen (or a visible alert
/// has no presenter), plus any error from the walk or the host.
pub async fn present_without_conflict<H: ScreenHost>(
    host: &mut H,
    screen: ScreenId,
    animated: bool,
) -> Result<Presentation> {
    present_without_conflict_with_limit(host, screen, animated, DEFAULT_MAX_DEPTH).await
}

/// [`present_without_conflict`] with the visible-screen walk capped at
/// `max_depth` steps, usually `HelperConfig::max_presentation_depth`.
pub async fn present_without_conflict_with_limit<H: ScreenHost>(
    host: &mut H,
    screen: ScreenId,
    animated: bool,
    max_depth: usize,
) -> Result<Presentation> {
    let Some(anchor) = resolve_visible_screen_with_limit(host, None, max_depth)? else {
        tracing::warn!("No visible screen to present from");
        return Err(Error::NoVisibleScreen);
    };
    tracing::debug!(?anchor, kind = ?host.kind(anchor), "Resolved visible screen");

    if host.kind(anchor) == ScreenKind::Alert {
        let Some(presenter) = host.presenting(anchor) else {
            tracing::warn!(?anchor, "Visible alert has no presenting screen");
            return Err(Error::NoVisibleScreen);
        };
        host.dismiss(presenter, true).await?;
        host.present(presenter, screen, animated).await?;
        return Ok(Presentation::ReplacedAlert { presenter });
    }

    if let Some(tabs) = host.tab_container(anchor) {
        host.present(tabs, screen, animated).await?;
        return Ok(Presentation::FromTabContainer(tabs));
    }

    host.present(anchor, screen, animated).await?;
    Ok(Presentation::Direct(anchor))
}

/// Shows a title/message alert with an "Ok" button, even if another alert
/// is already up.
pub async fn display_simple_alert<H: ScreenHost>(
    host: &mut H,
    title: &str,
    message: &str,
) -> Result<Presentation> {
    display_simple_alert_with_limit(host, title, message, DEFAULT_MAX_DEPTH).await
}

/// [`display_simple_alert`] with a custom cap on the visible-screen walk.
pub async fn display_simple_alert_with_limit<H: ScreenHost>(
    host: &mut H,
    title: &str,
    message: &str,
    max_depth: usize,
) -> Result<Presentation> {
    let alert = host.make_alert(Alert::simple(title, message));
    present_without_conflict_with_limit(host, alert, true, max_depth).await
}
