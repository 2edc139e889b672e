// SPDX-License-Identifier: MPL-2.0

//! Decorations for fragment swaps
//!
//! The fragment-swap library replaces parts of a page with HTML from the
//! server and raises a notification around each step:
//!
//! ```text
//! beforeRequest → afterRequest → beforeSwap → (content replaced) → afterSwap
//! ```
//!
//! Each hook looks at one notification and returns the visual effects to
//! play. Hooks keep nothing between notifications; whatever they need
//! later (the old height of a panel, the old item positions) is pinned or
//! recorded through an effect and read back from the next notification.

mod delete_item;
mod edit_panel;
mod list_refresh;

pub use delete_item::DeleteListItem;
pub use edit_panel::EditPanel;
pub use list_refresh::ListRefresh;

use std::time::Duration;
use tracing::debug;

/// Lifecycle step a notification belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapPhase {
    BeforeRequest,
    AfterRequest,
    BeforeSwap,
    AfterSwap,
}

impl SwapPhase {
    /// Parse a lifecycle event name, with or without the `htmx:` prefix
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name.strip_prefix("htmx:").unwrap_or(name) {
            "beforeRequest" => Some(SwapPhase::BeforeRequest),
            "afterRequest" => Some(SwapPhase::AfterRequest),
            "beforeSwap" => Some(SwapPhase::BeforeSwap),
            "afterSwap" => Some(SwapPhase::AfterSwap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Form,
    /// Container of list entries
    List,
    ListItem,
    /// Detail card that toggles between display and edit content
    EditPanel,
    Other,
}

/// Layout of one element at the time of the notification
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    /// Rendered height
    pub offset_height: f32,
    /// Height of the full content
    pub scroll_height: f32,
    pub margin_bottom: f32,
}

impl Element {
    pub fn new(id: impl Into<String>, kind: ElementKind, offset_height: f32) -> Self {
        Self {
            id: id.into(),
            kind,
            offset_height,
            scroll_height: offset_height,
            margin_bottom: 0.0,
        }
    }

    pub fn with_scroll_height(mut self, scroll_height: f32) -> Self {
        self.scroll_height = scroll_height;
        self
    }

    pub fn with_margin_bottom(mut self, margin_bottom: f32) -> Self {
        self.margin_bottom = margin_bottom;
        self
    }
}

/// One lifecycle notification as delivered by the fragment-swap library
#[derive(Debug, Clone, PartialEq)]
pub struct SwapEvent {
    pub phase: SwapPhase,
    /// Element the notification is dispatched on
    pub target: Element,
    /// The request deletes a resource
    pub is_delete: bool,
    /// List entry enclosing the element that issued the request
    pub item: Option<Element>,
    /// Every child of the entry's list, the entry included
    pub siblings: Vec<Element>,
    /// Edit panel enclosing the target
    pub panel: Option<Element>,
    /// Entry the server marked as newly inserted
    pub new_entry: Option<Element>,
}

impl SwapEvent {
    pub fn new(phase: SwapPhase, target: Element) -> Self {
        Self {
            phase,
            target,
            is_delete: false,
            item: None,
            siblings: Vec::new(),
            panel: None,
            new_entry: None,
        }
    }
}

/// Target height of a height animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Height {
    Px(f32),
    /// Natural height of the content
    Auto,
}

/// Visual command for the animation library
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Take the element out of the document
    Remove { element: String },
    /// Move the element from `from_y` back to its resting position
    SlideIn {
        element: String,
        from_y: f32,
        duration: Duration,
    },
    /// Fix the element's height at `height` until the next animation
    PinHeight { element: String, height: f32 },
    AnimateHeight {
        element: String,
        from: f32,
        to: Height,
        duration: Duration,
    },
    /// Remember the positions of the container's children
    RecordPositions { container: String },
    /// Move the container's children from their recorded positions
    Reflow {
        container: String,
        duration: Duration,
    },
    /// Fade in from transparent, starting `offset_y` above the final spot
    FadeIn {
        element: String,
        offset_y: f32,
        duration: Duration,
    },
    AddBusy { element: String },
    RemoveBusy { element: String },
}

/// The animation library
pub trait Animator {
    fn apply(&mut self, effect: Effect);
}

/// Collects effects instead of playing them
impl Animator for Vec<Effect> {
    fn apply(&mut self, effect: Effect) {
        self.push(effect);
    }
}

/// A decoration bound to fragment-swap notifications
pub trait SwapHook: Send + Sync {
    fn name(&self) -> &'static str;

    /// Effects for `event`, empty when the notification is not for this hook
    fn effects(&self, event: &SwapEvent) -> Vec<Effect>;
}

/// Runs every registered hook for each notification
#[derive(Default)]
pub struct SwapHooks {
    hooks: Vec<Box<dyn SwapHook>>,
}

impl SwapHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three page decorations: item deletion, list refresh of
    /// `list_id`, and edit panels
    pub fn standard(list_id: impl Into<String>) -> Self {
        let mut hooks = Self::new();
        hooks.register(DeleteListItem);
        hooks.register(ListRefresh::new(list_id));
        hooks.register(EditPanel);
        hooks
    }

    pub fn register(&mut self, hook: impl SwapHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hand `event` to every hook; returns the number of effects played
    pub fn dispatch(&self, event: &SwapEvent, animator: &mut dyn Animator) -> usize {
        let mut played = 0;
        for hook in &self.hooks {
            let effects = hook.effects(event);
            if !effects.is_empty() {
                debug!(
                    hook = hook.name(),
                    phase = ?event.phase,
                    target = %event.target.id,
                    count = effects.len(),
                    "Swap decoration"
                );
            }
            for effect in effects {
                animator.apply(effect);
                played += 1;
            }
        }
        played
    }
}

impl std::fmt::Debug for SwapHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}
