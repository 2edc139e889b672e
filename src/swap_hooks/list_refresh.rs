// SPDX-License-Identifier: MPL-2.0

//! Animated refresh of a list container
//!
//! Before the swap the container's height is pinned and the entry
//! positions recorded. After it the height eases to the new content
//! height, entries move from their recorded positions, and an entry the
//! server marked as new fades in from above.

use super::{Effect, ElementKind, Height, SwapEvent, SwapHook, SwapPhase};
use crate::constants::swap::{LIST_REFLOW, NEW_ENTRY_FADE, NEW_ENTRY_OFFSET_Y};

#[derive(Debug, Clone)]
pub struct ListRefresh {
    container_id: String,
}

impl ListRefresh {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }
}

impl SwapHook for ListRefresh {
    fn name(&self) -> &'static str {
        "list-refresh"
    }

    fn effects(&self, event: &SwapEvent) -> Vec<Effect> {
        let list = &event.target;
        if list.kind != ElementKind::List || list.id != self.container_id {
            return Vec::new();
        }

        match event.phase {
            SwapPhase::BeforeSwap => vec![
                Effect::PinHeight {
                    element: list.id.clone(),
                    height: list.offset_height,
                },
                Effect::RecordPositions {
                    container: list.id.clone(),
                },
            ],
            SwapPhase::AfterSwap => {
                // The pinned height is still in force, so offset_height is
                // the height from before the swap
                let mut effects = vec![
                    Effect::AnimateHeight {
                        element: list.id.clone(),
                        from: list.offset_height,
                        to: Height::Px(list.scroll_height),
                        duration: LIST_REFLOW,
                    },
                    Effect::Reflow {
                        container: list.id.clone(),
                        duration: LIST_REFLOW,
                    },
                ];
                if let Some(entry) = &event.new_entry {
                    effects.push(Effect::FadeIn {
                        element: entry.id.clone(),
                        offset_y: NEW_ENTRY_OFFSET_Y,
                        duration: NEW_ENTRY_FADE,
                    });
                }
                effects
            }
            SwapPhase::BeforeRequest | SwapPhase::AfterRequest => Vec::new(),
        }
    }
}
