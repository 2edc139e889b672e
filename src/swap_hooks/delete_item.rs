// SPDX-License-Identifier: MPL-2.0

//! Deleted list entries slide out of the way

use super::{Effect, SwapEvent, SwapHook, SwapPhase};
use crate::constants::swap::DELETE_SLIDE;

/// After a delete request was swapped in, removes the entry and slides
/// its siblings up into the freed space
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteListItem;

impl SwapHook for DeleteListItem {
    fn name(&self) -> &'static str {
        "delete-list-item"
    }

    fn effects(&self, event: &SwapEvent) -> Vec<Effect> {
        if event.phase != SwapPhase::AfterSwap || !event.is_delete {
            return Vec::new();
        }
        let Some(item) = &event.item else {
            return Vec::new();
        };

        let mut effects = vec![Effect::Remove {
            element: item.id.clone(),
        }];
        effects.extend(
            event
                .siblings
                .iter()
                .filter(|sibling| sibling.id != item.id)
                .map(|sibling| Effect::SlideIn {
                    element: sibling.id.clone(),
                    from_y: item.offset_height + sibling.margin_bottom,
                    duration: DELETE_SLIDE,
                }),
        );
        effects
    }
}
