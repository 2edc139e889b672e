// SPDX-License-Identifier: MPL-2.0

//! Edit panels: busy indicator during requests, height animation on swap

use super::{Effect, ElementKind, Height, SwapEvent, SwapHook, SwapPhase};
use crate::constants::swap::PANEL_RESIZE;

#[derive(Debug, Clone, Copy, Default)]
pub struct EditPanel;

impl EditPanel {
    /// Panel a request notification concerns: the target itself, or the
    /// panel around the button or form that sent it
    fn requesting_panel(event: &SwapEvent) -> Option<&str> {
        match event.target.kind {
            ElementKind::EditPanel => Some(event.target.id.as_str()),
            ElementKind::Button | ElementKind::Form => event.panel.as_ref().map(|p| p.id.as_str()),
            _ => None,
        }
    }
}

impl SwapHook for EditPanel {
    fn name(&self) -> &'static str {
        "edit-panel"
    }

    fn effects(&self, event: &SwapEvent) -> Vec<Effect> {
        let target = &event.target;
        match event.phase {
            SwapPhase::BeforeRequest => match target.kind {
                // A panel starting its own request is not marked busy
                ElementKind::Button | ElementKind::Form => Self::requesting_panel(event)
                    .map(|panel| Effect::AddBusy {
                        element: panel.to_string(),
                    })
                    .into_iter()
                    .collect(),
                _ => Vec::new(),
            },
            SwapPhase::AfterRequest => Self::requesting_panel(event)
                .map(|panel| Effect::RemoveBusy {
                    element: panel.to_string(),
                })
                .into_iter()
                .collect(),
            SwapPhase::BeforeSwap if target.kind == ElementKind::EditPanel => {
                vec![Effect::PinHeight {
                    element: target.id.clone(),
                    height: target.offset_height,
                }]
            }
            SwapPhase::AfterSwap if target.kind == ElementKind::EditPanel => {
                vec![Effect::AnimateHeight {
                    element: target.id.clone(),
                    from: target.offset_height,
                    to: Height::Auto,
                    duration: PANEL_RESIZE,
                }]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap_hooks::Element;

    fn card() -> Element {
        Element::new("detail-card-4", ElementKind::EditPanel, 96.0)
    }

    #[test]
    fn test_busy_indicator_brackets_the_request() {
        let mut before = SwapEvent::new(
            SwapPhase::BeforeRequest,
            Element::new("edit-4", ElementKind::Button, 24.0),
        );
        before.panel = Some(card());
        assert_eq!(
            EditPanel.effects(&before),
            vec![Effect::AddBusy {
                element: "detail-card-4".into()
            }]
        );

        let after = SwapEvent::new(SwapPhase::AfterRequest, card());
        assert_eq!(
            EditPanel.effects(&after),
            vec![Effect::RemoveBusy {
                element: "detail-card-4".into()
            }]
        );
    }

    #[test]
    fn test_form_outside_a_panel_is_ignored() {
        let event = SwapEvent::new(
            SwapPhase::BeforeRequest,
            Element::new("search", ElementKind::Form, 30.0),
        );
        assert!(EditPanel.effects(&event).is_empty());
    }

    #[test]
    fn test_swap_animates_height() {
        assert_eq!(
            EditPanel.effects(&SwapEvent::new(SwapPhase::BeforeSwap, card())),
            vec![Effect::PinHeight {
                element: "detail-card-4".into(),
                height: 96.0
            }]
        );
        assert_eq!(
            EditPanel.effects(&SwapEvent::new(SwapPhase::AfterSwap, card())),
            vec![Effect::AnimateHeight {
                element: "detail-card-4".into(),
                from: 96.0,
                to: Height::Auto,
                duration: PANEL_RESIZE,
            }]
        );
    }
}
