/// Display state of one marker's popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    HoverShown,
    Pinned,
}

/// Pointer input relevant to a marker and its popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Click on the marker.
    Click,
    /// Pointer entered the marker or the popup.
    Enter,
    /// Pointer left the marker or the popup.
    Leave,
}

/// Style values the DOM layer applies for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layering {
    pub popup_display: &'static str,
    pub popup_z: i32,
    pub marker_z: i32,
}

pub const HIDDEN_LAYERING: Layering = Layering {
    popup_display: "none",
    popup_z: 1,
    marker_z: 2,
};

pub const SHOWN_LAYERING: Layering = Layering {
    popup_display: "block",
    popup_z: 11,
    marker_z: 12,
};

impl Visibility {
    pub fn transition(self, event: PointerEvent) -> Visibility {
        use PointerEvent::*;
        use Visibility::*;
        match (self, event) {
            (Pinned, Click) => Hidden,
            (_, Click) => Pinned,
            (Hidden, Enter) => HoverShown,
            (HoverShown, Leave) => Hidden,
            (state, _) => state,
        }
    }

    pub fn is_shown(self) -> bool {
        self != Visibility::Hidden
    }

    pub fn layering(self) -> Layering {
        if self.is_shown() {
            SHOWN_LAYERING
        } else {
            HIDDEN_LAYERING
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PointerEvent::*;
    use super::Visibility::*;
    use super::*;

    #[test]
    fn test_initial_hidden() {
        assert_eq!(Visibility::default(), Hidden);
        assert_eq!(Hidden.layering(), HIDDEN_LAYERING);
    }

    #[test]
    fn test_hover_cycle() {
        let s = Hidden.transition(Enter);
        assert_eq!(s, HoverShown);
        assert_eq!(s.transition(Enter), HoverShown);
        assert_eq!(s.transition(Leave), Hidden);
    }

    #[test]
    fn test_click_toggles_pin() {
        assert_eq!(Hidden.transition(Click), Pinned);
        assert_eq!(HoverShown.transition(Click), Pinned);
        assert_eq!(Pinned.transition(Click), Hidden);
    }

    #[test]
    fn test_pinned_survives_leave() {
        let s = Pinned.transition(Leave);
        assert_eq!(s, Pinned);
        assert!(s.is_shown());
        assert_eq!(s.layering(), SHOWN_LAYERING);
    }

    #[test]
    fn test_leave_when_hidden_is_noop() {
        assert_eq!(Hidden.transition(Leave), Hidden);
        assert_eq!(Pinned.transition(Enter), Pinned);
    }

    #[test]
    fn test_shown_popup_above_markers() {
        // a shown popup sits above every hidden-state marker
        assert!(SHOWN_LAYERING.popup_z > HIDDEN_LAYERING.marker_z);
        assert!(SHOWN_LAYERING.marker_z > SHOWN_LAYERING.popup_z);
    }
}
