//! Visual states of the toggle control.

/// Background colour and tooltip for the toggle in one of its two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleVisual {
    pub background: &'static str,
    pub title: &'static str,
}

impl ToggleVisual {
    pub const ON: ToggleVisual = ToggleVisual {
        background: "#2a9d5c",
        title: "Auto-resize ON (click to disable)",
    };

    pub const OFF: ToggleVisual = ToggleVisual {
        background: "#444",
        title: "Auto-resize OFF (click to enable)",
    };

    pub fn for_state(enabled: bool) -> Self {
        if enabled {
            Self::ON
        } else {
            Self::OFF
        }
    }
}
