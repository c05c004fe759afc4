use serde::Serialize;

pub const OCCUPIED_OPACITY: &str = "0.35";

/// Состояние одного места в модели сетки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeatState {
    pub occupied: bool,
    pub selected: bool,
}

impl SeatState {
    pub fn occupied() -> Self {
        Self {
            occupied: true,
            selected: false,
        }
    }

    /// Занятое место не может быть выбранным, поэтому выбор сбрасывается.
    pub fn set_occupied(&mut self, occupied: bool) {
        self.occupied = occupied;
        if occupied {
            self.selected = false;
        }
    }
}

/// Визуальный набор атрибутов кнопки места.
///
/// Все атрибуты выводятся из [`SeatState`] только здесь, поэтому класс,
/// `disabled`, ARIA и стиль всегда меняются вместе.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub classes: Vec<&'static str>,
    pub disabled: bool,
    pub aria_disabled: bool,
    pub aria_pressed: bool,
    pub available: bool,
    pub opacity: Option<&'static str>,
    pub pointer_events_none: bool,
}

impl SeatView {
    pub fn of(state: SeatState) -> Self {
        let mut classes = vec!["seat"];
        if state.occupied {
            classes.push("seat-booked");
            classes.push("occupied");
        }
        if state.selected && !state.occupied {
            classes.push("selected");
        }

        Self {
            classes,
            disabled: state.occupied,
            aria_disabled: state.occupied,
            aria_pressed: state.selected && !state.occupied,
            available: !state.occupied,
            opacity: state.occupied.then_some(OCCUPIED_OPACITY),
            pointer_events_none: state.occupied,
        }
    }

    pub fn class_attr(&self) -> String {
        self.classes.join(" ")
    }

    pub fn style_attr(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(opacity) = self.opacity {
            parts.push(format!("opacity: {}", opacity));
        }
        if self.pointer_events_none {
            parts.push("pointer-events: none".to_string());
        }
        (!parts.is_empty()).then(|| format!("{};", parts.join("; ")))
    }
}
