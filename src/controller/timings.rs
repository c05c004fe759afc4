use serde::{Deserialize, Serialize};
use tracing::debug;

use super::render::escape;

/// Слот сеанса в списке времени на странице.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimingSlot {
    pub show_id: Option<String>,
    pub text: String,
    pub meta: Option<String>,
    // Заглушка "нет сеансов": на клик не реагирует
    pub no_shows: bool,
    pub active: bool,
}

impl TimingSlot {
    pub fn show(show_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            show_id: Some(show_id.into()),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn no_shows(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            no_shows: true,
            ..Default::default()
        }
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    /// Непустой идентификатор сеанса, если он есть.
    pub fn show_id(&self) -> Option<&str> {
        self.show_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveShow {
    pub show_id: String,
    pub show_text: String,
}

/// Результат клика по слоту.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimingClick {
    Ignored,
    /// Слот стал активным; если у него есть сеанс, нужно обновить занятые места.
    Activated { show_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingList {
    id: String,
    slots: Vec<TimingSlot>,
}

impl TimingList {
    /// Если в исходной разметке активных слотов несколько, активным остаётся первый.
    pub fn new(id: impl Into<String>, mut slots: Vec<TimingSlot>) -> Self {
        let mut seen_active = false;
        for slot in slots.iter_mut() {
            if slot.active {
                slot.active = !seen_active;
                seen_active = true;
            }
        }
        Self { id: id.into(), slots }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn slots(&self) -> &[TimingSlot] {
        &self.slots
    }

    pub fn click(&mut self, index: usize) -> TimingClick {
        match self.slots.get(index) {
            Some(slot) if !slot.no_shows => {}
            _ => return TimingClick::Ignored,
        }

        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.active = i == index;
        }

        let show_id = self.slots[index].show_id().map(str::to_string);
        debug!("Timing slot {} activated, show_id={:?}", index, show_id);
        TimingClick::Activated { show_id }
    }

    fn active_slot(&self) -> Option<&TimingSlot> {
        self.slots.iter().find(|s| s.active)
    }

    /// Активный сеанс; заглушка "нет сеансов" сеансом не считается.
    pub fn active_show(&self) -> Option<ActiveShow> {
        let slot = self.active_slot().filter(|s| !s.no_shows)?;
        let text = slot.meta.as_deref().unwrap_or(&slot.text);
        Some(ActiveShow {
            show_id: slot.show_id.clone().unwrap_or_default(),
            show_text: text.trim().to_string(),
        })
    }

    /// Сеанс активного слота, по которому можно запросить занятые места.
    pub fn active_show_id(&self) -> Option<&str> {
        self.active_slot().and_then(TimingSlot::show_id)
    }

    pub fn render(&self) -> String {
        let mut html = format!(r#"<ul id="{}" class="timings-list">"#, escape(&self.id));
        for slot in &self.slots {
            let mut class = String::from("time-slot");
            if slot.active {
                class.push_str(" active");
            }
            if slot.no_shows {
                class.push_str(" no-shows");
            }
            html.push_str(&format!(r#"<li class="{}""#, class));
            if let Some(id) = slot.show_id() {
                html.push_str(&format!(r#" data-show-id="{}""#, escape(id)));
            }
            html.push_str(&format!(">{}", escape(&slot.text)));
            if let Some(meta) = &slot.meta {
                html.push_str(&format!(r#"<span class="meta">{}</span>"#, escape(meta)));
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        html
    }
}
