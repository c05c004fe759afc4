use super::SeatGridController;
use crate::models::{SeatId, SeatView};

/// Контейнер страницы, в который отрисовывается сетка.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridContainer {
    id: String,
    html: String,
    renders: u64,
}

impl GridContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            html: String::new(),
            renders: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Заменяет всё содержимое контейнера.
    pub fn replace(&mut self, html: String) {
        self.html = html;
        self.renders += 1;
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    /// Полная разметка контейнера вместе с обёрткой.
    pub fn outer_html(&self) -> String {
        format!(r#"<div id="{}" class="seating-grid">{}</div>"#, escape(&self.id), self.html)
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Разметка одной кнопки места. Оба атрибута `data-seat-id` и `data-seat`
/// выставляются для совместимости со скриптами страницы.
pub fn render_seat(id: &SeatId, view: &SeatView) -> String {
    let id = escape(id.as_str());
    let mut html = format!(
        r#"<button type="button" class="{}" data-seat-id="{id}" data-seat="{id}" aria-label="{id}" aria-pressed="{}" data-available="{}""#,
        view.class_attr(),
        view.aria_pressed,
        view.available,
    );
    if view.aria_disabled {
        html.push_str(r#" aria-disabled="true""#);
    }
    if view.disabled {
        html.push_str(" disabled");
    }
    if let Some(style) = view.style_attr() {
        html.push_str(&format!(r#" style="{}""#, style));
    }
    html.push_str(&format!(">{id}</button>"));
    html
}

/// Проекция текущего состояния сетки в HTML.
pub fn render_grid(grid: &SeatGridController) -> String {
    let mut html = String::new();

    for block in grid.blocks() {
        html.push_str(r#"<div class="seat-block">"#);
        for column in &block.columns {
            html.push_str(&format!(
                r#"<div class="seat-column" data-section="{}">"#,
                column.section.as_str()
            ));
            for row in &column.rows {
                html.push_str(&format!(
                    r#"<div class="seat-row" aria-label="Row {}">"#,
                    escape(&row.row)
                ));
                for seat in &row.seats {
                    if let Some(view) = grid.view(seat.as_str()) {
                        html.push_str(&render_seat(seat, &view));
                    }
                }
                html.push_str("</div>");
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    html
}
