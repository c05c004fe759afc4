//! Модель сетки мест.
//!
//! Источник истины для выбора и занятости - карта `SeatId -> SeatState`
//! внутри [`SeatGridController`]. Разметка в [`render`] строится из неё
//! и никогда не читается обратно.

pub mod render;
pub mod timings;

use std::collections::HashMap;
use tracing::debug;

use crate::models::{SeatId, SeatLayoutEntry, SeatState, SeatView, Section};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    pub row: String,
    pub seats: Vec<SeatId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatColumn {
    pub section: Section,
    pub rows: Vec<SeatRow>,
}

/// Группа колонок между двумя проходами.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatBlock {
    pub columns: Vec<SeatColumn>,
}

/// Раскладывает схему зала на блоки (по проходам), колонки (по секциям,
/// в порядке первого появления) и ряды.
///
/// Блок, открытый перед проходом, попадает в результат, даже если пуст.
pub fn group_layout(layout: &[SeatLayoutEntry]) -> Vec<SeatBlock> {
    let mut blocks = Vec::new();
    let mut current = SeatBlock::default();

    for entry in layout {
        match entry {
            SeatLayoutEntry::Aisle { .. } => {
                blocks.push(std::mem::take(&mut current));
            }
            SeatLayoutEntry::Row { row, count, section } => {
                let section = section.unwrap_or_default();
                let column_idx = match current.columns.iter().position(|c| c.section == section) {
                    Some(idx) => idx,
                    None => {
                        current.columns.push(SeatColumn {
                            section,
                            rows: Vec::new(),
                        });
                        current.columns.len() - 1
                    }
                };

                current.columns[column_idx].rows.push(SeatRow {
                    row: row.clone(),
                    seats: (1..=*count).map(|i| SeatId::new(row, i)).collect(),
                });
            }
        }
    }

    blocks.push(current);
    blocks
}

#[derive(Debug, Clone, Default)]
pub struct SeatGridController {
    blocks: Vec<SeatBlock>,
    // Порядок мест в разметке: блок -> колонка -> ряд -> место
    order: Vec<SeatId>,
    seats: HashMap<SeatId, SeatState>,
}

impl SeatGridController {
    /// Строит сетку; места из `occupied` сразу отрисовываются занятыми.
    pub fn new(layout: &[SeatLayoutEntry], occupied: &[SeatId]) -> Self {
        let mut controller = Self::default();
        controller.rebuild(layout, occupied);
        controller
    }

    /// Сетка без мест: контейнер на странице не найден.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Полностью пересобирает сетку. Прежний выбор не сохраняется.
    pub fn rebuild(&mut self, layout: &[SeatLayoutEntry], occupied: &[SeatId]) {
        self.blocks = group_layout(layout);
        self.order = self
            .blocks
            .iter()
            .flat_map(|b| b.columns.iter())
            .flat_map(|c| c.rows.iter())
            .flat_map(|r| r.seats.iter().cloned())
            .collect();

        self.seats = self
            .order
            .iter()
            .map(|id| {
                let state = if occupied.contains(id) {
                    SeatState::occupied()
                } else {
                    SeatState::default()
                };
                (id.clone(), state)
            })
            .collect();

        debug!("Seat grid built: {} seats in {} blocks", self.order.len(), self.blocks.len());
    }

    pub fn blocks(&self) -> &[SeatBlock] {
        &self.blocks
    }

    pub fn seat_ids(&self) -> &[SeatId] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn state(&self, id: &str) -> Option<SeatState> {
        self.seats.get(id).copied()
    }

    pub fn view(&self, id: &str) -> Option<SeatView> {
        self.state(id).map(SeatView::of)
    }

    /// Переключает выбор места. Возвращает новое значение `selected`
    /// или `None`, если место неизвестно или занято.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let state = self.seats.get_mut(id)?;
        if state.occupied {
            return None;
        }
        state.selected = !state.selected;
        Some(state.selected)
    }

    /// Сверяет все места со списком занятых: место занято тогда и только
    /// тогда, когда оно есть в `booked`.
    pub fn mark_booked_seats<I, S>(&mut self, booked: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let booked: std::collections::HashSet<String> =
            booked.into_iter().map(|s| s.as_ref().to_string()).collect();

        let mut occupied = 0usize;
        for (id, state) in self.seats.iter_mut() {
            let is_booked = booked.contains(id.as_str());
            state.set_occupied(is_booked);
            occupied += usize::from(is_booked);
        }

        debug!("Booked seats reconciled: {} of {} occupied", occupied, self.seats.len());
    }

    pub fn selected_seats(&self) -> Vec<SeatId> {
        self.order
            .iter()
            .filter(|id| self.seats.get(*id).is_some_and(|s| s.selected))
            .map(|id| id.as_str().trim())
            .filter(|id| !id.is_empty())
            .map(SeatId::from)
            .collect()
    }

    pub fn occupied_seats(&self) -> Vec<SeatId> {
        self.order
            .iter()
            .filter(|id| self.seats.get(*id).is_some_and(|s| s.occupied))
            .cloned()
            .collect()
    }
}
