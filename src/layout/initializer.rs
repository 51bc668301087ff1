use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{GridDims, PlacementError};
use crate::models::{Position, SeatRecord, SeatType};

/// Какие записи отправлять бэкенду при первичной разметке зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatInitEmission {
    /// Одна запись на размещение: многоклеточные места передаются только
    /// корнем, остальные клетки бэкенд восстанавливает сам.
    #[default]
    RootOnly,
    /// Одна запись на каждую физическую клетку, как при редактировании.
    EveryCell,
}

impl FromStr for SeatInitEmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "root_only" => Ok(SeatInitEmission::RootOnly),
            "every_cell" => Ok(SeatInitEmission::EveryCell),
            other => Err(format!("unknown seat init emission '{}'", other)),
        }
    }
}

/// Холст для разметки зала с нуля: каждая клетка хранит только тип.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCanvas {
    dims: GridDims,
    cells: Vec<SeatType>,
}

impl LayoutCanvas {
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![SeatType::Placeable; dims.cell_count()],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn get(&self, pos: Position) -> Option<SeatType> {
        self.dims.index(pos).map(|i| self.cells[i])
    }

    /// Красит клетку (или весь footprint многоклеточного типа).
    ///
    /// Проверяются только границы: на свежем холсте заблокированных клеток нет.
    /// Если footprint не помещается, холст не меняется.
    pub fn paint(&mut self, anchor: Position, seat_type: SeatType) -> Result<(), PlacementError> {
        let targets: Vec<Position> = seat_type.footprint().cells_from(anchor).collect();
        let mut indices = Vec::with_capacity(targets.len());
        for pos in targets {
            let i = self.dims.index(pos).ok_or(PlacementError::OutOfBounds {
                row: anchor.row,
                col: anchor.col,
                seat_type,
            })?;
            indices.push(i);
        }
        for i in indices {
            self.cells[i] = seat_type;
        }
        Ok(())
    }

    /// Для каждой клетки: корень её многоклеточного размещения, если он есть.
    ///
    /// Клетка является корнем, если это левый верхний угол полного footprint'а
    /// своего типа, ещё не занятого другим корнем. Проход построчный, поэтому
    /// соседние размещения одного типа получают каждое свой корень, а обрывки
    /// (частично перекрашенные размещения) остаются без корня.
    fn resolve_roots(&self) -> Vec<Option<Position>> {
        let mut owners: Vec<Option<Position>> = vec![None; self.cells.len()];
        for pos in self.dims.positions() {
            let Some(i) = self.dims.index(pos) else { continue };
            let seat_type = self.cells[i];
            if !seat_type.is_multi_cell() || owners[i].is_some() {
                continue;
            }

            let footprint: Option<Vec<usize>> = seat_type
                .footprint()
                .cells_from(pos)
                .map(|cell| {
                    self.dims
                        .index(cell)
                        .filter(|&j| self.cells[j] == seat_type && owners[j].is_none())
                })
                .collect();

            if let Some(footprint) = footprint {
                for j in footprint {
                    owners[j] = Some(pos);
                }
            }
        }
        owners
    }

    /// Записи для эндпоинта инициализации.
    pub fn records(&self, emission: SeatInitEmission) -> Vec<SeatRecord> {
        let owners = self.resolve_roots();
        let mut records = Vec::with_capacity(self.cells.len());

        for pos in self.dims.positions() {
            let Some(i) = self.dims.index(pos) else { continue };
            let seat_type = self.cells[i];

            let (seat_type, root) = match (seat_type.is_multi_cell(), owners[i]) {
                (false, _) => (seat_type, pos),
                (true, Some(root)) => {
                    if emission == SeatInitEmission::RootOnly && root != pos {
                        continue;
                    }
                    (seat_type, root)
                }
                // обрывок размещения
                (true, None) => (SeatType::Placeable, pos),
            };

            records.push(SeatRecord {
                row: pos.row as i32,
                col: pos.col as i32,
                type_id: seat_type.id(),
                root_row: Some(root.row as i32),
                root_col: Some(root.col as i32),
                name: None,
            });
        }
        records
    }
}
