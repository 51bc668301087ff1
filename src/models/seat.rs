use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Тип места в зале. Числовые идентификаторы совпадают с теми, что хранит бэкенд.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum SeatType {
    /// Зарезервированная клетка, туда никогда нельзя поставить место.
    NotPlaceable,
    /// Пустая, но доступная клетка (значение по умолчанию).
    Placeable,
    Standard,
    Vip,
    /// Диван на двоих, 1x2.
    Lovers,
    /// Кровать, 2x2.
    Bed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown seat type id {0}")]
pub struct UnknownSeatType(pub i32);

/// Сколько клеток сетки занимает место.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Footprint {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl Footprint {
    pub fn is_single(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// Все клетки прямоугольника с левым верхним углом в `anchor`, построчно.
    pub fn cells_from(self, anchor: Position) -> impl Iterator<Item = Position> {
        (0..self.rows).flat_map(move |dr| {
            (0..self.cols).map(move |dc| Position {
                row: anchor.row.saturating_add(dr),
                col: anchor.col.saturating_add(dc),
            })
        })
    }
}

/// Метаданные типа места для отображения в легенде.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatTypeInfo {
    pub type_id: i32,
    pub name: &'static str,
    pub color: &'static str,
    pub footprint: Footprint,
}

impl SeatType {
    pub const ALL: [SeatType; 6] = [
        SeatType::NotPlaceable,
        SeatType::Placeable,
        SeatType::Standard,
        SeatType::Vip,
        SeatType::Lovers,
        SeatType::Bed,
    ];

    pub fn id(self) -> i32 {
        match self {
            SeatType::NotPlaceable => -1,
            SeatType::Placeable => 0,
            SeatType::Standard => 1,
            SeatType::Vip => 2,
            SeatType::Lovers => 3,
            SeatType::Bed => 4,
        }
    }

    pub fn info(self) -> SeatTypeInfo {
        let (name, color, footprint) = match self {
            SeatType::NotPlaceable => ("Not Placeable", "#424242", Footprint::default()),
            SeatType::Placeable => ("Placeable", "#4CAFEB", Footprint::default()),
            SeatType::Standard => ("Standard", "#C0C0C0", Footprint::default()),
            SeatType::Vip => ("VIP", "#FFD700", Footprint::default()),
            SeatType::Lovers => ("Lovers", "#FF4081", Footprint { rows: 1, cols: 2 }),
            SeatType::Bed => ("Bed", "#6A0DAD", Footprint { rows: 2, cols: 2 }),
        };
        SeatTypeInfo {
            type_id: self.id(),
            name,
            color,
            footprint,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn footprint(self) -> Footprint {
        self.info().footprint
    }

    pub fn is_multi_cell(self) -> bool {
        !self.footprint().is_single()
    }
}

impl TryFrom<i32> for SeatType {
    type Error = UnknownSeatType;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        SeatType::ALL
            .into_iter()
            .find(|seat_type| seat_type.id() == id)
            .ok_or(UnknownSeatType(id))
    }
}

impl From<SeatType> for i32 {
    fn from(seat_type: SeatType) -> Self {
        seat_type.id()
    }
}

/// Координаты клетки сетки (с нуля).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Запись о месте в том виде, в каком её отдаёт и принимает бэкенд.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatRecord {
    pub row: i32,
    pub col: i32,
    pub type_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_row: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_col: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeatRecord {
    /// Корень размещения; если бэкенд его не прислал, место само себе корень.
    pub fn root(&self) -> (i32, i32) {
        (
            self.root_row.unwrap_or(self.row),
            self.root_col.unwrap_or(self.col),
        )
    }
}

/// Клетка сетки с уже разрешённым типом места.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub position: Position,
    pub seat_type: SeatType,
    /// Клетка-якорь, которой принадлежит размещение.
    pub root: Position,
    pub name: Option<String>,
}

impl SeatCell {
    pub fn single(position: Position, seat_type: SeatType) -> Self {
        Self {
            position,
            seat_type,
            root: position,
            name: None,
        }
    }

    pub fn rooted_at(position: Position, seat_type: SeatType, root: Position) -> Self {
        Self {
            position,
            seat_type,
            root,
            name: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.position == self.root
    }

    /// Запись для отправки на бэкенд. Имя не передаём, его назначает сервер.
    pub fn to_record(&self) -> SeatRecord {
        SeatRecord {
            row: self.position.row as i32,
            col: self.position.col as i32,
            type_id: self.seat_type.id(),
            root_row: Some(self.root.row as i32),
            root_col: Some(self.root.col as i32),
            name: None,
        }
    }
}
