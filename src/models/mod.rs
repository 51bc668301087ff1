pub mod concession;
pub mod movie;
pub mod schedule;
pub mod screen;
pub mod seat;

pub use concession::{Concession, ConcessionDraft, ConcessionItem, ConcessionPayload};
pub use movie::Movie;
pub use schedule::{ScheduleEntry, ScreenSchedule};
pub use screen::{ScreenDetail, ScreenListItem, ScreenSummary, ScreenUpsert};
pub use seat::{Footprint, Position, SeatCell, SeatRecord, SeatType, SeatTypeInfo, UnknownSeatType};
