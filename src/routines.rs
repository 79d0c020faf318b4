pub mod routine;
pub mod update_ranges;

pub use routine::{Routine, RoutineError};
pub use update_ranges::UpdateRangesRoutine;
