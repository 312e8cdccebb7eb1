use thiserror::Error;

use crate::Cycle;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("turn-phase hooks form {} dependency cycle(s): {}", .0.len(), join_cycles(.0))]
    Cycle(Vec<Cycle>),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

fn join_cycles(cycles: &[Cycle]) -> String {
    cycles.iter().map(ToString::to_string).collect::<Vec<_>>().join(" | ")
}
