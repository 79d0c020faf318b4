use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Failed to write range {range}")]
    RangeWriteFailed { range: String },
}

#[async_trait::async_trait]
pub trait Routine: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}
