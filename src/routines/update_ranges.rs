use error_stack::ResultExt;
use tracing::{info_span, instrument, Instrument};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use super::routine::{Routine, RoutineError};
use crate::{
    cli::progress::{self, ProgressSpanExt},
    payload::UpdatePayload,
    sheets::{RangeWriter, SheetRanges},
};

/// Writes every range of the payload, in file order, stopping at the first failure.
pub struct UpdateRangesRoutine<'a, W> {
    payload: &'a UpdatePayload,
    writer: &'a W,
}

impl<'a, W> std::fmt::Debug for UpdateRangesRoutine<'a, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateRangesRoutine")
            .field("spreadsheet_id", &self.payload.spreadsheet_id)
            .field("list_name", &self.payload.list_name)
            .field("ranges", &self.payload.data.len())
            .finish()
    }
}

impl<'a, W: RangeWriter> UpdateRangesRoutine<'a, W> {
    pub fn new(payload: &'a UpdatePayload, writer: &'a W) -> Self {
        Self { payload, writer }
    }
}

#[async_trait::async_trait]
impl<'a, W: RangeWriter> Routine for UpdateRangesRoutine<'a, W> {
    fn name(&self) -> &str {
        "UpdateRanges"
    }

    #[instrument(name = "UpdateRangesRoutine::run")]
    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        let ranges = SheetRanges::new(&self.payload.list_name);
        let total = self.payload.data.len();
        let span = info_span!("update_ranges", ranges = total);
        progress::track(&span, total as u64);

        async {
            for (written, (range, values)) in self.payload.data.iter().enumerate() {
                let a1 = ranges.range(range);
                span.info(&format!("Writing {}", a1));

                self.writer
                    .write_range(&self.payload.spreadsheet_id, &a1, values.clone())
                    .await
                    .change_context_lazy(|| RoutineError::RangeWriteFailed {
                        range: a1.to_string(),
                    })
                    .attach_printable_lazy(|| {
                        format!(
                            "{} of {} ranges were written before the failure",
                            written, total
                        )
                    })
                    .inspect_err(|_| span.error(&format!("Failed to write {}", a1)))?;

                span.pb_inc(1);
            }
            Ok::<(), error_stack::Report<RoutineError>>(())
        }
        .instrument(span.clone())
        .await
    }
}
