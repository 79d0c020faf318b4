use tracing_indicatif::style::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TEMPLATE: &str = "{spinner} [{bar:30}] {pos}/{len} {msg}";

/// Turns the span's indicatif spinner into a bar of `len` steps.
pub fn track(span: &Span, len: u64) {
    if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
        span.pb_set_style(&style.progress_chars("=> "));
    }
    span.pb_set_length(len);
}

/// Mirrors progress messages into tracing events.
pub trait ProgressSpanExt {
    fn info(&self, msg: &str);
    fn error(&self, msg: &str);
}

impl ProgressSpanExt for Span {
    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
        self.pb_set_message(msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!("{}", msg);
        self.pb_set_message(msg);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing::info_span;
    use tracing_indicatif::IndicatifLayer;
    use tracing_subscriber::{layer::SubscriberExt, Registry};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracked_span_mirrors_messages_into_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = Registry::default().with(IndicatifLayer::new()).with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(move || writer.clone()),
        );

        tracing::subscriber::with_default(subscriber, || {
            let span = info_span!("update_ranges", ranges = 2);
            track(&span, 2);
            let _entered = span.enter();
            span.info("Writing Sheet1!A1");
            span.pb_inc(1);
            span.error("Failed to write Sheet1!B1");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("Writing Sheet1!A1"));
        assert!(output.contains("ERROR"));
        assert!(output.contains("Failed to write Sheet1!B1"));
    }
}
