use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    operations: AtomicU64,
    rows_written: AtomicU64,
    validation_errors: AtomicU64,
    backend_errors: AtomicU64,
}

impl Metrics {
    pub fn record_operation(&self) {
        self.operations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rows_written(&self, count: usize) {
        self.rows_written.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backend_error(&self) {
        self.backend_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn backend_errors(&self) -> u64 {
        self.backend_errors.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let operations = self.operations.load(Ordering::Relaxed);
        let rows_written = self.rows_written.load(Ordering::Relaxed);
        let validation_errors = self.validation_errors.load(Ordering::Relaxed);
        let backend_errors = self.backend_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE history_operations_total counter\n\
history_operations_total {}\n\
# TYPE history_rows_written_total counter\n\
history_rows_written_total {}\n\
# TYPE history_validation_errors_total counter\n\
history_validation_errors_total {}\n\
# TYPE history_backend_errors_total counter\n\
history_backend_errors_total {}\n",
            operations, rows_written, validation_errors, backend_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_output_reflects_counters() {
        let metrics = Metrics::default();
        metrics.record_operation();
        metrics.record_operation();
        metrics.record_rows_written(3);
        metrics.record_backend_error();

        let text = metrics.render_prometheus();
        assert!(text.contains("history_operations_total 2\n"));
        assert!(text.contains("history_rows_written_total 3\n"));
        assert!(text.contains("history_validation_errors_total 0\n"));
        assert!(text.contains("history_backend_errors_total 1\n"));
    }
}
