use crate::utils::metrics::{Method, Metrics, Status};
use tokio::time::Instant;
use tracing::{Span, error, info, info_span};

/// Span and start time of one service operation.
pub struct TracingContext {
    pub span: Span,
    pub start_time: Instant,
    pub method: Method,
}

impl TracingContext {
    pub fn start(component: &'static str, operation: &'static str, method: Method) -> Self {
        let span = info_span!("operation", component, operation);
        span.in_scope(|| info!("Starting operation: {component}.{operation}"));

        Self {
            span,
            start_time: Instant::now(),
            method,
        }
    }

    pub fn complete_success(self, metrics: &Metrics, message: &str) {
        self.complete(metrics, Status::Success, message);
    }

    pub fn complete_error(self, metrics: &Metrics, message: &str) {
        self.complete(metrics, Status::Error, message);
    }

    fn complete(self, metrics: &Metrics, status: Status, message: &str) {
        let elapsed = self.start_time.elapsed().as_secs_f64();

        self.span.in_scope(|| match status {
            Status::Success => info!(duration_secs = elapsed, "✅ {message}"),
            Status::Error => error!(duration_secs = elapsed, "❌ {message}"),
        });

        metrics.record(self.method, status, elapsed);
    }
}
