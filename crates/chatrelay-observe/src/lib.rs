//! Observability for chatrelay: subscriber setup and the OpenTelemetry bridge.

pub mod tracing_setup;
