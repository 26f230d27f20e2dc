use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,unobot=info,actix_web=info,sqlx=warn,sea_orm=warn";

/// Install the process subscriber: one flat JSON object per event on stdout.
///
/// `RUST_LOG` replaces [`DEFAULT_FILTER`]. Events raised inside a request
/// carry the enclosing `request` span, so game logs line up with
/// `request_completed` by `trace_id`.
pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
