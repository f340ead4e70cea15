use std::fmt::Display;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Name of the environment variable which controls the log filter.
pub const LOG_ENV_VAR: &str = "MEMORY_MATCH_LOG";

/// Installs the global tracing subscriber.
///
/// The filter is taken from [`LOG_ENV_VAR`] and falls back to `info`. Log lines go to stderr
/// because stdout belongs to whatever renders the grid.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber was already set up");
    }
}

pub fn ok_or_log_as_warn<T, E: Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_through() {
        assert_eq!(ok_or_log_as_warn::<_, String>(Ok(5)), Some(5));
    }

    #[test]
    fn err_becomes_none() {
        assert_eq!(ok_or_log_as_warn::<u8, _>(Err("port gone")), None);
    }
}
