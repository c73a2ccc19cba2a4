//! Runtime plumbing errors.
//!
//! Game logic never fails; only thread management around it can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to spawn the {name} thread")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("the {name} thread panicked")]
    Panicked { name: &'static str },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Spawn a named thread, mapping the io error.
pub(crate) fn spawn_named<F, T>(name: &'static str, f: F) -> Result<std::thread::JoinHandle<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::Builder::new()
        .name(format!("skirmish-{name}"))
        .spawn(f)
        .map_err(|source| RuntimeError::Spawn { name, source })
}
