// ABOUTME: ExecutionContext - runs a future to completion from synchronous code.
// ABOUTME: Reuses a surrounding tokio runtime when there is one, never nests runtimes.

use std::future::Future;

use tokio::runtime::{Builder, Handle, RuntimeFlavor};

/// Whether a tokio runtime is available to the calling thread.
#[derive(Debug, Clone)]
pub enum ExecutionContext {
    /// No runtime; one is created for the call and dropped afterwards.
    Detached,
    /// An existing runtime to run on.
    Runtime(Handle),
}

impl ExecutionContext {
    /// Inspect the calling thread. No registered runtime is treated as `Detached`.
    pub fn detect() -> Self {
        match Handle::try_current() {
            Ok(handle) => Self::Runtime(handle),
            Err(_) => Self::Detached,
        }
    }

    /// Block the current thread until `future` completes.
    ///
    /// On a multi-thread runtime the worker is handed off with `block_in_place`
    /// and the future runs on that runtime through `handle`.
    /// A current-thread runtime has a single worker that this call would be
    /// sitting on, so `handle` is not used: the future runs on a scoped helper
    /// thread with its own runtime, and anything it spawns lives there.
    pub fn block_on<F>(self, future: F) -> std::io::Result<F::Output>
    where
        F: Future + Send,
        F::Output: Send,
    {
        match self {
            Self::Detached => run_detached(future),
            Self::Runtime(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::MultiThread => {
                    Ok(tokio::task::block_in_place(|| handle.block_on(future)))
                }
                _ => std::thread::scope(|scope| {
                    scope
                        .spawn(|| run_detached(future))
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                }),
            },
        }
    }
}

fn run_detached<F: Future>(future: F) -> std::io::Result<F::Output> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    Ok(runtime.block_on(future))
}
