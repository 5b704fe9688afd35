// veche-client/src/utils/cancel.rs
use crate::models::ClientError;
use futures::future::{abortable, AbortHandle, Aborted};
use std::future::Future;

// Handle held by whoever owns the view the request is loading data for
#[derive(Debug, Clone)]
pub struct CancelHandle {
    inner: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.inner.abort();
    }
}

/// Wraps a request so it can be dropped from the outside.
///
/// Once `cancel` has been called the wrapped future is not polled again and
/// resolves to `ClientError::Cancelled`, so a late response never reaches
/// the caller.
pub fn cancellable<F, T>(request: F) -> (impl Future<Output = Result<T, ClientError>>, CancelHandle)
where
    F: Future<Output = Result<T, ClientError>>,
{
    let (fut, handle) = abortable(request);
    let wrapped = async move {
        match fut.await {
            Ok(result) => result,
            Err(Aborted) => Err(ClientError::Cancelled),
        }
    };
    (wrapped, CancelHandle { inner: handle })
}
