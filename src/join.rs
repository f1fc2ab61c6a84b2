//! Bounded fan-out over async requests.
//!
//! Both joins run at most `limit` futures at once and return results in input
//! order. They differ only in what a failed branch does to the batch:
//! [`join_fail_fast`] fails the whole batch, [`join_degrade`] replaces the
//! branch with `None`.

use futures::stream::{self, StreamExt, TryStreamExt};
use log::warn;
use std::fmt::Display;
use std::future::Future;

/// Run `task` over `items`; the first error aborts the remaining branches.
pub async fn join_fail_fast<I, F, Fut, T, E>(items: I, limit: usize, task: F) -> Result<Vec<T>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    stream::iter(items)
        .map(task)
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// Run `task` over `items`; a failing branch yields `None` and is logged.
pub async fn join_degrade<I, F, Fut, T, E>(items: I, limit: usize, task: F) -> Vec<Option<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    stream::iter(items)
        .map(task)
        .buffered(limit.max(1))
        .map(|result| match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Dropping failed branch: {}", e);
                None
            }
        })
        .collect()
        .await
}
