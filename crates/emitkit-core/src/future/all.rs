use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt::Display;
use std::future::Future;

/// Wait for every input and collect the values in input order.
///
/// Inputs are polled concurrently on the current task. The result keeps the
/// order of `inputs` regardless of which input finished first.
///
/// If any input fails, the returned error is the first failure *detected*,
/// which is not necessarily the first one by position. Inputs are never
/// cancelled: the combinator still drives every remaining input to
/// completion before returning. Failures detected after the first are
/// logged at `warn` level and dropped.
///
/// ```rust,ignore
/// let values = all([Awaitable::ready(Ok(1)), Awaitable::pending(fetch_two())]).await?;
/// assert_eq!(values, vec![1, 2]);
/// ```
pub async fn all<I, F, T, E>(inputs: I) -> Result<Vec<T>, E>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut pending: FuturesUnordered<_> = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| async move { (index, input.await) })
        .collect();

    let mut values: Vec<Option<T>> = std::iter::repeat_with(|| None)
        .take(pending.len())
        .collect();
    let mut first_error: Option<E> = None;

    while let Some((index, outcome)) = pending.next().await {
        match outcome {
            Ok(value) => values[index] = Some(value),
            Err(err) => match first_error {
                None => first_error = Some(err),
                Some(_) => {
                    tracing::warn!(input = index, error = %err, "Suppressed additional failure");
                }
            },
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(values.into_iter().flatten().collect()),
    }
}
