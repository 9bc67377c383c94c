use emitkit_core::{all, Awaitable, ListenerResult};
use std::time::{Duration, Instant};
use tokio::time::sleep;

#[tokio::test]
async fn test_all_runs_inputs_concurrently() {
    let start = Instant::now();

    let inputs: Vec<Awaitable<'static, Result<u64, anyhow::Error>>> = [100u64, 80, 60]
        .into_iter()
        .map(|ms| {
            Awaitable::pending(async move {
                sleep(Duration::from_millis(ms)).await;
                Ok(ms)
            })
        })
        .collect();

    let values = all(inputs).await.expect("all inputs succeed");

    assert_eq!(values, vec![100, 80, 60]);
    // Concurrent polling: total time tracks the slowest input, not the sum.
    assert!(start.elapsed() < Duration::from_millis(200));
}

#[tokio::test]
async fn test_all_propagates_listener_errors() {
    let failing = Awaitable::pending(async {
        sleep(Duration::from_millis(5)).await;
        let outcome: ListenerResult = Err(anyhow::anyhow!("listener failed"));
        outcome
    });

    let err = all([Awaitable::ready(Ok(())), failing])
        .await
        .expect_err("one input fails");

    assert_eq!(err.to_string(), "listener failed");
}
