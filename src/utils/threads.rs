use futures::StreamExt;
use futures::stream;
use std::future::Future;

/// 以受限并发执行一组异步任务，按任务提交顺序返回结果
pub async fn do_parallel_with_limit<F, T>(futures_list: Vec<F>, limit: usize) -> Vec<T>
where
    F: Future<Output = T>,
{
    let limit = limit.max(1);
    let mut results: Vec<(usize, T)> = stream::iter(
        futures_list
            .into_iter()
            .enumerate()
            .map(|(index, fut)| async move { (index, fut.await) }),
    )
    .buffer_unordered(limit)
    .collect()
    .await;

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, value)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_results_keep_submission_order() {
        let futures_list = (0..8usize)
            .map(|i| async move {
                // 让靠前的任务睡得更久，验证结果仍按提交顺序返回
                tokio::time::sleep(std::time::Duration::from_millis((8 - i as u64) * 5)).await;
                i
            })
            .collect();

        let results = do_parallel_with_limit(futures_list, 3).await;
        assert_eq!(results, (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let futures_list = (0..10usize)
            .map(|_| {
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                async move {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                    active.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();

        do_parallel_with_limit(futures_list, 2).await;
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_zero_limit_is_clamped() {
        let futures_list: Vec<std::pin::Pin<Box<dyn std::future::Future<Output = i32>>>> =
            vec![Box::pin(async { 1 }), Box::pin(async { 2 })];
        let results = do_parallel_with_limit(futures_list, 0).await;
        assert_eq!(results, vec![1, 2]);
    }
}
