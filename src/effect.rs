use crate::NonEmptySeq;
use futures::{stream::FuturesUnordered, StreamExt};
use std::future::Future;

///effectful traversals. the per-element function decides the error type; this
///module only controls ordering and how results are put back together.
impl<T> NonEmptySeq<T> {
    ///runs the effects strictly in element order, one at a time. the first
    ///failure stops the walk before any later effect is started.
    pub async fn try_map<U, E, Fut>(
        self,
        mut f: impl FnMut(T) -> Fut,
    ) -> Result<NonEmptySeq<U>, E>
    where
        Fut: Future<Output = Result<U, E>>,
    {
        let mut out = Vec::with_capacity(self.len().get());

        for value in self.into_vec() {
            out.push(f(value).await?);
        }

        trace!(len = out.len(), "sequential effectful map finished");

        Ok(NonEmptySeq::from_non_empty_vec(out))
    }

    ///starts every effect up front and drives them concurrently. results land
    ///back in original element order no matter which effect finishes first.
    ///on the first failure the remaining futures are dropped, which cancels
    ///whatever the runtime still had in flight.
    pub async fn try_map_concurrent<U, E, Fut>(
        self,
        mut f: impl FnMut(T) -> Fut,
    ) -> Result<NonEmptySeq<U>, E>
    where
        Fut: Future<Output = Result<U, E>>,
    {
        let len = self.len().get();

        let mut in_flight: FuturesUnordered<_> = self
            .into_vec()
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let fut = f(value);
                async move { (index, fut.await) }
            })
            .collect();

        let mut slots: Vec<Option<U>> = Vec::with_capacity(len);
        slots.resize_with(len, || None);

        while let Some((index, result)) = in_flight.next().await {
            match result {
                Ok(value) => {
                    trace!(index, "effect finished");
                    slots[index] = Some(value);
                }
                Err(e) => return Err(e),
            }
        }

        let out: Vec<U> = slots.into_iter().flatten().collect();
        debug_assert_eq!(out.len(), len);

        trace!(len, "concurrent effectful map finished");

        Ok(NonEmptySeq::from_non_empty_vec(out))
    }
}

#[cfg(test)]
mod tests {
    use crate::{NonEmptySeq, ne_seq};
    use std::{
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    #[tokio::test]
    async fn test_sequential_map_runs_in_element_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mapped = ne_seq![1, 2, 3]
            .try_map(|x| {
                let seen = Arc::clone(&seen);
                async move {
                    seen.lock().unwrap().push(x);
                    Ok::<_, &str>(x * 10)
                }
            })
            .await
            .unwrap();

        assert_eq!(mapped.as_slice(), &[10, 20, 30]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_sequential_map_short_circuits() {
        let started = Arc::new(AtomicUsize::new(0));

        let result = ne_seq![1, 2, 3, 4]
            .try_map(|x| {
                started.fetch_add(1, Ordering::SeqCst);
                async move { if x == 2 { Err("boom") } else { Ok(x) } }
            })
            .await;

        assert_eq!(result, Err("boom"));
        //the failing effect was the last one started
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_sequential_map_single() {
        let mapped = NonEmptySeq::single(7)
            .try_map(|x| async move { Ok::<_, &str>(x + 1) })
            .await
            .unwrap();

        assert_eq!(mapped, NonEmptySeq::single(8));
    }

    #[tokio::test]
    async fn test_concurrent_map_reassembles_in_order() {
        //later elements finish first; the output order must not care
        let mapped = ne_seq![30_u64, 20, 10]
            .try_map_concurrent(|ms| async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok::<_, &str>(ms)
            })
            .await
            .unwrap();

        assert_eq!(mapped.as_slice(), &[30, 20, 10]);
    }

    #[tokio::test]
    async fn test_concurrent_map_starts_every_effect() {
        let started = Arc::new(AtomicUsize::new(0));

        let mapped = ne_seq![1, 2, 3]
            .try_map_concurrent(|x| {
                started.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, &str>(x) }
            })
            .await
            .unwrap();

        assert_eq!(mapped.as_slice(), &[1, 2, 3]);
        assert_eq!(started.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_concurrent_map_surfaces_first_failure() {
        let result = ne_seq![1_u64, 2, 3]
            .try_map_concurrent(|x| async move {
                if x == 2 {
                    Err("boom")
                } else {
                    //long enough that the test only passes by cancellation
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(x)
                }
            })
            .await;

        assert_eq!(result, Err("boom"));
    }
}
