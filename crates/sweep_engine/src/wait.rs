use std::future::Future;
use std::time::Duration;

/// A bounded poll: at most `attempts` probes, `interval` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl WaitPolicy {
    /// Menu appearance after clicking the trigger (2 s total).
    pub const MENU: WaitPolicy = WaitPolicy::new(10, Duration::from_millis(200));
    /// Optional confirmation dialog after choosing the removal entry.
    pub const CONFIRM: WaitPolicy = WaitPolicy::new(5, Duration::from_millis(100));
    /// Playlist page marker after navigation.
    pub const PAGE_READY: WaitPolicy = WaitPolicy::new(20, Duration::from_millis(500));

    pub const fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }

    pub fn budget(&self) -> Duration {
        self.interval * self.attempts
    }
}

/// Polls `probe` until it yields `Some`, sleeping between attempts.
///
/// The probe runs at least once even when `attempts` is zero, and there is
/// no sleep after the final attempt.
pub async fn poll_until<T, E, F, Fut>(policy: WaitPolicy, mut probe: F) -> Result<Option<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let attempts = policy.attempts.max(1);
    for attempt in 1..=attempts {
        if let Some(found) = probe().await? {
            return Ok(Some(found));
        }
        if attempt < attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn gives_up_after_the_budget() {
        let mut calls = 0;
        let found: Result<Option<()>, Infallible> =
            poll_until(WaitPolicy::new(3, Duration::from_millis(1)), || {
                calls += 1;
                async { Ok(None) }
            })
            .await;
        assert_eq!(found, Ok(None));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn stops_at_first_hit() {
        let mut calls = 0;
        let found: Result<Option<u32>, Infallible> =
            poll_until(WaitPolicy::new(10, Duration::from_millis(1)), || {
                calls += 1;
                let value = (calls == 2).then_some(calls);
                async move { Ok(value) }
            })
            .await;
        assert_eq!(found, Ok(Some(2)));
        assert_eq!(calls, 2);
    }

    #[test]
    fn default_menu_budget_is_two_seconds() {
        assert_eq!(WaitPolicy::MENU.budget(), Duration::from_secs(2));
    }
}
