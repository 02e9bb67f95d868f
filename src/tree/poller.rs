//! Focus-gated pollers that keep the current-branch subtree fresh.
//!
//! The branch poll compares the live branch with the last one the tree was
//! resolved against and refreshes only on a change. The issue poll refreshes
//! unconditionally so remote edits (state, pull requests) show up. Both skip
//! their tick while the host window is unfocused.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

use super::provider::TreeProvider;
use crate::config::PollingConfig;

/// Whether the host window has focus. Cheap to clone; all clones share state.
#[derive(Debug, Clone)]
pub struct FocusState(Arc<AtomicBool>);

impl Default for FocusState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FocusState {
    pub fn new(focused: bool) -> Self {
        Self(Arc::new(AtomicBool::new(focused)))
    }

    pub fn set_focused(&self, focused: bool) {
        self.0.store(focused, Ordering::Relaxed);
    }

    pub fn is_focused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Owns the poller tasks; dropping it stops them.
pub struct PollerHandle {
    branch: JoinHandle<()>,
    issue: JoinHandle<()>,
}

impl PollerHandle {
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.branch.abort();
        self.issue.abort();
    }
}

pub fn spawn_pollers(
    provider: Arc<TreeProvider>,
    focus: FocusState,
    config: PollingConfig,
) -> PollerHandle {
    debug!(
        branch_ms = config.branch_interval.as_millis() as u64,
        issue_ms = config.issue_interval.as_millis() as u64,
        "starting pollers"
    );

    let branch = spawn_poll(config.branch_interval, focus.clone(), {
        let provider = provider.clone();
        move || {
            let live = provider.live_branch_name();
            if live != provider.last_known_branch_name() {
                debug!(branch = ?live, "branch changed");
                provider.refresh_current_branch();
            }
        }
    });

    let issue = spawn_poll(config.issue_interval, focus, move || {
        trace!("issue poll");
        provider.refresh_current_branch();
    });

    PollerHandle { branch, issue }
}

fn spawn_poll(
    period: Duration,
    focus: FocusState,
    tick: impl Fn() + Send + 'static,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if focus.is_focused() {
                tick();
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::tree::RefreshEvent;
    use crate::tree::fixtures::{MockGateway, MockVcs};
    use tokio::sync::broadcast::Receiver;
    use tokio::sync::broadcast::error::TryRecvError;

    const HOUR: Duration = Duration::from_secs(3600);

    fn setup(vcs: MockVcs) -> (Arc<TreeProvider>, Arc<MockVcs>) {
        let vcs = Arc::new(vcs);
        let provider = Arc::new(TreeProvider::new(
            Arc::new(MockGateway::default()),
            vcs.clone(),
            TreeConfig::default(),
        ));
        (provider, vcs)
    }

    fn polling(branch: Duration, issue: Duration) -> PollingConfig {
        PollingConfig {
            branch_interval: branch,
            issue_interval: issue,
        }
    }

    fn drain(rx: &mut Receiver<RefreshEvent>) -> usize {
        let mut n = 0;
        while rx.try_recv().is_ok() {
            n += 1;
        }
        n
    }

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn branch_poll_is_quiet_while_branch_unchanged() {
        let (provider, _vcs) = setup(MockVcs::on_branch("main"));
        provider
            .get_children(Some(provider.current_branch_root()))
            .await
            .unwrap();
        let mut rx = provider.subscribe();

        let _handle = spawn_pollers(
            provider.clone(),
            FocusState::new(true),
            polling(Duration::from_millis(1000), HOUR),
        );
        advance(3500).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn branch_poll_refreshes_after_branch_switch() {
        let (provider, vcs) = setup(MockVcs::on_branch("main"));
        provider
            .get_children(Some(provider.current_branch_root()))
            .await
            .unwrap();
        let mut rx = provider.subscribe();
        let _handle = spawn_pollers(
            provider.clone(),
            FocusState::new(true),
            polling(Duration::from_millis(1000), HOUR),
        );

        vcs.set_branch(Some("eng-1"));
        advance(1001).await;
        assert_eq!(
            rx.try_recv().unwrap(),
            RefreshEvent::Subtree(provider.current_branch_root().address())
        );

        // Once re-resolved against the new branch the poll goes quiet again.
        provider
            .get_children(Some(provider.current_branch_root()))
            .await
            .unwrap();
        drain(&mut rx);
        advance(3000).await;
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test(start_paused = true)]
    async fn polls_skip_while_unfocused() {
        let (provider, _vcs) = setup(MockVcs::on_branch("main"));
        let mut rx = provider.subscribe();
        let focus = FocusState::new(false);
        let _handle = spawn_pollers(
            provider.clone(),
            focus.clone(),
            polling(Duration::from_millis(1000), Duration::from_millis(5000)),
        );

        advance(12_000).await;
        assert_eq!(drain(&mut rx), 0);

        focus.set_focused(true);
        advance(1000).await;
        assert!(drain(&mut rx) >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn issue_poll_refreshes_every_interval() {
        let (provider, _vcs) = setup(MockVcs::on_branch("main"));
        let mut rx = provider.subscribe();
        let _handle = spawn_pollers(
            provider.clone(),
            FocusState::new(true),
            polling(HOUR, Duration::from_millis(5000)),
        );

        advance(4999).await;
        assert_eq!(drain(&mut rx), 0);
        advance(2).await;
        assert_eq!(drain(&mut rx), 1);
        advance(5000).await;
        assert_eq!(drain(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_stops_polling() {
        let (provider, _vcs) = setup(MockVcs::on_branch("main"));
        let mut rx = provider.subscribe();
        let handle = spawn_pollers(
            provider.clone(),
            FocusState::new(true),
            polling(Duration::from_millis(1000), Duration::from_millis(1000)),
        );
        handle.shutdown();
        advance(10_000).await;
        assert_eq!(drain(&mut rx), 0);
    }

    #[test]
    fn focus_state_is_shared_between_clones() {
        let focus = FocusState::default();
        let other = focus.clone();
        assert!(other.is_focused());
        focus.set_focused(false);
        assert!(!other.is_focused());
    }
}
