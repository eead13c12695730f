//! Background revalidation loop
//!
//! One loop runs per minted session. Each tick either does nothing (the
//! session is far from expiry), revalidates it, or ends the loop once no
//! session remains. The loop holds the client weakly so dropping the manager
//! ends it too.

use crate::client::{AuthorityClient, Tick};
use std::sync::Weak;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub(crate) fn spawn_revalidation(client: Weak<AuthorityClient>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let Some(client) = client.upgrade() else {
                break;
            };
            match client.tick().await {
                Tick::Idle => {}
                Tick::Revalidated => tracing::debug!("revalidation timer refreshed the session"),
                Tick::Stop => {
                    tracing::debug!("revalidation timer stopped, no session left");
                    break;
                }
            }
        }
    })
}
