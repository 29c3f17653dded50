//! Remote mirror synchronization command.
//!
//! Drains the outbound queue, creating one remote document per closed
//! operation. Each item is dropped from the queue only after its own push
//! succeeds; failed items stay queued for a later run. There is no retry
//! within a run and no acknowledgment wait beyond the HTTP status.

use crate::api::mirror::Mirror;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::store::queue::SyncQueue;
use crate::{msg_bail_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let Some(mirror_config) = config.mirror else {
        msg_bail_anyhow!(Message::MirrorNotConfigured);
    };

    let mut queue = SyncQueue::load()?;
    if queue.is_empty() {
        msg_info!(Message::SyncQueueEmpty);
        return Ok(());
    }

    msg_info!(Message::SyncPushing(queue.len()));
    let mirror = Mirror::new(&mirror_config);
    let mut pushed = 0;

    for operation in queue.take_all() {
        match mirror.push(&operation).await {
            Ok(status) if status.is_success() => pushed += 1,
            Ok(status) => {
                msg_warning!(Message::SyncItemFailed {
                    id: operation.id.clone(),
                    reason: status.to_string(),
                });
                queue.requeue(operation);
            }
            Err(err) => {
                msg_warning!(Message::SyncItemFailed {
                    id: operation.id.clone(),
                    reason: err.to_string(),
                });
                queue.requeue(operation);
            }
        }
    }

    queue.save()?;
    msg_success!(Message::SyncFinished {
        pushed,
        kept: queue.len(),
    });
    Ok(())
}
