//! FIFO message queue with time-window deduplication.
//!
//! Sends derive their dedup id from the send timestamp at millisecond precision, so two
//! sends landing in the same millisecond collapse into one message.

use crate::models::{QueueData, QueuedMessage};
use chrono::{DateTime, TimeZone};

const DEDUP_ID_FORMAT: &str = "%Y%m%d%H%M%S%.3f";

pub const DEDUP_WINDOW_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Enqueued(u64),
    /// Same dedup id was already accepted inside the window; nothing was added.
    Duplicate,
}

pub fn dedup_id<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DEDUP_ID_FORMAT).to_string()
}

pub fn send<Tz: TimeZone>(
    data: &mut QueueData,
    body: &str,
    group_id: &str,
    now: DateTime<Tz>,
) -> SendOutcome
where
    Tz::Offset: std::fmt::Display,
{
    let now_ms = now.timestamp_millis();
    let cutoff = now_ms - DEDUP_WINDOW_MS;
    data.recent_dedup.retain(|_, seen_at| *seen_at > cutoff);

    let dedup = dedup_id(&now);
    if data.recent_dedup.contains_key(&dedup) {
        return SendOutcome::Duplicate;
    }

    let id = data.next_id;
    data.next_id = data.next_id.saturating_add(1);
    data.recent_dedup.insert(dedup.clone(), now_ms);
    data.messages.push_back(QueuedMessage {
        id,
        body: body.to_string(),
        group_id: group_id.to_string(),
        dedup_id: dedup,
        sent_at: now.to_rfc3339(),
    });

    SendOutcome::Enqueued(id)
}

pub fn count(data: &QueueData) -> usize {
    data.messages.len()
}

/// Pops the oldest message. Receiving also deletes it.
pub fn receive(data: &mut QueueData) -> Option<QueuedMessage> {
    data.messages.pop_front()
}
