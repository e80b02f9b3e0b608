//! Transient user notifications.
//!
//! Every remote failure and every successful mutation produces one
//! notice; each auto-dismisses after a fixed display duration. Expired
//! entries are pruned whenever the active set is read.

use chrono::{DateTime, Duration, Utc};

/// Fixed display duration before a notice auto-dismisses.
pub const NOTICE_TTL: Duration = Duration::milliseconds(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= NOTICE_TTL
    }
}

#[derive(Debug, Default)]
pub struct NoticeLog {
    entries: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push_at(NoticeKind::Success, message, Utc::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push_at(NoticeKind::Error, message, Utc::now());
    }

    pub fn push_at(&mut self, kind: NoticeKind, message: impl Into<String>, at: DateTime<Utc>) {
        self.entries.push(Notice {
            kind,
            message: message.into(),
            created_at: at,
        });
    }

    /// Currently visible notices; prunes anything past its TTL.
    pub fn active(&mut self) -> &[Notice] {
        self.active_at(Utc::now())
    }

    pub fn active_at(&mut self, now: DateTime<Utc>) -> &[Notice] {
        self.entries.retain(|n| !n.is_expired_at(now));
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_expires_after_ttl() {
        let t0 = Utc::now();
        let mut log = NoticeLog::new();
        log.push_at(NoticeKind::Success, "Подорожник добавлен", t0);

        assert_eq!(log.active_at(t0 + Duration::milliseconds(2999)).len(), 1);
        assert!(log.active_at(t0 + NOTICE_TTL).is_empty());
    }

    #[test]
    fn pruning_keeps_newer_entries() {
        let t0 = Utc::now();
        let mut log = NoticeLog::new();
        log.push_at(NoticeKind::Error, "Ошибка загрузки данных", t0);
        log.push_at(NoticeKind::Success, "Город выбран", t0 + Duration::seconds(2));

        let active = log.active_at(t0 + Duration::seconds(4));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "Город выбран");
    }
}
