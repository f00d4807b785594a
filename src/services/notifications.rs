//! Notification service
//!
//! Records in-app notifications once an operation has committed. Delivery is
//! pull-only: clients list their inbox.

use uuid::Uuid;

use crate::domain::{Notification, NotificationType};

use super::marketplace::Marketplace;

impl Marketplace {
    /// Create a notification for a user
    pub(crate) fn notify(
        &mut self,
        user_id: Uuid,
        notification_type: NotificationType,
        title: String,
        message: Option<String>,
        quote_id: Option<Uuid>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let created_at = self.now();
        self.notifications.push(Notification {
            id,
            user_id,
            notification_type,
            title,
            message,
            quote_id,
            is_read: false,
            read_at: None,
            created_at,
        });

        tracing::debug!(
            user_id = %user_id,
            notification_type = %notification_type,
            notification_id = %id,
            "Notification created"
        );

        id
    }

    /// Newest first
    pub fn notifications_for(&self, user_id: Uuid, unread_only: bool) -> Vec<&Notification> {
        self.notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .filter(|n| !unread_only || !n.is_read)
            .collect()
    }

    pub fn unread_count(&self, user_id: Uuid) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count()
    }

    /// Marks the given notifications (or all when `ids` is `None`) as read.
    /// Returns how many changed.
    pub fn mark_notifications_read(&mut self, user_id: Uuid, ids: Option<&[Uuid]>) -> usize {
        let now = self.now();
        let mut changed = 0;
        for n in self
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            if ids.map_or(true, |ids| ids.contains(&n.id)) {
                n.is_read = true;
                n.read_at = Some(now);
                changed += 1;
            }
        }
        changed
    }
}
