//! Notification entities.

use crate::codec::{Entity, EntitySchema, FieldKind, FieldSpec};
use crate::model::{NotificationActionId, NotificationId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A follow-up action attached to a notification (e.g. accept an invite).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub id: NotificationActionId,
    pub notification_id: NotificationId,
    pub title: String,
    /// API path the UI calls when the action is chosen.
    pub action_endpoint: String,
}

pub const NOTIFICATION_ACTION_SCHEMA: EntitySchema = EntitySchema {
    name: "NotificationAction",
    fields: &[
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("notification_id", "notificationId", FieldKind::Text),
        FieldSpec::required("title", "title", FieldKind::Text),
        FieldSpec::required("action_endpoint", "actionEndpoint", FieldKind::Text),
    ],
};

impl Entity for NotificationAction {
    const SCHEMA: &'static EntitySchema = &NOTIFICATION_ACTION_SCHEMA;
}

/// A notification together with all of its actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullNotification {
    pub actions: Vec<NotificationAction>,
    pub body: String,
    pub created: DateTime<Utc>,
    pub id: NotificationId,
    pub read: bool,
    pub user_id: UserId,
}

pub const FULL_NOTIFICATION_SCHEMA: EntitySchema = EntitySchema {
    name: "FullNotification",
    fields: &[
        FieldSpec::required(
            "actions",
            "actions",
            FieldKind::EntityList(&NOTIFICATION_ACTION_SCHEMA),
        ),
        FieldSpec::required("body", "body", FieldKind::Text),
        FieldSpec::required("created", "created", FieldKind::DateTime),
        FieldSpec::required("id", "id", FieldKind::Text),
        FieldSpec::required("read", "read", FieldKind::Boolean),
        FieldSpec::required("user_id", "userId", FieldKind::Text),
    ],
};

impl Entity for FullNotification {
    const SCHEMA: &'static EntitySchema = &FULL_NOTIFICATION_SCHEMA;
}

impl FullNotification {
    /// Marks the notification read locally after the server accepted it.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }
}
