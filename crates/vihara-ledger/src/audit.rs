//! Audit records.
//!
//! [`ActivityLog`] entries record what an authenticated administrator did.
//! [`DeviceLog`] entries come from anonymous visitors and carry no personal
//! data beyond a masked IP address.

use std::fmt;

use serde::{Deserialize, Serialize};
use vihara_protocol::UserId;

use crate::{format_baht, Transaction};

/// What happened to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionEvent {
    Created,
    Updated,
    Deleted,
}

impl TransactionEvent {
    /// The verb shown in the activity feed.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created => "เพิ่มรายการ",
            Self::Updated => "แก้ไขรายการ",
            Self::Deleted => "ลบรายการ",
        }
    }
}

impl fmt::Display for TransactionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// One entry in the administrator activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub module: String,
    pub user_id: UserId,
}

impl ActivityLog {
    pub fn new(
        action: impl Into<String>,
        description: impl Into<String>,
        module: impl Into<String>,
        user_id: UserId,
    ) -> Self {
        Self {
            action: action.into(),
            description: description.into(),
            module: module.into(),
            user_id,
        }
    }

    /// The entry written after a transaction is created, updated or deleted.
    ///
    /// ```rust
    /// # use chrono::NaiveDate;
    /// # use vihara_protocol::{StringArray, UserId};
    /// # use vihara_ledger::{ActivityLog, Transaction, TransactionEvent, TransactionKind};
    /// let tx = Transaction {
    ///     id: 1,
    ///     kind: TransactionKind::Income,
    ///     amount: 100.0,
    ///     description: "ทำบุญ".into(),
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///     category: String::new(),
    ///     image_urls: StringArray::default(),
    ///     user_id: UserId(2),
    /// };
    ///
    /// let entry = ActivityLog::for_transaction(TransactionEvent::Created, &tx, UserId(2));
    /// assert_eq!(entry.action, "เพิ่มรายการ income");
    /// assert_eq!(entry.description, "ทำบุญ - จำนวน ฿100.00");
    /// ```
    pub fn for_transaction(event: TransactionEvent, tx: &Transaction, user_id: UserId) -> Self {
        Self::new(
            format!("{} {}", event.verb(), tx.kind),
            format!("{} - จำนวน {}", tx.description, format_baht(tx.amount)),
            "transaction",
            user_id,
        )
    }
}

/// The body of an anonymous "log device" request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeviceLogDraft {
    pub device_type: String,
    pub device_info: String,
    pub action: String,
    pub description: String,
    pub module: String,
    /// Client-reported address; wins over the connection's peer address
    /// when non-empty.
    pub ip_address: String,
}

/// A stored device log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceLog {
    pub device_type: String,
    pub device_info: String,
    pub action: String,
    pub description: String,
    pub module: String,
    pub ip_address: String,
}

impl DeviceLog {
    pub fn new(draft: DeviceLogDraft, peer_ip: &str) -> Self {
        let ip = if draft.ip_address.is_empty() {
            peer_ip
        } else {
            draft.ip_address.as_str()
        };
        let ip_address = mask_ip(ip);

        Self {
            device_type: draft.device_type,
            device_info: draft.device_info,
            action: draft.action,
            description: draft.description,
            module: draft.module,
            ip_address,
        }
    }
}

/// Hides the host part of a dotted IPv4 address: `10.1.2.3` → `10.1.2.xxx`.
///
/// Anything that doesn't split into exactly four dotted parts is returned
/// as is.
pub fn mask_ip(ip: &str) -> String {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return ip.to_string();
    }
    format!("{}.{}.{}.xxx", parts[0], parts[1], parts[2])
}
