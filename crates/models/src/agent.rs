//! Agent: the authenticated caller and the agent-manager resource.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;

/// Agent permission bitmask.
///
/// Project bits live in the low nibble, customer bits in the next one.
///
/// ```
/// use models::agent::Permission;
/// let p = Permission::CUSTOMER_ADMIN | Permission::CUSTOMER_MANAGER;
/// assert!(p.intersects(Permission::CUSTOMER_ADMIN));
/// assert!(!p.intersects(Permission::PROJECT_ALL));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(pub u32);

impl Permission {
    pub const NONE: Permission = Permission(0x0000);

    pub const PROJECT_SUPER_ADMIN: Permission = Permission(0x0001);
    pub const PROJECT_ALL: Permission = Permission(0x0001);

    pub const CUSTOMER_AGENT: Permission = Permission(0x0010);
    pub const CUSTOMER_ADMIN: Permission = Permission(0x0020);
    pub const CUSTOMER_MANAGER: Permission = Permission(0x0040);
    pub const CUSTOMER_ALL: Permission = Permission(0x0070);

    pub const ALL: Permission = Permission(0x0071);

    pub fn bits(self) -> u32 { self.0 }

    /// True when at least one bit of `other` is set.
    pub fn intersects(self, other: Permission) -> bool { self.0 & other.0 != 0 }
}

impl BitOr for Permission {
    type Output = Permission;
    fn bitor(self, rhs: Self) -> Self { Permission(self.0 | rhs.0) }
}

impl BitAnd for Permission {
    type Output = Permission;
    fn bitand(self, rhs: Self) -> Self { Permission(self.0 & rhs.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingMethod {
    #[default]
    #[serde(rename = "")]
    None,
    #[serde(rename = "ringall")]
    RingAll,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    #[serde(rename = "")]
    None,
    Available,
    Away,
    Busy,
    Offline,
    Ringing,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub detail: String,
    pub ring_method: RingMethod,
    pub status: Status,
    pub permission: Permission,
    pub tag_ids: Vec<Uuid>,
    pub addresses: Vec<Address>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Agent {
    pub fn has_permission(&self, perm: Permission) -> bool { self.permission.intersects(perm) }
}

crate::impl_resource!(Agent);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookMessage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub username: String,
    pub name: String,
    pub detail: String,
    pub ring_method: RingMethod,
    pub status: Status,
    pub permission: Permission,
    pub tag_ids: Vec<Uuid>,
    pub addresses: Vec<Address>,
    pub tm_create: Option<String>,
    pub tm_update: Option<String>,
    pub tm_delete: Option<String>,
}

impl Agent {
    pub fn convert_webhook_message(&self) -> WebhookMessage {
        WebhookMessage {
            id: self.id,
            customer_id: self.customer_id,
            username: self.username.clone(),
            name: self.name.clone(),
            detail: self.detail.clone(),
            ring_method: self.ring_method,
            status: self.status,
            permission: self.permission,
            tag_ids: self.tag_ids.clone(),
            addresses: self.addresses.clone(),
            tm_create: self.tm_create.clone(),
            tm_update: self.tm_update.clone(),
            tm_delete: self.tm_delete.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn webhook_drops_password_hash() {
        let a = Agent {
            id: Uuid::new_v4(),
            username: "test1".into(),
            password_hash: "secret".into(),
            permission: Permission::CUSTOMER_ADMIN,
            ..Default::default()
        };
        let v = serde_json::to_value(a.convert_webhook_message()).unwrap();
        assert!(v.get("password_hash").is_none());
        assert_eq!(v["username"], "test1");
        assert_eq!(v["permission"], 0x20);
    }

    #[test]
    fn permission_union_and_check() {
        let a = Agent { permission: Permission::CUSTOMER_MANAGER, ..Default::default() };
        assert!(a.has_permission(Permission::CUSTOMER_ADMIN | Permission::CUSTOMER_MANAGER));
        assert!(!a.has_permission(Permission::PROJECT_SUPER_ADMIN));
        assert_eq!((Permission::ALL & Permission::CUSTOMER_ALL), Permission::CUSTOMER_ALL);
    }

    #[test]
    fn decodes_downstream_payload() {
        let raw = r#"{"id":"bbb3bed0-4d89-11ec-9cf7-4351c0fdbd4a","customer_id":"7fdb8e66-7fe7-11ec-ac90-878b581c2615","username":"test1","ring_method":"ringall","status":"offline","permission":1,"tm_delete":"9999-01-01 00:00:00.000000"}"#;
        let a: Agent = serde_json::from_str(raw).unwrap();
        assert_eq!(a.ring_method, RingMethod::RingAll);
        assert_eq!(a.status, Status::Offline);
        assert!(a.has_permission(Permission::PROJECT_SUPER_ADMIN));
        assert!(!a.is_deleted());
    }
}
