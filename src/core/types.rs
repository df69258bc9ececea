use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a record
///
/// Assigned once at creation and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Id for the n-th record produced by a bulk load (1-based)
    pub fn sequential(n: usize) -> Self {
        RecordId(format!("user-{}", n))
    }

    /// Fresh id for a record created through the boundary
    pub fn generate() -> Self {
        RecordId(format!("user-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Access level of a record
///
/// Stored and displayed only; nothing in the engine enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Viewer, Role::Editor, Role::Admin];

    /// Permission set assigned whenever the role is (re)set
    pub fn default_permissions(&self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                can_edit: true,
                can_delete: true,
                can_export: true,
                can_manage_users: true,
            },
            Role::Editor => Permissions {
                can_edit: true,
                can_delete: false,
                can_export: true,
                can_manage_users: false,
            },
            Role::Viewer => Permissions::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// Individually addressable permission flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionKey {
    CanEdit,
    CanDelete,
    CanExport,
    CanManageUsers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_export: bool,
    pub can_manage_users: bool,
}

impl Permissions {
    pub fn get(&self, key: PermissionKey) -> bool {
        match key {
            PermissionKey::CanEdit => self.can_edit,
            PermissionKey::CanDelete => self.can_delete,
            PermissionKey::CanExport => self.can_export,
            PermissionKey::CanManageUsers => self.can_manage_users,
        }
    }

    pub fn set(&mut self, key: PermissionKey, value: bool) {
        let flag = match key {
            PermissionKey::CanEdit => &mut self.can_edit,
            PermissionKey::CanDelete => &mut self.can_delete,
            PermissionKey::CanExport => &mut self.can_export,
            PermissionKey::CanManageUsers => &mut self.can_manage_users,
        };
        *flag = value;
    }
}

/// A managed entity: one row of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: RecordId,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub department: String,
    pub salary: u64,
    pub join_date: NaiveDate,
    pub status: Status,
    pub role: Role,
    pub permissions: Permissions,
    pub is_pinned: bool,
}

impl Record {
    /// Create a record with neutral defaults for everything but identity
    ///
    /// Use the chained setters to fill in the remaining fields.
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            age: 18,
            department: String::new(),
            salary: 0,
            join_date: NaiveDate::default(),
            status: Status::Active,
            role: Role::Viewer,
            permissions: Role::Viewer.default_permissions(),
            is_pinned: false,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    pub fn salary(mut self, salary: u64) -> Self {
        self.salary = salary;
        self
    }

    pub fn joined(mut self, join_date: NaiveDate) -> Self {
        self.join_date = join_date;
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the role together with its default permissions
    pub fn role(mut self, role: Role) -> Self {
        self.assign_role(role);
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.is_pinned = pinned;
        self
    }

    /// Replace the role and reset permissions to that role's defaults,
    /// discarding any manual overrides
    pub fn assign_role(&mut self, role: Role) {
        self.role = role;
        self.permissions = role.default_permissions();
    }
}
