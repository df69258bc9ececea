// ============================================================================
// Record Sorting
// ============================================================================
//
// Pinned records always come first. Inside each pin group records are ordered
// by one typed field comparator chosen from the SortKey dispatch table, then
// reversed for DESC. The sort is stable, so equal keys keep collection order.
//
// ============================================================================

use crate::core::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Typed field comparison
pub type FieldComparator = fn(&Record, &Record) -> Ordering;

/// Sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Email,
    Age,
    Department,
    Salary,
    JoinDate,
    Status,
    Role,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Name,
        SortKey::Email,
        SortKey::Age,
        SortKey::Department,
        SortKey::Salary,
        SortKey::JoinDate,
        SortKey::Status,
        SortKey::Role,
    ];

    /// Comparator for this column (ascending)
    pub fn comparator(self) -> FieldComparator {
        match self {
            SortKey::Name => |a: &Record, b: &Record| locale_cmp(&a.name, &b.name),
            SortKey::Email => |a: &Record, b: &Record| locale_cmp(&a.email, &b.email),
            SortKey::Age => |a: &Record, b: &Record| a.age.cmp(&b.age),
            SortKey::Department => {
                |a: &Record, b: &Record| locale_cmp(&a.department, &b.department)
            }
            SortKey::Salary => |a: &Record, b: &Record| a.salary.cmp(&b.salary),
            SortKey::JoinDate => |a: &Record, b: &Record| a.join_date.cmp(&b.join_date),
            SortKey::Status => {
                |a: &Record, b: &Record| locale_cmp(a.status.as_str(), b.status.as_str())
            }
            SortKey::Role => |a: &Record, b: &Record| locale_cmp(a.role.as_str(), b.role.as_str()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Email => "email",
            SortKey::Age => "age",
            SortKey::Department => "department",
            SortKey::Salary => "salary",
            SortKey::JoinDate => "joinDate",
            SortKey::Status => "status",
            SortKey::Role => "role",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.replace(['_', '-'], "").to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| format!("unknown sort key '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort column plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(SortKey::Name)
    }
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self { key, direction: SortDirection::Asc }
    }

    pub fn desc(key: SortKey) -> Self {
        Self { key, direction: SortDirection::Desc }
    }

    /// Column-header click: the active ascending column flips to descending,
    /// anything else sorts ascending on the clicked column.
    pub fn toggled(self, key: SortKey) -> Self {
        if self.key == key && self.direction == SortDirection::Asc {
            Self::desc(key)
        } else {
            Self::asc(key)
        }
    }

    /// Full ordering between two records: pin group first, then the column
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| self.direction.apply((self.key.comparator())(a, b)))
    }
}

/// Stable in-place sort of a filtered result
pub fn sort_records(records: &mut [Arc<Record>], spec: &SortSpec) {
    records.sort_by(|a, b| spec.compare(a, b));
}

/// Collation close to a browser's default `localeCompare`
///
/// Strings are compared on base letters first, so accents and case are
/// ignored and `Émile` sorts before `Fred`. Ties are broken by accents, then
/// lower case before upper case, and finally by raw code points.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| {
            a.nfd()
                .map(char::is_uppercase)
                .cmp(b.nfd().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Lowercased letters with combining marks stripped
fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Lowercased decomposition, marks kept
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
