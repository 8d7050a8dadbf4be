use std::cmp::Ordering;

use crate::User;

/// Field and direction used to order users before pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    UsernameAsc,
    UsernameDesc,
}

impl SortKey {
    pub const ALL: [Self; 4] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::UsernameAsc,
        Self::UsernameDesc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Full Name (a-z)",
            Self::NameDesc => "Full Name (z-a)",
            Self::UsernameAsc => "Username (a-z)",
            Self::UsernameDesc => "Username (z-a)",
        }
    }

    /// Byte-wise comparison of the first name or the username.
    ///
    /// Case-sensitive and locale-naive: `"Zoe" < "amy"`.
    pub fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::NameAsc => a.name.first.cmp(&b.name.first),
            Self::NameDesc => b.name.first.cmp(&a.name.first),
            Self::UsernameAsc => a.username.cmp(&b.username),
            Self::UsernameDesc => b.username.cmp(&a.username),
        }
    }

    /// Stable sort, so users with equal keys keep their fetch order.
    pub fn sort(self, users: &mut [User]) {
        users.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
