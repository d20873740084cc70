//! Static user directory.
//!
//! Posts reference these by id. The set is fixed for the lifetime of the
//! process and is never fetched.

use crate::models::User;

/// The four known users, in directory order.
pub const USERS: [User; 4] = [
    User {
        id: 8,
        name: "Lucas Andrade",
        email: "lucas.andrade@example.com",
    },
    User {
        id: 1,
        name: "Maria Souza",
        email: "maria.souza@example.com",
    },
    User {
        id: 2,
        name: "Rafael Lima",
        email: "rafael.lima@example.com",
    },
    User {
        id: 3,
        name: "Fernanda Oliveira",
        email: "fernanda.oliveira@example.com",
    },
];

/// Find a user by id.
#[must_use]
pub fn find_user(users: &[User], id: i64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}
