use super::models::{NewUser, Role};

/// One of the default operator accounts created on first setup.
#[derive(Debug)]
pub struct SeedUser {
    pub username: &'static str,
    pub full_name: &'static str,
    pub role: Role,
    pub password: &'static str,
}

impl SeedUser {
    /// Build the insert payload for this seed. The password lands in
    /// `password_hash` verbatim; the downstream app compares the raw value.
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.to_string(),
            full_name: self.full_name.to_string(),
            role: self.role,
            password_hash: self.password.to_string(),
            is_active: true,
        }
    }
}

/// The default accounts, in seeding order.
pub static DEFAULT_USERS: [SeedUser; 5] = [
    SeedUser {
        username: "jayvee",
        full_name: "JAYVEE CARINGAL",
        role: Role::Admin,
        password: "ADMIN01",
    },
    SeedUser {
        username: "marjhon",
        full_name: "MAR JHON LUYAO",
        role: Role::Secretary,
        password: "SECMJ",
    },
    SeedUser {
        username: "christian",
        full_name: "CHRISTIAN LASPONIA",
        role: Role::Treasurer,
        password: "TREASCL",
    },
    SeedUser {
        username: "princess",
        full_name: "PRINCESS PADILLA",
        role: Role::VicePresident,
        password: "VPRESPL",
    },
    SeedUser {
        username: "guest",
        full_name: "Guest User",
        role: Role::Guest,
        password: "GUEST123",
    },
];
