//! Well-known role name constants, as carried in JWT claims by the
//! external identity provider.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BUYER: &str = "buyer";
