//! Session authentication for the gigs marketplace: signup/login with
//! argon2-hashed credentials, HS256 session tokens in a `jwt` cookie, and a
//! verifier middleware guarding identity-bound routes.

pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod routes;

pub mod crypto {
    pub mod password;
    pub mod token;
}

pub mod models {
    pub mod user;
    pub mod session;
}

pub mod repositories {
    pub mod user;
    pub mod postgres;
    pub mod memory;
}

pub mod services {
    pub mod auth;
    pub mod profile;
}

pub mod handlers {
    pub mod auth;
    pub mod profile;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
}
