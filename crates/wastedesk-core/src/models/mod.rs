//! Data models for the waste-collection service.
//!
//! - `User`, `Role`, `NewUser`, `ProfileUpdate`: accounts and the signed-in identity
//! - `WasteItem`, `NewWasteItem`, `WasteItemUpdate`: tracked waste items
//! - `Credentials`, `LoginResponse`, `ResetPasswordRequest`: auth payloads
//!
//! Both managed record types implement [`Resource`], which is what lets the API
//! client and the list controller treat them uniformly.

pub mod auth;
pub mod user;
pub mod waste;

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

pub use auth::{Credentials, ForgotPasswordRequest, LoginResponse, ResetPasswordRequest};
pub use user::{NewUser, ProfileUpdate, Role, User};
pub use waste::{NewWasteItem, WasteItem, WasteItemUpdate};

/// A record kind managed through a REST collection.
pub trait Resource: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Payload for `POST /<collection>`
    type Draft: Serialize;
    /// Payload for `PUT /<collection>/:id`
    type Patch: Serialize;

    /// Collection path segment, e.g. `users`
    const COLLECTION: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> &str;

    /// Short label used in confirmations and notifications.
    fn title(&self) -> &str;
}

/// Accept record ids sent either as JSON strings or numbers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
