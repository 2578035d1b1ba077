//! # User Records
//!
//! The stored [`User`] row plus the payloads used to create and update it.
//! Length limits mirror the `VARCHAR` columns of the `users` table.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::constant::*;

/// A user as stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub age: i32,
    /// Expected to be `"male"` or `"female"`, but not enforced
    pub gender: String,
    pub email: String,
    pub city: String,
    /// Interest tokens joined by `", "`
    pub interests: String,
}

/// Payload for creating a user. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: String,
    pub age: i32,
    #[validate(length(max = MAX_GENDER_LENGTH))]
    pub gender: String,
    #[validate(length(max = MAX_EMAIL_LENGTH))]
    pub email: String,
    #[validate(length(max = MAX_CITY_LENGTH))]
    pub city: String,
    #[validate(length(max = MAX_INTERESTS_LENGTH))]
    pub interests: String,
}

/// Payload for updating a user.
///
/// Only "truthy" values are applied: `None`, empty strings and an age of `0`
/// leave the stored value untouched. A field therefore cannot be cleared
/// through an update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,
    pub age: Option<i32>,
    #[validate(length(max = MAX_GENDER_LENGTH))]
    pub gender: Option<String>,
    #[validate(length(max = MAX_EMAIL_LENGTH))]
    pub email: Option<String>,
    #[validate(length(max = MAX_CITY_LENGTH))]
    pub city: Option<String>,
    #[validate(length(max = MAX_INTERESTS_LENGTH))]
    pub interests: Option<String>,
}

impl UserUpdate {
    /// The email that has to be re-validated, if the update replaces it.
    pub fn new_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }

    /// Merges this update over `current`, returning the resulting record.
    pub fn apply_to(self, current: &User) -> User {
        User {
            id: current.id,
            name: pick_text(self.name, &current.name),
            age: self.age.filter(|age| *age != 0).unwrap_or(current.age),
            gender: pick_text(self.gender, &current.gender),
            email: pick_text(self.email, &current.email),
            city: pick_text(self.city, &current.city),
            interests: pick_text(self.interests, &current.interests),
        }
    }
}

fn pick_text(new: Option<String>, current: &str) -> String {
    new.filter(|value| !value.is_empty())
        .unwrap_or_else(|| current.to_string())
}
