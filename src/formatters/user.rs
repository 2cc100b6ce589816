use serde::Serialize;

use crate::models::user::User;

/// Response body for register, login and fetch.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 7,
///   "name": "Jane Doe",
///   "occupation": "Engineer",
///   "email": "jane@example.com",
///   "token": "7.5f0c...e1.9a4b...",
///   "image_url": "images/7-me.png"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub occupation: String,
    pub email: String,
    pub token: String,
    pub image_url: Option<String>,
}

impl UserResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            occupation: user.occupation,
            email: user.email,
            token,
            image_url: user.avatar_file_name,
        }
    }
}
