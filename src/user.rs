use serde::{Deserialize, Serialize};

use crate::auth::PwHash;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub pwhash: PwHash,
}
