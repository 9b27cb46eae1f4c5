use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserRequest {
    pub user_id: i64,
}

/// Public profile of a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserResponse {
    pub display_name: String,
    pub email: Option<String>,
}

#[derive(Debug)]
pub struct ActionError(String);

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Look up a user by id.
/// @action
pub fn get_user(req: GetUserRequest) -> Result<GetUserResponse, ActionError> {
    if req.user_id == 7 {
        Ok(GetUserResponse {
            display_name: "Ada".to_string(),
            email: None,
        })
    } else {
        Err(ActionError(format!("user {} not found", req.user_id)))
    }
}

/// @action
pub async fn find_user(req: GetUserRequest) -> Result<GetUserResponse, ActionError> {
    get_user(req)
}
