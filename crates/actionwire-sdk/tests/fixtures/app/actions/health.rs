/// Echo the input back.
/// @action
pub fn r#type(req: String) -> String {
    req
}

/// @action
pub async fn uptime(req: bool) -> u64 {
    if req {
        42
    } else {
        0
    }
}
