//! Types and utilities shared by the server binary and the HTTP crate.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_flat() {
        let body = types::ErrorBody::new("not_found", 1003, "user not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "not_found");
        assert_eq!(json["code"], 1003);
        assert_eq!(json["message"], "user not found");
    }
}
