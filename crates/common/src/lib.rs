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
    fn message_serializes_to_single_field() {
        let body = serde_json::to_value(types::Message::new("Item not found")).unwrap();
        assert_eq!(body, serde_json::json!({"message": "Item not found"}));
    }
}
