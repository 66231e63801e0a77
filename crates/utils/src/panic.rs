//! Rendering of values captured by `std::panic::catch_unwind`

use std::any::Any;

/// Placeholder for payloads that are neither `&str` nor `String`
pub const NON_STRING_PAYLOAD: &str = "<non-string panic payload>";

/// Render a panic payload as text.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        NON_STRING_PAYLOAD.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, panic_any};

    #[test]
    fn test_static_str_payload() {
        let payload = catch_unwind(|| panic!("static message")).unwrap_err();
        assert_eq!(payload_message(payload.as_ref()), "static message");
    }

    #[test]
    fn test_formatted_payload() {
        let n = 0;
        let payload = catch_unwind(|| panic!("divide by {n}")).unwrap_err();
        assert_eq!(payload_message(payload.as_ref()), "divide by 0");
    }

    #[test]
    fn test_opaque_payload() {
        let payload = catch_unwind(|| panic_any(42_u32)).unwrap_err();
        assert_eq!(payload_message(payload.as_ref()), NON_STRING_PAYLOAD);
    }
}
