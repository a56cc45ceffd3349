use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    #[default]
    #[serde(rename = "")]
    None,
    Agent,
    Conference,
    Email,
    Extension,
    Line,
    Sip,
    Tel,
}

/// Source or destination of a call, message or conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(rename = "type")]
    pub address_type: AddressType,
    pub target: String,
    pub target_name: String,
    pub name: String,
    pub detail: String,
}

impl Address {
    pub fn tel(number: &str) -> Self {
        Self { address_type: AddressType::Tel, target: number.to_string(), ..Default::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_field_uses_wire_name() {
        let v = serde_json::to_value(Address::tel("+821100000001")).unwrap();
        assert_eq!(v["type"], "tel");
        assert_eq!(v["target"], "+821100000001");
    }

    #[test]
    fn missing_fields_default() {
        let a: Address = serde_json::from_str(r#"{"type":"sip"}"#).unwrap();
        assert_eq!(a.address_type, AddressType::Sip);
        assert!(a.target.is_empty());
    }
}
