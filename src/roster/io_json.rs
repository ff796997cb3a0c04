use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::fs;

use crate::roster::*;

/// A member, as stored in the JSON files.
///
/// The text fields also accept numbers, which is how spreadsheet tools tend to
/// export phone numbers. Unknown fields are kept in `extra`.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MemberJson {
    #[serde(deserialize_with = "sequence_number")]
    pub sl_no: u32,
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub address: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub family_members: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub mobile_no: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub occupation: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub blood_group: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub native_place: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub email: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub current_status: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_text"
    )]
    pub otp_password: Option<String>,
    #[serde(flatten)]
    pub extra: JSMap<String, JSValue>,
}

impl MemberJson {
    pub fn from_parts(record: MemberRecord, extra: JSMap<String, JSValue>) -> MemberJson {
        MemberJson {
            sl_no: record.sl_no,
            name: record.name,
            address: record.address,
            family_members: record.family_members,
            mobile_no: record.mobile_no,
            occupation: record.occupation,
            blood_group: record.blood_group,
            native_place: record.native_place,
            email: record.email,
            current_status: record.current_status,
            otp_password: record.otp_password,
            extra,
        }
    }

    pub fn into_parts(self) -> (MemberRecord, JSMap<String, JSValue>) {
        let record = MemberRecord {
            sl_no: self.sl_no,
            name: self.name,
            address: self.address,
            family_members: self.family_members,
            mobile_no: self.mobile_no,
            occupation: self.occupation,
            blood_group: self.blood_group,
            native_place: self.native_place,
            email: self.email,
            current_status: self.current_status,
            otp_password: self.otp_password,
        };
        (record, self.extra)
    }
}

pub fn read_members(path: &str) -> RosterIoResult<Vec<MemberJson>> {
    let contents = fs::read_to_string(path).context(ReadingJsonSnafu { path })?;
    let members: Vec<MemberJson> =
        serde_json::from_str(&contents).context(ParsingJsonSnafu { path })?;
    debug!("read_members: {} members in {:?}", members.len(), path);
    Ok(members)
}

/// Writes the members with a 2-space indentation. Non-ASCII characters are not escaped.
pub fn write_members(path: &str, members: &[MemberJson]) -> RosterIoResult<()> {
    let js = serde_json::to_string_pretty(members).context(SerializingJsonSnafu {})?;
    fs::write(path, js).context(WritingJsonSnafu { path })?;
    info!("write_members: {} members written to {:?}", members.len(), path);
    Ok(())
}

fn value_text(v: JSValue) -> Option<String> {
    match v {
        JSValue::String(s) => Some(s),
        JSValue::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        JSValue::Number(n) => Some(float_text(n.as_f64().unwrap_or(f64::NAN))),
        JSValue::Bool(b) => Some(b.to_string()),
        JSValue::Null => Some(String::new()),
        _ => None,
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let v = JSValue::deserialize(deserializer)?;
    let msg = format!("expected a text value, found {}", v);
    value_text(v).ok_or_else(|| de::Error::custom(msg))
}

fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    match JSValue::deserialize(deserializer)? {
        JSValue::Null => Ok(None),
        v => {
            let msg = format!("expected a text value, found {}", v);
            value_text(v).map(Some).ok_or_else(|| de::Error::custom(msg))
        }
    }
}

fn sequence_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let v = JSValue::deserialize(deserializer)?;
    let text = match &v {
        JSValue::Number(n) => n.to_string(),
        JSValue::String(s) => s.clone(),
        _ => String::new(),
    };
    parse_sequence_number(&text)
        .ok_or_else(|| de::Error::custom(format!("invalid sequence number {}", v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_as_text() {
        let m: MemberJson = serde_json::from_value(json!({
            "sl_no": 4.0,
            "name": "Anil",
            "mobile_no": 9876543210.0,
            "family_members": 3,
            "email": null
        }))
        .unwrap();
        assert_eq!(m.sl_no, 4);
        assert_eq!(m.mobile_no, "9876543210");
        assert_eq!(m.family_members, "3");
        assert_eq!(m.email, "");
        assert_eq!(m.address, "");
        assert_eq!(m.otp_password, None);
        assert!(m.extra.is_empty());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let m: MemberJson = serde_json::from_value(json!({
            "sl_no": "12",
            "otp_password": "5512",
            "profile_photo": "p.jpg"
        }))
        .unwrap();
        assert_eq!(m.sl_no, 12);
        assert_eq!(m.otp_password, Some("5512".to_string()));
        assert_eq!(m.extra.get("profile_photo"), Some(&json!("p.jpg")));

        let js = serde_json::to_value(&m).unwrap();
        assert_eq!(js["profile_photo"], json!("p.jpg"));
        assert_eq!(js["otp_password"], json!("5512"));
    }

    #[test]
    fn otp_omitted_when_absent() {
        let m = MemberJson::from_parts(
            MemberRecord {
                sl_no: 1,
                ..Default::default()
            },
            JSMap::new(),
        );
        let s = serde_json::to_string(&m).unwrap();
        assert!(!s.contains("otp_password"));
        assert!(s.starts_with("{\"sl_no\":1,\"name\":\"\",\"address\":\"\""));
    }

    #[test]
    fn large_integers_are_not_rounded() {
        let m: MemberJson = serde_json::from_value(json!({
            "sl_no": 1,
            "mobile_no": 12345678901234567890u64,
            "family_members": -3
        }))
        .unwrap();
        assert_eq!(m.mobile_no, "12345678901234567890");
        assert_eq!(m.family_members, "-3");
    }

    #[test]
    fn keys_match_export_fields() {
        let m = MemberJson::from_parts(
            MemberRecord {
                sl_no: 1,
                otp_password: Some("1234".to_string()),
                ..Default::default()
            },
            JSMap::new(),
        );
        let js = serde_json::to_value(&m).unwrap();
        let mut written: Vec<&str> = js
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        let mut exported: Vec<&str> = EXPORT_COLUMNS.iter().map(|c| c.field.key()).collect();
        written.sort_unstable();
        exported.sort_unstable();
        assert_eq!(written, exported);
    }

    #[test]
    fn invalid_sequence_numbers() {
        assert!(serde_json::from_value::<MemberJson>(json!({"sl_no": "x"})).is_err());
        assert!(serde_json::from_value::<MemberJson>(json!({"sl_no": 0})).is_err());
        assert!(serde_json::from_value::<MemberJson>(json!({"name": "no number"})).is_err());
        assert!(serde_json::from_value::<MemberJson>(json!({"sl_no": 1, "name": ["a"]})).is_err());
    }
}
