use chrono::{DateTime, Utc};

#[macro_use]
extern crate serde_derive;

/// A time-boxed permit owned by one person.
///
/// `image` is only filled in when a permit is handed out; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permit {
    pub identifier: String,
    pub person_id: String,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub consent_assurance: bool,
    pub manual_check_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl Permit {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now
    }

    pub fn is_owned_by(&self, person_id: &str) -> bool {
        self.person_id == person_id
    }

    /// The form a permit is kept in by a store: everything but the image.
    pub fn into_stored(self) -> Permit {
        Permit {
            image: None,
            ..self
        }
    }
}

/// What a person supplies when asking for a permit. Everything else is
/// assigned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPermit {
    pub consent_assurance: bool,
    pub manual_check_required: bool,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::{NewPermit, Permit};

    fn permit() -> Permit {
        let valid_from = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        Permit {
            identifier: "a5f4b1a2".to_string(),
            person_id: "woody007".to_string(),
            valid_from,
            valid_until: valid_from + Duration::hours(12),
            consent_assurance: true,
            manual_check_required: false,
            image: Some(vec![0xff, 0xd8]),
        }
    }

    #[test]
    fn expiry_is_exclusive() {
        let permit = permit();

        assert!(!permit.is_expired(permit.valid_until));
        assert!(permit.is_expired(permit.valid_until + Duration::seconds(1)));
    }

    #[test]
    fn stored_form_drops_image() {
        let permit = permit();
        let stored = permit.clone().into_stored();

        assert_eq!(stored.image, None);
        assert_eq!(stored.identifier, permit.identifier);
        assert_eq!(stored.valid_until, permit.valid_until);
    }

    #[test]
    fn json_field_names() {
        let value = serde_json::to_value(permit().into_stored()).unwrap();

        assert_eq!(value["personId"], "woody007");
        assert_eq!(value["consentAssurance"], true);
        assert_eq!(value["manualCheckRequired"], false);
        assert!(value.get("validUntil").is_some());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn new_permit_from_json() {
        let new_permit: NewPermit =
            serde_json::from_str(r#"{"consentAssurance": true, "manualCheckRequired": true}"#)
                .unwrap();

        assert!(new_permit.consent_assurance);
        assert!(new_permit.manual_check_required);
    }
}
