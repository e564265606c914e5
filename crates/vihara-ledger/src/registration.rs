//! Retreat registrations.
//!
//! A registrant signs up through the public form ([`RegistrationDraft`]);
//! staff later tick off their recitations ([`ChantingStatus`]). Editing a
//! registration replaces the personal details and leaves the chanting
//! flags alone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::transaction::parse_date;
use crate::{ChantingStatus, LedgerError};

/// A stored registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: u64,
    pub full_name: String,
    #[serde(default)]
    pub nickname: String,
    pub birth_date: NaiveDate,

    pub province_id: u64,
    pub district_id: u64,
    pub sub_district_id: u64,
    pub address_detail: String,

    pub phone_number: String,
    #[serde(default)]
    pub temple_name: String,
    #[serde(default)]
    pub medical_condition: String,
    /// Rains retreats spent as a monk (พรรษา).
    #[serde(default)]
    pub vassa: u32,

    /// Serialized as the three top-level `chanted_*` flags.
    #[serde(flatten)]
    pub chanting: ChantingStatus,
}

impl Registration {
    /// Replaces all three chanting flags. Returns the previous status.
    pub fn set_chanting(&mut self, status: ChantingStatus) -> ChantingStatus {
        std::mem::replace(&mut self.chanting, status)
    }
}

/// A validated registration that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub full_name: String,
    pub nickname: String,
    pub birth_date: NaiveDate,
    pub province_id: u64,
    pub district_id: u64,
    pub sub_district_id: u64,
    pub address_detail: String,
    pub phone_number: String,
    pub temple_name: String,
    pub medical_condition: String,
    pub vassa: u32,
}

impl NewRegistration {
    /// Attaches the id the storage layer assigned. Nothing is chanted yet.
    pub fn with_id(self, id: u64) -> Registration {
        Registration {
            id,
            full_name: self.full_name,
            nickname: self.nickname,
            birth_date: self.birth_date,
            province_id: self.province_id,
            district_id: self.district_id,
            sub_district_id: self.sub_district_id,
            address_detail: self.address_detail,
            phone_number: self.phone_number,
            temple_name: self.temple_name,
            medical_condition: self.medical_condition,
            vassa: self.vassa,
            chanting: ChantingStatus::default(),
        }
    }
}

/// The body of a "create registration" or "update registration" request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub nickname: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    pub province_id: u64,
    pub district_id: u64,
    pub sub_district_id: u64,
    pub address_detail: String,
    pub phone_number: String,
    pub temple_name: String,
    pub medical_condition: String,
    pub vassa: u32,
}

impl RegistrationDraft {
    /// Checks, in order: full name, birth date, address, phone number.
    /// The first failure is returned. Names and contact fields are
    /// trimmed; blank ones count as missing.
    pub fn validate(self) -> Result<NewRegistration, LedgerError> {
        let full_name = required(&self.full_name, "full_name")?;
        let birth_date = parse_date(self.birth_date.trim())
            .map_err(|_| LedgerError::InvalidBirthDate(self.birth_date.clone()))?;
        let address_detail = required(&self.address_detail, "address_detail")?;
        let phone_number = required(&self.phone_number, "phone_number")?;

        Ok(NewRegistration {
            full_name,
            nickname: self.nickname.trim().to_string(),
            birth_date,
            province_id: self.province_id,
            district_id: self.district_id,
            sub_district_id: self.sub_district_id,
            address_detail,
            phone_number,
            temple_name: self.temple_name.trim().to_string(),
            medical_condition: self.medical_condition,
            vassa: self.vassa,
        })
    }

    /// Validates the draft and overwrites the personal details of
    /// `registration`. On error nothing is written.
    pub fn apply(self, registration: &mut Registration) -> Result<(), LedgerError> {
        let id = registration.id;
        let chanting = registration.chanting;
        let mut updated = self.validate()?.with_id(id);
        updated.chanting = chanting;
        *registration = updated;
        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, LedgerError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RegistrationDraft {
        RegistrationDraft {
            full_name: " พระสมชาย ใจดี ".into(),
            nickname: "ชาย".into(),
            birth_date: "1980-05-17".into(),
            province_id: 10,
            district_id: 1001,
            sub_district_id: 100101,
            address_detail: "12 หมู่ 3".into(),
            phone_number: "0812345678".into(),
            temple_name: "วัดป่า".into(),
            medical_condition: String::new(),
            vassa: 12,
        }
    }

    #[test]
    fn test_validate_complete_draft_trims_and_parses() {
        let reg = draft().validate().expect("valid").with_id(4);

        assert_eq!(reg.full_name, "พระสมชาย ใจดี");
        assert_eq!(reg.birth_date, NaiveDate::from_ymd_opt(1980, 5, 17).unwrap());
        assert_eq!(reg.vassa, 12);
        assert_eq!(reg.chanting, ChantingStatus::default());
    }

    #[test]
    fn test_validate_blank_required_fields_are_missing() {
        let mut no_name = draft();
        no_name.full_name = "  ".into();
        let mut no_address = draft();
        no_address.address_detail.clear();
        let mut no_phone = draft();
        no_phone.phone_number.clear();

        for (field, d) in [
            ("full_name", no_name),
            ("address_detail", no_address),
            ("phone_number", no_phone),
        ] {
            let err = d.validate().unwrap_err();

            assert!(
                matches!(err, LedgerError::MissingField(f) if f == field),
                "{field}: got {err:?}"
            );
        }
    }

    #[test]
    fn test_validate_bad_birth_date_is_rejected() {
        for bad in ["", "17/05/1980", "1980-02-30"] {
            let mut d = draft();
            d.birth_date = bad.into();

            assert!(matches!(d.validate(), Err(LedgerError::InvalidBirthDate(_))), "{bad:?}");
        }
    }

    #[test]
    fn test_apply_keeps_id_and_chanting_flags() {
        let mut reg = draft().validate().unwrap().with_id(9);
        reg.set_chanting(ChantingStatus {
            chanted_pariwat: true,
            ..ChantingStatus::default()
        });
        let mut edit = draft();
        edit.phone_number = "0899999999".into();

        edit.apply(&mut reg).expect("valid edit");

        assert_eq!(reg.id, 9);
        assert_eq!(reg.phone_number, "0899999999");
        assert!(reg.chanting.chanted_pariwat);
    }

    #[test]
    fn test_apply_invalid_edit_leaves_registration_untouched() {
        let mut reg = draft().validate().unwrap().with_id(9);
        let before = reg.clone();
        let mut edit = draft();
        edit.full_name = "someone else".into();
        edit.birth_date = "nope".into();

        assert!(edit.apply(&mut reg).is_err());
        assert_eq!(reg, before);
    }

    #[test]
    fn test_set_chanting_returns_previous_status() {
        let mut reg = draft().validate().unwrap().with_id(1);
        let done = ChantingStatus {
            chanted_pariwat: true,
            chanted_manat: true,
            chanted_ok_apan: true,
        };

        let previous = reg.set_chanting(done);

        assert_eq!(previous, ChantingStatus::default());
        assert!(reg.chanting.is_complete());
    }

    #[test]
    fn test_registration_json_has_flat_chanting_flags() {
        let mut reg = draft().validate().unwrap().with_id(2);
        reg.chanting.chanted_manat = true;

        let json = serde_json::to_value(&reg).unwrap();

        assert_eq!(json["birth_date"], "1980-05-17");
        assert_eq!(json["chanted_manat"], true);
        assert_eq!(json["chanted_pariwat"], false);
        assert!(json.get("chanting").is_none());
    }

    #[test]
    fn test_draft_missing_fields_default_to_empty() {
        let d: RegistrationDraft = serde_json::from_str(r#"{"full_name":"ก"}"#).unwrap();

        assert_eq!(d.province_id, 0);
        assert!(matches!(d.validate(), Err(LedgerError::InvalidBirthDate(_))));
    }
}
