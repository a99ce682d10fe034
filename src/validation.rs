//! Field-level payload validation
//!
//! Payloads arrive as a JSON object. Each resource DTO walks its fields, in
//! declaration order, through a [`FieldValidator`]: every rule runs, nothing
//! short-circuits, and all violations come back together in the order the
//! fields were declared.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveValue, DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::context::CallerContext;
use crate::error::ServiceError;
use crate::repositories::{Repository, SoftDeleteEntity};

/// Decoded request body
pub type Payload = Map<String, Value>;

pub mod messages {
    pub const NOT_BLANK: &str = "This value should not be blank.";
    pub const NOT_NULL: &str = "This value should not be null.";
    pub const NOT_STRING: &str = "This value should be of type string.";
    pub const NOT_BOOL: &str = "This value should be of type bool.";
    pub const NOT_INT: &str = "This value should be of type int.";
    pub const NOT_JSON_OBJECT: &str = "This value should be of type json object.";
    pub const INVALID_UUID: &str = "This value is not a valid UUID.";
    pub const INVALID_DATETIME: &str = "This value is not a valid datetime.";
    pub const ID_NOT_EXIST: &str = "This id does not exist.";
    pub const ALREADY_USED: &str = "This value is already used.";
    pub const CIRCULAR_REFERENCE: &str = "This value would create a circular reference.";

    pub fn too_short(min: usize) -> String {
        format!(
            "This value is too short. It should have {} {} or more.",
            min,
            characters(min)
        )
    }

    pub fn too_long(max: usize) -> String {
        format!(
            "This value is too long. It should have {} {} or less.",
            max,
            characters(max)
        )
    }

    fn characters(count: usize) -> &'static str {
        if count == 1 { "character" } else { "characters" }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

/// How a field treats absence and null
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be non-blank on create; may be omitted but not nulled on update
    Required,
    /// May be omitted, never null (non-nullable column with a default)
    NotNull,
    /// Nullable column
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A payload key: missing, explicitly null, or carrying a value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Present(T),
}

impl<T> Field<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Value of a field validation already proved present
    pub fn required(self, field: &str) -> Result<T, ServiceError> {
        self.into_option()
            .ok_or_else(|| ServiceError::violation(field, messages::NOT_BLANK))
    }

    /// Merge into a nullable column: absent keeps the stored value, null
    /// clears it
    pub fn merge_into(self, target: &mut ActiveValue<Option<T>>)
    where
        Option<T>: Into<sea_orm::Value>,
    {
        match self {
            Field::Absent => {}
            Field::Null => *target = ActiveValue::Set(None),
            Field::Present(value) => *target = ActiveValue::Set(Some(value)),
        }
    }

    /// Merge into a non-nullable column. Validation rejects null for these,
    /// so only a present value overwrites.
    pub fn merge_required(self, target: &mut ActiveValue<T>)
    where
        T: Into<sea_orm::Value>,
    {
        if let Field::Present(value) = self {
            *target = ActiveValue::Set(value);
        }
    }
}

/// Parses RFC 3339 date-times, `YYYY-MM-DD HH:MM:SS` and plain
/// `YYYY-MM-DD` dates. Zone-less inputs are taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTimeWithTimeZone> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed);
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    let utc: DateTimeWithTimeZone = Utc.from_utc_datetime(&naive).into();
    Some(utc)
}

fn is_blank(value: &Field<&Value>) -> bool {
    match value {
        Field::Absent | Field::Null => true,
        Field::Present(Value::String(s)) => s.is_empty(),
        Field::Present(_) => false,
    }
}

/// Accumulates violations for one payload
pub struct FieldValidator<'a> {
    db: &'a DatabaseConnection,
    ctx: &'a CallerContext,
    payload: &'a Payload,
    mode: ValidationMode,
    violations: Vec<Violation>,
}

impl<'a> FieldValidator<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        ctx: &'a CallerContext,
        payload: &'a Payload,
        mode: ValidationMode,
    ) -> Self {
        Self {
            db,
            ctx,
            payload,
            mode,
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Looks the key up and applies the presence rules shared by every type.
    /// A reported field comes back as `Absent` so no further rule fires.
    fn take(&mut self, field: &str, presence: Presence) -> Field<&'a Value> {
        let payload = self.payload;
        let value = match payload.get(field) {
            None => Field::Absent,
            Some(Value::Null) => Field::Null,
            Some(value) => Field::Present(value),
        };

        match presence {
            Presence::Required if self.mode == ValidationMode::Create && is_blank(&value) => {
                self.push(field, messages::NOT_BLANK);
                Field::Absent
            }
            Presence::Required | Presence::NotNull if matches!(value, Field::Null) => {
                self.push(field, messages::NOT_NULL);
                Field::Absent
            }
            _ => value,
        }
    }

    /// String whose length, in characters, lies in `min..=max`
    pub fn string(
        &mut self,
        field: &str,
        presence: Presence,
        min: usize,
        max: usize,
    ) -> Field<String> {
        match self.take(field, presence) {
            Field::Present(Value::String(s)) => {
                let length = s.chars().count();
                if length < min {
                    self.push(field, messages::too_short(min));
                    Field::Absent
                } else if length > max {
                    self.push(field, messages::too_long(max));
                    Field::Absent
                } else {
                    Field::Present(s.clone())
                }
            }
            Field::Present(_) => {
                self.push(field, messages::NOT_STRING);
                Field::Absent
            }
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    /// Unbounded string
    pub fn text(&mut self, field: &str, presence: Presence) -> Field<String> {
        self.string(field, presence, 0, usize::MAX)
    }

    /// Hyphenated RFC 4122 UUID
    pub fn uuid(&mut self, field: &str, presence: Presence) -> Field<Uuid> {
        match self.take(field, presence) {
            Field::Present(Value::String(s)) => match Uuid::parse_str(s) {
                Ok(id) if s.len() == 36 => Field::Present(id),
                _ => {
                    self.push(field, messages::INVALID_UUID);
                    Field::Absent
                }
            },
            Field::Present(_) => {
                self.push(field, messages::INVALID_UUID);
                Field::Absent
            }
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    /// Identity of the record. On create the UUID must not be used by any
    /// record of the same type, soft-deleted ones included. On update only
    /// the format is checked: ids never change.
    pub async fn identity<E>(&mut self, field: &str) -> Result<Field<Uuid>, DbErr>
    where
        E: SoftDeleteEntity,
        E::Model: Send + Sync + 'static,
    {
        let value = self.uuid(field, Presence::Required);

        if self.mode == ValidationMode::Create {
            if let Field::Present(id) = value {
                let taken = Repository::<E>::new(self.db.clone())
                    .exists(self.ctx, id, true)
                    .await?;
                if taken {
                    self.push(field, messages::ALREADY_USED);
                    return Ok(Field::Absent);
                }
            }
        }

        Ok(value)
    }

    /// UUID that must point at an existing, non-deleted record of `E`
    pub async fn reference<E>(
        &mut self,
        field: &str,
        presence: Presence,
    ) -> Result<Field<Uuid>, DbErr>
    where
        E: SoftDeleteEntity,
        E::Model: Send + Sync + 'static,
    {
        let value = self.uuid(field, presence);

        if let Field::Present(id) = value {
            let exists = Repository::<E>::new(self.db.clone())
                .exists(self.ctx, id, false)
                .await?;
            if !exists {
                self.push(field, messages::ID_NOT_EXIST);
                return Ok(Field::Absent);
            }
        }

        Ok(value)
    }

    /// JSON object, given inline or as a string holding one
    pub fn json_object(&mut self, field: &str) -> Field<Value> {
        match self.take(field, Presence::Optional) {
            Field::Present(Value::Object(map)) => Field::Present(Value::Object(map.clone())),
            Field::Present(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                Ok(parsed @ Value::Object(_)) => Field::Present(parsed),
                _ => {
                    self.push(field, messages::NOT_JSON_OBJECT);
                    Field::Absent
                }
            },
            Field::Present(_) => {
                self.push(field, messages::NOT_JSON_OBJECT);
                Field::Absent
            }
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    pub fn boolean(&mut self, field: &str, presence: Presence) -> Field<bool> {
        match self.take(field, presence) {
            Field::Present(Value::Bool(flag)) => Field::Present(*flag),
            Field::Present(_) => {
                self.push(field, messages::NOT_BOOL);
                Field::Absent
            }
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    /// 32-bit integer
    pub fn integer(&mut self, field: &str, presence: Presence) -> Field<i32> {
        let value = self.take(field, presence);
        let parsed = match value {
            Field::Present(Value::Number(n)) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Field::Present(_) => None,
            Field::Null => return Field::Null,
            Field::Absent => return Field::Absent,
        };

        match parsed {
            Some(number) => Field::Present(number),
            None => {
                self.push(field, messages::NOT_INT);
                Field::Absent
            }
        }
    }

    pub fn datetime(&mut self, field: &str, presence: Presence) -> Field<DateTimeWithTimeZone> {
        match self.take(field, presence) {
            Field::Present(Value::String(raw)) => match parse_datetime(raw) {
                Some(parsed) => Field::Present(parsed),
                None => {
                    self.push(field, messages::INVALID_DATETIME);
                    Field::Absent
                }
            },
            Field::Present(_) => {
                self.push(field, messages::INVALID_DATETIME);
                Field::Absent
            }
            Field::Null => Field::Null,
            Field::Absent => Field::Absent,
        }
    }

    /// The DTO when nothing was reported, the ordered violations otherwise
    pub fn finish<T>(self, dto: T) -> Result<T, ServiceError> {
        if self.violations.is_empty() {
            Ok(dto)
        } else {
            Err(ServiceError::ValidationFailed(self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn fields(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.field.as_str(), v.message.as_str()))
            .collect()
    }

    #[test]
    fn test_required_fields_reported_in_declaration_order() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({ "name": "" }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        v.uuid("id", Presence::Required);
        v.string("name", Presence::Required, 2, 100);
        v.uuid("createdBy", Presence::Required);

        assert_eq!(
            fields(v.violations()),
            vec![
                ("id", messages::NOT_BLANK),
                ("name", messages::NOT_BLANK),
                ("createdBy", messages::NOT_BLANK),
            ]
        );
    }

    #[test]
    fn test_required_checks_skipped_on_update() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({}));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Update);

        assert_eq!(v.string("name", Presence::Required, 2, 100), Field::Absent);
        assert!(v.violations().is_empty());
    }

    #[test]
    fn test_null_on_non_nullable_field_rejected_on_update() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({ "name": null, "status": null, "description": null }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Update);

        v.string("name", Presence::Required, 2, 100);
        v.boolean("status", Presence::NotNull);
        assert_eq!(v.text("description", Presence::Optional), Field::Null);

        assert_eq!(
            fields(v.violations()),
            vec![("name", messages::NOT_NULL), ("status", messages::NOT_NULL)]
        );
    }

    #[test]
    fn test_name_length_boundaries() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({
            "short": "a",
            "min": "ab",
            "max": "a".repeat(100),
            "long": "a".repeat(101),
        }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        assert_eq!(v.string("short", Presence::Required, 2, 100), Field::Absent);
        assert_eq!(v.string("min", Presence::Required, 2, 100), Field::Present("ab".to_string()));
        assert_eq!(v.string("max", Presence::Required, 2, 100), Field::Present("a".repeat(100)));
        assert_eq!(v.string("long", Presence::Required, 2, 100), Field::Absent);

        assert_eq!(
            fields(v.violations()),
            vec![
                ("short", "This value is too short. It should have 2 characters or more."),
                ("long", "This value is too long. It should have 100 characters or less."),
            ]
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({ "name": "çã" }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        assert_eq!(v.string("name", Presence::Required, 2, 2), Field::Present("çã".to_string()));
        assert!(v.violations().is_empty());
    }

    #[test]
    fn test_singular_character_message() {
        assert_eq!(
            messages::too_short(1),
            "This value is too short. It should have 1 character or more."
        );
    }

    #[test]
    fn test_name_must_be_string() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({ "name": 123 }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        v.string("name", Presence::Required, 2, 100);
        assert_eq!(fields(v.violations()), vec![("name", messages::NOT_STRING)]);
    }

    #[test]
    fn test_invalid_uuid() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({
            "id": "invalid-uuid",
            "simple": "a1b2c3d4e5f60718293a4b5c6d7e8f90",
            "number": 7,
        }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        v.uuid("id", Presence::Required);
        v.uuid("simple", Presence::Optional);
        v.uuid("number", Presence::Optional);

        assert_eq!(
            fields(v.violations()),
            vec![
                ("id", messages::INVALID_UUID),
                ("simple", messages::INVALID_UUID),
                ("number", messages::INVALID_UUID),
            ]
        );
    }

    #[test]
    fn test_json_object_rules() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({
            "inline": { "type": "Cultural" },
            "encoded": "{\"tags\": [\"Cordel\"]}",
            "garbage": "invalid-json",
            "array": [1, 2],
            "encodedArray": "[1, 2]",
            "cleared": null,
        }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Update);

        assert_eq!(v.json_object("inline"), Field::Present(json!({ "type": "Cultural" })));
        assert_eq!(v.json_object("encoded"), Field::Present(json!({ "tags": ["Cordel"] })));
        assert_eq!(v.json_object("garbage"), Field::Absent);
        assert_eq!(v.json_object("array"), Field::Absent);
        assert_eq!(v.json_object("encodedArray"), Field::Absent);
        assert_eq!(v.json_object("cleared"), Field::Null);

        assert_eq!(
            fields(v.violations()),
            vec![
                ("garbage", messages::NOT_JSON_OBJECT),
                ("array", messages::NOT_JSON_OBJECT),
                ("encodedArray", messages::NOT_JSON_OBJECT),
            ]
        );
    }

    #[test]
    fn test_scalar_types() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({
            "status": "yes",
            "sequence": 1.5,
            "overflow": 4_294_967_296u64,
            "ok": 3,
            "startDate": "2024-13-01",
        }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Create);

        v.boolean("status", Presence::NotNull);
        v.integer("sequence", Presence::Optional);
        v.integer("overflow", Presence::Optional);
        assert_eq!(v.integer("ok", Presence::Optional), Field::Present(3));
        v.datetime("startDate", Presence::Optional);

        assert_eq!(
            fields(v.violations()),
            vec![
                ("status", messages::NOT_BOOL),
                ("sequence", messages::NOT_INT),
                ("overflow", messages::NOT_INT),
                ("startDate", messages::INVALID_DATETIME),
            ]
        );
    }

    #[test]
    fn test_parse_datetime_formats() {
        let rfc = parse_datetime("2024-09-06T10:00:00-03:00").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-09-06T10:00:00-03:00");

        let date = parse_datetime("2024-08-15").unwrap();
        assert_eq!(date.to_rfc3339(), "2024-08-15T00:00:00+00:00");

        let spaced = parse_datetime("2024-08-15 13:30:00").unwrap();
        assert_eq!(spaced.to_rfc3339(), "2024-08-15T13:30:00+00:00");

        assert!(parse_datetime("15/08/2024").is_none());
    }

    #[test]
    fn test_merge_semantics() {
        let mut name: ActiveValue<String> = ActiveValue::Unchanged("Edital".to_string());
        Field::<String>::Absent.merge_required(&mut name);
        assert_eq!(name, ActiveValue::Unchanged("Edital".to_string()));
        Field::Present("Edital X".to_string()).merge_required(&mut name);
        assert_eq!(name, ActiveValue::Set("Edital X".to_string()));

        let mut space: ActiveValue<Option<Uuid>> = ActiveValue::Unchanged(Some(Uuid::nil()));
        Field::<Uuid>::Absent.merge_into(&mut space);
        assert_eq!(space, ActiveValue::Unchanged(Some(Uuid::nil())));
        Field::<Uuid>::Null.merge_into(&mut space);
        assert_eq!(space, ActiveValue::Set(None));
    }

    #[test]
    fn test_finish_returns_violations() {
        let db = DatabaseConnection::Disconnected;
        let ctx = CallerContext::anonymous();
        let body = payload(json!({ "name": "a" }));
        let mut v = FieldValidator::new(&db, &ctx, &body, ValidationMode::Update);
        let name = v.string("name", Presence::Required, 2, 100);

        match v.finish(name) {
            Err(ServiceError::ValidationFailed(violations)) => assert_eq!(violations.len(), 1),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }
}
