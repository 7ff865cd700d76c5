use crate::error::ValidationError;
use crate::IrrigationStatus;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationEvent {
    pub id: String,
    pub zone: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideAction {
    Start,
    Stop,
    Delay,
}

impl FromStr for OverrideAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(OverrideAction::Start),
            "stop" => Ok(OverrideAction::Stop),
            "delay" => Ok(OverrideAction::Delay),
            other => Err(ValidationError::InvalidAction(other.to_owned())),
        }
    }
}

/// Manual command issued by the control panel
///
/// `action` stays a plain string so unknown actions surface as a
/// `ValidationError` instead of a body deserialization failure.
/// Non-string actions are kept as their JSON text, `null` as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideRequest {
    #[serde(default, deserialize_with = "any_action")]
    #[schema(example = "delay")]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_minutes: Option<f64>,
}

impl OverrideRequest {
    pub fn start(zone: Option<String>) -> Self {
        OverrideRequest {
            action: "start".to_owned(),
            zone,
            delay_minutes: None,
        }
    }

    pub fn stop(zone: Option<String>) -> Self {
        OverrideRequest {
            action: "stop".to_owned(),
            zone,
            delay_minutes: None,
        }
    }

    pub fn delay_by(minutes: f64) -> Self {
        OverrideRequest {
            action: "delay".to_owned(),
            zone: None,
            delay_minutes: Some(minutes),
        }
    }

    /// Parses a request body, a blank body is read as `{}`
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(OverrideRequest::default());
        }
        serde_json::from_slice(body)
    }

    pub fn action(&self) -> Result<OverrideAction, ValidationError> {
        self.action.parse()
    }

    /// Zone name, an empty string counts as no zone
    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref().filter(|zone| !zone.is_empty())
    }

    /// The requested delay, only strictly positive minutes are accepted
    pub fn delay(&self) -> Result<Duration, ValidationError> {
        let minutes = self
            .delay_minutes
            .filter(|minutes| *minutes > 0.0)
            .ok_or(ValidationError::InvalidDelay)?;
        let millis = (minutes * 60_000.0).round();
        if !millis.is_finite() || millis > i64::MAX as f64 / 2.0 {
            return Err(ValidationError::DelayOutOfRange(minutes));
        }
        if millis < 1.0 {
            return Err(ValidationError::InvalidDelay);
        }
        Ok(Duration::milliseconds(millis as i64))
    }
}

fn any_action<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(action) => action,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverrideResponse {
    pub ok: bool,
    pub irrigation_status: IrrigationStatus,
    pub message: String,
    pub next_event: Option<IrrigationEvent>,
}
