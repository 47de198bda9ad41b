use serde::Deserialize;

use crate::error::BoardError;

/// One entry of the `GET /activities` object, minus its key.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub details: ActivityDetails,
}

impl Activity {
    /// Capacity minus roster size. Over-enrolled activities go negative.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.details.max_participants) - self.details.participants.len() as i64
    }
}

/// Activities in the order the server listed them.
pub fn parse_activities(body: &str) -> Result<Vec<Activity>, BoardError> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(body).map_err(|e| BoardError::Parse(format!("activities: {e}")))?;

    map.into_iter()
        .map(|(name, value)| {
            let details = serde_json::from_value::<ActivityDetails>(value)
                .map_err(|e| BoardError::Parse(format!("activity {name:?}: {e}")))?;
            Ok(Activity { name, details })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct AcceptedBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RejectedBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Result of a signup or unregister call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Accepted { message: String },
    Rejected { detail: Option<String> },
}

impl MutationOutcome {
    pub const FALLBACK_DETAIL: &'static str = "An error occurred";

    /// 2xx must carry `{message}`; anything else may carry `{detail}`.
    /// A body that isn't JSON at all is a parse error either way.
    pub fn from_response(status: u16, body: &str) -> Result<Self, BoardError> {
        if (200..300).contains(&status) {
            let ok: AcceptedBody = serde_json::from_str(body)
                .map_err(|e| BoardError::Parse(format!("HTTP {status}: {e}")))?;
            return Ok(MutationOutcome::Accepted { message: ok.message });
        }

        let rejected: RejectedBody = serde_json::from_str(body)
            .map_err(|e| BoardError::Parse(format!("HTTP {status}: {e}")))?;
        // FastAPI sends a list of objects for validation failures; only a
        // plain string is shown to the user.
        let detail = match rejected.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };
        Ok(MutationOutcome::Rejected { detail })
    }

    pub fn detail_or_fallback(detail: &Option<String>) -> &str {
        detail.as_deref().unwrap_or(Self::FALLBACK_DETAIL)
    }
}
