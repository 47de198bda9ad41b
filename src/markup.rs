use std::fmt::Display;

use crate::model::Activity;

pub const LOAD_FAILED: &str = "<p>Failed to load activities. Please try again later.</p>";

const REMOVE_ICON: &str = r##"<svg width="18" height="18" viewBox="0 0 20 20" fill="none" xmlns="http://www.w3.org/2000/svg" style="vertical-align:middle">
      <circle cx="10" cy="10" r="10" fill="#ffebee"/>
      <path d="M7 7L13 13M13 7L7 13" stroke="#d32f2f" stroke-width="2" stroke-linecap="round"/>
    </svg>"##;

/// `&` has to go first, otherwise the entities produced for the other
/// characters get escaped a second time.
pub fn escape_html(value: impl Display) -> String {
    value
        .to_string()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

fn render_participants(activity: &Activity) -> String {
    let participants = &activity.details.participants;
    if participants.is_empty() {
        return r#"<div class="participants-section">
  <h5>Participants</h5>
  <p class="info">No participants yet</p>
</div>"#
            .to_string();
    }

    let name = escape_html(&activity.name);
    let mut items = String::new();
    for p in participants {
        let email = escape_html(p);
        items.push_str(&format!(
            r#"<div class="participant-item">
  <span>{email}</span>
  <button class="delete-participant" title="Remove participant" data-activity="{name}" data-email="{email}">
    {REMOVE_ICON}
  </button>
</div>"#
        ));
    }

    format!(
        r#"<div class="participants-section">
  <h5>Participants</h5>
  <div class="participants-list">{items}</div>
</div>"#
    )
}

pub fn render_card(activity: &Activity) -> String {
    format!(
        r#"<div class="activity-card">
  <h4>{name}</h4>
  <p>{description}</p>
  <p><strong>Schedule:</strong> {schedule}</p>
  <p><strong>Availability:</strong> {spots} spots left</p>
  {participants}
</div>"#,
        name = escape_html(&activity.name),
        description = escape_html(&activity.details.description),
        schedule = escape_html(&activity.details.schedule),
        spots = activity.spots_left(),
        participants = render_participants(activity),
    )
}

pub fn render_cards(activities: &[Activity]) -> String {
    activities.iter().map(render_card).collect()
}

pub fn remove_prompt(activity: &str, email: &str) -> String {
    format!("Remove {email} from {activity}?")
}
