//! One line of terminal output per session event.

use awaken_engine::{SessionEvent, ToastEvent, XP_PER_LEVEL};

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

pub fn render(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Awakened => "[system] online".to_string(),
        SessionEvent::NotificationShown(state) => format!("[notice] {}", state.message),
        SessionEvent::NotificationDismissed => "[notice] cleared".to_string(),
        SessionEvent::RoleText(text) => format!("[role] {text}_"),
        SessionEvent::Carousel(state) => format!(
            "[featured] slide {} (auto-play {})",
            state.index + 1,
            on_off(state.auto_playing)
        ),
        SessionEvent::ToastShown { message, level } => {
            format!("[toast:{}] {message}", level.as_str())
        }
        SessionEvent::Toast(ToastEvent::Exiting) => "[toast] closing".to_string(),
        SessionEvent::Toast(ToastEvent::Hidden) => "[toast] gone".to_string(),
        SessionEvent::Experience(gain) => {
            let mut line = format!(
                "[xp] level {} ({}/{XP_PER_LEVEL})",
                gain.state.level(),
                gain.state.xp()
            );
            if gain.leveled_up {
                line.push_str(&format!(" +{} level(s)", gain.levels_gained));
            }
            line
        }
        SessionEvent::Endorsement { subject, overlay } => format!(
            "[endorse] {subject}: {}{}",
            overlay.count,
            if overlay.endorsed { " (endorsed)" } else { "" }
        ),
        SessionEvent::Audio(settings) => format!(
            "[audio] sfx {} music {}",
            on_off(!settings.sfx_muted),
            on_off(!settings.music_muted)
        ),
    }
}
