//! Keyboard bindings for the control panel.

use orbis_engine::input::{Key, Modifiers};
use orbis_engine::render::ShaderKind;
use orbis_mesh::MAX_SUBDIVISIONS;

use crate::panel::ControlEvent;
use crate::params::Channel;

/// Color change per `R`/`G`/`B` press.
pub const COLOR_STEP: i32 = 16;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    Control(ControlEvent),
    Exit,
}

/// Maps a key press to an action. Unbound keys return `None`.
pub fn event_for_key(key: Key, modifiers: Modifiers) -> Option<Action> {
    if let Some(d) = key.digit() {
        return (d <= MAX_SUBDIVISIONS)
            .then(|| Action::Control(ControlEvent::SetSubdivisions(d as i32)));
    }

    let sign = if modifiers.shift { -1 } else { 1 };
    let nudge = |channel| {
        Some(Action::Control(ControlEvent::NudgeColor {
            channel,
            delta: sign * COLOR_STEP,
        }))
    };

    let event = match key {
        Key::Escape => return Some(Action::Exit),
        Key::Tab => ControlEvent::CycleGeometry {
            backwards: modifiers.shift,
        },
        Key::Function(1) => ControlEvent::SelectShader(ShaderKind::Lambert),
        Key::Function(2) => ControlEvent::SelectShader(ShaderKind::Perlin),
        Key::Function(3) => ControlEvent::SelectShader(ShaderKind::WaveDeform),
        Key::Letter('S') => ControlEvent::CycleShader,
        Key::ArrowUp => ControlEvent::StepSubdivisions(1),
        Key::ArrowDown => ControlEvent::StepSubdivisions(-1),
        Key::Letter('R') => return nudge(Channel::Red),
        Key::Letter('G') => return nudge(Channel::Green),
        Key::Letter('B') => return nudge(Channel::Blue),
        Key::Letter('L') => ControlEvent::Reload,
        _ => return None,
    };

    Some(Action::Control(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: Key) -> Option<Action> {
        event_for_key(key, Modifiers::default())
    }

    fn shifted(key: Key) -> Option<Action> {
        event_for_key(
            key,
            Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        )
    }

    #[test]
    fn tab_cycles_geometry_and_shift_reverses() {
        assert_eq!(
            plain(Key::Tab),
            Some(Action::Control(ControlEvent::CycleGeometry { backwards: false }))
        );
        assert_eq!(
            shifted(Key::Tab),
            Some(Action::Control(ControlEvent::CycleGeometry { backwards: true }))
        );
    }

    #[test]
    fn function_keys_select_shaders() {
        assert_eq!(
            plain(Key::Function(3)),
            Some(Action::Control(ControlEvent::SelectShader(ShaderKind::WaveDeform)))
        );
    }

    #[test]
    fn digits_set_level_up_to_max() {
        assert_eq!(
            plain(Key::Digit(8)),
            Some(Action::Control(ControlEvent::SetSubdivisions(8)))
        );
        assert_eq!(plain(Key::Digit(9)), None);
    }

    #[test]
    fn shift_subtracts_color() {
        assert_eq!(
            shifted(Key::Letter('G')),
            Some(Action::Control(ControlEvent::NudgeColor {
                channel: Channel::Green,
                delta: -COLOR_STEP,
            }))
        );
    }

    #[test]
    fn escape_exits_and_unbound_is_ignored() {
        assert_eq!(plain(Key::Escape), Some(Action::Exit));
        assert_eq!(plain(Key::Letter('Q')), None);
        assert_eq!(plain(Key::Unknown), None);
    }
}
