use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::{KeyboardState, Scancode};
use sdl2::mouse::MouseState;
use sdl2::EventPump;

/// Raw per-frame key and pointer levels, before edge detection
///
/// This is the boundary between SDL2 and the simulation: the host fills one
/// of these from the keyboard/mouse state each frame, and everything past
/// this point works on plain booleans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLevels {
    pub left_held: bool,
    pub right_held: bool,
    pub jump_held: bool,
    pub pointer_down: bool,
}

impl InputLevels {
    /// Arrow keys or A/D to walk, Space/Up/W to jump, any mouse button to attack
    pub fn from_sdl(keyboard: &KeyboardState, mouse: &MouseState) -> Self {
        let held = |codes: &[Scancode]| codes.iter().any(|&code| keyboard.is_scancode_pressed(code));

        InputLevels {
            left_held: held(&[Scancode::Left, Scancode::A]),
            right_held: held(&[Scancode::Right, Scancode::D]),
            jump_held: held(&[Scancode::Space, Scancode::Up, Scancode::W]),
            pointer_down: mouse.left() || mouse.right() || mouse.middle(),
        }
    }
}

/// Logical input for one simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    /// True only on the frame the jump key went down
    pub jump_pressed: bool,
    pub jump_held: bool,
    /// Level signal: true for every frame the pointer is down, no latching
    pub attack: bool,
}

impl FrameInput {
    pub fn idle() -> Self {
        FrameInput::default()
    }
}

/// Turns held-key levels into a `FrameInput`, deriving the jump edge
///
/// Game Dev Pattern: Edge Detection
/// SDL tells us whether a key is down *now*. A "just pressed" signal is
/// down-now AND up-last-frame, so the sampler remembers one bit.
#[derive(Debug, Default)]
pub struct InputSampler {
    jump_was_held: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        InputSampler {
            jump_was_held: false,
        }
    }

    pub fn sample(&mut self, levels: InputLevels) -> FrameInput {
        let jump_pressed = levels.jump_held && !self.jump_was_held;
        self.jump_was_held = levels.jump_held;

        FrameInput {
            move_left: levels.left_held,
            move_right: levels.right_held,
            jump_pressed,
            jump_held: levels.jump_held,
            attack: levels.pointer_down,
        }
    }
}

/// Window-level actions that are not part of the per-frame input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    Quit,
    /// The window stopped receiving keyboard input; the host feeds idle frames
    FocusLost,
    FocusGained,
}

/// Map one SDL event to the host action it requests, if any
pub fn action_for_event(event: &Event) -> Option<GameAction> {
    match event {
        Event::Quit { .. }
        | Event::KeyDown {
            scancode: Some(Scancode::Escape),
            ..
        } => Some(GameAction::Quit),
        Event::Window { win_event, .. } => match win_event {
            WindowEvent::FocusLost => Some(GameAction::FocusLost),
            WindowEvent::FocusGained => Some(GameAction::FocusGained),
            _ => None,
        },
        _ => None,
    }
}

/// Drain pending SDL events, returning the actions the host loop cares about
///
/// Movement and attack are read as levels through `InputLevels`, so only
/// quit and focus changes come through the event queue.
pub fn poll_actions(event_pump: &mut EventPump) -> Vec<GameAction> {
    event_pump
        .poll_iter()
        .filter_map(|event| action_for_event(&event))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jump(held: bool) -> InputLevels {
        InputLevels {
            jump_held: held,
            ..InputLevels::default()
        }
    }

    #[test]
    fn test_jump_edge_fires_once_while_held() {
        let mut sampler = InputSampler::new();

        assert!(sampler.sample(jump(true)).jump_pressed);
        for _ in 0..10 {
            let input = sampler.sample(jump(true));
            assert!(!input.jump_pressed);
            assert!(input.jump_held);
        }
    }

    #[test]
    fn test_jump_edge_refires_after_release() {
        let mut sampler = InputSampler::new();

        assert!(sampler.sample(jump(true)).jump_pressed);
        assert!(!sampler.sample(jump(false)).jump_pressed);
        assert!(sampler.sample(jump(true)).jump_pressed);
    }

    #[test]
    fn test_attack_is_level_triggered() {
        let mut sampler = InputSampler::new();
        let pointer = |down: bool| InputLevels {
            pointer_down: down,
            ..InputLevels::default()
        };

        assert!(sampler.sample(pointer(true)).attack);
        assert!(sampler.sample(pointer(true)).attack);
        assert!(!sampler.sample(pointer(false)).attack);
    }

    #[test]
    fn test_window_events_map_to_actions() {
        let focus = |win_event| Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event,
        };

        assert_eq!(
            action_for_event(&Event::Quit { timestamp: 0 }),
            Some(GameAction::Quit)
        );
        assert_eq!(
            action_for_event(&focus(WindowEvent::FocusLost)),
            Some(GameAction::FocusLost)
        );
        assert_eq!(
            action_for_event(&focus(WindowEvent::FocusGained)),
            Some(GameAction::FocusGained)
        );
        assert_eq!(action_for_event(&focus(WindowEvent::Exposed)), None);
    }

    #[test]
    fn test_movement_levels_pass_through() {
        let mut sampler = InputSampler::new();
        let input = sampler.sample(InputLevels {
            left_held: true,
            right_held: true,
            ..InputLevels::default()
        });

        assert!(input.move_left);
        assert!(input.move_right);
        assert!(!input.jump_pressed);
    }
}
