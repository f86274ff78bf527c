//! 加载动画

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame for the current animation tick.
pub fn frame(tick: usize) -> &'static str {
    FRAMES[tick % FRAMES.len()]
}
