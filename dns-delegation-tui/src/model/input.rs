//! 单行文本输入

/// Single-line input with a character filter and a length cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// 输入校验失败时显示的错误
    pub error: Option<String>,
}

impl TextInput {
    /// Append `c` if it passes `allowed` and the value is shorter than `max_len`.
    pub fn push(&mut self, c: char, allowed: impl Fn(char) -> bool, max_len: usize) -> bool {
        if !allowed(c) || self.value.chars().count() >= max_len {
            return false;
        }
        self.value.push(c);
        self.error = None;
        true
    }

    pub fn backspace(&mut self) {
        self.value.pop();
        self.error = None;
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.error = None;
    }

    pub fn clear(&mut self) {
        self.set(String::new());
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
