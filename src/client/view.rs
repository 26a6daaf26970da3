/// The UI the dispatcher renders into.
pub trait ChatView: Send + Sync {
    /// Blocking notice for input problems, e.g. an empty question.
    fn alert(&self, text: &str);

    fn show_response(&self, text: &str, is_error: bool);

    /// Clears the input and leaves the loading state.
    fn reset_ui_state(&self);
}
