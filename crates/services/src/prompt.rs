/// Number of trailing history entries kept in the prompt.
pub const HISTORY_WINDOW: usize = 5;

/// Composes the mentor prompt: preamble, recent history, the user's utterance and the
/// completion cue.
pub fn build_prompt(message: &str, pre_prompt: &str, history: &[String]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let recent = history[start..].join("\n");

    format!("{pre_prompt} Historique récent:\n{recent}\n\nUtilisateur: {message}\nMentor:")
}
