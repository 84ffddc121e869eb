/// Returned for applicants without any notes; never sent to the model.
pub const NO_NOTES_MESSAGE: &str = "No notes available for this applicant.";

/// Separator placed between consecutive notes in the prompt.
pub const NOTE_SEPARATOR: &str = "\n\n";

const SUMMARY_INSTRUCTIONS: &str = "Please provide a concise three-sentence summary of the following notes about a fraternity rush applicant. Focus on key insights, personality traits, and important interactions. Keep it professional and informative:";

/// Strips control characters other than newlines and tabs.
#[must_use]
pub fn sanitize_note(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || c == '\t' || !c.is_control())
        .collect()
}

/// Joins notes in the order given, one blank line between each.
#[must_use]
pub fn combine_notes(notes: &[String]) -> String {
    notes
        .iter()
        .map(|n| sanitize_note(n))
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

#[must_use]
pub fn build_summary_prompt(notes: &[String]) -> String {
    format!(
        "{SUMMARY_INSTRUCTIONS}\n\n{}\n\nSummary:",
        combine_notes(notes)
    )
}
