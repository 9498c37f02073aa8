// Prompt templates for portfolio text generation. Both providers receive the same text.

/// Token cap for the "About Me" prompt.
pub const ABOUT_MAX_TOKENS: u32 = 300;
/// Token cap for each project description prompt.
pub const PROJECT_MAX_TOKENS: u32 = 150;

/// Placeholder used when a list field is empty.
const NOT_SPECIFIED: &str = "Not specified";

fn join_or_unspecified(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

/// Prompt for the 2-3 paragraph "About Me" section.
pub fn about_prompt(name: &str, title: &str, skills: &[String]) -> String {
    format!(
        "Write a professional \"About Me\" section (2-3 paragraphs) for a portfolio website.\n\
         Name: {name}\n\
         Professional Title: {title}\n\
         Skills: {skills}\n\
         \n\
         Make it engaging, professional, and highlight their expertise and passion.",
        skills = join_or_unspecified(skills),
    )
}

/// Prompt for a 2-3 sentence project description.
pub fn project_prompt(project_name: &str, technologies: &[String]) -> String {
    format!(
        "Write a brief project description (2-3 sentences) for a portfolio website.\n\
         Project Name: {project_name}\n\
         Technologies: {technologies}\n\
         \n\
         Make it concise, highlight the key features and technologies used.",
        technologies = join_or_unspecified(technologies),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_prompt_lists_skills() {
        let prompt = about_prompt(
            "Ada",
            "Engineer",
            &["C++".to_string(), "Rust".to_string()],
        );
        assert!(prompt.starts_with("Write a professional \"About Me\" section"));
        assert!(prompt.contains("\nName: Ada\n"));
        assert!(prompt.contains("\nProfessional Title: Engineer\n"));
        assert!(prompt.contains("\nSkills: C++, Rust\n\n"));
        assert!(prompt.ends_with("highlight their expertise and passion."));
    }

    #[test]
    fn test_about_prompt_without_skills() {
        let prompt = about_prompt("Ada", "Engineer", &[]);
        assert!(prompt.contains("Skills: Not specified"));
    }

    #[test]
    fn test_project_prompt() {
        let prompt = project_prompt("Ledger", &["Rust".to_string(), "Postgres".to_string()]);
        assert!(prompt.contains("\nProject Name: Ledger\n"));
        assert!(prompt.contains("\nTechnologies: Rust, Postgres\n"));

        let bare = project_prompt("Ledger", &[]);
        assert!(bare.contains("Technologies: Not specified"));
    }

    #[test]
    fn test_braces_in_user_text_are_kept_verbatim() {
        let prompt = about_prompt("{title}", "Engineer", &[]);
        assert!(prompt.contains("Name: {title}\n"));
    }
}
