// All prompt templates used by the resume tools.
// Wording is static configuration; only the placeholders are part of the contract.

use crate::generation::template::PromptTemplate;

/// Cover letter. Fields: `job_description`, `resume_text`.
pub static COVER_LETTER: PromptTemplate = PromptTemplate {
    name: "cover_letter",
    placeholders: &["job_description", "resume_text"],
    body: r#"Write a professional cover letter of 300 to 400 words.
Match the candidate's resume to the job description.
Do not invent facts. Only use experience, skills and achievements that appear in the resume.

Job:
{job_description}

Resume:
{resume_text}"#,
};

/// Resume vs job description scoring. Fields: `job_description`, `context`.
pub static MATCHER: PromptTemplate = PromptTemplate {
    name: "matcher",
    placeholders: &["job_description", "context"],
    body: r#"Compare the resume against the job description and answer in exactly this format:

Score: X/100
Match: X%
Keywords matched: ...
Missing keywords: ...
Improvements: ...

Job:
{job_description}

Resume:
{context}"#,
};

/// Standalone resume critique. Fields: `context`.
pub static CHECKER: PromptTemplate = PromptTemplate {
    name: "checker",
    placeholders: &["context"],
    body: r#"Review the resume and answer in exactly this structure:

Score: X/100
Strengths: ...
Weaknesses: ...
Recommended Skills: ...

Resume:
{context}"#,
};

/// System instruction for the career coach. Fields: `resume_text`.
/// Rebuilt on every chat submission; never stored in the conversation.
pub static COACH_SYSTEM: PromptTemplate = PromptTemplate {
    name: "coach_system",
    placeholders: &["resume_text"],
    body: r#"You are an experienced AI career coach.
Be practical, concise, and actionable.
Avoid generic motivation.

Resume:
{resume_text}"#,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_render_with_required_fields() {
        let jd = "Backend engineer, Python, 5 years";
        let resume = "3 years Python backend experience";

        let cover = COVER_LETTER
            .render(&[("job_description", jd), ("resume_text", resume)])
            .unwrap();
        let matcher = MATCHER
            .render(&[("job_description", jd), ("context", resume)])
            .unwrap();
        let checker = CHECKER.render(&[("context", resume)]).unwrap();
        let coach = COACH_SYSTEM.render(&[("resume_text", resume)]).unwrap();

        for rendered in [&cover, &matcher, &checker, &coach] {
            assert!(rendered.contains(resume));
            assert!(!rendered.contains("{context}"));
            assert!(!rendered.contains("{resume_text}"));
            assert!(!rendered.contains("{job_description}"));
        }
        assert!(cover.contains(jd));
        assert!(matcher.contains(jd));
    }

    #[test]
    fn test_matcher_substitutes_inputs_verbatim() {
        let jd = "Backend engineer, Python, 5 years";
        let resume = "Jane Doe\n3 years Python backend experience\n{not a placeholder}";

        let prompt = MATCHER
            .render(&[("job_description", jd), ("context", resume)])
            .unwrap();

        assert!(prompt.contains("Backend engineer, Python, 5 years"));
        assert!(prompt.contains("3 years Python backend experience"));
        assert!(prompt.contains(resume));
    }

    #[test]
    fn test_matcher_keeps_output_format_block() {
        let prompt = MATCHER
            .render(&[("job_description", "jd"), ("context", "cv")])
            .unwrap();
        for line in [
            "Score: X/100",
            "Match: X%",
            "Keywords matched:",
            "Missing keywords:",
            "Improvements:",
        ] {
            assert!(prompt.contains(line), "missing format line {line}");
        }
    }

    #[test]
    fn test_checker_requires_context() {
        assert!(CHECKER.render(&[("resume_text", "cv")]).is_err());
    }

    #[test]
    fn test_cover_letter_constrains_length_and_fabrication() {
        assert!(COVER_LETTER.body.contains("300 to 400 words"));
        assert!(COVER_LETTER.body.contains("Do not invent facts"));
    }
}
