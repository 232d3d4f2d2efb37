// All LLM prompt constants for the Optimization module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume optimization.
pub const OPTIMIZE_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) \
    optimization specialist and a professional resume writer.";

/// Resume optimization prompt template.
/// Replace: {truthfulness_instruction}, {resume_text}, {job_description}
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = r#"Your task is to take a candidate's resume text and a target job description, then generate an optimized resume and a summary of the changes.

**Candidate's Resume Text:**
---
{resume_text}
---

**Target Job Description:**
---
{job_description}
---

**Instructions:**
1. Thoroughly analyze the job description to identify the most critical keywords, skills, and qualifications (e.g., "Python", "React", "Data Analysis", "Team Leadership").
2. Compare the candidate's resume against these required qualifications and identify any gaps.
3. Rewrite and enhance the resume's content (especially the summary/objective and the work experience bullet points) to truthfully and naturally incorporate the identified keywords.
4. {truthfulness_instruction}
5. Maintain a professional tone and a clean, readable format. The output should be a complete, well-structured resume text, using "\n" line breaks between lines.
6. Provide a brief list of the key changes you made and explain WHY you made them (e.g., "Added 'Agile Methodologies' to the skills section to match the job description's emphasis on Scrum.").

**Output Format:**
Return a JSON object with EXACTLY these two keys and no others:
{
  "optimized_resume_text": "John Doe\nNew York, NY | (123) 456-7890 | john.doe@email.com\n\nSummary\nA highly motivated software engineer... (full optimized resume text here)",
  "changes_summary": [
    "Rephrased the summary to include keywords like 'SaaS' and 'cloud computing' from the job description.",
    "Added 'CI/CD' and 'Docker' to the skills section as they were explicitly mentioned as requirements."
  ]
}"#;
