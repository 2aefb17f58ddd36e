// Skill extraction prompt templates.

/// Replace `{text}` and `{list_instruction}` before sending.
pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract all relevant technical and soft skills from the following text. This includes:

- Programming languages (Python, R, Java, etc.)
- Frameworks and libraries (Scikit-learn, React, Tableau, etc.)
- Data science/statistics terms (A/B Testing, Regression, Clustering, etc.)
- Tools and platforms (AWS, Azure, Git, Power BI, etc.)
- Soft skills (Teamwork, Communication, Agile, etc.)

{list_instruction}

Text:
{text}"#;
