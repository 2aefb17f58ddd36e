// Career advice prompt templates.

/// Replace `{skills}`, `{experience}` and `{raw_json_instruction}` before sending.
pub const CAREER_PATHS_PROMPT: &str = r#"You are an expert AI career advisor.

Based on the following skills:
{skills}

And estimated experience: {experience} years

Recommend 3 suitable career paths in valid JSON format.
Tailor suggestions to the candidate's experience level (e.g., junior-level roles if experience < 2 years).

Each career must include:
- "career": (string)
- "required_skills": (list of strings)
- "courses": (list of objects with "title" and "link")

{raw_json_instruction}

Example:
[
  {
    "career": "Data Scientist",
    "required_skills": ["Python", "SQL", "Machine Learning"],
    "courses": [
      {
        "title": "Machine Learning by Andrew Ng",
        "link": "https://www.coursera.org/learn/machine-learning"
      }
    ]
  }
]"#;
