// Application document prompt templates.

/// Filled with `llm_client::prompts::render`. The model is asked for exactly one JSON
/// object; the caller tolerates prose around it.
pub const DOCUMENTS_PROMPT: &str = r#"You are an expert career coach and professional writer.

Write two documents for the candidate below, applying for the role described in the job description.

1. A formal cover letter, dated {today}, addressed to the hiring team at {company_name}{company_address_line}.
   Open with the candidate's contact block (name, location, phone, email).
   Refer to the candidate's {degree} from {university} and to concrete achievements from the resume.
   Map the candidate's experience to the most important requirements of the job. Keep it under 400 words.
2. A short LinkedIn connection message (under 300 characters) to a recruiter at {company_name}
   expressing interest in the {job_title} role.

Use only facts present in the resume. Do not invent employers, dates, or metrics.

CANDIDATE:
Name: {full_name}
Location: {location}
Phone: {phone}
Email: {email}

RESUME:
{resume_text}

JOB TITLE: {job_title}

JOB DESCRIPTION:
{job_text}

Return a single JSON object with exactly these keys:
{
  "cover_letter": "...",
  "linkedin_message": "..."
}"#;
