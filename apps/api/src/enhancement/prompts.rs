// All LLM prompt constants for the Enhancement module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Summary rewrite prompt. Replace `{summary}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Enhance the following professional summary to make it more impactful, ATS-friendly and compelling. Keep it concise (2-3 sentences, 50-80 words).

Focus on:
- Strong action words
- Relevant keywords
- Clear value proposition
- Professional tone
- Quantifiable achievements if mentioned

Original summary:
{summary}

Return ONLY the enhanced summary text, nothing else."#;

/// Experience rewrite prompt. Replace `{title}`, `{company}` and
/// `{responsibilities}` before sending.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Enhance the following job responsibilities to make them more impactful and ATS-friendly.

Job Title: {title}
Company: {company}

Original responsibilities:
{responsibilities}

Requirements:
- Start each point with a strong action verb (achieved, developed, led, implemented, etc.)
- Make achievements quantifiable where the original supports it
- Use industry-relevant keywords
- Keep it concise and impactful
- Format as bullet points, one per line, each starting with the • symbol
- Aim for 3-5 bullet points

Return ONLY the enhanced bullet points, nothing else."#;

/// Project rewrite prompt. Replace `{name}`, `{technologies}` and
/// `{description}` before sending.
pub const PROJECT_PROMPT_TEMPLATE: &str = r#"Enhance the following project description to make it more impressive and ATS-friendly.

Project Name: {name}
Technologies: {technologies}

Original description:
{description}

Requirements:
- Highlight technical skills and technologies used
- Emphasize impact and results
- Use action-oriented language
- Keep it concise (2-3 sentences)
- Include quantifiable metrics if the original contains them

Return ONLY the enhanced description, nothing else."#;

/// Skill categorisation prompt. Replace `{skills}` before sending.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Organize the following skills into two categories: technical skills and soft skills.

Skills: {skills}

Return a JSON object with this EXACT schema:
{
  "technical": ["Python", "Docker"],
  "soft": ["Leadership"]
}

Use only skills from the list above. Every skill must appear in exactly one category."#;

/// Suggestions prompt. Replace `{resume}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide 5 specific, actionable suggestions for improvement.

Resume:
{resume}

Focus on:
- ATS optimization
- Content improvements
- Keyword optimization
- Quantifiable achievements
- Professional presentation

Return the suggestions as a numbered list, one suggestion per line. Be specific and actionable."#;

pub const REVIEWER_SYSTEM: &str = "You are an expert resume reviewer and career coach.";

/// Chat prompt. Replace `{resume}` and `{question}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = r#"A user is asking for advice about their resume.

Resume Context:
{resume}

User Question: {question}

Provide helpful, specific and actionable advice. Be encouraging but honest.
Keep your response concise (2-3 paragraphs maximum)."#;

pub const CONSULTANT_SYSTEM: &str = "You are a professional resume consultant.";
