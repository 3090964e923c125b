#![allow(dead_code)]

// All LLM prompt constants for the advice operations. Templates use
// `{placeholder}` substitution; every prompt demands raw JSON so the
// tolerant recovery layer has the easiest possible job.

/// Salary formatting rule for India-based users.
pub const SALARY_FORMAT_INR: &str =
    "Use INR (₹) and Lakhs format for salary_range (e.g. ₹15L - ₹25L) since this is an India-based user.";

/// Salary formatting rule for international users.
pub const SALARY_FORMAT_USD: &str =
    "Use USD ($) and K/year format for salary_range (e.g. $80K - $120K/year) since this is an international user.";

/// Career analysis prompt. Replace: {profile_text}, {industries},
/// {career_stage}, {location}, {salary_instruction}.
pub const CAREER_ADVICE_PROMPT_TEMPLATE: &str = r#"Act as an Elite Career Strategist and AI Career Coach.

**User Profile Analysis:**
{profile_text}

**Context:**
- Target Industries: {industries}
- Career Stage: {career_stage}
- Location Preference: {location}

**Salary Format Rule:** {salary_instruction}

**Task:**
Provide a comprehensive career analysis. Return ONLY a valid JSON object (no markdown, no code blocks) with this exact structure:

{
  "profile_summary": "A concise 2-sentence professional summary",
  "current_skills": ["Skill1", "Skill2", "Skill3"],
  "careers": [
    {
      "title": "Specific Job Title",
      "match_score": 85,
      "salary_range": "salary here per the format rule above",
      "reason": "Why this fits",
      "skill_gap_analysis": {"Python": 90, "Leadership": 40},
      "next_steps": ["Step 1", "Step 2"],
      "learning_path": ["Course 1", "Course 2"],
      "interview_tips": ["Tip 1", "Tip 2"],
      "job_search_keywords": "data analyst python sql",
      "top_companies": ["Google", "Microsoft", "Amazon"],
      "certifications": ["AWS Certified", "Google Analytics"]
    }
  ]
}

Suggest 6-8 distinct career paths. Return ONLY the JSON object."#;

/// ATS resume builder prompt. Replace: {name}, {target_role},
/// {job_description}, {experience_years}, {work_experience}, {skills},
/// {education}, {certifications}, {projects}, {achievements}.
pub const ATS_RESUME_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume writer and career coach.

Create a highly optimized, ATS-friendly resume based on this profile:

Name: {name}
Target Role: {target_role}
Target Job Description: {job_description}
Years of Experience: {experience_years}
Current/Past Roles: {work_experience}
Skills: {skills}
Education: {education}
Certifications: {certifications}
Projects: {projects}
Achievements: {achievements}

Return ONLY a valid JSON object (no markdown, no code blocks) with this structure:
{
  "ats_score": 92,
  "ats_tips": ["Tip 1", "Tip 2", "Tip 3"],
  "keywords_found": ["keyword1", "keyword2"],
  "keywords_missing": ["keyword3", "keyword4"],
  "resume": {
    "contact": {"name": "Full Name","email": "email@example.com","phone": "+91-XXXXXXXXXX","linkedin": "linkedin.com/in/username","location": "City, State"},
    "summary": "2-3 sentence powerful professional summary with ATS keywords",
    "experience": [{"title": "Job Title","company": "Company Name","duration": "Jan 2022 – Present","bullets": ["Quantified achievement bullet 1","Quantified achievement bullet 2"]}],
    "skills": {"technical": ["Skill1", "Skill2"],"soft": ["Leadership"],"tools": ["Tool1"]},
    "education": [{"degree": "B.Tech Computer Science","institution": "University Name","year": "2020","gpa": "8.5/10"}],
    "certifications": ["Cert1", "Cert2"],
    "projects": [{"name": "Project Name","description": "1-2 line impactful description with tech stack","link": ""}]
  }
}
Return ONLY the JSON."#;

/// Mock-interview question generation prompt. Replace: {role}, {level}.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"You are a world-class technical recruiter who has conducted 10,000+ interviews across a wide variety of industries and roles — tech, core engineering, finance, consulting, healthcare, and more.

Generate a realistic mock interview for:
Role: {role}
Level: {level}

IMPORTANT — Companies field: For each question, list 2-3 companies that ACTUALLY hire for this specific role and are KNOWN to ask this type of question in their interviews. Use the most relevant hiring companies for the specific domain — NOT generic big tech unless they genuinely hire for the role.

Return ONLY a raw JSON array with exactly 8 question objects. No markdown. No code fences. Start with [ and end with ].

Format:
[{"id":1,"category":"Behavioral","question":"Full question text here","difficulty":"Easy","companies":["Relevant Co 1","Relevant Co 2"],"hint":"STAR method tip","ideal_answer_points":["Point 1","Point 2","Point 3"],"follow_ups":["Follow-up 1"]}]

Mix: id 1-2 Behavioral, id 3-4 Technical, id 5 Problem Solving, id 6 Situational, id 7 Culture Fit, id 8 Role-specific scenario.
Rules: straight double quotes, no apostrophes, single-line strings, no trailing commas, max 3 ideal_answer_points, exactly 1 follow_up.
Start with [ immediately."#;

/// Answer evaluation prompt. Replace: {companies}, {role}, {question},
/// {answer}, {ideal_points}.
pub const EVALUATE_ANSWER_PROMPT_TEMPLATE: &str = r#"You are a warm but brutally honest senior hiring manager at {companies} evaluating a {role} candidate.

Question asked: {question}
Candidate answered: {answer}
Ideal answer should cover: {ideal_points}

Return ONLY raw JSON. No markdown. Start with { immediately.

{"score": 72,"verdict": "Good","one_line_reaction": "Solid attempt but missed key technical depth.","what_you_did_well": ["Specific strength 1","Specific strength 2"],"what_went_wrong": ["Specific gap 1","Specific gap 2"],"how_to_improve": ["Concrete actionable fix 1","Concrete actionable fix 2"],"sample_better_answer": "A 3-4 sentence model answer using STAR method","keywords_used": ["kw1","kw2"],"keywords_missed": ["kw3","kw4"],"crack_this_question": "Likely","crack_message": "Honest verdict on whether this answer would pass."}

Scoring: 90-100=Excellent, 75-89=Good, 60-74=Average, below 60=Needs Work
crack_this_question must be exactly: "Very Likely", "Likely", "Borderline", or "Unlikely"
Rules: straight double quotes, no apostrophes, single-line strings, no trailing commas.
Start with { immediately."#;

/// Final interview verdict prompt. Replace: {companies}, {role}, {level},
/// {avg_score}, {avg_score_rounded}, {scores}, {weak_areas}, {strong_areas}.
pub const FINAL_VERDICT_PROMPT_TEMPLATE: &str = r#"You are a kind but honest Head of Talent at {companies} reviewing a complete mock interview for a {role} ({level}) position.

Summary: avg score {avg_score}/100, scores {scores}, weaknesses {weak_areas}, strengths {strong_areas}.

Return ONLY raw JSON. Start with { immediately.

{"overall_score": {avg_score_rounded},"grade": "B+","headline": "One-sentence punchy summary","can_crack_company": "Borderline","crack_verdict_message": "2-3 sentences honest assessment.","top_strengths": ["Strength 1","Strength 2","Strength 3"],"top_weaknesses": ["Weakness 1","Weakness 2","Weakness 3"],"priority_action_plan": ["Most important fix this week","Second priority","Third priority"],"ready_to_apply": false,"estimated_weeks_to_ready": 4,"motivational_close": "1-2 sentence warm closing."}

can_crack_company must be exactly: "Yes, apply now!", "Almost there", "Borderline", or "Not yet — keep practising"
grade: A+, A, B+, B, C+, C, or D
Rules: straight double quotes, no apostrophes, single-line strings, no trailing commas.
Start with { immediately."#;

/// Exam resource curation prompt. Replace: {company}, {role}.
pub const EXAM_RESOURCES_PROMPT_TEMPLATE: &str = r#"You are an expert career resource curator with deep knowledge of Indian and global company hiring processes, exam portals, and open-source PYQ (Previous Year Question) databases.

A user is looking for Previous Year Questions and authentic exam preparation resources for:
Company: {company}
Target Role / Exam: {role}

Your task: Find the most AUTHENTIC and RELIABLE open-source resources available for this company's hiring process.

Authenticity rules — ONLY include resources that meet these standards:
1. Official company portals or career pages
2. Well-known platforms: GeeksforGeeks, IndiaBix, PrepInsta, LeetCode, InterviewBit, Testbook, AglaSem, EduRev, NPTEL, GitHub (reputable repos)
3. Rate each as: "Official Source", "Verified High Quality", "Verified Community", or skip entirely if unverifiable
4. DO NOT invent URLs. Only include URLs you are confident are real.
5. If you are not confident about a resource, set authenticity to "Verify Before Use"

Return ONLY a raw JSON object. No markdown. No code fences. Start with { immediately.

{
  "company": "{company}",
  "role": "{role}",
  "overall_confidence": "High",
  "summary": "2-sentence summary of what resources are available and how well-documented this company hiring process is.",
  "exam_pattern": "Brief description of the typical exam/selection pattern for this company and role, if known.",
  "resources": [
    {
      "name": "Resource Name",
      "url": "https://actual-verified-url.com/specific-page",
      "description": "What this resource contains and why it is useful",
      "content_type": "PYQs / Mock Tests / Interview Experiences / Official Portal",
      "authenticity": "Verified High Quality"
    }
  ],
  "preparation_tips": [
    "Specific actionable tip 1 for this company and role",
    "Specific actionable tip 2",
    "Specific actionable tip 3"
  ]
}

overall_confidence must be exactly: "High", "Medium", or "Low" (based on how much you know about this company hiring process).
Include 3-6 resources maximum. Quality over quantity.
Rules: straight double quotes, no apostrophes, single-line strings, no trailing commas.
Start with { immediately."#;

/// Exam question-paper generation prompt. Replace: {company}, {role},
/// {count}, {per_section}.
pub const EXAM_PAPER_PROMPT_TEMPLATE: &str = r#"You are a senior exam content creator specialising in recruitment tests.

Generate a realistic PYQ-style question paper for:
Company: {company}
Role: {role}
Total Questions: {count}

Create questions split into 3-4 appropriate sections for this company and role.
For coding/tech roles: DSA, code output, SQL/OS/networking questions.
For core engineering: domain-specific technical MCQs relevant to the field.
For mass recruiters: aptitude, verbal, reasoning, basic coding.

Return ONLY a raw JSON array of section objects. No markdown. No code fences. Start with [ immediately.

[
  {
    "section": "Section Name",
    "questions": [
      {
        "question": "Full question text. For code questions write code after a newline.",
        "code": "",
        "options": ["A) Option 1", "B) Option 2", "C) Option 3", "D) Option 4"],
        "answer": "A) Option 1",
        "explanation": "Detailed 2-3 sentence explanation of the correct answer."
      }
    ]
  }
]

Rules: each section ~{per_section} questions. Straight double quotes only, no apostrophes, no trailing commas.
Explanations must be detailed and educational.
Start with [ immediately."#;
