//! The default check list for the Resume Optimizer service.
//!
//! Each constructor pairs one documented endpoint with the predicate that
//! decides success, per the service contract:
//! - `GET /health` → any 200 passes.
//! - `POST /process-job-posting` → `{jobText}` in, passes on `success: true`.
//! - `POST /optimize-resume` → `{resumeText, jobDescription}` in, passes on
//!   `success: true`. Not part of the default list: the service needs AI
//!   credentials configured before this endpoint can succeed, so deployments
//!   register it explicitly when they are ready to pay for the call.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::harness::check::{Check, CheckResponse, Verdict};

// ────────────────────────────────────────────────────────────────────────────
// Sample payloads
// ────────────────────────────────────────────────────────────────────────────

/// Job posting sent to `/process-job-posting`.
pub const SAMPLE_JOB_POSTING: &str = "\
Software Engineer - Full Stack\n\
\n\
We are looking for a talented Full Stack Software Engineer to join our team.\n\
\n\
Requirements:\n\
- 3+ years of experience in web development\n\
- Proficiency in React, Node.js, and Python\n\
- Experience with databases (PostgreSQL, MongoDB)\n\
- Knowledge of cloud platforms (AWS, GCP)\n\
- Strong problem-solving skills\n\
- Bachelor's degree in Computer Science or related field\n\
\n\
Responsibilities:\n\
- Develop and maintain web applications\n\
- Collaborate with cross-functional teams\n\
- Write clean, maintainable code\n\
- Participate in code reviews\n";

/// Short job description paired with the sample resume for `/optimize-resume`.
pub const SAMPLE_OPTIMIZATION_TARGET: &str = "\
Senior Full Stack Developer position requiring React, Node.js, Python, and \
cloud experience. Must have 3+ years experience and strong problem-solving skills.\n";

/// Plain-text counterpart of the PDF fixture, used as the `/optimize-resume`
/// payload and written to disk by `write_sample_resume_text`.
pub const SAMPLE_RESUME_TEXT: &str = "\
John Doe\n\
Software Engineer\n\
Email: john.doe@email.com\n\
Phone: (555) 123-4567\n\
\n\
SUMMARY\n\
Experienced software engineer with 4 years of experience in full-stack web development.\n\
Proficient in modern web technologies and passionate about creating efficient solutions.\n\
\n\
EXPERIENCE\n\
Senior Software Engineer | Tech Company | 2022-Present\n\
- Developed and maintained web applications using React and Node.js\n\
- Collaborated with cross-functional teams to deliver high-quality software\n\
- Implemented RESTful APIs and database solutions\n\
- Participated in code reviews and mentored junior developers\n\
\n\
Software Engineer | StartupCorp | 2020-2022\n\
- Built responsive web applications using JavaScript and Python\n\
- Worked with PostgreSQL and MongoDB databases\n\
- Deployed applications on AWS cloud platform\n\
- Improved application performance by 30%\n\
\n\
EDUCATION\n\
Bachelor of Science in Computer Science\n\
University of Technology | 2020\n\
\n\
SKILLS\n\
- Programming Languages: JavaScript, Python, Java\n\
- Frontend: React, HTML, CSS, TypeScript\n\
- Backend: Node.js, Express, Django\n\
- Databases: PostgreSQL, MongoDB, MySQL\n\
- Cloud: AWS, Docker, Kubernetes\n";

// ────────────────────────────────────────────────────────────────────────────
// Wire schemas (service contract)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobPostingResponse {
    success: bool,
    #[serde(default)]
    key_requirements: Vec<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeResponse {
    success: bool,
    #[serde(default)]
    optimized_resume: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Check constructors
// ────────────────────────────────────────────────────────────────────────────

/// `GET /health`: passes on status 200, anything else fails with the
/// observed status and body excerpt.
pub fn health_check() -> Check {
    Check::get("health", "/health", |response| {
        if response.status == 200 {
            Verdict::pass()
        } else {
            Verdict::fail(format!(
                "unexpected status {}: {}",
                response.status,
                response.summary()
            ))
        }
    })
}

/// `POST /process-job-posting` with the sample posting: passes on
/// `success: true`, reporting how many key requirements the service found.
pub fn process_job_posting_check() -> Check {
    Check::post(
        "process-job-posting",
        "/process-job-posting",
        json!({ "jobText": SAMPLE_JOB_POSTING }),
        |response| evaluate_job_posting(response),
    )
}

fn evaluate_job_posting(response: &CheckResponse) -> Verdict {
    if response.status != 200 {
        return Verdict::fail(format!(
            "unexpected status {}: {}",
            response.status,
            response.summary()
        ));
    }
    match response.parse::<JobPostingResponse>() {
        Ok(body) if body.success => {
            Verdict::pass_with_metric("key requirements", body.key_requirements.len() as u64)
        }
        Ok(body) => Verdict::fail(format!(
            "service reported failure: {}",
            body.error.unwrap_or_else(|| "no error message".to_string())
        )),
        Err(e) => Verdict::fail(format!(
            "unparseable response body ({e}): {}",
            response.summary()
        )),
    }
}

/// `POST /optimize-resume`: passes on `success: true`, reporting the length
/// of the optimized resume. Registerable but intentionally absent from
/// `default_checks`.
pub fn optimize_resume_check(resume_text: &str, job_description: &str) -> Check {
    Check::post(
        "optimize-resume",
        "/optimize-resume",
        json!({ "resumeText": resume_text, "jobDescription": job_description }),
        |response| evaluate_optimize(response),
    )
}

fn evaluate_optimize(response: &CheckResponse) -> Verdict {
    if response.status != 200 {
        return Verdict::fail(format!(
            "unexpected status {}: {}",
            response.status,
            response.summary()
        ));
    }
    match response.parse::<OptimizeResponse>() {
        Ok(body) if body.success => Verdict::pass_with_metric(
            "optimized resume length",
            body.optimized_resume.map(|r| r.len()).unwrap_or(0) as u64,
        ),
        Ok(body) => Verdict::fail(format!(
            "service reported failure: {}",
            body.error.unwrap_or_else(|| "no error message".to_string())
        )),
        Err(e) => Verdict::fail(format!(
            "unparseable response body ({e}): {}",
            response.summary()
        )),
    }
}

/// The fixed sequence a standard run executes, in order.
pub fn default_checks() -> Vec<Check> {
    vec![health_check(), process_job_posting_check()]
}

// ────────────────────────────────────────────────────────────────────────────
// Text fixture
// ────────────────────────────────────────────────────────────────────────────

/// Writes the sample plain-text resume to `<dir>/sample_resume.txt`,
/// creating the directory if needed. A convenience for callers that want the
/// optimize payload on disk; the check itself sends the text directly.
pub fn write_sample_resume_text(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join("sample_resume.txt");
    fs::write(&path, SAMPLE_RESUME_TEXT)?;
    Ok(path)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
