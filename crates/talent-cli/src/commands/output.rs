//! Plain-text and JSON rendering of command results.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::Context;
use serde::Serialize;
use talent_core::types::{ApplicationRecord, Department, InterviewRequest, JobPosition, User};
use talent_reqwest::Dashboard;

/// Number of applications shown on a dashboard.
const RECENT_APPLICATIONS: usize = 5;

/// Writes command results to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    /// Creates a printer; `json` selects raw JSON output.
    pub const fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn message(&self, message: &str) -> anyhow::Result<()> {
        if self.json {
            return self.emit_json(&serde_json::json!({ "message": message }));
        }
        self.emit_text(message)
    }

    pub fn login(&self, user: &User, landing: &str) -> anyhow::Result<()> {
        if self.json {
            return self.emit_json(&serde_json::json!({ "user": user, "landing": landing }));
        }
        self.emit_text(&format!(
            "Logged in as {} ({})\nLanding page: {landing}",
            user.username,
            user.role()
        ))
    }

    pub fn user(&self, user: &User) -> anyhow::Result<()> {
        self.emit(user, user_text)
    }

    pub fn jobs(&self, jobs: &[JobPosition]) -> anyhow::Result<()> {
        self.emit(jobs, jobs_text)
    }

    pub fn applications(&self, records: &[ApplicationRecord]) -> anyhow::Result<()> {
        self.emit(records, applications_text)
    }

    pub fn interviews(&self, requests: &[InterviewRequest]) -> anyhow::Result<()> {
        self.emit(requests, interviews_text)
    }

    pub fn departments(&self, departments: &[Department]) -> anyhow::Result<()> {
        self.emit(departments, departments_text)
    }

    pub fn dashboard(&self, dashboard: &Dashboard) -> anyhow::Result<()> {
        self.emit(dashboard, dashboard_text)
    }

    fn emit<T>(&self, value: &T, text: fn(&T) -> String) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        if self.json {
            self.emit_json(value)
        } else {
            self.emit_text(&text(value))
        }
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
        self.emit_text(&json)
    }

    fn emit_text(&self, text: &str) -> anyhow::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text.trim_end()).context("failed to write to stdout")
    }
}

fn user_text(user: &User) -> String {
    let mut out = format!("{} <{}>\nRole: {}", user.username, user.email, user.role());
    if let Some(department) = &user.department_name {
        let _ = write!(out, "\nDepartment: {department}");
    }
    out
}

fn jobs_text(jobs: &[JobPosition]) -> String {
    if jobs.is_empty() {
        return "No open positions".to_owned();
    }
    jobs.iter()
        .map(|job| {
            let id = job.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_owned());
            format!("#{id:<5} {}  [{}]", job.title, job.department)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn applications_text(records: &[ApplicationRecord]) -> String {
    if records.is_empty() {
        return "No applications".to_owned();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "#{:<5} {:<24} {:<24} {:<20} {}",
                record.id,
                record.candidate_name(),
                record.job_title(),
                record.department_name(),
                record.status_label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn interviews_text(requests: &[InterviewRequest]) -> String {
    if requests.is_empty() {
        return "No interview requests".to_owned();
    }
    requests
        .iter()
        .map(|request| {
            format!(
                "#{:<5} {:<24} {:<24} {:<20} {} by {} ({})",
                request.id,
                request.candidate_name(),
                request.job_title(),
                request.department_name(),
                request.requested_date(),
                request.manager(),
                request.status.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn departments_text(departments: &[Department]) -> String {
    if departments.is_empty() {
        return "No departments".to_owned();
    }
    departments
        .iter()
        .map(|department| match &department.description {
            Some(description) => format!("#{:<5} {}  {description}", department.id, department.name),
            None => format!("#{:<5} {}", department.id, department.name),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn dashboard_text(dashboard: &Dashboard) -> String {
    let stats = &dashboard.stats;
    let mut out = match &dashboard.department {
        Some(department) => format!("Department: {department}\n"),
        None => String::from("All departments\n"),
    };

    let _ = writeln!(
        out,
        "Applications: {} total, {} new, {} reviewing, {} interview, {} rejected, {} hired",
        stats.total, stats.new, stats.reviewing, stats.interview, stats.rejected, stats.hired
    );
    let _ = writeln!(out, "Open positions: {}", dashboard.jobs.len());
    let _ = writeln!(
        out,
        "Pending interview requests: {}",
        dashboard.pending_interviews().count()
    );

    let recent = dashboard.recent_applications(RECENT_APPLICATIONS);
    if !recent.is_empty() {
        let _ = writeln!(out, "\nRecent applications:\n{}", applications_text(recent));
    }
    for notice in &dashboard.notices {
        let _ = writeln!(out, "\nNote: {notice}");
    }
    out
}
