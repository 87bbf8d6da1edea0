//! Subcommands of the `talent` binary.
//!
//! Every subcommand that shows protected data runs its [`RouteGuard`]
//! first. A denied guard prints nothing and fails with the page the
//! user would have been sent to.

mod output;

use anyhow::Context;
use clap::Subcommand;
use talent_core::filter::{ApplicationFilter, visible_applications};
use talent_core::types::{ApplicationStatus, Capability, Credentials, Role, User};
use talent_reqwest::{Dashboard, ReqwestClient, TalentApi};
use talent_session::{
    Destination, GuardDecision, RouteGuard, SessionContext, SessionService, SessionStorage,
    landing_path,
};

pub use self::output::Printer;
use crate::TRACING_TARGET_COMMAND;
use crate::config::Cli;

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        /// Account name
        #[arg(long, short = 'u')]
        username: String,
        /// Account password
        #[arg(long, short = 'p', env = "TALENT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List open job postings
    Jobs {
        /// Only postings of this department
        #[arg(long)]
        department: Option<String>,
    },
    /// List applications visible to the logged-in user
    Applications {
        /// Only this status, by code (1-5) or name
        #[arg(long, value_parser = parse_status)]
        status: Option<ApplicationStatus>,
        /// Only this exact job title
        #[arg(long)]
        job: Option<String>,
        /// Only this department
        #[arg(long)]
        department: Option<String>,
    },
    /// List interview requests
    Interviews,
    /// List departments
    Departments,
    /// Show the landing view of the logged-in user's role
    Dashboard,
}

impl Command {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Jobs { .. } => "jobs",
            Self::Applications { .. } => "applications",
            Self::Interviews => "interviews",
            Self::Departments => "departments",
            Self::Dashboard => "dashboard",
        }
    }

    /// Guard protecting the command, if any.
    pub const fn guard(&self) -> Option<RouteGuard> {
        match self {
            Self::Login { .. } | Self::Logout | Self::Jobs { .. } => None,
            Self::Whoami | Self::Interviews | Self::Dashboard => Some(RouteGuard::authenticated()),
            Self::Applications { .. } => {
                Some(RouteGuard::requires(Capability::ViewDepartmentApplications))
            }
            Self::Departments => Some(RouteGuard::hr_only()),
        }
    }
}

fn parse_status(input: &str) -> Result<ApplicationStatus, String> {
    ApplicationStatus::parse(input).map_err(|error| error.to_string())
}

/// Everything a command needs to talk to the backend.
#[derive(Debug, Clone)]
pub struct App {
    api: TalentApi,
    context: SessionContext,
    printer: Printer,
}

impl App {
    /// Builds the HTTP client and opens the session file.
    pub async fn connect(cli: &Cli) -> anyhow::Result<Self> {
        let client =
            ReqwestClient::new(cli.http.clone()).context("invalid backend configuration")?;
        let store = cli.session.open_store().await?;
        let session =
            SessionService::from_parts(client.clone().into_transport(), SessionStorage::new(store));

        Ok(Self {
            api: TalentApi::new(client, session.clone()),
            context: SessionContext::new(session),
            printer: Printer::new(cli.json),
        })
    }

    /// Runs one command.
    pub async fn run(&self, command: &Command) -> anyhow::Result<()> {
        let user = match command.guard() {
            Some(guard) => Some(self.admit(guard).await?),
            None => None,
        };

        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            command = command.name(),
            user_id = user.as_ref().map(|user| user.id),
            "Running command"
        );

        match (command, user) {
            (Command::Login { username, password }, _) => self.login(username, password).await,
            (Command::Logout, _) => {
                self.api.session().logout().await;
                self.printer.message("Logged out")
            }
            (Command::Jobs { department }, _) => self.jobs(department.as_deref()).await,
            (Command::Whoami, Some(user)) => self.printer.user(&user),
            (Command::Applications { status, job, department }, Some(user)) => {
                let mut filter = ApplicationFilter::new();
                filter.status = *status;
                filter.job_title = job.clone();
                filter.department = department.clone();
                self.applications(&user, &filter).await
            }
            (Command::Interviews, Some(user)) => self.interviews(&user).await,
            (Command::Departments, Some(_)) => {
                let departments = self.api.list_departments().await?;
                self.printer.departments(&departments)
            }
            (Command::Dashboard, Some(user)) => {
                let dashboard = Dashboard::load(&self.api, &user).await?;
                self.printer.dashboard(&dashboard)
            }
            (command, None) => anyhow::bail!("{} requires a session", command.name()),
        }
    }

    async fn admit(&self, guard: RouteGuard) -> anyhow::Result<User> {
        match guard.check(self.api.session(), &self.context).await {
            GuardDecision::Render(user) => Ok(user),
            GuardDecision::Redirect(Destination::Login) => anyhow::bail!(
                "not logged in, run `talent login` first (redirected to {})",
                Destination::Login
            ),
            GuardDecision::Redirect(destination) => {
                anyhow::bail!("access denied for this account (redirected to {destination})")
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> anyhow::Result<()> {
        let user = self
            .api
            .session()
            .login(&Credentials::new(username, password))
            .await
            .context("login failed")?;

        tracing::info!(
            target: TRACING_TARGET_COMMAND,
            user_id = user.id,
            role = %user.role(),
            "Logged in"
        );

        self.printer.login(&user, landing_path(&user))
    }

    async fn jobs(&self, department: Option<&str>) -> anyhow::Result<()> {
        let jobs = match department {
            Some(department) => self.api.list_jobs_by_department(department).await?,
            None => self.api.list_jobs().await?,
        };
        self.printer.jobs(&talent_core::types::active_jobs(jobs))
    }

    async fn applications(&self, user: &User, filter: &ApplicationFilter) -> anyhow::Result<()> {
        let records = visible_applications(user, self.api.list_applications().await?);
        let records: Vec<_> = filter.apply(&records).into_iter().cloned().collect();
        self.printer.applications(&records)
    }

    async fn interviews(&self, user: &User) -> anyhow::Result<()> {
        let mut requests = self.api.list_interview_requests().await?;
        if user.role() == Role::Manager {
            requests.retain(|request| {
                request
                    .department_id
                    .is_none_or(|id| Some(id) == user.department_id)
            });
        }
        self.printer.interviews(&requests)
    }
}
