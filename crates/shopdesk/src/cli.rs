//! Clap derive structures for the `shopdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shopdesk -- manage shops, staff, rotas and payroll from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "shopdesk",
    version,
    about = "Manage shops, employees, rotas and payouts from the command line",
    long_about = "Command-line client for the shopdesk CRM backend.\n\n\
        Platform admins manage shops and shop admins; shop admins manage\n\
        employees, rotas, punchings, salaries and payouts.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "SHOPDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend API root (overrides profile)
    #[arg(long, env = "SHOPDESK_API_ROOT", global = true)]
    pub api_root: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SHOPDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "SHOPDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, env = "SHOPDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session for this profile
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the logged-in identity
    Whoami,

    /// Manage shops
    #[command(alias = "shop")]
    Shops(ShopsArgs),

    /// Manage employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Manage shift rotas
    Rotas(RotasArgs),

    /// Punch employees in and out
    #[command(alias = "punch")]
    Punchings(PunchingsArgs),

    /// Record and review payouts
    Payouts(PayoutsArgs),

    /// Manage shop administrators
    Admins(AdminsArgs),

    /// Salary calculations and reports
    Salary(SalaryArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Prompt for the password even when one is configured
    #[arg(long)]
    pub prompt: bool,
}

// ── Shared arguments ─────────────────────────────────────────────────

/// Inclusive date range for salary queries.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShopsArgs {
    #[command(subcommand)]
    pub command: ShopsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShopsCommand {
    /// List all shops
    #[command(alias = "ls")]
    List,

    /// Show one shop
    Get {
        /// Shop ID
        id: String,
    },

    /// Create a shop
    Create(ShopCreateArgs),

    /// Update a shop; only the given fields are sent
    Update(ShopUpdateArgs),

    /// Delete a shop
    #[command(alias = "rm")]
    Delete {
        /// Shop ID
        id: String,
    },

    /// Dashboard for the logged-in shop admin's shop
    Dashboard,
}

#[derive(Debug, Args)]
pub struct ShopCreateArgs {
    #[arg(long)]
    pub name: String,

    /// Logo image file
    #[arg(long)]
    pub logo: PathBuf,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub site: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub rent: Option<f64>,

    #[arg(long)]
    pub bills: Option<f64>,

    /// Opening time (HH:MM)
    #[arg(long)]
    pub open_time: String,

    /// Closing time (HH:MM)
    #[arg(long)]
    pub close_time: String,

    /// Shop admin to assign
    #[arg(long)]
    pub admin: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShopUpdateArgs {
    /// Shop ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    /// Replacement logo image file
    #[arg(long)]
    pub logo: Option<PathBuf>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub site: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub rent: Option<f64>,

    #[arg(long)]
    pub bills: Option<f64>,

    #[arg(long)]
    pub open_time: Option<String>,

    #[arg(long)]
    pub close_time: Option<String>,

    #[arg(long)]
    pub admin: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List,

    /// Show one employee
    Get {
        /// Employee ID
        id: String,
    },

    /// Add an employee
    Create(EmployeeCreateArgs),

    /// Update an employee; only the given fields are sent
    Update(EmployeeUpdateArgs),

    /// Remove an employee
    #[command(alias = "rm")]
    Delete {
        /// Employee ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct EmployeeCreateArgs {
    #[arg(long)]
    pub name: String,

    /// Pay type: hourly or daily
    #[arg(long)]
    pub pay_type: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    /// National Insurance number
    #[arg(long)]
    pub ni_number: Option<String>,

    /// Right-to-work share code
    #[arg(long)]
    pub share_code: Option<String>,

    #[arg(long)]
    pub shift_timing: Option<String>,

    #[arg(long)]
    pub hourly_rate: Option<f64>,

    #[arg(long)]
    pub daily_rate: Option<f64>,

    #[arg(long)]
    pub custom_hourly_rate: Option<f64>,

    #[arg(long)]
    pub custom_daily_rate: Option<f64>,

    #[arg(long)]
    pub shop: Option<String>,
}

#[derive(Debug, Args)]
pub struct EmployeeUpdateArgs {
    /// Employee ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub pay_type: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub ni_number: Option<String>,

    #[arg(long)]
    pub share_code: Option<String>,

    #[arg(long)]
    pub shift_timing: Option<String>,

    #[arg(long)]
    pub hourly_rate: Option<f64>,

    #[arg(long)]
    pub daily_rate: Option<f64>,

    #[arg(long)]
    pub custom_hourly_rate: Option<f64>,

    #[arg(long)]
    pub custom_daily_rate: Option<f64>,

    #[arg(long)]
    pub shop: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROTAS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RotasArgs {
    #[command(subcommand)]
    pub command: RotasCommand,
}

#[derive(Debug, Subcommand)]
pub enum RotasCommand {
    /// List rotas
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        shop: Option<String>,

        #[arg(long)]
        employee: Option<String>,
    },

    /// Schedule a shift
    Create {
        #[arg(long)]
        employee: String,

        #[arg(long)]
        shop: String,

        /// Shift date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Start time (HH:MM)
        #[arg(long)]
        start: String,

        /// End time (HH:MM)
        #[arg(long)]
        end: String,

        #[arg(long)]
        note: Option<String>,
    },

    /// Change a scheduled shift
    Update {
        /// Rota ID
        id: String,

        #[arg(long)]
        employee: Option<String>,

        #[arg(long)]
        shop: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        start: Option<String>,

        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Cancel a shift
    #[command(alias = "rm")]
    Delete {
        /// Rota ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PUNCHINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PunchingsArgs {
    #[command(subcommand)]
    pub command: PunchingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PunchingsCommand {
    /// List punchings
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        shop: Option<String>,

        #[arg(long)]
        employee: Option<String>,
    },

    /// Punch an employee in now
    In(PunchArgs),

    /// Punch an employee out now
    Out(PunchArgs),
}

#[derive(Debug, Args)]
pub struct PunchArgs {
    #[arg(long)]
    pub employee: String,

    #[arg(long)]
    pub shop: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PAYOUTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PayoutsArgs {
    #[command(subcommand)]
    pub command: PayoutsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PayoutsCommand {
    /// List payouts
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        employee: Option<String>,
    },

    /// Record a payout
    Create {
        #[arg(long)]
        employee: String,

        #[arg(long)]
        amount: f64,

        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// First day the payout covers
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day the payout covers
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Delete a payout
    #[command(alias = "rm")]
    Delete {
        /// Payout ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ADMINS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AdminsArgs {
    #[command(subcommand)]
    pub command: AdminsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AdminsCommand {
    /// List shop admins with their shops
    #[command(alias = "ls")]
    List,

    /// Create a shop admin (prompts for the password)
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Role to assign (defaults to the backend's choice)
        #[arg(long)]
        role: Option<String>,
    },

    /// Update a shop admin
    Update {
        /// Admin ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },

    /// Delete a shop admin
    #[command(alias = "rm")]
    Delete {
        /// Admin ID
        id: String,
    },

    /// Admins not assigned to any shop
    Unassigned,

    /// Platform-wide counters
    Stats,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SALARY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SalaryArgs {
    #[command(subcommand)]
    pub command: SalaryCommand,
}

#[derive(Debug, Subcommand)]
pub enum SalaryCommand {
    /// Salary for every employee over a range
    Overview(RangeArgs),

    /// Daily breakdown for one employee
    Summary {
        /// Employee ID
        id: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Backend salary calculation for one employee
    Calc {
        /// Employee ID
        id: String,

        #[command(flatten)]
        range: RangeArgs,
    },

    /// Write a salary summary document to disk
    Export {
        /// Employee ID
        id: String,

        #[command(flatten)]
        range: RangeArgs,

        /// Document format
        #[arg(long, default_value = "text")]
        format: ReportFormat,

        /// Target directory (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Fixed-width text
    Text,
    /// Pretty-printed JSON
    Json,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the resolved configuration (secrets masked)
    Show,

    /// Print the configuration file path
    Path,

    /// Store the profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
