use clap::{Parser, Subcommand, ValueEnum};
use formdesk::model::{GenderTag, Nationality, PhoneCountry, Prefix};
use formdesk::table::SortColumn;

#[derive(Parser, Debug)]
#[command(name = "formdesk")]
#[command(about = "Personal-information form with a sortable record table", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fill in the form and submit it as a new record
    #[command(alias = "s")]
    Submit(SubmitArgs),

    /// List records as a table
    #[command(alias = "ls")]
    List {
        /// Column to sort by
        #[arg(short, long, value_enum)]
        sort: Option<SortArg>,

        /// Sort descending instead of ascending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page to show (5 records per page)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Delete one record
    #[command(alias = "rm")]
    Delete {
        /// Record key (a unique prefix is enough)
        key: String,
    },

    /// Select records and delete them together
    DeleteSelected {
        /// Record keys (unique prefixes are enough)
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
    },

    /// Delete every record
    Clear,

    /// Get or set configuration
    Config {
        /// Configuration key (storage-key, delete-scope)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct SubmitArgs {
    /// Title
    #[arg(long, value_enum)]
    pub prefix: Option<PrefixArg>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Birth date as DD/MM/YYYY
    #[arg(long)]
    pub birth_date: Option<String>,

    #[arg(long, value_enum)]
    pub nationality: Option<NationalityArg>,

    /// National ID card number
    #[arg(long)]
    pub id_card: Option<String>,

    /// Gender tag; repeat to select several
    #[arg(long, value_enum)]
    pub gender: Vec<GenderArg>,

    #[arg(long, value_enum)]
    pub phone_country: Option<PhoneCountryArg>,

    #[arg(long)]
    pub phone_number: Option<String>,

    #[arg(long)]
    pub passport: Option<String>,

    #[arg(long)]
    pub expected_salary: f64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PrefixArg {
    Mr,
    Mrs,
    Ms,
}

impl From<PrefixArg> for Prefix {
    fn from(arg: PrefixArg) -> Self {
        match arg {
            PrefixArg::Mr => Prefix::Mr,
            PrefixArg::Mrs => Prefix::Mrs,
            PrefixArg::Ms => Prefix::Ms,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum NationalityArg {
    Thai,
    French,
    American,
}

impl From<NationalityArg> for Nationality {
    fn from(arg: NationalityArg) -> Self {
        match arg {
            NationalityArg::Thai => Nationality::Thai,
            NationalityArg::French => Nationality::French,
            NationalityArg::American => Nationality::American,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GenderArg {
    Male,
    Female,
    Unsex,
}

impl From<GenderArg> for GenderTag {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => GenderTag::Male,
            GenderArg::Female => GenderTag::Female,
            GenderArg::Unsex => GenderTag::Unsex,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PhoneCountryArg {
    Th,
    Us,
    Fr,
}

impl From<PhoneCountryArg> for PhoneCountry {
    fn from(arg: PhoneCountryArg) -> Self {
        match arg {
            PhoneCountryArg::Th => PhoneCountry::Th,
            PhoneCountryArg::Us => PhoneCountry::Us,
            PhoneCountryArg::Fr => PhoneCountry::Fr,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SortArg {
    FirstName,
    LastName,
    Gender,
    Nationality,
}

impl From<SortArg> for SortColumn {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::FirstName => SortColumn::FirstName,
            SortArg::LastName => SortColumn::LastName,
            SortArg::Gender => SortColumn::Gender,
            SortArg::Nationality => SortColumn::Nationality,
        }
    }
}
